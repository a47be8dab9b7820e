use anyhow::{Context, Result};
use clap::Parser;
use uuid::Uuid;

use bloglist_api::services::auth::TokenCodec;

/// Mint an HS256 bearer token for a user id, signed with the API's `SECRET`.
///
/// For local testing only; real tokens come from the identity service.
///
///   TOKEN=$(token-gen --user-id <uuid>)
///   curl -H "Authorization: Bearer $TOKEN" -d '{"title":"t","url":"u"}' \
///        -H 'content-type: application/json' localhost:3003/api/v1/blogs
#[derive(Parser, Debug)]
#[command(name = "token-gen", version, about)]
struct Args {
    /// Subject (users."userId")
    #[arg(long)]
    user_id: Uuid,

    /// Shared HS256 secret
    #[arg(long, env = "SECRET", hide_env_values = true)]
    secret: String,

    /// Lifetime in seconds
    #[arg(long, default_value_t = 3600)]
    ttl: u64,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let codec = TokenCodec::new(&args.secret, 0);
    let token = codec
        .issue(args.user_id, args.ttl)
        .context("failed to sign token")?;

    println!("{token}");
    Ok(())
}
