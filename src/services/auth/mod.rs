pub mod directory;
pub mod factory;
pub mod pipeline;
pub mod token_codec;

pub use directory::{PgUserDirectory, UserDirectory};
pub use factory::build_auth_pipeline;
pub use pipeline::{AuthDecision, AuthPipeline, DenyReason, InvalidTokenKind};
pub use token_codec::{TokenClaims, TokenCodec, TokenError};
