/*
 * Responsibility
 * - tracing / panic hook の初期化
 * - Config 読み込み → 依存生成 (PgPool, IdCodec, AuthPipeline, Argon2Hasher) → Router 組み立て
 * - Middleware の適用 (HTTP / CORS)
 * - axum::serve() で起動, ctrl-c で graceful shutdown
 */
use std::{panic, process, sync::Arc};

use anyhow::{Context, Result};
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    api,
    config::Config,
    middleware,
    services::{auth::build_auth_pipeline, id_codec::IdCodec, password::Argon2Hasher},
    state::AppState,
};

fn init_tracing() {
    // RUST_LOG=info,bloglist_api=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // development: crash the whole process so it gets noticed
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;
    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting bloglist API in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config).await?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn build_state(config: &Config) -> Result<AppState> {
    let db = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .context("failed to connect to DATABASE_URL")?;

    let id_codec = IdCodec::new(config.sqids_min_length, &config.sqids_alphabet)?;
    let auth = build_auth_pipeline(config, db.clone());

    Ok(AppState::new(
        db,
        id_codec,
        auth,
        Arc::new(Argon2Hasher::default()),
    ))
}

fn build_router(state: AppState, config: &Config) -> Router {
    let router = Router::new()
        .nest("/api/v1", api::v1::routes())
        .with_state(state);

    let router = middleware::cors::apply(router, config);
    middleware::http::apply(router, config)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
    };
    use tower::ServiceExt;
    use uuid::Uuid;

    use super::*;

    // No test reaches the database: every request below is answered before a query runs.
    fn test_app() -> (Router, AppState) {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("DATABASE_URL", "postgres://bloglist@localhost:1/bloglist_test"),
            ("SECRET", "router-test-secret"),
        ]);
        let config = Config::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();

        let db = PgPoolOptions::new()
            .connect_lazy(&config.database_url)
            .unwrap();
        let id_codec = IdCodec::new(config.sqids_min_length, &config.sqids_alphabet).unwrap();
        let state = AppState::new(
            db.clone(),
            id_codec,
            build_auth_pipeline(&config, db),
            Arc::new(Argon2Hasher::default()),
        );

        (build_router(state.clone(), &config), state)
    }

    #[tokio::test]
    async fn health_is_open() {
        let (app, _) = test_app();

        let res = app
            .oneshot(Request::get("/api/v1/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn create_without_token_is_unauthorized() {
        let (app, _) = test_app();

        let req = Request::post("/api/v1/blogs")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                r#"{"title":"Best photos ever","author":"Aazreen","url":"www.canva.com","likes":2}"#,
            ))
            .unwrap();
        let res = app.oneshot(req).await.unwrap();

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn create_with_forged_token_is_unauthorized() {
        let (app, _) = test_app();
        let forged = crate::services::auth::TokenCodec::new("not-the-secret", 0)
            .issue(Uuid::new_v4(), 3600)
            .unwrap();

        let req = Request::post("/api/v1/blogs")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, format!("bearer {forged}"))
            .body(Body::from(r#"{"title":"t","url":"u"}"#))
            .unwrap();
        let res = app.oneshot(req).await.unwrap();

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn malformed_blog_id_is_bad_request() {
        let (app, _) = test_app();

        let req = Request::delete("/api/v1/blogs/!!!")
            .body(Body::empty())
            .unwrap();
        let res = app.oneshot(req).await.unwrap();

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn negative_likes_update_is_bad_request() {
        let (app, state) = test_app();
        let public_id = state.id_codec.encode(1).unwrap();

        let req = Request::put(format!("/api/v1/blogs/{public_id}"))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"likes":-5}"#))
            .unwrap();
        let res = app.oneshot(req).await.unwrap();

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    async fn error_code(res: axum::response::Response) -> String {
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        body["error"]["code"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn text_likes_update_is_invalid_likes() {
        let (app, state) = test_app();
        let public_id = state.id_codec.encode(1).unwrap();

        for likes in [r#""abc""#, "1.5"] {
            let req = Request::put(format!("/api/v1/blogs/{public_id}"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(format!(r#"{{"likes":{likes}}}"#)))
                .unwrap();
            let res = app.clone().oneshot(req).await.unwrap();

            assert_eq!(res.status(), StatusCode::BAD_REQUEST);
            assert_eq!(error_code(res).await, "INVALID_LIKES");
        }
    }

    #[tokio::test]
    async fn create_with_text_likes_and_no_token_is_unauthorized() {
        let (app, _) = test_app();

        let req = Request::post("/api/v1/blogs")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"title":"t","url":"u","likes":"abc"}"#))
            .unwrap();
        let res = app.oneshot(req).await.unwrap();

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn broken_json_is_bad_request_with_error_body() {
        let (app, _) = test_app();

        let req = Request::post("/api/v1/blogs")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"title":"#))
            .unwrap();
        let res = app.oneshot(req).await.unwrap();

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_code(res).await, "INVALID_BODY");
    }

    // The pool points at a closed port: reaching the database would be a 500.
    #[tokio::test]
    async fn delete_checks_token_before_lookup() {
        let (app, state) = test_app();
        let public_id = state.id_codec.encode(7).unwrap();

        let req = Request::delete(format!("/api/v1/blogs/{public_id}"))
            .body(Body::empty())
            .unwrap();
        let res = app.oneshot(req).await.unwrap();

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn registration_rejects_missing_and_short_passwords() {
        let (app, _) = test_app();

        for (body, code) in [
            (r#"{"username":"root"}"#, "MISSING_REQUIRED_FIELD"),
            (r#"{"password":"sekret"}"#, "MISSING_REQUIRED_FIELD"),
            (r#"{"username":"root","password":"ab"}"#, "PASSWORD_TOO_SHORT"),
        ] {
            let req = Request::post("/api/v1/users")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap();
            let res = app.clone().oneshot(req).await.unwrap();

            assert_eq!(res.status(), StatusCode::BAD_REQUEST, "{body}");
            assert_eq!(error_code(res).await, code);
        }
    }
}
