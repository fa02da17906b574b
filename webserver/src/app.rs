use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use axum::error_handling::HandleErrorLayer;
use axum::http::{HeaderValue, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{BoxError, Json, Router};
use lazy_static::lazy_static;
use serde_json::json;
use tower::buffer::BufferLayer;
use tower::limit::RateLimitLayer;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::appstate::AppState;
use crate::config::AppConfig;
use crate::handler::{
    account as account_handlers, block as block_handlers,
    staking as staking_handlers, transaction as transaction_handlers,
    validator as validator_handlers,
};
use crate::state::common::CommonState;

lazy_static! {
    static ref HTTP_TIMEOUT: u64 = 60;
    static ref REQ_PER_SEC: u64 = u64::MAX;
}

pub struct ApplicationServer;

impl ApplicationServer {
    pub async fn serve(config: Arc<AppConfig>) -> anyhow::Result<()> {
        let db_url = config.database_url.clone();

        let app_state = AppState::new(db_url);

        let routes = {
            let common_state = CommonState::new(app_state);

            Router::new()
                .route("/blocks/:height", get(block_handlers::get_block_by_height))
                .route(
                    "/block_times/:limit",
                    get(block_handlers::get_block_times),
                )
                .route(
                    "/block_times_interval/:interval",
                    get(block_handlers::get_block_times_for_interval),
                )
                .route(
                    "/transactions/:height",
                    get(transaction_handlers::get_transactions_by_height),
                )
                .route(
                    "/validators/:height",
                    get(validator_handlers::get_validators_by_height),
                )
                .route(
                    "/staking/:height",
                    get(staking_handlers::get_staking_by_height),
                )
                .route(
                    "/delegations/:height",
                    get(staking_handlers::get_delegations_by_height),
                )
                .route(
                    "/debonding_delegations/:height",
                    get(staking_handlers::get_debonding_delegations_by_height),
                )
                .route(
                    "/accounts/:public_key",
                    get(account_handlers::get_account_by_public_key),
                )
                .with_state(common_state)
        };

        let cors = CorsLayer::new()
            .allow_origin("*".parse::<HeaderValue>().unwrap())
            .allow_methods(Any)
            .allow_headers(Any);

        let router = Router::new()
            .merge(routes)
            .merge(
                Router::new()
                    .route("/ping", get(|| async { Json(json!({"ping": "pong"})) })),
            )
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(HandleErrorLayer::new(Self::handle_timeout_error))
                    .timeout(Duration::from_secs(*HTTP_TIMEOUT))
                    .layer(cors)
                    .layer(BufferLayer::new(4096))
                    .layer(RateLimitLayer::new(
                        *REQ_PER_SEC,
                        Duration::from_secs(1),
                    )),
            );

        let router = router.fallback(Self::handle_404);

        let port = config.port;
        let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, port));

        tracing::info!("server has launched on {addr}");

        axum::Server::bind(&addr)
            .serve(router.into_make_service())
            .with_graceful_shutdown(Self::shutdown_signal())
            .await
            .unwrap_or_else(|e| panic!("Server error: {}", e));

        Ok(())
    }

    async fn handle_timeout_error(
        err: BoxError,
    ) -> (StatusCode, Json<serde_json::Value>) {
        if err.is::<tower::timeout::error::Elapsed>() {
            (
                StatusCode::REQUEST_TIMEOUT,
                Json(json!({
                    "error":
                        format!(
                            "request took longer than the configured {} second timeout",
                            *HTTP_TIMEOUT
                        )
                })),
            )
        } else {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": format!("unhandled internal error: {}", err)
                })),
            )
        }
    }

    async fn shutdown_signal() {
        tokio::signal::ctrl_c()
            .await
            .expect("expect tokio signal ctrl-c");
        tracing::warn!("signal shutdown");
    }

    async fn handle_404() -> impl IntoResponse {
        (
            StatusCode::NOT_FOUND,
            axum::response::Json(serde_json::json!({
                "errors": {
                    "message": vec!(String::from(
                        "The requested resource does not exist on this server!"
                    )),
                }
            })),
        )
    }
}
