//! # Days API Server
//!
use crate::clock::Clock;
use crate::metrics::ServerMetrics;
use crate::shutdown::ShutdownCoordinator;
use axum::{Json, Router, http::StatusCode};
use request_history::HistoryLog;
use serde_json::json;
use std::sync::Arc;
use telemetry::metrics::Telemetry;
use tower_http::{
    catch_panic::CatchPanicLayer, compression::CompressionLayer,
    trace::TraceLayer,
};

// Private API modules - internal implementation details
mod days_api;
pub mod shutdown;

// OpenAPI documentation module
pub mod openapi;

// Public modules - shared utilities and middleware
pub mod clock;
pub mod health;
pub mod metrics;
pub mod shared;

pub use days_api::core::v1::get_routes as get_days_api_v1_routes;

pub const VERSION: Option<&'static str> = option_env!("VERSION");

/// Returns the OpenAPI document route
pub fn get_openapi_routes() -> Router {
    use axum::routing::get;

    async fn openapi_handler() -> Json<utoipa::openapi::OpenApi> {
        Json(openapi::DaysV1ApiDoc::openapi())
    }

    Router::new().route("/api-docs/openapi.json", get(openapi_handler))
}

async fn fallback_handler() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "The requested endpoint does not exist"
        })),
    )
}

/// Assembles the full application router: operational endpoints, the v1
/// date routes, OpenAPI and the HTTP middleware stack.
pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", {
            let state = app_state.clone();
            axum::routing::get(move || {
                let state = state.clone();
                async move { health::handler(state).await }
            })
        })
        .route(
            "/version",
            axum::routing::get(|| async { VERSION.unwrap_or("unknown") }),
        )
        .route("/metrics", {
            let telemetry = app_state.telemetry.clone();
            axum::routing::get(move || {
                let telemetry = telemetry.clone();
                async move {
                    (
                        StatusCode::OK,
                        [(
                            axum::http::header::CONTENT_TYPE,
                            "text/plain; charset=utf-8",
                        )],
                        telemetry.get_metrics(),
                    )
                }
            })
        })
        .merge(get_days_api_v1_routes(app_state))
        .merge(get_openapi_routes())
        .fallback(fallback_handler)
        .layer(tower_http::cors::CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CatchPanicLayer::new())
}

#[derive(Clone)]
pub struct AppState {
    pub telemetry: Arc<Telemetry<ServerMetrics>>,
    pub history: HistoryLog,
    pub clock: Arc<dyn Clock>,
    pub config: Arc<Config>,
    pub shutdown: Arc<ShutdownCoordinator>,
}

impl AppState {
    pub fn new(
        config: Config,
        clock: Arc<dyn Clock>,
        telemetry: Arc<Telemetry<ServerMetrics>>,
    ) -> Self {
        let history = HistoryLog::with_retention(config.history_retention);
        let shutdown = Arc::new(ShutdownCoordinator::new(history.clone()));

        Self {
            telemetry,
            history,
            clock,
            config: Arc::new(config),
            shutdown,
        }
    }
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    // Service port
    #[serde(default = "Config::default_port")]
    pub api_service_port: u16,

    // Loggers
    #[serde(default = "Config::default_rust_log")]
    pub rust_log: String,
    #[serde(default)]
    pub log_format: String,

    // Number of history records kept in memory
    #[serde(default = "Config::default_history_retention")]
    pub history_retention: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_service_port: Self::default_port(),
            rust_log: Self::default_rust_log(),
            log_format: String::new(),
            history_retention: Self::default_history_retention(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, envy::Error> {
        // Load .env file if present
        match dotenv::dotenv() {
            Ok(path) => eprintln!("Loaded .env from: {}", path.display()),
            Err(e) => eprintln!("dotenv warning: {e}"),
        }

        envy::from_env::<Config>()
    }

    fn default_port() -> u16 {
        8080
    }

    fn default_rust_log() -> String {
        "info".to_string()
    }

    fn default_history_retention() -> usize {
        request_history::DEFAULT_RETENTION
    }
}
