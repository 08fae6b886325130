use std::sync::Arc;

use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use deskflow_core::config::GatewayConfig;
use deskflow_engine::ServiceState;

use crate::routes;
use crate::state::AppState;

/// HTTP gateway server built on axum.
pub struct GatewayServer {
    state: Arc<AppState>,
}

impl GatewayServer {
    pub fn new(config: GatewayConfig, service: ServiceState) -> Self {
        Self {
            state: Arc::new(AppState { config, service }),
        }
    }

    /// Run the gateway server until the cancellation token is triggered.
    pub async fn run(&self, shutdown: CancellationToken) -> anyhow::Result<()> {
        let app = Router::new()
            .route("/", get(routes::root))
            .route("/health", get(routes::health))
            .route("/support", post(routes::support))
            .layer(cors_layer(&self.state.config))
            .with_state(self.state.clone());

        let listener = TcpListener::bind(&self.state.config.bind).await?;
        info!(bind = %self.state.config.bind, "Gateway listening");

        axum::serve(listener, app)
            .with_graceful_shutdown(async move { shutdown.cancelled().await })
            .await?;

        info!("Gateway shut down");
        Ok(())
    }
}

fn cors_layer(config: &GatewayConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}
