use deskflow_core::config::GatewayConfig;
use deskflow_engine::ServiceState;

/// Shared application state for axum handlers.
///
/// `service` is built once at startup; handlers only ever read it.
pub struct AppState {
    pub config: GatewayConfig,
    pub service: ServiceState,
}
