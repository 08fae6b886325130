pub mod openai;
pub mod retry;

use std::sync::Arc;

use deskflow_core::config::ModelConfig;
use deskflow_core::traits::CompletionClient;

pub use openai::OpenAiClient;
pub use retry::RetryingClient;

/// Create a completion client from the model configuration.
///
/// When a `[model.retry]` section is present, the client is wrapped with
/// retry-with-backoff; otherwise a failed call fails immediately.
pub fn create_client(config: &ModelConfig) -> Arc<dyn CompletionClient> {
    let client = OpenAiClient::new(config.clone());
    match &config.retry {
        Some(retry) => Arc::new(RetryingClient::new(Box::new(client), retry.clone())),
        None => Arc::new(client),
    }
}
