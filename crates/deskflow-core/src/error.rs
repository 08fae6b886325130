use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeskflowError {
    // Completion service errors
    #[error("Completion request failed: {0}")]
    CompletionRequest(String),

    #[error("Completion response parse error: {0}")]
    CompletionParse(String),

    // Workflow errors
    #[error("Step '{step}' failed: {message}")]
    StepFailed { step: String, message: String },

    #[error("Step not found in workflow: {0}")]
    StepNotFound(String),

    #[error("No edge from '{from}' to routed step '{to}'")]
    EdgeNotFound { from: String, to: String },

    // Config errors
    #[error("Config error: {0}")]
    Config(String),

    #[error("Config file not found: {0}")]
    ConfigNotFound(String),

    // Gateway errors
    #[error("Gateway error: {0}")]
    Gateway(String),

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DeskflowError>;
