use serde::{Deserialize, Serialize};

/// Type of a workflow step, as exposed in the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Categorize,
    AnalyzeSentiment,
    Route,
    Handle,
}

/// One record per executed step, in execution order.
///
/// `input_data` and `output_data` are JSON objects snapshotting the context
/// fields the step read and wrote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub step_name: String,
    pub step_type: StepKind,
    pub input_data: serde_json::Value,
    pub output_data: serde_json::Value,
    pub description: String,
}

/// Final outward record of one workflow execution.
///
/// On failure, `category`/`sentiment`/`response` are empty, `workflow_steps`
/// is empty, and `error_message` carries the failure description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowResult {
    pub query: String,
    pub category: String,
    pub sentiment: String,
    pub response: String,
    pub workflow_steps: Vec<AuditEntry>,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl WorkflowResult {
    /// Build the failure shape for a query: empty fields, empty trail.
    pub fn failure(query: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            category: String::new(),
            sentiment: String::new(),
            response: String::new(),
            workflow_steps: Vec::new(),
            success: false,
            error_message: Some(message.into()),
        }
    }
}
