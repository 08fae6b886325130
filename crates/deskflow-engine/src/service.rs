use std::sync::Arc;

use tracing::{error, info};

use deskflow_core::error::Result;
use deskflow_core::traits::CompletionClient;
use deskflow_core::types::WorkflowResult;

use crate::executor::WorkflowEngine;
use crate::graph::WorkflowGraph;

/// Facade over the workflow engine: one query in, one [`WorkflowResult`]
/// out, never an error.
pub struct SupportService {
    completions: Arc<dyn CompletionClient>,
    engine: WorkflowEngine,
}

impl SupportService {
    pub fn new(completions: Arc<dyn CompletionClient>) -> Result<Self> {
        let graph = WorkflowGraph::customer_support()?;
        Ok(Self {
            completions,
            engine: WorkflowEngine::new(graph),
        })
    }

    /// Run one query through the workflow.
    ///
    /// Engine-level failures are normalized into a failure-shaped result:
    /// success=false, empty category/sentiment/response, empty audit trail,
    /// non-empty error message.
    pub async fn handle(&self, query: &str) -> WorkflowResult {
        info!(query = %query, "Processing support query");

        match self.engine.execute(self.completions.as_ref(), query).await {
            Ok(execution) => WorkflowResult {
                query: query.to_string(),
                category: execution.context.category,
                sentiment: execution.context.sentiment,
                response: execution.context.response,
                workflow_steps: execution.trail,
                success: true,
                error_message: None,
            },
            Err(e) => {
                error!(error = %e, "Support query processing failed");
                WorkflowResult::failure(query, e.to_string())
            }
        }
    }
}

/// Service readiness, decided once at startup and passed by handle into the
/// request path. An unready service is a precondition failure, distinct
/// from a per-request failure.
pub enum ServiceState {
    NotReady { reason: String },
    Ready(SupportService),
}

impl ServiceState {
    /// Validate the completion service with one probe call, then build the
    /// workflow. A failure leaves the service NotReady; the process keeps
    /// running and reports degraded health.
    pub async fn initialize(completions: Arc<dyn CompletionClient>) -> Self {
        if let Err(e) = completions.complete("Hello").await {
            error!(error = %e, "Completion service validation failed");
            return Self::NotReady {
                reason: e.to_string(),
            };
        }

        match SupportService::new(completions) {
            Ok(service) => {
                info!("Customer support workflow initialized successfully");
                Self::Ready(service)
            }
            Err(e) => {
                error!(error = %e, "Failed to initialize workflow");
                Self::NotReady {
                    reason: e.to_string(),
                }
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::steps::ESCALATION_MESSAGE;
    use crate::test_support::{FailAfterCategorize, FailingClient, ScriptedClient};

    #[tokio::test]
    async fn test_successful_query_populates_all_fields() {
        let service = SupportService::new(Arc::new(ScriptedClient::new(
            "Technical",
            "Neutral",
            "Try rebooting.",
        )))
        .unwrap();

        let result = service.handle("My internet is down").await;
        assert!(result.success);
        assert_eq!(result.query, "My internet is down");
        assert_eq!(result.category, "Technical");
        assert_eq!(result.sentiment, "Neutral");
        assert_eq!(result.response, "Try rebooting.");
        assert_eq!(result.workflow_steps.len(), 4);
        assert!(result.error_message.is_none());
    }

    #[tokio::test]
    async fn test_failure_never_leaks_a_partial_trail() {
        let service = SupportService::new(Arc::new(FailAfterCategorize::new())).unwrap();

        let result = service.handle("a query").await;
        assert!(!result.success);
        assert!(result.category.is_empty());
        assert!(result.sentiment.is_empty());
        assert!(result.response.is_empty());
        assert!(result.workflow_steps.is_empty());
        let message = result.error_message.expect("error message present");
        assert!(!message.is_empty());
    }

    #[tokio::test]
    async fn test_escalated_query_returns_fixed_message() {
        let service = SupportService::new(Arc::new(ScriptedClient::new(
            "General",
            "Negative",
            "unused",
        )))
        .unwrap();

        let result = service.handle("This is unacceptable, I'm furious").await;
        assert!(result.success);
        assert_eq!(result.response, ESCALATION_MESSAGE);
        assert_eq!(result.workflow_steps[3].step_name, "escalate");
    }

    #[tokio::test]
    async fn test_initialize_not_ready_when_probe_fails() {
        let state = ServiceState::initialize(Arc::new(FailingClient::new("HTTP 401: bad key"))).await;
        match state {
            ServiceState::NotReady { reason } => assert!(reason.contains("401")),
            ServiceState::Ready(_) => panic!("expected NotReady"),
        }
    }

    #[tokio::test]
    async fn test_initialize_ready_when_probe_succeeds() {
        let state = ServiceState::initialize(Arc::new(ScriptedClient::new(
            "General",
            "Neutral",
            "Hi there!",
        )))
        .await;
        assert!(state.is_ready());
    }
}
