use futures::future::BoxFuture;
use serde_json::json;

use deskflow_core::error::Result;
use deskflow_core::traits::CompletionClient;
use deskflow_core::types::StepKind;

use crate::context::{ContextUpdate, SupportContext};

// Step names as they appear in the audit trail.
pub const CATEGORIZE: &str = "categorize";
pub const ANALYZE_SENTIMENT: &str = "analyze_sentiment";
pub const HANDLE_TECHNICAL: &str = "handle_technical";
pub const HANDLE_BILLING: &str = "handle_billing";
pub const HANDLE_GENERAL: &str = "handle_general";
pub const ESCALATE: &str = "escalate";
pub const ROUTE_QUERY: &str = "route_query";

/// Fixed response for escalated queries. No completion call is made.
pub const ESCALATION_MESSAGE: &str = "This query has been escalated to a human agent due to its \
    negative sentiment. A member of our support team will contact you shortly to address your \
    concerns personally.";

/// Outcome of one step: the partial context update plus the audit snapshots.
///
/// If the step's operation fails, none of this exists — the update is never
/// partially applied and no audit entry is recorded.
#[derive(Debug)]
pub struct StepExecution {
    pub update: ContextUpdate,
    pub input_data: serde_json::Value,
    pub output_data: serde_json::Value,
    pub description: String,
}

/// One named unit of work in the workflow graph.
pub trait WorkflowStep: Send + Sync + 'static {
    /// Step name as it appears in the audit trail.
    fn name(&self) -> &'static str;

    /// Audit classification for this step.
    fn kind(&self) -> StepKind;

    /// Run the step against the current context.
    fn run<'a>(
        &'a self,
        context: &'a SupportContext,
        completions: &'a dyn CompletionClient,
    ) -> BoxFuture<'a, Result<StepExecution>>;
}

/// Classify the query into Technical, Billing, or General.
///
/// The completion text is trimmed but otherwise stored as-is — the label set
/// is not enforced, and an unrecognized category routes to `handle_general`.
pub struct Categorize;

impl WorkflowStep for Categorize {
    fn name(&self) -> &'static str {
        CATEGORIZE
    }

    fn kind(&self) -> StepKind {
        StepKind::Categorize
    }

    fn run<'a>(
        &'a self,
        context: &'a SupportContext,
        completions: &'a dyn CompletionClient,
    ) -> BoxFuture<'a, Result<StepExecution>> {
        Box::pin(async move {
            let prompt = format!(
                "Categorize the following customer query into one of these categories: \
                 Technical, Billing, General. Respond with only the category name. Query: {}",
                context.query
            );
            let category = completions.complete(&prompt).await?.trim().to_string();

            Ok(StepExecution {
                input_data: json!({ "query": context.query.clone() }),
                output_data: json!({ "category": category.clone() }),
                description: format!("Categorized customer query as: {}", category),
                update: ContextUpdate::category(category),
            })
        })
    }
}

/// Classify the sentiment of the query as Positive, Neutral, or Negative.
pub struct AnalyzeSentiment;

impl WorkflowStep for AnalyzeSentiment {
    fn name(&self) -> &'static str {
        ANALYZE_SENTIMENT
    }

    fn kind(&self) -> StepKind {
        StepKind::AnalyzeSentiment
    }

    fn run<'a>(
        &'a self,
        context: &'a SupportContext,
        completions: &'a dyn CompletionClient,
    ) -> BoxFuture<'a, Result<StepExecution>> {
        Box::pin(async move {
            let prompt = format!(
                "Analyze the sentiment of the following customer query. \
                 Respond with either 'Positive', 'Neutral', or 'Negative'. Query: {}",
                context.query
            );
            let sentiment = completions.complete(&prompt).await?.trim().to_string();

            Ok(StepExecution {
                input_data: json!({ "query": context.query.clone() }),
                output_data: json!({ "sentiment": sentiment.clone() }),
                description: format!("Analyzed sentiment as: {}", sentiment),
                update: ContextUpdate::sentiment(sentiment),
            })
        })
    }
}

/// A prompt-backed handler step producing the customer-facing response.
///
/// The completion text is stored unmodified.
pub struct HandleStep {
    name: &'static str,
    prompt_prefix: &'static str,
    description: &'static str,
}

impl HandleStep {
    pub fn technical() -> Self {
        Self {
            name: HANDLE_TECHNICAL,
            prompt_prefix: "Provide a helpful technical support response to the following \
                query. Be professional, clear, and offer specific steps when possible: ",
            description: "Generated technical support response",
        }
    }

    pub fn billing() -> Self {
        Self {
            name: HANDLE_BILLING,
            prompt_prefix: "Provide a helpful billing support response to the following \
                query. Be professional and guide the customer to resolve their billing issue: ",
            description: "Generated billing support response",
        }
    }

    pub fn general() -> Self {
        Self {
            name: HANDLE_GENERAL,
            prompt_prefix: "Provide a helpful general support response to the following \
                query. Be professional, friendly, and provide useful information: ",
            description: "Generated general support response",
        }
    }
}

impl WorkflowStep for HandleStep {
    fn name(&self) -> &'static str {
        self.name
    }

    fn kind(&self) -> StepKind {
        StepKind::Handle
    }

    fn run<'a>(
        &'a self,
        context: &'a SupportContext,
        completions: &'a dyn CompletionClient,
    ) -> BoxFuture<'a, Result<StepExecution>> {
        Box::pin(async move {
            let prompt = format!("{}{}", self.prompt_prefix, context.query);
            let response = completions.complete(&prompt).await?;

            Ok(StepExecution {
                input_data: json!({
                    "query": context.query.clone(),
                    "category": context.category.clone(),
                }),
                output_data: json!({ "response": response.clone() }),
                description: self.description.to_string(),
                update: ContextUpdate::response(response),
            })
        })
    }
}

/// Hand the query off to a human agent. Deterministic — the completion
/// service is never called.
pub struct Escalate;

impl WorkflowStep for Escalate {
    fn name(&self) -> &'static str {
        ESCALATE
    }

    fn kind(&self) -> StepKind {
        StepKind::Handle
    }

    fn run<'a>(
        &'a self,
        context: &'a SupportContext,
        _completions: &'a dyn CompletionClient,
    ) -> BoxFuture<'a, Result<StepExecution>> {
        Box::pin(async move {
            Ok(StepExecution {
                input_data: json!({
                    "query": context.query.clone(),
                    "sentiment": context.sentiment.clone(),
                }),
                output_data: json!({ "response": ESCALATION_MESSAGE }),
                description: "Escalated to human agent due to negative sentiment".to_string(),
                update: ContextUpdate::response(ESCALATION_MESSAGE),
            })
        })
    }
}
