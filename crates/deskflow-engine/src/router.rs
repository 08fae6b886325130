use serde_json::json;

use deskflow_core::types::{AuditEntry, StepKind};

use crate::steps::{ESCALATE, HANDLE_BILLING, HANDLE_GENERAL, HANDLE_TECHNICAL, ROUTE_QUERY};

/// Pick the handler step for a categorized query. Pure function.
///
/// Sentiment dominates category: any query judged "Negative" escalates to a
/// human regardless of category. Unrecognized categories fall back to
/// `handle_general` — the completion service can return arbitrary text and
/// the label set is deliberately not enforced.
pub fn route(category: &str, sentiment: &str) -> &'static str {
    if sentiment == "Negative" {
        ESCALATE
    } else if category == "Technical" {
        HANDLE_TECHNICAL
    } else if category == "Billing" {
        HANDLE_BILLING
    } else {
        HANDLE_GENERAL
    }
}

/// Audit entry for the routing decision. The router mutates no context
/// field but is still recorded as a pseudo-step.
pub(crate) fn route_audit_entry(category: &str, sentiment: &str, target: &str) -> AuditEntry {
    AuditEntry {
        step_name: ROUTE_QUERY.to_string(),
        step_type: StepKind::Route,
        input_data: json!({ "sentiment": sentiment, "category": category }),
        output_data: json!({ "route": target }),
        description: format!(
            "Routed query to: {} based on sentiment '{}' and category '{}'",
            target, sentiment, category
        ),
    }
}
