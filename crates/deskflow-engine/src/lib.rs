//! Customer support triage workflow engine.
//!
//! A support query moves through a fixed directed graph of steps:
//! `categorize → analyze_sentiment → [route] → one handler → terminal`.
//! Each step reads from and writes to a per-request [`SupportContext`] and
//! records one [`AuditEntry`](deskflow_core::AuditEntry); the router picks
//! the handler from the category and sentiment, escalating negative queries
//! to a human. The [`WorkflowEngine`] walks the graph and collects the
//! ordered audit trail; the [`SupportService`] facade converts any failure
//! into a structured [`WorkflowResult`](deskflow_core::WorkflowResult).
//!
//! The context and the trail are owned by one execution — concurrent
//! requests never share mutable state.

pub mod context;
pub mod executor;
pub mod graph;
pub mod router;
pub mod service;
pub mod steps;

#[cfg(test)]
pub(crate) mod test_support;

pub use context::{ContextUpdate, SupportContext};
pub use executor::{Execution, WorkflowEngine};
pub use graph::{Edge, EdgeCondition, WorkflowGraph};
pub use service::{ServiceState, SupportService};
pub use steps::{StepExecution, WorkflowStep, ESCALATION_MESSAGE};
