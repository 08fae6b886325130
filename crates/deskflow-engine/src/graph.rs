use std::collections::HashMap;
use std::sync::Arc;

use deskflow_core::error::{DeskflowError, Result};

use crate::steps::{
    AnalyzeSentiment, Categorize, Escalate, HandleStep, WorkflowStep, ANALYZE_SENTIMENT,
    CATEGORIZE, ESCALATE, HANDLE_BILLING, HANDLE_GENERAL, HANDLE_TECHNICAL,
};

/// Condition for traversing an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeCondition {
    /// Always traverse this edge.
    Always,
    /// Traverse only if the router selects the target step.
    Routed,
}

/// A directed edge between two named steps.
#[derive(Debug, Clone)]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub condition: EdgeCondition,
}

impl Edge {
    /// Create an unconditional edge.
    pub fn always(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            condition: EdgeCondition::Always,
        }
    }

    /// Create an edge guarded by the routing decision.
    pub fn routed(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            condition: EdgeCondition::Routed,
        }
    }
}

/// A fixed set of named steps with directed edges.
///
/// A step with no outgoing edges is terminal. The topology is validated at
/// construction and never changes at runtime.
pub struct WorkflowGraph {
    steps: HashMap<String, Arc<dyn WorkflowStep>>,
    edges: Vec<Edge>,
    entry: String,
}

impl WorkflowGraph {
    /// Build a graph, validating that the entry step and every edge
    /// endpoint name a known step.
    pub fn new(
        steps: Vec<Arc<dyn WorkflowStep>>,
        edges: Vec<Edge>,
        entry: impl Into<String>,
    ) -> Result<Self> {
        let entry = entry.into();
        let step_map: HashMap<String, Arc<dyn WorkflowStep>> = steps
            .into_iter()
            .map(|s| (s.name().to_string(), s))
            .collect();

        if !step_map.contains_key(&entry) {
            return Err(DeskflowError::StepNotFound(entry));
        }
        for edge in &edges {
            if !step_map.contains_key(&edge.from) {
                return Err(DeskflowError::StepNotFound(edge.from.clone()));
            }
            if !step_map.contains_key(&edge.to) {
                return Err(DeskflowError::StepNotFound(edge.to.clone()));
            }
        }

        Ok(Self {
            steps: step_map,
            edges,
            entry,
        })
    }

    /// The fixed customer support topology:
    /// `categorize → analyze_sentiment → [route] → one handler → terminal`.
    pub fn customer_support() -> Result<Self> {
        let steps: Vec<Arc<dyn WorkflowStep>> = vec![
            Arc::new(Categorize),
            Arc::new(AnalyzeSentiment),
            Arc::new(HandleStep::technical()),
            Arc::new(HandleStep::billing()),
            Arc::new(HandleStep::general()),
            Arc::new(Escalate),
        ];

        let edges = vec![
            Edge::always(CATEGORIZE, ANALYZE_SENTIMENT),
            Edge::routed(ANALYZE_SENTIMENT, HANDLE_TECHNICAL),
            Edge::routed(ANALYZE_SENTIMENT, HANDLE_BILLING),
            Edge::routed(ANALYZE_SENTIMENT, HANDLE_GENERAL),
            Edge::routed(ANALYZE_SENTIMENT, ESCALATE),
        ];

        Self::new(steps, edges, CATEGORIZE)
    }

    pub fn entry(&self) -> &str {
        &self.entry
    }

    pub fn step(&self, name: &str) -> Option<&Arc<dyn WorkflowStep>> {
        self.steps.get(name)
    }

    /// Outgoing edges of a step, in declaration order.
    pub fn outgoing(&self, name: &str) -> Vec<&Edge> {
        self.edges.iter().filter(|e| e.from == name).collect()
    }
}
