use tracing::{debug, info};

use deskflow_core::error::{DeskflowError, Result};
use deskflow_core::traits::CompletionClient;
use deskflow_core::types::AuditEntry;

use crate::context::SupportContext;
use crate::graph::{EdgeCondition, WorkflowGraph};
use crate::router;

/// Final context and ordered audit trail of one successful execution.
#[derive(Debug)]
pub struct Execution {
    pub context: SupportContext,
    pub trail: Vec<AuditEntry>,
}

/// Walks the workflow graph from the entry step to a terminal step,
/// threading the context forward and collecting the audit trail.
///
/// Both are owned by the current call — nothing is shared across requests.
/// Any step failure aborts the walk immediately; the partially built trail
/// is dropped with the call frame and never observed by the caller.
pub struct WorkflowEngine {
    graph: WorkflowGraph,
}

impl WorkflowEngine {
    pub fn new(graph: WorkflowGraph) -> Self {
        Self { graph }
    }

    /// Execute the workflow for one query.
    pub async fn execute(
        &self,
        completions: &dyn CompletionClient,
        query: &str,
    ) -> Result<Execution> {
        let mut context = SupportContext::new(query);
        let mut trail: Vec<AuditEntry> = Vec::new();
        let mut current = self.graph.entry().to_string();

        loop {
            let step = self
                .graph
                .step(&current)
                .ok_or_else(|| DeskflowError::StepNotFound(current.clone()))?;

            debug!(step = %current, "Executing workflow step");
            let execution = step.run(&context, completions).await?;

            // Apply-then-record is the atomic unit: a failed step reaches
            // neither line.
            execution.update.apply(&mut context);
            trail.push(AuditEntry {
                step_name: step.name().to_string(),
                step_type: step.kind(),
                input_data: execution.input_data,
                output_data: execution.output_data,
                description: execution.description,
            });

            let outgoing = self.graph.outgoing(&current);
            if outgoing.is_empty() {
                debug!(step = %current, "Terminal step reached, workflow complete");
                break;
            }

            let next = if outgoing
                .iter()
                .any(|e| e.condition == EdgeCondition::Routed)
            {
                let target = router::route(&context.category, &context.sentiment);
                info!(
                    route = %target,
                    sentiment = %context.sentiment,
                    category = %context.category,
                    "Routing query"
                );
                trail.push(router::route_audit_entry(
                    &context.category,
                    &context.sentiment,
                    target,
                ));
                if !outgoing.iter().any(|e| e.to == target) {
                    return Err(DeskflowError::EdgeNotFound {
                        from: current.clone(),
                        to: target.to_string(),
                    });
                }
                target.to_string()
            } else {
                outgoing[0].to.clone()
            };

            current = next;
        }

        Ok(Execution { context, trail })
    }
}
