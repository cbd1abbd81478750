//! The workflow runner.
//!
//! `WorkflowRunner` is the central orchestrator:
//! 1. Loads the workflow and validates its execution plan.
//! 2. Walks the enabled nodes in position order, dispatching each through
//!    the registry and threading the previous stage's JSON output into the
//!    next stage.
//! 3. Records a `NodeExecutionRecord` for every node attempted.
//! 4. Applies the optional stop condition (the stop node's own output is
//!    recorded before halting) and converts node failures into trace data.
//! 5. Appends the finished `ExecutionTrace` to the trace store before
//!    returning it.
//!
//! Failures inside a node never escape `execute` as errors; only
//! configuration problems (unknown workflow, malformed plan, missing
//! executor) and store failures do.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use serde_json::Value;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use nodes::{ExecutionContext, NodeExecutor, NodeRegistry};

use crate::models::{ExecutionTrace, NodeExecutionRecord, NodeRunStatus, RunStatus};
use crate::sequence::execution_plan;
use crate::stores::{ExecutionTraceStore, StoreError, WorkflowDefinitionStore};
use crate::EngineError;

/// Orchestrates single workflow executions.
///
/// Each call to [`WorkflowRunner::execute`] is a self-contained unit of
/// work; concurrent calls share only the read-only definition store and
/// the append-only trace store, so a single runner may be shared freely.
pub struct WorkflowRunner {
    definitions: Arc<dyn WorkflowDefinitionStore>,
    traces: Arc<dyn ExecutionTraceStore>,
    registry: NodeRegistry,
}

impl WorkflowRunner {
    pub fn new(
        definitions: Arc<dyn WorkflowDefinitionStore>,
        traces: Arc<dyn ExecutionTraceStore>,
        registry: NodeRegistry,
    ) -> Self {
        Self {
            definitions,
            traces,
            registry,
        }
    }

    /// Execute a workflow against one input, optionally stopping after the
    /// named node, and return the persisted trace.
    ///
    /// The stop condition is advisory: an id that matches no enabled node
    /// simply yields a full run.
    ///
    /// # Errors
    /// Returns `EngineError` for an unknown workflow, a malformed plan, a
    /// node kind with no registered executor, or a store failure. Node
    /// failures are reported inside the returned trace instead.
    #[instrument(skip(self, input_text, stop_at_node), fields(workflow_id = %workflow_id))]
    pub async fn execute(
        &self,
        workflow_id: Uuid,
        input_text: &str,
        stop_at_node: Option<Uuid>,
    ) -> Result<ExecutionTrace, EngineError> {
        let workflow = self.definitions.load(workflow_id).await.map_err(|e| match e {
            StoreError::NotFound => EngineError::WorkflowNotFound(workflow_id),
            other => EngineError::Store(other),
        })?;

        let plan = execution_plan(&workflow)?;

        // Pre-flight: every kind in the plan must have an executor and a
        // well-formed configuration. Gaps are configuration problems and
        // surface before any node runs.
        let executors: Vec<Arc<dyn NodeExecutor>> = plan
            .iter()
            .map(|node| {
                nodes::config::validate(node.kind, &node.config).map_err(|e| {
                    EngineError::InvalidNodeConfig {
                        node_id: node.id,
                        message: match e {
                            nodes::NodeError::InvalidConfig(m) => m,
                            other => other.to_string(),
                        },
                    }
                })?;
                self.registry
                    .get(&node.kind)
                    .cloned()
                    .ok_or(EngineError::MissingExecutor(node.kind))
            })
            .collect::<Result<_, _>>()?;

        let execution_id = Uuid::new_v4();
        info!(%execution_id, nodes = plan.len(), "starting workflow execution");

        let ctx = ExecutionContext {
            workflow_id,
            execution_id,
            input_text: input_text.to_owned(),
        };

        let run_started = Instant::now();
        let mut carried = Value::String(input_text.to_owned());
        let mut records: Vec<NodeExecutionRecord> = Vec::with_capacity(plan.len());
        let mut status = RunStatus::Success;
        let mut error_message: Option<String> = None;

        for (node, executor) in plan.iter().zip(&executors) {
            let node_started = Instant::now();

            match executor.execute(carried.clone(), &node.config, &ctx).await {
                Ok(output) => {
                    records.push(NodeExecutionRecord {
                        node_id: node.id,
                        node_name: node.name.clone(),
                        node_kind: node.kind,
                        input: carried,
                        output: Some(output.clone()),
                        processing_time: node_started.elapsed().as_secs_f64(),
                        status: NodeRunStatus::Success,
                        error: None,
                    });
                    carried = output;

                    if stop_at_node == Some(node.id) {
                        info!(stop_at = %node.id, "halting at requested stop node");
                        status = RunStatus::Partial;
                        break;
                    }
                }
                Err(e) => {
                    warn!(node = %node.id, kind = %node.kind, error = %e, "node failed, aborting run");
                    let text = e.to_string();
                    records.push(NodeExecutionRecord {
                        node_id: node.id,
                        node_name: node.name.clone(),
                        node_kind: node.kind,
                        input: carried,
                        output: None,
                        processing_time: node_started.elapsed().as_secs_f64(),
                        status: NodeRunStatus::Error,
                        error: Some(text.clone()),
                    });
                    status = RunStatus::Error;
                    error_message = Some(text);
                    break;
                }
            }
        }

        // Only a full run has a final output; partial and failed runs
        // leave it unset and are inspected through the per-node records.
        let final_output = match status {
            RunStatus::Success => records.last().and_then(|r| r.output.clone()),
            RunStatus::Partial | RunStatus::Error => None,
        };

        let trace = ExecutionTrace {
            execution_id,
            workflow_id,
            test_input: input_text.to_owned(),
            execution_path: records.iter().map(|r| r.node_id).collect(),
            node_outputs: records,
            final_output,
            processing_time: run_started.elapsed().as_secs_f64(),
            status,
            error_message,
            created_at: Utc::now(),
        };

        // Durable before the caller sees the trace.
        self.traces.append(&trace).await?;

        info!(
            %execution_id,
            status = %trace.status,
            nodes = trace.node_outputs.len(),
            elapsed = trace.processing_time,
            "execution trace persisted"
        );

        Ok(trace)
    }
}
