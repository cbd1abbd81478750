//! Sqlx-backed implementations of the engine's store traits, plus the
//! row ↔ domain conversions they need.

use async_trait::async_trait;
use uuid::Uuid;

use engine::{
    ExecutionTrace, ExecutionTraceStore, StoreError, Workflow, WorkflowConnection,
    WorkflowDefinitionStore, WorkflowMode, WorkflowNode,
};
use nodes::NodeKind;

use crate::models::{ExecutionTraceRow, WorkflowConnectionRow, WorkflowNodeRow, WorkflowRow};
use crate::repository::{traces, workflows};
use crate::{DbError, DbPool};

impl From<DbError> for StoreError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound => StoreError::NotFound,
            other => StoreError::backend(other),
        }
    }
}

// ---------------------------------------------------------------------------
// Definition store
// ---------------------------------------------------------------------------

/// Loads workflow definitions from Postgres.
pub struct PgDefinitionStore {
    pool: DbPool,
}

impl PgDefinitionStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn node_from_row(row: WorkflowNodeRow) -> Result<WorkflowNode, DbError> {
    let kind: NodeKind = row
        .kind
        .parse()
        .map_err(|e: String| DbError::Corrupt(e))?;

    Ok(WorkflowNode {
        id: row.id,
        workflow_id: row.workflow_id,
        kind,
        name: row.name,
        position: row.position,
        config: row.config,
        enabled: row.enabled,
    })
}

fn connection_from_row(row: WorkflowConnectionRow) -> WorkflowConnection {
    WorkflowConnection {
        id: row.id,
        workflow_id: row.workflow_id,
        from_node: row.from_node,
        to_node: row.to_node,
    }
}

fn workflow_from_rows(
    row: WorkflowRow,
    nodes: Vec<WorkflowNodeRow>,
    connections: Vec<WorkflowConnectionRow>,
) -> Result<Workflow, DbError> {
    let mode: WorkflowMode = row
        .mode
        .parse()
        .map_err(|e: String| DbError::Corrupt(e))?;

    Ok(Workflow {
        id: row.id,
        mode,
        name: row.name,
        description: row.description,
        is_active: row.is_active,
        version: row.version,
        nodes: nodes
            .into_iter()
            .map(node_from_row)
            .collect::<Result<_, _>>()?,
        connections: connections.into_iter().map(connection_from_row).collect(),
        created_at: row.created_at,
    })
}

#[async_trait]
impl WorkflowDefinitionStore for PgDefinitionStore {
    async fn load(&self, workflow_id: Uuid) -> Result<Workflow, StoreError> {
        let row = workflows::get_workflow(&self.pool, workflow_id).await?;
        let nodes = workflows::get_nodes(&self.pool, workflow_id).await?;
        let connections = workflows::get_connections(&self.pool, workflow_id).await?;

        Ok(workflow_from_rows(row, nodes, connections)?)
    }
}

// ---------------------------------------------------------------------------
// Trace store
// ---------------------------------------------------------------------------

/// Appends and lists execution traces in Postgres.
pub struct PgTraceStore {
    pool: DbPool,
}

impl PgTraceStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn trace_to_row(trace: &ExecutionTrace) -> Result<ExecutionTraceRow, DbError> {
    Ok(ExecutionTraceRow {
        id: trace.execution_id,
        workflow_id: trace.workflow_id,
        test_input: trace.test_input.clone(),
        execution_path: serde_json::to_value(&trace.execution_path)
            .map_err(|e| DbError::Corrupt(e.to_string()))?,
        node_outputs: serde_json::to_value(&trace.node_outputs)
            .map_err(|e| DbError::Corrupt(e.to_string()))?,
        final_output: trace.final_output.clone(),
        processing_time: trace.processing_time,
        status: trace.status.to_string(),
        error_message: trace.error_message.clone(),
        created_at: trace.created_at,
    })
}

fn trace_from_row(row: ExecutionTraceRow) -> Result<ExecutionTrace, DbError> {
    Ok(ExecutionTrace {
        execution_id: row.id,
        workflow_id: row.workflow_id,
        test_input: row.test_input,
        execution_path: serde_json::from_value(row.execution_path)
            .map_err(|e| DbError::Corrupt(e.to_string()))?,
        node_outputs: serde_json::from_value(row.node_outputs)
            .map_err(|e| DbError::Corrupt(e.to_string()))?,
        final_output: row.final_output,
        processing_time: row.processing_time,
        status: row
            .status
            .parse()
            .map_err(|e: String| DbError::Corrupt(e))?,
        error_message: row.error_message,
        created_at: row.created_at,
    })
}

#[async_trait]
impl ExecutionTraceStore for PgTraceStore {
    async fn append(&self, trace: &ExecutionTrace) -> Result<(), StoreError> {
        let row = trace_to_row(trace)?;
        traces::insert_trace(&self.pool, &row).await?;
        Ok(())
    }

    async fn list(
        &self,
        workflow_id: Uuid,
        limit: usize,
    ) -> Result<Vec<ExecutionTrace>, StoreError> {
        let rows = traces::list_traces(&self.pool, workflow_id, limit as i64).await?;

        rows.into_iter()
            .map(|row| trace_from_row(row).map_err(StoreError::from))
            .collect()
    }
}

// ============================================================
// Unit tests
// ============================================================
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use engine::{NodeExecutionRecord, NodeRunStatus, RunStatus};
    use serde_json::json;

    fn sample_trace() -> ExecutionTrace {
        let node_id = Uuid::new_v4();
        ExecutionTrace {
            execution_id: Uuid::new_v4(),
            workflow_id: Uuid::new_v4(),
            test_input: "What is RAG?".into(),
            execution_path: vec![node_id],
            node_outputs: vec![NodeExecutionRecord {
                node_id,
                node_name: "Input".into(),
                node_kind: NodeKind::Input,
                input: json!("What is RAG?"),
                output: Some(json!({ "text": "What is RAG?" })),
                processing_time: 0.001,
                status: NodeRunStatus::Success,
                error: None,
            }],
            final_output: Some(json!({ "response": "…" })),
            processing_time: 0.01,
            status: RunStatus::Success,
            error_message: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn trace_survives_the_row_round_trip() {
        let trace = sample_trace();
        let row = trace_to_row(&trace).expect("serializes");
        let back = trace_from_row(row).expect("deserializes");

        assert_eq!(back.execution_id, trace.execution_id);
        assert_eq!(back.execution_path, trace.execution_path);
        assert_eq!(back.status, trace.status);
        assert_eq!(back.node_outputs.len(), 1);
        assert_eq!(back.node_outputs[0].node_kind, NodeKind::Input);
        assert_eq!(back.final_output, trace.final_output);
    }

    #[test]
    fn node_row_with_unknown_kind_is_corrupt() {
        let row = WorkflowNodeRow {
            id: Uuid::new_v4(),
            workflow_id: Uuid::new_v4(),
            kind: "telepathy".into(),
            name: "x".into(),
            position: 0,
            config: serde_json::Value::Null,
            enabled: true,
        };

        assert!(matches!(node_from_row(row), Err(DbError::Corrupt(_))));
    }

    #[test]
    fn not_found_maps_to_store_not_found() {
        assert!(matches!(
            StoreError::from(DbError::NotFound),
            StoreError::NotFound
        ));
    }
}
