//! Execution endpoints: run a workflow and inspect past traces.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;
use tracing::error;
use uuid::Uuid;

use engine::{EngineError, ExecutionTrace, NodeExecutionRecord, RunStatus};

use super::AppState;

#[derive(serde::Deserialize)]
pub struct ExecuteWorkflowDto {
    pub test_input: String,
    /// Optional stop point: run only the prefix up to and including this
    /// node. Advisory — an unknown id yields a full run.
    #[serde(default)]
    pub stop_at_node: Option<Uuid>,
}

/// Wire shape of an execution response.
#[derive(serde::Serialize)]
pub struct ExecutionResponseDto {
    pub execution_id: Uuid,
    pub workflow_id: Uuid,
    pub status: RunStatus,
    pub execution_flow: Vec<NodeExecutionRecord>,
    pub final_output: Option<Value>,
    pub total_time: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl From<ExecutionTrace> for ExecutionResponseDto {
    fn from(trace: ExecutionTrace) -> Self {
        Self {
            execution_id: trace.execution_id,
            workflow_id: trace.workflow_id,
            status: trace.status,
            execution_flow: trace.node_outputs,
            final_output: trace.final_output,
            total_time: trace.processing_time,
            error_message: trace.error_message,
        }
    }
}

/// Execute a workflow synchronously and return the full trace. A failed
/// node still yields 200 — the failure detail is in the trace itself.
pub async fn execute(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Json(payload): Json<ExecuteWorkflowDto>,
) -> Result<Json<ExecutionResponseDto>, StatusCode> {
    match state
        .runner
        .execute(id, &payload.test_input, payload.stop_at_node)
        .await
    {
        Ok(trace) => Ok(Json(trace.into())),
        Err(EngineError::WorkflowNotFound(_)) => Err(StatusCode::NOT_FOUND),
        Err(EngineError::Store(e)) => {
            error!(workflow_id = %id, error = %e, "store failure during execution");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
        // Malformed definition (duplicate ids/positions, nothing enabled,
        // unknown executor kind).
        Err(_) => Err(StatusCode::UNPROCESSABLE_ENTITY),
    }
}

#[derive(serde::Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    20
}

/// Recent traces for a workflow, most recent first.
pub async fn list(
    Path(id): Path<Uuid>,
    Query(query): Query<ListQuery>,
    State(state): State<AppState>,
) -> Result<Json<Vec<ExecutionTrace>>, StatusCode> {
    match state.traces.list(id, query.limit).await {
        Ok(traces) => Ok(Json(traces)),
        Err(e) => {
            error!(workflow_id = %id, error = %e, "failed to list traces");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
