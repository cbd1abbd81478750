//! Execution trace queries. Append-only: rows are inserted once and never
//! updated, so concurrent executions cannot interfere.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::ExecutionTraceRow;
use crate::DbError;

/// Insert a finished execution trace.
pub async fn insert_trace(pool: &PgPool, row: &ExecutionTraceRow) -> Result<(), DbError> {
    sqlx::query(
        "INSERT INTO execution_traces
             (id, workflow_id, test_input, execution_path, node_outputs,
              final_output, processing_time, status, error_message, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
    )
    .bind(row.id)
    .bind(row.workflow_id)
    .bind(&row.test_input)
    .bind(&row.execution_path)
    .bind(&row.node_outputs)
    .bind(&row.final_output)
    .bind(row.processing_time)
    .bind(&row.status)
    .bind(&row.error_message)
    .bind(row.created_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// Traces for one workflow, most recent first.
pub async fn list_traces(
    pool: &PgPool,
    workflow_id: Uuid,
    limit: i64,
) -> Result<Vec<ExecutionTraceRow>, DbError> {
    let rows = sqlx::query_as::<_, ExecutionTraceRow>(
        "SELECT id, workflow_id, test_input, execution_path, node_outputs,
                final_output, processing_time, status, error_message, created_at
         FROM execution_traces
         WHERE workflow_id = $1
         ORDER BY created_at DESC
         LIMIT $2",
    )
    .bind(workflow_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
