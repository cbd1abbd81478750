//! Workflow definition queries.
//!
//! The engine only reads these tables; the create functions exist for the
//! CLI seeder and integration tests. Authoring proper happens in the
//! surrounding application.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{WorkflowConnectionRow, WorkflowNodeRow, WorkflowRow};
use crate::DbError;

/// Fetch a single workflow by its primary key.
pub async fn get_workflow(pool: &PgPool, id: Uuid) -> Result<WorkflowRow, DbError> {
    let row = sqlx::query_as::<_, WorkflowRow>(
        "SELECT id, mode, name, description, is_active, version, created_at
         FROM workflows WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(DbError::NotFound)?;

    Ok(row)
}

/// Return all workflows ordered by creation time (newest first).
pub async fn list_workflows(pool: &PgPool) -> Result<Vec<WorkflowRow>, DbError> {
    let rows = sqlx::query_as::<_, WorkflowRow>(
        "SELECT id, mode, name, description, is_active, version, created_at
         FROM workflows ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Return a workflow's nodes ordered by position ascending.
pub async fn get_nodes(pool: &PgPool, workflow_id: Uuid) -> Result<Vec<WorkflowNodeRow>, DbError> {
    let rows = sqlx::query_as::<_, WorkflowNodeRow>(
        "SELECT id, workflow_id, kind, name, position, config, enabled
         FROM workflow_nodes WHERE workflow_id = $1 ORDER BY position ASC",
    )
    .bind(workflow_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Return a workflow's advisory connections.
pub async fn get_connections(
    pool: &PgPool,
    workflow_id: Uuid,
) -> Result<Vec<WorkflowConnectionRow>, DbError> {
    let rows = sqlx::query_as::<_, WorkflowConnectionRow>(
        "SELECT id, workflow_id, from_node, to_node
         FROM workflow_connections WHERE workflow_id = $1",
    )
    .bind(workflow_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Insert a new workflow.
pub async fn create_workflow(
    pool: &PgPool,
    mode: &str,
    name: &str,
    description: Option<&str>,
    is_active: bool,
) -> Result<WorkflowRow, DbError> {
    let row = sqlx::query_as::<_, WorkflowRow>(
        "INSERT INTO workflows (id, mode, name, description, is_active, version)
         VALUES ($1, $2, $3, $4, $5, 1)
         RETURNING id, mode, name, description, is_active, version, created_at",
    )
    .bind(Uuid::new_v4())
    .bind(mode)
    .bind(name)
    .bind(description)
    .bind(is_active)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Insert a node into an existing workflow.
pub async fn create_node(
    pool: &PgPool,
    workflow_id: Uuid,
    kind: &str,
    name: &str,
    position: i32,
    config: serde_json::Value,
    enabled: bool,
) -> Result<WorkflowNodeRow, DbError> {
    let row = sqlx::query_as::<_, WorkflowNodeRow>(
        "INSERT INTO workflow_nodes (id, workflow_id, kind, name, position, config, enabled)
         VALUES ($1, $2, $3, $4, $5, $6, $7)
         RETURNING id, workflow_id, kind, name, position, config, enabled",
    )
    .bind(Uuid::new_v4())
    .bind(workflow_id)
    .bind(kind)
    .bind(name)
    .bind(position)
    .bind(config)
    .bind(enabled)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Insert an advisory connection between two nodes.
pub async fn create_connection(
    pool: &PgPool,
    workflow_id: Uuid,
    from_node: Uuid,
    to_node: Uuid,
) -> Result<WorkflowConnectionRow, DbError> {
    let row = sqlx::query_as::<_, WorkflowConnectionRow>(
        "INSERT INTO workflow_connections (id, workflow_id, from_node, to_node)
         VALUES ($1, $2, $3, $4)
         RETURNING id, workflow_id, from_node, to_node",
    )
    .bind(Uuid::new_v4())
    .bind(workflow_id)
    .bind(from_node)
    .bind(to_node)
    .fetch_one(pool)
    .await?;

    Ok(row)
}
