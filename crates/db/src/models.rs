//! Row structs that map 1-to-1 onto database tables.
//!
//! These are *persistence* models — they carry no domain behaviour. Domain
//! types live in the `engine` crate; conversion happens in `stores`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// workflows
// ---------------------------------------------------------------------------

/// A persisted workflow row (without its nodes).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WorkflowRow {
    pub id: Uuid,
    pub mode: String,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub version: i32,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// workflow_nodes
// ---------------------------------------------------------------------------

/// A persisted workflow node row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WorkflowNodeRow {
    pub id: Uuid,
    pub workflow_id: Uuid,
    pub kind: String,
    pub name: String,
    pub position: i32,
    /// Raw per-kind configuration (JSONB; `null` means all defaults).
    pub config: serde_json::Value,
    pub enabled: bool,
}

// ---------------------------------------------------------------------------
// workflow_connections
// ---------------------------------------------------------------------------

/// A persisted advisory edge between two nodes.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WorkflowConnectionRow {
    pub id: Uuid,
    pub workflow_id: Uuid,
    pub from_node: Uuid,
    pub to_node: Uuid,
}

// ---------------------------------------------------------------------------
// execution_traces
// ---------------------------------------------------------------------------

/// A persisted execution trace row. One row per invocation, never updated.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ExecutionTraceRow {
    pub id: Uuid,
    pub workflow_id: Uuid,
    pub test_input: String,
    /// JSON array of node ids, in execution order.
    pub execution_path: serde_json::Value,
    /// JSON array of per-node records.
    pub node_outputs: serde_json::Value,
    pub final_output: Option<serde_json::Value>,
    /// Total elapsed seconds.
    pub processing_time: f64,
    pub status: String,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
}
