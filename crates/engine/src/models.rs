//! Core domain models for the workflow execution engine.
//!
//! These types are the source of truth for what a pipeline and a run look
//! like in memory. Serialized field names are stable — external consumers
//! and the trace table depend on them.

use chrono::{DateTime, Utc};
use nodes::NodeKind;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// WorkflowMode
// ---------------------------------------------------------------------------

/// Operating profile of a workflow. At most one workflow may be active per
/// mode; older versions are retained, deactivated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowMode {
    Fast,
    Thorough,
    CodeFocused,
}

impl std::fmt::Display for WorkflowMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fast => write!(f, "fast"),
            Self::Thorough => write!(f, "thorough"),
            Self::CodeFocused => write!(f, "code_focused"),
        }
    }
}

impl std::str::FromStr for WorkflowMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fast" => Ok(Self::Fast),
            "thorough" => Ok(Self::Thorough),
            "code_focused" => Ok(Self::CodeFocused),
            other => Err(format!("unknown workflow mode: {other}")),
        }
    }
}

// ---------------------------------------------------------------------------
// Workflow definition
// ---------------------------------------------------------------------------

/// One stage within a workflow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowNode {
    pub id: Uuid,
    pub workflow_id: Uuid,
    pub kind: NodeKind,
    /// Display name, echoed into trace records.
    pub name: String,
    /// Execution order. Unique per workflow; disabled nodes keep theirs.
    pub position: i32,
    /// Raw per-kind configuration; parsed and defaulted by the executor.
    pub config: Value,
    pub enabled: bool,
}

/// A declared edge between two nodes. Advisory: used by the authoring
/// surface for layout, never for branching — routing decisions happen
/// inside the router node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowConnection {
    pub id: Uuid,
    pub workflow_id: Uuid,
    pub from_node: Uuid,
    pub to_node: Uuid,
}

/// A complete workflow definition. Read-only to the engine during
/// execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workflow {
    pub id: Uuid,
    pub mode: WorkflowMode,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub is_active: bool,
    pub version: i32,
    pub nodes: Vec<WorkflowNode>,
    #[serde(default)]
    pub connections: Vec<WorkflowConnection>,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Run status
// ---------------------------------------------------------------------------

/// Overall outcome of one engine invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// Every enabled node ran to completion.
    Success,
    /// Execution halted at the requested stop node.
    Partial,
    /// A node failed; nothing after it was attempted.
    Error,
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Partial => write!(f, "partial"),
            Self::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for RunStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "success" => Ok(Self::Success),
            "partial" => Ok(Self::Partial),
            "error" => Ok(Self::Error),
            other => Err(format!("unknown run status: {other}")),
        }
    }
}

/// Outcome of a single node within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeRunStatus {
    Success,
    Error,
}

// ---------------------------------------------------------------------------
// Execution trace
// ---------------------------------------------------------------------------

/// One stage's contribution to a trace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeExecutionRecord {
    pub node_id: Uuid,
    pub node_name: String,
    #[serde(rename = "node_type")]
    pub node_kind: NodeKind,
    /// The value handed to this node.
    pub input: Value,
    /// The value it produced; absent on failure.
    pub output: Option<Value>,
    /// Elapsed seconds for this node alone.
    pub processing_time: f64,
    pub status: NodeRunStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The immutable record of one engine invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionTrace {
    pub execution_id: Uuid,
    pub workflow_id: Uuid,
    pub test_input: String,
    /// IDs of the nodes actually attempted, in order.
    pub execution_path: Vec<Uuid>,
    pub node_outputs: Vec<NodeExecutionRecord>,
    /// The last node's result on full success; unset on partial or error.
    pub final_output: Option<Value>,
    /// Total elapsed seconds.
    pub processing_time: f64,
    pub status: RunStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
}
