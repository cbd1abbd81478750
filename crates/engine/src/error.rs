//! Engine-level error types.
//!
//! Everything here is raised to the caller of `execute` *before* any node
//! runs (or when persistence itself fails). Node-level failures never
//! surface as errors — they become trace data.

use nodes::NodeKind;
use thiserror::Error;
use uuid::Uuid;

use crate::stores::StoreError;

#[derive(Debug, Error)]
pub enum EngineError {
    // ------ Configuration errors (execution does not start) ------

    /// The requested workflow does not exist.
    #[error("workflow {0} not found")]
    WorkflowNotFound(Uuid),

    /// Two or more nodes share the same ID.
    #[error("workflow {workflow_id} has duplicate node id {node_id}")]
    DuplicateNodeId { workflow_id: Uuid, node_id: Uuid },

    /// Two or more nodes share the same position.
    #[error("workflow {workflow_id} has duplicate node position {position}")]
    DuplicatePosition { workflow_id: Uuid, position: i32 },

    /// Every node in the workflow is disabled (or there are none).
    #[error("workflow {0} has no enabled nodes")]
    NoEnabledNodes(Uuid),

    /// A node's stored configuration does not fit its kind's schema.
    #[error("node {node_id} has invalid configuration: {message}")]
    InvalidNodeConfig { node_id: Uuid, message: String },

    /// The registry has no executor for a kind the workflow uses.
    #[error("no executor registered for node kind '{0}'")]
    MissingExecutor(NodeKind),

    // ------ Persistence errors ------

    /// The definition or trace store failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
