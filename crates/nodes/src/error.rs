//! Node-level error type.

use thiserror::Error;

/// Errors returned by a node's `execute` method.
///
/// Every variant is terminal: the engine converts it into an error record
/// on the trace and stops the run. Nodes never retry and never swallow
/// errors silently.
#[derive(Debug, Error, Clone)]
pub enum NodeError {
    /// The node's configuration value has the wrong shape.
    #[error("invalid node configuration: {0}")]
    InvalidConfig(String),

    /// An external collaborator call failed hard.
    #[error("{kind} collaborator call failed: {message}")]
    Collaborator {
        kind: &'static str,
        message: String,
    },

    /// An external collaborator call exceeded the per-node timeout.
    #[error("{kind} collaborator call timed out after {seconds:.1}s")]
    Timeout {
        kind: &'static str,
        seconds: f64,
    },
}
