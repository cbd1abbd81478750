//! Store contracts the runner is constructed with.
//!
//! The engine never reaches into ambient state for persistence: whoever
//! builds a [`crate::WorkflowRunner`] hands it a definition store and a
//! trace store. The `db` crate provides the Postgres implementations;
//! [`crate::memory`] provides in-process ones for tests and offline use.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{ExecutionTrace, Workflow};

/// Errors surfaced by a store implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,

    #[error("storage backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// Wrap an arbitrary backend failure.
    pub fn backend(e: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Box::new(e))
    }
}

/// Read access to workflow definitions. Definitions are mutated only
/// through the external authoring surface; the engine just loads them.
#[async_trait]
pub trait WorkflowDefinitionStore: Send + Sync {
    /// Load a workflow with its nodes and connections.
    async fn load(&self, workflow_id: Uuid) -> Result<Workflow, StoreError>;
}

/// Append-only persistence for execution traces.
///
/// Each trace is an independent record keyed by its execution id, so
/// concurrent executions may append without coordinating.
#[async_trait]
pub trait ExecutionTraceStore: Send + Sync {
    async fn append(&self, trace: &ExecutionTrace) -> Result<(), StoreError>;

    /// Traces for one workflow, most recent first.
    async fn list(&self, workflow_id: Uuid, limit: usize)
        -> Result<Vec<ExecutionTrace>, StoreError>;
}
