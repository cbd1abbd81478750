//! In-memory store implementations.
//!
//! Back the runner in tests and in the desktop shell's offline mode, where
//! no Postgres is reachable. Behaviour mirrors the `db` crate: load by id,
//! append-only traces, most-recent-first listing.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{ExecutionTrace, Workflow};
use crate::stores::{ExecutionTraceStore, StoreError, WorkflowDefinitionStore};

/// Workflow definitions held in a map.
#[derive(Default)]
pub struct InMemoryDefinitionStore {
    workflows: Mutex<HashMap<Uuid, Workflow>>,
}

impl InMemoryDefinitionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, workflow: Workflow) {
        self.workflows.lock().unwrap().insert(workflow.id, workflow);
    }
}

#[async_trait]
impl WorkflowDefinitionStore for InMemoryDefinitionStore {
    async fn load(&self, workflow_id: Uuid) -> Result<Workflow, StoreError> {
        self.workflows
            .lock()
            .unwrap()
            .get(&workflow_id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }
}

/// Traces appended to a vector, listed newest first.
#[derive(Default)]
pub struct InMemoryTraceStore {
    traces: Mutex<Vec<ExecutionTrace>>,
}

impl InMemoryTraceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.traces.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ExecutionTraceStore for InMemoryTraceStore {
    async fn append(&self, trace: &ExecutionTrace) -> Result<(), StoreError> {
        self.traces.lock().unwrap().push(trace.clone());
        Ok(())
    }

    async fn list(
        &self,
        workflow_id: Uuid,
        limit: usize,
    ) -> Result<Vec<ExecutionTrace>, StoreError> {
        Ok(self
            .traces
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|t| t.workflow_id == workflow_id)
            .take(limit)
            .cloned()
            .collect())
    }
}
