//! `MockExecutor` — a test double for `NodeExecutor`.
//!
//! Useful in engine tests where a stage's real behaviour is irrelevant and
//! only the orchestration around it is under test.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::traits::{ExecutionContext, NodeExecutor};
use crate::NodeError;

/// Behaviour injected into `MockExecutor` at construction time.
pub enum MockBehaviour {
    /// Return a specific JSON value.
    ReturnValue(Value),
    /// Fail with the given error.
    Fail(NodeError),
}

/// A mock executor that records every input it receives and returns a
/// programmer-specified result.
pub struct MockExecutor {
    /// Label used in test assertions.
    pub name: String,
    behaviour: MockBehaviour,
    calls: Arc<Mutex<Vec<Value>>>,
}

impl MockExecutor {
    /// Create a mock that always succeeds with the given value.
    pub fn returning(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            behaviour: MockBehaviour::ReturnValue(value),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock that always fails with the given error.
    pub fn failing(name: impl Into<String>, error: NodeError) -> Self {
        Self {
            name: name.into(),
            behaviour: MockBehaviour::Fail(error),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of times this executor has run.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// All inputs seen so far, in call order.
    pub fn inputs(&self) -> Vec<Value> {
        self.calls.lock().unwrap().clone()
    }

    /// Shared handle to the recorded calls, for asserting after the mock
    /// has been moved into a registry.
    pub fn call_log(&self) -> Arc<Mutex<Vec<Value>>> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl NodeExecutor for MockExecutor {
    async fn execute(
        &self,
        input: Value,
        _config: &Value,
        _ctx: &ExecutionContext,
    ) -> Result<Value, NodeError> {
        self.calls.lock().unwrap().push(input);

        match &self.behaviour {
            MockBehaviour::ReturnValue(v) => Ok(v.clone()),
            MockBehaviour::Fail(e) => Err(e.clone()),
        }
    }
}
