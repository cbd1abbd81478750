//! Request handlers and the shared application state.

pub mod executions;
pub mod workflows;

use std::sync::Arc;

use db::DbPool;
use engine::{ExecutionTraceStore, WorkflowRunner};

/// State shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub runner: Arc<WorkflowRunner>,
    pub traces: Arc<dyn ExecutionTraceStore>,
    pub pool: DbPool,
}
