//! `engine` crate — domain models, execution-plan validation, store
//! contracts, and the workflow runner.

pub mod error;
pub mod memory;
pub mod models;
pub mod runner;
pub mod sequence;
pub mod stores;

pub use error::EngineError;
pub use models::{
    ExecutionTrace, NodeExecutionRecord, NodeRunStatus, RunStatus, Workflow, WorkflowConnection,
    WorkflowMode, WorkflowNode,
};
pub use runner::WorkflowRunner;
pub use sequence::execution_plan;
pub use stores::{ExecutionTraceStore, StoreError, WorkflowDefinitionStore};
