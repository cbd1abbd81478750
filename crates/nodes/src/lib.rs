//! `nodes` crate — node kinds, per-kind configuration, the `NodeExecutor`
//! trait, and the five built-in stage implementations.
//!
//! The engine crate dispatches execution through [`NodeExecutor`] trait
//! objects looked up by [`NodeKind`]. External collaborators (document
//! retrieval, text generation) are injected into the executors that need
//! them at construction time.

pub mod collaborators;
pub mod config;
pub mod error;
pub mod generator;
pub mod input;
pub mod kind;
pub mod mock;
pub mod output;
pub mod registry;
pub mod retriever;
pub mod router;
pub mod traits;

pub use collaborators::{
    CollaboratorError, Document, Generation, GenerationCollaborator, GenerationParams,
    RetrievalCollaborator, StubGenerator,
};
pub use error::NodeError;
pub use kind::NodeKind;
pub use registry::{builtin_registry, NodeRegistry};
pub use traits::{ExecutionContext, NodeExecutor};
