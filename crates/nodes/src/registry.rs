//! Executor registry — maps each [`NodeKind`] to its implementation.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::collaborators::{GenerationCollaborator, RetrievalCollaborator};
use crate::generator::GeneratorExecutor;
use crate::input::InputExecutor;
use crate::output::OutputExecutor;
use crate::retriever::RetrieverExecutor;
use crate::router::RouterExecutor;
use crate::{NodeExecutor, NodeKind};

/// Maps node kinds to shared `NodeExecutor` implementations.
pub type NodeRegistry = HashMap<NodeKind, Arc<dyn NodeExecutor>>;

/// Build the registry of built-in executors.
///
/// Collaborators are constructor parameters; the engine never reaches
/// into ambient state to find them. `retrieval` may be `None`, in
/// which case the retriever stage serves its deterministic placeholder set.
/// `collaborator_timeout` bounds every out-of-process call made by the
/// retriever and generator stages.
pub fn builtin_registry(
    retrieval: Option<Arc<dyn RetrievalCollaborator>>,
    generation: Arc<dyn GenerationCollaborator>,
    collaborator_timeout: Duration,
) -> NodeRegistry {
    let mut registry: NodeRegistry = HashMap::new();
    registry.insert(NodeKind::Input, Arc::new(InputExecutor));
    registry.insert(NodeKind::Router, Arc::new(RouterExecutor));
    registry.insert(
        NodeKind::Retriever,
        Arc::new(RetrieverExecutor::new(retrieval, collaborator_timeout)),
    );
    registry.insert(
        NodeKind::Generator,
        Arc::new(GeneratorExecutor::new(generation, collaborator_timeout)),
    );
    registry.insert(NodeKind::Output, Arc::new(OutputExecutor));
    registry
}
