//! Collaborator contracts consumed by the retriever and generator stages.
//!
//! Both collaborators live outside this core. The retrieval side may simply
//! not be wired in; the generation side always has at least the
//! deterministic [`StubGenerator`]. Either way the engine behaves
//! identically, which is what makes runs replayable in tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One ranked candidate document returned by retrieval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub title: String,
    pub content: String,
    pub relevance: f32,
    /// Where the document came from ("placeholder" for the stand-in set).
    pub source: String,
}

/// Text produced by the generation collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Generation {
    pub text: String,
    pub model: String,
}

/// Knobs forwarded to the generation collaborator.
#[derive(Debug, Clone)]
pub struct GenerationParams {
    pub model: String,
    pub max_tokens: u32,
}

/// Failure modes of an out-of-process collaborator call.
///
/// `Unavailable` is a soft condition — the retriever degrades to its
/// placeholder set instead of failing the node. `Failed` is hard and
/// becomes a `NodeError`.
#[derive(Debug, Error, Clone)]
pub enum CollaboratorError {
    #[error("collaborator is not available")]
    Unavailable,

    #[error("collaborator call failed: {0}")]
    Failed(String),
}

/// Document retrieval. Implemented outside this core (vector store,
/// keyword index, …).
#[async_trait]
pub trait RetrievalCollaborator: Send + Sync {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<Document>, CollaboratorError>;
}

/// Text generation. Implemented outside this core for live models; the
/// in-crate [`StubGenerator`] covers test and offline configurations.
#[async_trait]
pub trait GenerationCollaborator: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<Generation, CollaboratorError>;
}

// ---------------------------------------------------------------------------
// Deterministic stand-ins
// ---------------------------------------------------------------------------

/// The fixed document set used when retrieval is absent or unavailable.
///
/// Same shape as live results so downstream stages and tests behave
/// identically either way.
pub fn placeholder_documents(max_results: usize) -> Vec<Document> {
    let canned = [
        (
            "doc-fallback-1",
            "Retrieval basics",
            "Retrieval-augmented generation grounds a model's answer in \
             documents fetched for the user's query instead of relying on \
             parametric memory alone.",
            0.95,
        ),
        (
            "doc-fallback-2",
            "Prompt grounding",
            "Retrieved passages are concatenated into the generation prompt \
             so the model can cite and stay consistent with them.",
            0.82,
        ),
        (
            "doc-fallback-3",
            "Answer synthesis",
            "The generator combines the routed intent, the retrieved \
             passages, and the original question into a single response.",
            0.74,
        ),
    ];

    canned
        .iter()
        .take(max_results)
        .map(|(id, title, content, relevance)| Document {
            id: (*id).to_owned(),
            title: (*title).to_owned(),
            content: (*content).to_owned(),
            relevance: *relevance,
            source: "placeholder".to_owned(),
        })
        .collect()
}

/// Deterministic generation stand-in.
///
/// Derives its reply from the prompt alone, so a fixed workflow and fixed
/// input always produce the same text. Nothing about a live model's
/// behaviour should be inferred from it.
#[derive(Debug, Default, Clone, Copy)]
pub struct StubGenerator;

#[async_trait]
impl GenerationCollaborator for StubGenerator {
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<Generation, CollaboratorError> {
        let text = format!(
            "Stubbed answer composed from {} characters of context.",
            prompt.chars().count()
        );
        Ok(Generation {
            text,
            model: params.model.clone(),
        })
    }
}
