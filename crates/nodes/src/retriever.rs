//! Retriever stage — fetches candidate documents for the routed query.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::collaborators::{placeholder_documents, CollaboratorError, RetrievalCollaborator};
use crate::config::{self, RetrieverConfig};
use crate::traits::{carried_text, ExecutionContext, NodeExecutor};
use crate::NodeError;

pub struct RetrieverExecutor {
    retrieval: Option<Arc<dyn RetrievalCollaborator>>,
    timeout: Duration,
}

impl RetrieverExecutor {
    pub fn new(retrieval: Option<Arc<dyn RetrievalCollaborator>>, timeout: Duration) -> Self {
        Self { retrieval, timeout }
    }
}

#[async_trait]
impl NodeExecutor for RetrieverExecutor {
    async fn execute(
        &self,
        input: Value,
        config: &Value,
        ctx: &ExecutionContext,
    ) -> Result<Value, NodeError> {
        let cfg: RetrieverConfig = config::parse(config)?;
        let query = carried_text(&input, ctx);

        let documents = match &self.retrieval {
            None => {
                debug!("retrieval collaborator not wired in, using placeholder set");
                placeholder_documents(cfg.max_results)
            }
            Some(retrieval) => {
                match tokio::time::timeout(self.timeout, retrieval.search(&query, cfg.max_results))
                    .await
                {
                    Err(_elapsed) => {
                        return Err(NodeError::Timeout {
                            kind: "retrieval",
                            seconds: self.timeout.as_secs_f64(),
                        });
                    }
                    Ok(Err(CollaboratorError::Unavailable)) => {
                        warn!("retrieval collaborator unavailable, degrading to placeholder set");
                        placeholder_documents(cfg.max_results)
                    }
                    Ok(Err(CollaboratorError::Failed(message))) => {
                        return Err(NodeError::Collaborator {
                            kind: "retrieval",
                            message,
                        });
                    }
                    Ok(Ok(docs)) => docs,
                }
            }
        };

        let mut out = json!({
            "query": query,
            "documents": documents,
        });

        // Carry the routing decision forward when the router ran.
        if let Some(upstream) = input.as_object() {
            for key in ["intent", "target_route"] {
                if let Some(v) = upstream.get(key) {
                    out[key] = v.clone();
                }
            }
        }

        Ok(out)
    }
}
