//! Generator stage — turns routed intent + retrieved documents into a
//! response via the generation collaborator.

use std::fmt::Write as _;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use crate::collaborators::{Document, GenerationCollaborator, GenerationParams};
use crate::config::{self, GeneratorConfig};
use crate::traits::{ExecutionContext, NodeExecutor};
use crate::NodeError;

pub struct GeneratorExecutor {
    generation: Arc<dyn GenerationCollaborator>,
    timeout: Duration,
}

impl GeneratorExecutor {
    pub fn new(generation: Arc<dyn GenerationCollaborator>, timeout: Duration) -> Self {
        Self { generation, timeout }
    }

    /// Combine intent, retrieved passages, and the original input into one
    /// prompt. Upstream stages may be disabled, so every part is optional.
    fn build_prompt(input: &Value, ctx: &ExecutionContext, documents: &[Document]) -> String {
        let mut prompt = String::new();

        if let Some(intent) = input.get("intent").and_then(Value::as_str) {
            let _ = writeln!(prompt, "Intent: {intent}");
        }
        for doc in documents {
            let _ = writeln!(prompt, "Passage [{}]: {}", doc.title, doc.content);
        }
        let _ = write!(prompt, "User input: {}", ctx.input_text);

        prompt
    }
}

#[async_trait]
impl NodeExecutor for GeneratorExecutor {
    async fn execute(
        &self,
        input: Value,
        config: &Value,
        ctx: &ExecutionContext,
    ) -> Result<Value, NodeError> {
        let cfg: GeneratorConfig = config::parse(config)?;

        let documents: Vec<Document> = input
            .get("documents")
            .and_then(|d| serde_json::from_value(d.clone()).ok())
            .unwrap_or_default();

        let prompt = Self::build_prompt(&input, ctx, &documents);
        let params = GenerationParams {
            model: cfg.model,
            max_tokens: cfg.max_tokens,
        };

        debug!(
            model = %params.model,
            context_size = prompt.chars().count(),
            sources = documents.len(),
            "invoking generation collaborator"
        );

        let generation =
            match tokio::time::timeout(self.timeout, self.generation.generate(&prompt, &params))
                .await
            {
                Err(_elapsed) => {
                    return Err(NodeError::Timeout {
                        kind: "generation",
                        seconds: self.timeout.as_secs_f64(),
                    });
                }
                Ok(Err(e)) => {
                    return Err(NodeError::Collaborator {
                        kind: "generation",
                        message: e.to_string(),
                    });
                }
                Ok(Ok(generation)) => generation,
            };

        Ok(json!({
            "response": generation.text,
            "model": generation.model,
            "context_size": prompt.chars().count(),
            "sources": documents.len(),
        }))
    }
}

// ============================================================
// Unit tests
// ============================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::{CollaboratorError, Generation, StubGenerator};

    struct RecordingGenerator {
        prompts: std::sync::Mutex<Vec<String>>,
    }

    #[async_trait]
    impl GenerationCollaborator for RecordingGenerator {
        async fn generate(
            &self,
            prompt: &str,
            params: &GenerationParams,
        ) -> Result<Generation, CollaboratorError> {
            self.prompts.lock().unwrap().push(prompt.to_owned());
            Ok(Generation {
                text: "ok".into(),
                model: params.model.clone(),
            })
        }
    }

    struct FailingGenerator;

    #[async_trait]
    impl GenerationCollaborator for FailingGenerator {
        async fn generate(
            &self,
            _: &str,
            _: &GenerationParams,
        ) -> Result<Generation, CollaboratorError> {
            Err(CollaboratorError::Failed("model crashed".into()))
        }
    }

    fn ctx(input: &str) -> ExecutionContext {
        ExecutionContext {
            workflow_id: uuid::Uuid::new_v4(),
            execution_id: uuid::Uuid::new_v4(),
            input_text: input.to_owned(),
        }
    }

    fn retriever_output() -> Value {
        json!({
            "query": "what is rag",
            "intent": "question",
            "target_route": "retriever",
            "documents": [
                { "id": "d1", "title": "T1", "content": "C1", "relevance": 0.9, "source": "index" },
                { "id": "d2", "title": "T2", "content": "C2", "relevance": 0.8, "source": "index" },
            ],
        })
    }

    #[tokio::test]
    async fn prompt_combines_intent_documents_and_input() {
        let gen = Arc::new(RecordingGenerator {
            prompts: std::sync::Mutex::new(Vec::new()),
        });
        let executor = GeneratorExecutor::new(gen.clone(), Duration::from_secs(5));

        let out = executor
            .execute(retriever_output(), &Value::Null, &ctx("what is rag"))
            .await
            .unwrap();

        let prompts = gen.prompts.lock().unwrap();
        let prompt = &prompts[0];
        assert!(prompt.contains("Intent: question"));
        assert!(prompt.contains("Passage [T1]: C1"));
        assert!(prompt.contains("User input: what is rag"));

        assert_eq!(out["sources"], 2);
        assert_eq!(out["context_size"], prompt.chars().count());
    }

    #[tokio::test]
    async fn missing_upstream_stages_still_generate() {
        // Router and retriever disabled: the carried value is the input
        // envelope with no intent and no documents.
        let executor = GeneratorExecutor::new(Arc::new(StubGenerator), Duration::from_secs(5));
        let out = executor
            .execute(json!({ "text": "hello" }), &Value::Null, &ctx("hello"))
            .await
            .unwrap();

        assert_eq!(out["sources"], 0);
        assert!(out["response"].is_string());
    }

    #[tokio::test]
    async fn model_tag_comes_from_config() {
        let executor = GeneratorExecutor::new(Arc::new(StubGenerator), Duration::from_secs(5));
        let out = executor
            .execute(
                json!({ "text": "hi" }),
                &json!({ "model": "local-7b" }),
                &ctx("hi"),
            )
            .await
            .unwrap();

        assert_eq!(out["model"], "local-7b");
    }

    #[tokio::test]
    async fn collaborator_failure_is_a_node_error() {
        let executor = GeneratorExecutor::new(Arc::new(FailingGenerator), Duration::from_secs(5));
        let err = executor
            .execute(json!({ "text": "hi" }), &Value::Null, &ctx("hi"))
            .await
            .unwrap_err();

        assert!(matches!(err, NodeError::Collaborator { kind: "generation", .. }));
    }
}
