//! Input stage — bounds and normalizes the raw user text.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Value};

use crate::config::{self, InputConfig};
use crate::traits::{carried_text, ExecutionContext, NodeExecutor};
use crate::NodeError;

/// Appended when the input exceeds the configured maximum length.
/// Truncation is explicit and never an error.
pub const TRUNCATION_MARKER: &str = " … [truncated]";

pub struct InputExecutor;

#[async_trait]
impl NodeExecutor for InputExecutor {
    async fn execute(
        &self,
        input: Value,
        config: &Value,
        ctx: &ExecutionContext,
    ) -> Result<Value, NodeError> {
        let cfg: InputConfig = config::parse(config)?;
        let raw = carried_text(&input, ctx);

        let original_length = raw.chars().count();
        let (text, truncated) = if original_length > cfg.max_length {
            let kept: String = raw.chars().take(cfg.max_length).collect();
            (format!("{kept}{TRUNCATION_MARKER}"), true)
        } else {
            (raw, false)
        };

        Ok(json!({
            "text": text,
            "original_length": original_length,
            "truncated": truncated,
            "processed_at": Utc::now().to_rfc3339(),
        }))
    }
}

// ============================================================
// Unit tests
// ============================================================
#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(input: &str) -> ExecutionContext {
        ExecutionContext {
            workflow_id: uuid::Uuid::new_v4(),
            execution_id: uuid::Uuid::new_v4(),
            input_text: input.to_owned(),
        }
    }

    #[tokio::test]
    async fn short_input_passes_through() {
        let out = InputExecutor
            .execute(json!("What is RAG?"), &Value::Null, &ctx("What is RAG?"))
            .await
            .unwrap();

        assert_eq!(out["text"], "What is RAG?");
        assert_eq!(out["truncated"], false);
        assert_eq!(out["original_length"], 12);
        assert!(out["processed_at"].is_string());
    }

    #[tokio::test]
    async fn over_long_input_is_truncated_with_marker() {
        let long = "x".repeat(50);
        let out = InputExecutor
            .execute(json!(long.clone()), &json!({ "max_length": 10 }), &ctx(&long))
            .await
            .unwrap();

        let text = out["text"].as_str().unwrap();
        assert!(text.starts_with("xxxxxxxxxx"));
        assert!(text.ends_with(TRUNCATION_MARKER));
        assert_eq!(out["truncated"], true);
        assert_eq!(out["original_length"], 50);
    }

    #[tokio::test]
    async fn truncation_respects_char_boundaries() {
        let long = "héllo wörld, ünïcode everywhere".repeat(4);
        let out = InputExecutor
            .execute(json!(long.clone()), &json!({ "max_length": 7 }), &ctx(&long))
            .await
            .unwrap();

        assert_eq!(
            out["text"].as_str().unwrap(),
            format!("héllo w{TRUNCATION_MARKER}")
        );
    }
}
