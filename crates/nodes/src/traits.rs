//! The `NodeExecutor` trait — the contract every stage must fulfil.

use async_trait::async_trait;
use serde_json::Value;

use crate::NodeError;

/// Shared context passed to every node during execution.
///
/// Defined here (in the nodes crate) so both the engine and individual
/// executors can import it without a circular dependency.
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    /// ID of the workflow being executed.
    pub workflow_id: uuid::Uuid,
    /// ID of the current execution run.
    pub execution_id: uuid::Uuid,
    /// The raw user input supplied when the execution was started.
    pub input_text: String,
}

/// The core executor trait.
///
/// Each implementation receives the *previous* stage's JSON output as
/// `input`, its own raw per-node configuration, and the shared context,
/// and returns this stage's JSON output.
#[async_trait]
pub trait NodeExecutor: Send + Sync {
    async fn execute(
        &self,
        input: Value,
        config: &Value,
        ctx: &ExecutionContext,
    ) -> Result<Value, NodeError>;
}

/// Extract the text a stage should operate on from the carried value.
///
/// Stages upstream may be disabled, so the carried value can be the raw
/// input string, an envelope with a `text` field, or something else
/// entirely; the original input is the fallback of last resort.
pub fn carried_text(input: &Value, ctx: &ExecutionContext) -> String {
    match input {
        Value::String(s) => s.clone(),
        Value::Object(map) => map
            .get("text")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .unwrap_or_else(|| ctx.input_text.clone()),
        _ => ctx.input_text.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ctx() -> ExecutionContext {
        ExecutionContext {
            workflow_id: uuid::Uuid::new_v4(),
            execution_id: uuid::Uuid::new_v4(),
            input_text: "original".into(),
        }
    }

    #[test]
    fn carried_text_prefers_envelope_field() {
        assert_eq!(carried_text(&json!({ "text": "hi" }), &ctx()), "hi");
    }

    #[test]
    fn carried_text_accepts_raw_string() {
        assert_eq!(carried_text(&json!("raw"), &ctx()), "raw");
    }

    #[test]
    fn carried_text_falls_back_to_original_input() {
        assert_eq!(carried_text(&json!({ "documents": [] }), &ctx()), "original");
        assert_eq!(carried_text(&json!(42), &ctx()), "original");
    }
}
