//! Output stage — applies the configured presentation format to the
//! generated response. This stage's result is the pipeline's final payload.

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::config::{self, OutputConfig, OutputFormat};
use crate::traits::{carried_text, ExecutionContext, NodeExecutor};
use crate::NodeError;

pub struct OutputExecutor;

#[async_trait]
impl NodeExecutor for OutputExecutor {
    async fn execute(
        &self,
        input: Value,
        config: &Value,
        ctx: &ExecutionContext,
    ) -> Result<Value, NodeError> {
        let cfg: OutputConfig = config::parse(config)?;

        // The generator writes "response"; if it was disabled, fall back to
        // whatever text the carried value holds.
        let response = input
            .get("response")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .unwrap_or_else(|| carried_text(&input, ctx));

        let out = match cfg.format {
            OutputFormat::Plain => json!({
                "response": response,
                "format": "plain",
            }),
            OutputFormat::Detailed => json!({
                "response": response,
                "format": "detailed",
                "annotations": {
                    "model": input.get("model").cloned().unwrap_or(Value::Null),
                    "sources": input.get("sources").cloned().unwrap_or(Value::Null),
                    "context_size": input.get("context_size").cloned().unwrap_or(Value::Null),
                },
            }),
            OutputFormat::Code => json!({
                "response": format!("```\n{response}\n```"),
                "format": "code",
            }),
        };

        Ok(out)
    }
}
