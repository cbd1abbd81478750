//! Per-kind node configuration schemas.
//!
//! The authoring surface stores each node's configuration as an open JSON
//! object. Every kind parses that object into its own typed struct here:
//! missing keys fall back to the defaults below, unknown keys are ignored,
//! and a value of the wrong shape is an [`NodeError::InvalidConfig`].
//! `null` (the column default for freshly created nodes) means
//! "all defaults".

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::{NodeError, NodeKind};

/// Parse a raw config value into the typed config for one node kind.
pub fn parse<T>(raw: &Value) -> Result<T, NodeError>
where
    T: DeserializeOwned + Default,
{
    match raw {
        Value::Null => Ok(T::default()),
        other => serde_json::from_value(other.clone())
            .map_err(|e| NodeError::InvalidConfig(e.to_string())),
    }
}

/// Check a raw config value against the schema for `kind` without keeping
/// the typed struct. The runner calls this before dispatching anything, so
/// a malformed configuration aborts the run before any node executes.
pub fn validate(kind: NodeKind, raw: &Value) -> Result<(), NodeError> {
    match kind {
        NodeKind::Input => parse::<InputConfig>(raw).map(drop),
        NodeKind::Router => parse::<RouterConfig>(raw).map(drop),
        NodeKind::Retriever => parse::<RetrieverConfig>(raw).map(drop),
        NodeKind::Generator => parse::<GeneratorConfig>(raw).map(drop),
        NodeKind::Output => parse::<OutputConfig>(raw).map(drop),
    }
}

// ---------------------------------------------------------------------------
// input
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Inputs longer than this are truncated with an explicit marker.
    pub max_length: usize,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self { max_length: 4000 }
    }
}

// ---------------------------------------------------------------------------
// router
// ---------------------------------------------------------------------------

/// The router has no tunables today; parsing still validates the shape.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RouterConfig {}

// ---------------------------------------------------------------------------
// retriever
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetrieverConfig {
    /// Top-N candidate documents requested from the retrieval collaborator.
    pub max_results: usize,
}

impl Default for RetrieverConfig {
    fn default() -> Self {
        Self { max_results: 3 }
    }
}

// ---------------------------------------------------------------------------
// generator
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Model tag handed to the generation collaborator.
    pub model: String,
    pub max_tokens: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            model: "stub-v1".to_owned(),
            max_tokens: 512,
        }
    }
}

// ---------------------------------------------------------------------------
// output
// ---------------------------------------------------------------------------

/// Presentation applied to the generated response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Plain,
    Detailed,
    Code,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

// ============================================================
// Unit tests
// ============================================================
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_config_yields_defaults() {
        let cfg: RetrieverConfig = parse(&Value::Null).expect("null is all-defaults");
        assert_eq!(cfg.max_results, 3);
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let cfg: GeneratorConfig = parse(&json!({ "model": "local-7b" })).unwrap();
        assert_eq!(cfg.model, "local-7b");
        assert_eq!(cfg.max_tokens, 512);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let cfg: InputConfig = parse(&json!({ "max_length": 10, "legacy_flag": true })).unwrap();
        assert_eq!(cfg.max_length, 10);
    }

    #[test]
    fn wrong_shape_is_invalid_config() {
        let err = parse::<InputConfig>(&json!({ "max_length": "lots" })).unwrap_err();
        assert!(matches!(err, NodeError::InvalidConfig(_)));
    }

    #[test]
    fn output_format_parses_snake_case() {
        let cfg: OutputConfig = parse(&json!({ "format": "code" })).unwrap();
        assert_eq!(cfg.format, OutputFormat::Code);
    }

    #[test]
    fn validate_dispatches_on_kind() {
        assert!(validate(NodeKind::Retriever, &json!({ "max_results": 5 })).is_ok());
        assert!(validate(NodeKind::Retriever, &json!({ "max_results": "five" })).is_err());
        assert!(validate(NodeKind::Output, &json!({ "format": "interpretive_dance" })).is_err());
    }
}
