//! Router stage — coarse intent detection over the normalized text.
//!
//! Detection is an ordered rule list, checked top to bottom; the first
//! matching rule wins, so tie-breaks are reproducible: question markers
//! outrank generation verbs, greetings come after both, and anything else
//! falls through to `unknown`, routed straight to the generator (retrieval
//! adds nothing to an unclassifiable input).
//!
//! Confidence is a fixed coarse score per rule — a heuristic for display
//! and debugging, not a calibrated probability.

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::config::{self, RouterConfig};
use crate::traits::{carried_text, ExecutionContext, NodeExecutor};
use crate::NodeError;

struct IntentRule {
    intent: &'static str,
    target_route: &'static str,
    confidence: f64,
    matches: fn(&str) -> bool,
}

/// Ordered: earlier rules win.
const RULES: &[IntentRule] = &[
    IntentRule {
        intent: "question",
        target_route: "retriever",
        confidence: 0.9,
        matches: is_question,
    },
    IntentRule {
        intent: "generation",
        target_route: "generator",
        confidence: 0.8,
        matches: wants_generation,
    },
    IntentRule {
        intent: "greeting",
        target_route: "generator",
        confidence: 0.85,
        matches: is_greeting,
    },
];

const INTERROGATIVES: &[&str] = &[
    "what", "who", "when", "where", "why", "how", "which", "is", "are", "can", "do", "does",
];

const GENERATION_VERBS: &[&str] = &[
    "write", "create", "generate", "make", "build", "draft", "compose", "implement",
    "summarize", "translate",
];

const GREETINGS: &[&str] = &[
    "hello", "hi", "hey", "greetings", "good morning", "good afternoon", "good evening",
];

fn first_word(text: &str) -> Option<&str> {
    text.split_whitespace()
        .next()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
}

fn is_question(text: &str) -> bool {
    text.contains('?') || first_word(text).is_some_and(|w| INTERROGATIVES.contains(&w))
}

fn wants_generation(text: &str) -> bool {
    text.split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .any(|w| GENERATION_VERBS.contains(&w))
}

fn is_greeting(text: &str) -> bool {
    GREETINGS.iter().any(|g| text.starts_with(g))
}

pub struct RouterExecutor;

#[async_trait]
impl NodeExecutor for RouterExecutor {
    async fn execute(
        &self,
        input: Value,
        config: &Value,
        ctx: &ExecutionContext,
    ) -> Result<Value, NodeError> {
        let _cfg: RouterConfig = config::parse(config)?;

        let text = carried_text(&input, ctx);
        let lowered = text.trim().to_lowercase();

        let (intent, target_route, confidence) = RULES
            .iter()
            .find(|rule| (rule.matches)(&lowered))
            .map(|rule| (rule.intent, rule.target_route, rule.confidence))
            .unwrap_or(("unknown", "generator", 0.3));

        tracing::debug!(intent, target_route, "routed input");

        Ok(json!({
            "text": text,
            "intent": intent,
            "target_route": target_route,
            "confidence": confidence,
        }))
    }
}
