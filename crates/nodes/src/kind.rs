//! The closed set of node kinds a pipeline is built from.

use serde::{Deserialize, Serialize};

/// One typed stage in a workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Normalizes and bounds the raw user input.
    Input,
    /// Classifies intent and picks a target route.
    Router,
    /// Fetches candidate documents for the routed query.
    Retriever,
    /// Produces the response text from routed intent + documents.
    Generator,
    /// Applies the final presentation format.
    Output,
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Input => write!(f, "input"),
            Self::Router => write!(f, "router"),
            Self::Retriever => write!(f, "retriever"),
            Self::Generator => write!(f, "generator"),
            Self::Output => write!(f, "output"),
        }
    }
}

impl std::str::FromStr for NodeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "input" => Ok(Self::Input),
            "router" => Ok(Self::Router),
            "retriever" => Ok(Self::Retriever),
            "generator" => Ok(Self::Generator),
            "output" => Ok(Self::Output),
            other => Err(format!("unknown node kind: {other}")),
        }
    }
}
