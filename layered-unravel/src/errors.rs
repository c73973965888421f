//! Error types for unravelling.

use layered_corpus::{CorpusError, Node};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UnravelError {
    /// The explain mode is not one of the recognized values.
    #[error("illegal value for explain: `{0}`; must be `true` or `details`")]
    InvalidExplain(String),

    /// The focus node does not exist.
    #[error("node {node} outside 1..={max_node}")]
    NodeOutOfRange { node: Node, max_node: Node },

    /// A setting names a type the corpus does not have.
    #[error("{setting}: unknown node type {name:?}")]
    UnknownType { setting: &'static str, name: String },

    /// The rendering configuration could not be parsed.
    #[error("invalid render configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error(transparent)]
    Corpus(#[from] CorpusError),
}

/// Result type for unravel operations.
pub type UnravelResult<T> = Result<T, UnravelError>;
