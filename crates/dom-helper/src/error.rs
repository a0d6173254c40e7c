//! Error types for DOM operations
//!
//! Simple, flat error hierarchy. No over-engineering.

use thiserror::Error;

use crate::types::NodeId;

pub type Result<T> = std::result::Result<T, DomError>;

#[derive(Debug, Error)]
pub enum DomError {
    #[error("node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("missing required argument: {0}")]
    MissingArgument(&'static str),

    #[error("{0}")]
    KindMismatch(String),

    #[error("unknown primitive kind {0:?} (expected one of boolean, number, string, object)")]
    UnknownKind(String),

    #[error("node {0} is not an element")]
    NotAnElement(NodeId),

    #[error("depth must be a positive integer, got {0}")]
    InvalidDepth(u32),

    #[error("invalid selector {selector:?}: {reason}")]
    Selector { selector: String, reason: String },

    #[error("malformed document tree: {0}")]
    Malformed(String),

    #[error("invalid class pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{0}")]
    Raised(String),
}

impl DomError {
    /// Fail with a caller-supplied message.
    pub fn raised(message: impl Into<String>) -> Self {
        DomError::Raised(message.into())
    }

    pub(crate) fn selector(selector: &str, reason: impl Into<String>) -> Self {
        DomError::Selector {
            selector: selector.to_string(),
            reason: reason.into(),
        }
    }
}
