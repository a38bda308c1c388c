//! Error types for pipedag operations.
//!
//! Errors are categorized into two groups:
//!
//! - **Input problems** (analogous to HTTP 4xx): a node or edge is missing an
//!   identifier field, or carries one of the wrong type. These surface as
//!   [`Error::Validation`].
//! - **Internal problems** (analogous to HTTP 5xx): the database, the
//!   filesystem, or JSON encoding failed.
//!
//! An edge pointing at an unknown node is *not* an error. It is counted in the
//! statistics and skipped by the cycle check.

use std::fmt;

use thiserror::Error;

/// Result type for pipedag operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for pipedag operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A node or edge failed structural validation
    #[error("invalid pipeline: {0}")]
    Validation(#[from] ValidationError),

    /// Nodes or edges could not be encoded to or decoded from JSON
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Database operation failed
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// File system operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration or arguments
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal invariant broken (e.g. a poisoned lock)
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Returns `true` if this is an input problem (4xx-style).
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns `true` if this is an internal problem (5xx-style).
    #[must_use]
    pub fn is_internal_error(&self) -> bool {
        !self.is_input_error()
    }
}

/// The kind of graph element that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element {
    /// An entry of the `nodes` list
    Node,
    /// An entry of the `edges` list
    Edge,
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Node => write!(f, "node"),
            Self::Edge => write!(f, "edge"),
        }
    }
}

/// What was wrong with an identifier field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Problem {
    /// The field is absent
    Missing,
    /// The field is present but is neither a string nor an integer
    InvalidType,
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "is missing"),
            Self::InvalidType => write!(f, "must be a string or an integer"),
        }
    }
}

/// A structural defect in a submitted node or edge.
///
/// Aborts the whole analysis: no partial statistics are produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{element} {index}: field `{field}` {problem}")]
pub struct ValidationError {
    /// Which list the element came from
    pub element: Element,
    /// Position of the element in its list
    pub index: usize,
    /// Name of the offending field (`id`, `source` or `target`)
    pub field: &'static str,
    /// What was wrong with it
    pub problem: Problem,
}

impl ValidationError {
    /// Create a validation error for a node field.
    #[must_use]
    pub fn node(index: usize, field: &'static str, problem: Problem) -> Self {
        Self {
            element: Element::Node,
            index,
            field,
            problem,
        }
    }

    /// Create a validation error for an edge field.
    #[must_use]
    pub fn edge(index: usize, field: &'static str, problem: Problem) -> Self {
        Self {
            element: Element::Edge,
            index,
            field,
            problem,
        }
    }
}
