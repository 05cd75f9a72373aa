//! Syntax tree definitions for path expressions
//!
//! This module defines the segment and qualifier types produced by the path
//! parser. A parsed expression is never mutated after construction.

use std::fmt;

/// One dot-delimited unit of a path: a key plus an optional qualifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSegment {
    /// Key looked up in the current mapping node
    pub element: String,
    /// Optional bracket qualifier applied to the element's value
    pub qualifier: Option<Qualifier>,
}

impl PathSegment {
    /// Create a segment with no qualifier
    pub fn plain(element: impl Into<String>) -> Self {
        Self {
            element: element.into(),
            qualifier: None,
        }
    }

    /// Create a segment with the given qualifier
    pub fn qualified(element: impl Into<String>, qualifier: Qualifier) -> Self {
        Self {
            element: element.into(),
            qualifier: Some(qualifier),
        }
    }
}

/// Bracket qualifier attached to a path segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Qualifier {
    /// Numeric array index (`d[3]`)
    Index(usize),
    /// Predicate selecting the first array element whose nested field
    /// equals a literal string (`b[sub_key=val]`). The key is stored with
    /// underscores already substituted for dots (`sub.key`).
    Predicate { key: String, literal: String },
    /// Bracket body that is neither an integer nor a predicate. Reads
    /// through it resolve to nothing; writes through it are rejected.
    Bare(String),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.element)?;
        match &self.qualifier {
            None => Ok(()),
            Some(Qualifier::Index(idx)) => write!(f, "[{}]", idx),
            Some(Qualifier::Predicate { key, literal }) => {
                write!(f, "[{}={}]", key.replace('.', "_"), literal)
            }
            Some(Qualifier::Bare(body)) => write!(f, "[{}]", body),
        }
    }
}
