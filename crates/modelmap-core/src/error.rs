//! Error types for the modelmap core library
//!
//! This module defines the error handling system for the mapping engine,
//! using thiserror for ergonomic error definitions and anyhow as the opaque
//! payload for failures raised inside user-supplied callables.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Main error type for mapping operations
#[derive(Error, Debug)]
pub enum Error {
    /// Path string could not be parsed into a path expression
    #[error("invalid path expression `{path}`: {message}")]
    InvalidPath { path: String, message: String },

    /// A custom processor produced a scalar result with nowhere to put it
    #[error(
        "custom processor [{index}] ({direction}) returned a scalar result \
         but has no destination path"
    )]
    MissingDestinationPath { index: usize, direction: Direction },

    /// An array-wise operation was handed something that is not an array
    #[error("{operation}: value must be an array")]
    NotAnArray { operation: String },

    /// Failure raised inside a user-supplied transformer or processor.
    ///
    /// The engine never constructs this itself; it exists so user closures
    /// have a typed carrier that propagates through a mapping call
    /// unmodified.
    #[error("callable failed: {message}")]
    Callable {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Which side of a symmetric mapping pair is the source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Keys are destinations, values are sources
    Forward,
    /// Keys are sources, values are destinations
    Reverse,
}

impl Direction {
    /// Translate the engine's `reverse` flag into a direction
    pub fn from_reverse(reverse: bool) -> Self {
        if reverse {
            Direction::Reverse
        } else {
            Direction::Forward
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Forward => write!(f, "forward"),
            Direction::Reverse => write!(f, "reverse"),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Callable {
            message: err.to_string(),
            source: Some(err),
        }
    }
}
