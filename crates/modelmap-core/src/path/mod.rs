//! Path micro-language for reading and writing deep inside trees
//!
//! This module implements a small dotted-path language with three
//! addressing modes per segment: plain key (`a`), numeric index (`d[3]`),
//! and predicate filter (`b[sub_key=val]`, selecting the first array
//! element whose nested field `sub.key` equals the literal). The same
//! parsed expression drives both the recursive [`reader`] and the
//! iterative, structure-creating [`writer`].

pub mod ast;
pub mod parser;
pub mod reader;
pub mod writer;


pub use ast::{PathSegment, Qualifier};
pub use parser::Parser;

use crate::Result;
use serde_json::Value;
use std::fmt;

/// A parsed, immutable path expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathExpression {
    segments: Vec<PathSegment>,
}

impl PathExpression {
    /// Parse a dotted path string (e.g. `a.b[sub_key=val].c[3]`)
    pub fn parse(path: &str) -> Result<Self> {
        let segments = Parser::new(path)?.parse()?;
        Ok(Self { segments })
    }

    /// The ordered segments of this expression
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Resolve this path against a tree
    pub fn read<'a>(&self, tree: &'a Value) -> Option<&'a Value> {
        reader::read(tree, &self.segments)
    }

    /// Deposit a value at this path inside a tree
    pub fn write(&self, tree: &mut Value, value: Value) {
        writer::write(tree, &self.segments, value)
    }
}

impl fmt::Display for PathExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

/// Read the value at a path string, treating an unparseable path as "no
/// mapping". Callers that care about why a path failed to parse should use
/// [`PathExpression::parse`] instead.
pub fn get_value<'a>(tree: &'a Value, path: &str) -> Option<&'a Value> {
    let expr = PathExpression::parse(path).ok()?;
    expr.read(tree)
}

/// Write a value at a path string; an unparseable path is a no-op
pub fn set_value(tree: &mut Value, path: &str, value: Value) {
    if let Ok(expr) = PathExpression::parse(path) {
        expr.write(tree, value);
    }
}
