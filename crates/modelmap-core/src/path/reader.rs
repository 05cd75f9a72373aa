//! Recursive path resolution against a tree
//!
//! Reading is deterministic and side-effect free. Absence of a match at any
//! segment short-circuits the rest of the path; malformed data never
//! produces an error, only `None`.

use super::ast::{PathSegment, Qualifier};
use super::parser::Parser;
use serde_json::Value;

/// Resolve a parsed path against a tree.
///
/// Returns a borrow of the located node, which may be any value kind
/// including an explicit null. A present null is a successful read; only a
/// failed lookup yields `None`.
pub fn read<'a>(tree: &'a Value, segments: &[PathSegment]) -> Option<&'a Value> {
    let (segment, rest) = match segments.split_first() {
        Some(parts) => parts,
        // Out of path: whatever we are standing on is the result.
        None => return Some(tree),
    };

    let element = tree.as_object()?.get(&segment.element)?;

    let current = match &segment.qualifier {
        None => element,
        Some(Qualifier::Index(index)) => element.as_array()?.get(*index)?,
        Some(Qualifier::Predicate { key, literal }) => {
            find_predicate_match(element.as_array()?, key, literal)?
        }
        // A bare qualifier addresses nothing in read context.
        Some(Qualifier::Bare(_)) => return None,
    };

    read(current, rest)
}

/// Find the first element of `items` whose nested field at `key` is a
/// string equal to `literal`. Matching is string equality only.
pub(crate) fn find_predicate_match<'a>(
    items: &'a [Value],
    key: &str,
    literal: &str,
) -> Option<&'a Value> {
    let key_path = parse_predicate_key(key)?;
    items
        .iter()
        .find(|item| predicate_matches(item, &key_path, literal))
}

/// Check whether a single candidate satisfies a predicate
pub(crate) fn predicate_matches(item: &Value, key_path: &[PathSegment], literal: &str) -> bool {
    matches!(read(item, key_path), Some(Value::String(s)) if s == literal)
}

/// Parse a predicate key (already dot-converted) into its own path
pub(crate) fn parse_predicate_key(key: &str) -> Option<Vec<PathSegment>> {
    Parser::new(key).ok()?.parse().ok()
}
