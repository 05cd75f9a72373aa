//! Iterative path writing with implicit structure creation
//!
//! Unlike the reader's natural recursion, writing walks the path with an
//! explicit cursor: each segment's handling depends on whether any path
//! remains, and intermediate containers must be created and then mutated
//! through the same reference. A previous incarnation of this algorithm
//! used recursion and lost data to accidental copies, so the iterative
//! shape is deliberate.

use super::ast::{PathSegment, Qualifier};
use super::reader::{parse_predicate_key, predicate_matches};
use serde_json::{Map, Value};

/// Deposit `value` at `segments` inside `dest`, creating missing
/// intermediate containers as required.
///
/// A null destination first becomes an empty object. Soft failures (a bare
/// qualifier anywhere in the path, or a predicate-terminal write with a
/// non-object value) leave the destination completely unchanged; they are
/// validated before any mutation happens.
pub fn write(dest: &mut Value, segments: &[PathSegment], value: Value) {
    let (last, intermediate) = match segments.split_last() {
        Some(parts) => parts,
        None => return,
    };

    if has_bare_qualifier(segments) {
        return;
    }
    if matches!(last.qualifier, Some(Qualifier::Predicate { .. })) && !value.is_object() {
        // There is no way to make sense of merging a scalar into a
        // predicate-selected element.
        return;
    }

    if dest.is_null() {
        *dest = Value::Object(Map::new());
    }

    let mut cursor = dest;
    for segment in intermediate {
        cursor = match descend(cursor, segment) {
            Some(next) => next,
            None => return,
        };
    }

    deposit(cursor, last, value);
}

/// Walk into one non-terminal segment, creating structure as needed
pub(crate) fn descend<'a>(cursor: &'a mut Value, segment: &PathSegment) -> Option<&'a mut Value> {
    let obj = cursor.as_object_mut()?;
    match &segment.qualifier {
        None => {
            let slot = obj
                .entry(segment.element.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            Some(slot)
        }
        Some(Qualifier::Index(index)) => {
            let items = ensure_array_slot(obj, &segment.element, false)?;
            grow_to(items, *index);
            let slot = &mut items[*index];
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            Some(slot)
        }
        Some(Qualifier::Predicate { key, literal }) => {
            let items = ensure_array_slot(obj, &segment.element, true)?;
            let index = locate_or_insert_match(items, key, literal)?;
            Some(&mut items[index])
        }
        Some(Qualifier::Bare(_)) => None,
    }
}

/// Handle the terminal segment of a write
fn deposit(cursor: &mut Value, segment: &PathSegment, value: Value) {
    let obj = match cursor.as_object_mut() {
        Some(obj) => obj,
        None => return,
    };

    match &segment.qualifier {
        None => match obj.get_mut(&segment.element) {
            Some(existing) if existing.is_object() && value.is_object() => {
                merge_values(existing, value)
            }
            Some(existing) => *existing = value,
            None => {
                obj.insert(segment.element.clone(), value);
            }
        },
        Some(Qualifier::Index(index)) => {
            if let Some(items) = ensure_array_slot(obj, &segment.element, false) {
                grow_to(items, *index);
                items[*index] = value;
            }
        }
        Some(Qualifier::Predicate { key, literal }) => {
            if let Some(items) = ensure_array_slot(obj, &segment.element, true) {
                if let Some(index) = locate_or_insert_match(items, key, literal) {
                    // Merge, not replace: the predicate tag already set on
                    // the match must survive.
                    merge_values(&mut items[index], value);
                }
            }
        }
        Some(Qualifier::Bare(_)) => {}
    }
}

/// Walk the full path and return the terminal slot, forcing it to hold a
/// container of the requested kind. Used by the orchestrator's processor
/// stage, which assigns into an existing container rather than writing a
/// value outright.
pub(crate) fn ensure_container<'a>(
    dest: &'a mut Value,
    segments: &[PathSegment],
    want_array: bool,
) -> Option<&'a mut Value> {
    let (last, intermediate) = segments.split_last()?;
    if has_bare_qualifier(segments) {
        return None;
    }

    if dest.is_null() {
        *dest = Value::Object(Map::new());
    }

    let mut cursor = dest;
    for segment in intermediate {
        cursor = descend(cursor, segment)?;
    }

    let obj = cursor.as_object_mut()?;
    match &last.qualifier {
        None => {
            let slot = obj
                .entry(last.element.clone())
                .or_insert_with(|| empty_container(want_array));
            if container_mismatch(slot, want_array) {
                *slot = empty_container(want_array);
            }
            Some(slot)
        }
        Some(Qualifier::Index(index)) => {
            let items = ensure_array_slot(obj, &last.element, false)?;
            grow_to(items, *index);
            let slot = &mut items[*index];
            if container_mismatch(slot, want_array) {
                *slot = empty_container(want_array);
            }
            Some(slot)
        }
        Some(Qualifier::Predicate { key, literal }) => {
            // The matched element is itself the container.
            let items = ensure_array_slot(obj, &last.element, true)?;
            let index = locate_or_insert_match(items, key, literal)?;
            Some(&mut items[index])
        }
        Some(Qualifier::Bare(_)) => None,
    }
}

/// Deep-merge `incoming` into `existing`: object fields merge recursively,
/// everything else replaces outright.
pub(crate) fn merge_values(existing: &mut Value, incoming: Value) {
    match (&mut *existing, incoming) {
        (Value::Object(dst), Value::Object(src)) => {
            for (key, value) in src {
                match dst.get_mut(&key) {
                    Some(slot) => merge_values(slot, value),
                    None => {
                        dst.insert(key, value);
                    }
                }
            }
        }
        (_, incoming) => *existing = incoming,
    }
}

fn has_bare_qualifier(segments: &[PathSegment]) -> bool {
    segments
        .iter()
        .any(|segment| matches!(segment.qualifier, Some(Qualifier::Bare(_))))
}

/// Force `element` to hold an array. An absent element becomes an empty
/// array; an existing non-array is wrapped as a singleton when `wrap` is
/// set (predicate semantics) or discarded otherwise (index semantics).
fn ensure_array_slot<'a>(
    obj: &'a mut Map<String, Value>,
    element: &str,
    wrap: bool,
) -> Option<&'a mut Vec<Value>> {
    let slot = obj
        .entry(element.to_string())
        .or_insert_with(|| Value::Array(Vec::new()));
    if !slot.is_array() {
        if wrap {
            let existing = slot.take();
            *slot = Value::Array(vec![existing]);
        } else {
            *slot = Value::Array(Vec::new());
        }
    }
    slot.as_array_mut()
}

/// Index of the first predicate match, appending a freshly tagged object
/// when nothing matches
fn locate_or_insert_match(items: &mut Vec<Value>, key: &str, literal: &str) -> Option<usize> {
    let key_path = parse_predicate_key(key)?;
    if let Some(index) = items
        .iter()
        .position(|item| predicate_matches(item, &key_path, literal))
    {
        return Some(index);
    }

    let mut created = Value::Object(Map::new());
    write(&mut created, &key_path, Value::String(literal.to_string()));
    items.push(created);
    Some(items.len() - 1)
}

fn grow_to(items: &mut Vec<Value>, index: usize) {
    while items.len() <= index {
        items.push(Value::Null);
    }
}

fn empty_container(want_array: bool) -> Value {
    if want_array {
        Value::Array(Vec::new())
    } else {
        Value::Object(Map::new())
    }
}

fn container_mismatch(slot: &Value, want_array: bool) -> bool {
    if want_array {
        !slot.is_array()
    } else {
        !slot.is_object()
    }
}
