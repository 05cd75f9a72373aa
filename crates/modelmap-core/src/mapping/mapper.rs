//! Mapping orchestrator
//!
//! Drives four ordered stages over a single accumulating destination tree:
//! base-object seeding, field mapping + transforms, custom multi-field
//! processors, and default back-fill. The same declarative configuration
//! drives both directions; the `reverse` flag selects which side of each
//! symmetric path pair is source and which is destination.

use super::config::{BaseObject, MappingConfig, ProcessorDef};
use crate::error::Direction;
use crate::path;
use crate::path::writer::ensure_container;
use crate::path::PathExpression;
use crate::{Error, Result};
use log::{debug, trace};
use serde_json::{Map, Value};

/// Bidirectional declarative mapping engine
///
/// Construction takes a [`MappingConfig`] once; the configuration is
/// read-only for the engine's lifetime. A mapper built without a
/// configuration maps every source to `None`.
pub struct ModelMapper {
    config: Option<MappingConfig>,
}

impl ModelMapper {
    /// Create an engine from a configuration
    pub fn new(config: MappingConfig) -> Self {
        Self {
            config: Some(config),
        }
    }

    /// Create an engine with no configuration; every mapping call yields
    /// `None`
    pub fn unconfigured() -> Self {
        Self { config: None }
    }

    /// The configuration this engine was built with, if any
    pub fn config(&self) -> Option<&MappingConfig> {
        self.config.as_ref()
    }

    /// Map a source tree in the forward direction.
    ///
    /// Returns `Ok(None)` when the source is null or the engine has no
    /// configuration; mapping requires both.
    pub fn map(&self, source: &Value) -> Result<Option<Value>> {
        self.map_model(source, false)
    }

    /// Map a source tree in the reverse direction
    pub fn map_reverse(&self, source: &Value) -> Result<Option<Value>> {
        self.map_model(source, true)
    }

    /// Map each element of a source array.
    ///
    /// A null input yields an empty vec; any other non-array input fails
    /// with [`Error::NotAnArray`]. Elements that map to `None` surface as
    /// nulls in the output.
    pub fn map_array(&self, sources: &Value, reverse: bool) -> Result<Vec<Value>> {
        let items = match sources {
            Value::Null => return Ok(Vec::new()),
            Value::Array(items) => items,
            _ => {
                return Err(Error::NotAnArray {
                    operation: "map_array".to_string(),
                })
            }
        };

        items
            .iter()
            .map(|item| Ok(self.map_model(item, reverse)?.unwrap_or(Value::Null)))
            .collect()
    }

    /// Map each element of a source array in the reverse direction
    pub fn map_array_reverse(&self, sources: &Value) -> Result<Vec<Value>> {
        self.map_array(sources, true)
    }

    fn map_model(&self, source: &Value, reverse: bool) -> Result<Option<Value>> {
        let config = match &self.config {
            Some(config) => config,
            None => return Ok(None),
        };
        if source.is_null() {
            return Ok(None);
        }

        debug!(
            "mapping model ({}): {} field pairs, {} processors",
            Direction::from_reverse(reverse),
            config.data_mappings.len(),
            config.custom_processors.len()
        );

        let mut dest = seed_base_object(source, config, reverse);
        map_and_transform(source, &mut dest, config, reverse)?;
        run_custom_processors(source, &mut dest, config, reverse)?;
        insert_default_values(&mut dest, config, reverse);

        Ok(Some(dest))
    }
}

/// Stage 1: seed the destination tree
fn seed_base_object(source: &Value, config: &MappingConfig, reverse: bool) -> Value {
    match &config.base_object {
        None => Value::Object(Map::new()),
        Some(BaseObject::Seeds { map, map_reverse }) => {
            let seed = if reverse { map_reverse } else { map };
            match seed {
                Some(seed) => seed(source),
                None => Value::Object(Map::new()),
            }
        }
        Some(BaseObject::Keys { map, map_reverse }) => {
            if reverse {
                // Wrap the whole source under the reverse key path.
                let mut dest = Value::Object(Map::new());
                path::set_value(&mut dest, map_reverse, source.clone());
                dest
            } else {
                // Extract the forward key path as the implicit top level.
                path::get_value(source, map)
                    .cloned()
                    .unwrap_or_else(|| Value::Object(Map::new()))
            }
        }
    }
}

/// Stage 2: field-level copies with optional per-field transforms
fn map_and_transform(
    source: &Value,
    dest: &mut Value,
    config: &MappingConfig,
    reverse: bool,
) -> Result<()> {
    for (key_path, value_path) in &config.data_mappings {
        let (data_path, dest_path) = if reverse {
            (key_path, value_path)
        } else {
            (value_path, key_path)
        };

        let value = path::get_value(source, data_path).cloned();

        // Transformers only see values that were actually found; a present
        // null counts as found, a missing path does not.
        let value = match (value, config.data_transforms.get(key_path.as_str())) {
            (Some(found), Some(transformer)) => transformer(&found, reverse)?,
            (value, _) => value,
        };

        if let Some(value) = value {
            trace!("field copy {} -> {}", data_path, dest_path);
            path::set_value(dest, dest_path, value);
        }
    }

    Ok(())
}

/// Stage 3: custom multi-field processors, in declared order
fn run_custom_processors(
    source: &Value,
    dest: &mut Value,
    config: &MappingConfig,
    reverse: bool,
) -> Result<()> {
    for (index, def) in config.custom_processors.iter().enumerate() {
        let (read_path, write_path) = direction_paths(def, reverse);

        let sub_tree = match read_path {
            Some(path) => path::get_value(source, path),
            None => Some(source),
        };
        let sub_tree = match sub_tree {
            Some(value) if !value.is_null() => value,
            _ => {
                trace!("processor [{}] skipped: no sub-tree", index);
                continue;
            }
        };

        let result = match (def.processor)(sub_tree, reverse)? {
            Some(result) => result,
            None => {
                trace!("processor [{}] declined", index);
                continue;
            }
        };

        match result {
            result @ (Value::Object(_) | Value::Array(_)) => {
                assign_container_result(dest, write_path, result);
            }
            scalar => {
                // A scalar has no mergeable shape; without a destination
                // path there is nowhere to put it.
                let write_path = write_path.ok_or(Error::MissingDestinationPath {
                    index,
                    direction: Direction::from_reverse(reverse),
                })?;
                path::set_value(dest, write_path, scalar);
            }
        }
    }

    Ok(())
}

/// Select which of the processor's paths is read and which is written
fn direction_paths(def: &ProcessorDef, reverse: bool) -> (Option<&String>, Option<&String>) {
    if reverse {
        (def.target_model_path.as_ref(), def.source_model_path.as_ref())
    } else {
        (def.source_model_path.as_ref(), def.target_model_path.as_ref())
    }
}

/// Merge a container-shaped processor result into the destination: into a
/// same-kind container at the write path, or directly into the root when
/// no path is given. Kind mismatches at the root are absorbed as no-ops.
fn assign_container_result(dest: &mut Value, write_path: Option<&String>, result: Value) {
    let target = match write_path {
        Some(path) => match PathExpression::parse(path) {
            Ok(expr) => ensure_container(dest, expr.segments(), result.is_array()),
            Err(_) => None,
        },
        None => Some(dest),
    };

    let target = match target {
        Some(target) => target,
        None => return,
    };

    match (&mut *target, result) {
        (Value::Object(fields), Value::Object(incoming)) => {
            // Field-wise assign, not a deep merge.
            for (key, value) in incoming {
                fields.insert(key, value);
            }
        }
        (Value::Array(items), Value::Array(incoming)) => items.extend(incoming),
        _ => {}
    }
}

/// Stage 4: fill still-absent destination paths with configured defaults
fn insert_default_values(dest: &mut Value, config: &MappingConfig, reverse: bool) {
    let defaults = if reverse {
        &config.default_values.map_reverse
    } else {
        &config.default_values.map
    };

    for (dest_path, default) in defaults {
        if path::get_value(dest, dest_path).is_none() {
            trace!("back-filling default at {}", dest_path);
            path::set_value(dest, dest_path, default.resolve());
        }
    }
}
