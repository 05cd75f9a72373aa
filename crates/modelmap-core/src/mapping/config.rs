//! Declarative mapping configuration
//!
//! A [`MappingConfig`] is supplied once at engine construction and treated
//! as read-only for the engine's lifetime. Field mappings are logically
//! symmetric: each entry's key is the destination path in the forward
//! direction and the source path in reverse, and vice versa for the value.
//!
//! Transformers and processors are opaque callables: the engine never
//! inspects them, only invokes them with the value (or sub-tree) and the
//! direction flag. `Ok(None)` declines to produce output; an error
//! propagates out of the mapping call unmodified.

use crate::Result;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Adjusts a single field's value during field mapping, aware of direction
pub type Transformer = Box<dyn Fn(&Value, bool) -> Result<Option<Value>> + Send + Sync>;

/// Maps a whole sub-tree to another sub-tree, used when field-by-field
/// mapping is insufficient
pub type Processor = Box<dyn Fn(&Value, bool) -> Result<Option<Value>> + Send + Sync>;

/// Builds the initial destination tree from the source
pub type SeedFn = Box<dyn Fn(&Value) -> Value + Send + Sync>;

/// Lazily produced default value
pub type DefaultThunk = Box<dyn Fn() -> Value + Send + Sync>;

/// One custom processor registration
pub struct ProcessorDef {
    /// Path read in the forward direction, written in reverse
    pub source_model_path: Option<String>,
    /// Path written in the forward direction, read in reverse
    pub target_model_path: Option<String>,
    /// The processor callable
    pub processor: Processor,
}

impl ProcessorDef {
    /// Create a processor definition with neither path set
    pub fn new(
        processor: impl Fn(&Value, bool) -> Result<Option<Value>> + Send + Sync + 'static,
    ) -> Self {
        Self {
            source_model_path: None,
            target_model_path: None,
            processor: Box::new(processor),
        }
    }

    /// Set the source-model path
    pub fn source_path(mut self, path: impl Into<String>) -> Self {
        self.source_model_path = Some(path.into());
        self
    }

    /// Set the target-model path
    pub fn target_path(mut self, path: impl Into<String>) -> Self {
        self.target_model_path = Some(path.into());
        self
    }
}

/// A configured fallback: either a literal tree or a zero-argument thunk
pub enum DefaultValue {
    Literal(Value),
    Thunk(DefaultThunk),
}

impl DefaultValue {
    /// Create a thunk-backed default
    pub fn thunk(f: impl Fn() -> Value + Send + Sync + 'static) -> Self {
        DefaultValue::Thunk(Box::new(f))
    }

    /// Produce the concrete value, invoking the thunk if necessary
    pub fn resolve(&self) -> Value {
        match self {
            DefaultValue::Literal(value) => value.clone(),
            DefaultValue::Thunk(f) => f(),
        }
    }
}

impl From<Value> for DefaultValue {
    fn from(value: Value) -> Self {
        DefaultValue::Literal(value)
    }
}

/// Direction-keyed default back-fill tables
#[derive(Default)]
pub struct DefaultValues {
    /// Applied after a forward `map`
    pub map: Vec<(String, DefaultValue)>,
    /// Applied after a `map_reverse`
    pub map_reverse: Vec<(String, DefaultValue)>,
}

/// How the destination tree is seeded before any field mapping runs
pub enum BaseObject {
    /// Direction-keyed key paths: forward extracts the source value at
    /// `map`, reverse wraps the source under `map_reverse`
    Keys { map: String, map_reverse: String },
    /// Direction-keyed seed closures; a missing closure for the active
    /// direction seeds an empty object
    Seeds {
        map: Option<SeedFn>,
        map_reverse: Option<SeedFn>,
    },
}

impl BaseObject {
    /// Symmetric key-path pair using the same path for both directions
    pub fn key(path: impl Into<String>) -> Self {
        let path = path.into();
        BaseObject::Keys {
            map: path.clone(),
            map_reverse: path,
        }
    }
}

/// Complete declarative configuration for one mapping engine
#[derive(Default)]
pub struct MappingConfig {
    /// Ordered `(key_path, value_path)` pairs; keys are unique
    pub data_mappings: Vec<(String, String)>,
    /// Transformers looked up by the exact key path string
    pub data_transforms: HashMap<String, Transformer>,
    /// Custom processors, run in declared order
    pub custom_processors: Vec<ProcessorDef>,
    /// Default back-fill tables
    pub default_values: DefaultValues,
    /// Optional destination seeding
    pub base_object: Option<BaseObject>,
}

impl MappingConfig {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a symmetric field mapping between a key path and a value
    /// path
    pub fn mapping(mut self, key_path: impl Into<String>, value_path: impl Into<String>) -> Self {
        self.data_mappings.push((key_path.into(), value_path.into()));
        self
    }

    /// Register a transformer for the given key path
    pub fn transform(
        mut self,
        key_path: impl Into<String>,
        transformer: impl Fn(&Value, bool) -> Result<Option<Value>> + Send + Sync + 'static,
    ) -> Self {
        self.data_transforms
            .insert(key_path.into(), Box::new(transformer));
        self
    }

    /// Append a custom processor
    pub fn processor(mut self, def: ProcessorDef) -> Self {
        self.custom_processors.push(def);
        self
    }

    /// Declare a forward-direction default for a destination path
    pub fn default_value(
        mut self,
        dest_path: impl Into<String>,
        default: impl Into<DefaultValue>,
    ) -> Self {
        self.default_values.map.push((dest_path.into(), default.into()));
        self
    }

    /// Declare a reverse-direction default for a destination path
    pub fn default_value_reverse(
        mut self,
        dest_path: impl Into<String>,
        default: impl Into<DefaultValue>,
    ) -> Self {
        self.default_values
            .map_reverse
            .push((dest_path.into(), default.into()));
        self
    }

    /// Configure destination seeding
    pub fn base_object(mut self, base: BaseObject) -> Self {
        self.base_object = Some(base);
        self
    }

    /// Configure seed closures for one or both directions
    pub fn seeds(mut self, map: Option<SeedFn>, map_reverse: Option<SeedFn>) -> Self {
        self.base_object = Some(BaseObject::Seeds { map, map_reverse });
        self
    }
}

// Callables are opaque, so Debug shows shape only.
impl fmt::Debug for MappingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MappingConfig")
            .field("data_mappings", &self.data_mappings)
            .field("data_transforms", &self.data_transforms.keys().collect::<Vec<_>>())
            .field("custom_processors", &self.custom_processors.len())
            .field("defaults_map", &self.default_values.map.len())
            .field("defaults_map_reverse", &self.default_values.map_reverse.len())
            .field("has_base_object", &self.base_object.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_accumulates() {
        let config = MappingConfig::new()
            .mapping("b", "a.b")
            .mapping("a.b", "b")
            .transform("b", |value, _reverse| Ok(Some(value.clone())))
            .default_value("t", json!("fallback"))
            .default_value_reverse("Zulu.Alice", json!("foo"));

        assert_eq!(config.data_mappings.len(), 2);
        assert!(config.data_transforms.contains_key("b"));
        assert_eq!(config.default_values.map.len(), 1);
        assert_eq!(config.default_values.map_reverse.len(), 1);
    }

    #[test]
    fn test_default_value_resolution() {
        assert_eq!(DefaultValue::from(json!("x")).resolve(), json!("x"));
        assert_eq!(DefaultValue::thunk(|| json!(42)).resolve(), json!(42));
    }

    #[test]
    fn test_processor_def_paths() {
        let def = ProcessorDef::new(|value, _| Ok(Some(value.clone())))
            .source_path("Alpha")
            .target_path("a");
        assert_eq!(def.source_model_path.as_deref(), Some("Alpha"));
        assert_eq!(def.target_model_path.as_deref(), Some("a"));
    }
}
