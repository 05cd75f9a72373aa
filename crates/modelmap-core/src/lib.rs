//! Modelmap Core - bidirectional declarative object-to-object mapping
//!
//! This crate maps values between two tree shapes using a small
//! path-addressing language that can read and write deep inside nested
//! object/array structures, including array elements selected by index or
//! by predicate match.
//!
//! # Main Components
//!
//! - **Path language**: dotted paths with plain-key, numeric-index, and
//!   `[key=literal]` predicate addressing ([`path`])
//! - **Reader / Writer**: recursive resolution and iterative, in-place
//!   writing with implicit structure creation
//! - **Mapping engine**: declarative field copies, transforms, custom
//!   processors, and default back-fill, symmetric under a direction flag
//!   ([`mapping`])
//!
//! # Example
//!
//! ```
//! use modelmap_core::{MappingConfig, ModelMapper};
//! use serde_json::json;
//!
//! # fn main() -> modelmap_core::Result<()> {
//! let mapper = ModelMapper::new(
//!     MappingConfig::new()
//!         .mapping("b", "a.b")
//!         .mapping("a.b", "b"),
//! );
//!
//! let output = mapper.map(&json!({"a": {"b": 5}, "b": "universe"}))?;
//! assert_eq!(output, Some(json!({"b": 5, "a": {"b": "universe"}})));
//!
//! let back = mapper.map_reverse(&json!({"b": 5, "a": {"b": "universe"}}))?;
//! assert_eq!(back, Some(json!({"a": {"b": 5}, "b": "universe"})));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod mapping;
pub mod path;

// Re-export main types for convenience
pub use error::{Direction, Error, Result};
pub use mapping::{
    BaseObject, DefaultValue, MappingConfig, ModelMapper, Processor, ProcessorDef, Transformer,
};
pub use path::{get_value, set_value, PathExpression};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_library_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_reexported_path_helpers() {
        let tree = json!({"a": {"b": 1}});
        assert_eq!(get_value(&tree, "a.b"), Some(&json!(1)));
    }

    #[test]
    fn test_error_display() {
        let err = Error::NotAnArray {
            operation: "map_array".to_string(),
        };
        assert_eq!(err.to_string(), "map_array: value must be an array");
    }
}
