//! Declarative bidirectional mapping engine
//!
//! The [`ModelMapper`] composes field-level copies, value transforms,
//! multi-field custom processors, and default-value back-fill, all
//! symmetric under a direction flag so one configuration drives
//! translation both ways.

pub mod config;
pub mod mapper;

pub use config::{
    BaseObject, DefaultThunk, DefaultValue, DefaultValues, MappingConfig, Processor, ProcessorDef,
    SeedFn, Transformer,
};
pub use mapper::ModelMapper;
