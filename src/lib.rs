//! Stackvars: Typed Blueprint Variables
//!
//! Converts plain configuration values into strongly typed template resources
//! and properties, and declares the provider parameter types a blueprint
//! variable may use instead.

pub mod adapter;
pub mod config;
pub mod error;
pub mod logging;
pub mod parameter;
pub mod template;
pub mod tooling;
pub mod values;
pub mod variable;

pub use adapter::{Converted, TypedResourceAdapter};
pub use error::{ApiError, ConfigurationError, CreateError, VariableError};
pub use parameter::{ParameterTypeTag, ParameterValue};
pub use template::{Kind, Params, PropertyFactory, ResourceFactory, TargetType, TemplateType};
pub use variable::{
    NativeType, ResolvedVariable, ResolvedVariables, VariableDefinition, VariableSchema,
    VariableType,
};
