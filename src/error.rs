//! Error types for adapters, variable resolution, and the tooling layer.

use thiserror::Error;

/// Configuration-validation failure raised by a typed resource adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("Type {type_name} must provide a `from_dict` factory")]
    MissingFactory { type_name: String },

    #[error("Cannot specify both `many` and `optional` for {type_name}")]
    ConflictingOptions { type_name: String },

    #[error("Resources of type {type_name} must be specified as a mapping of title to parameters")]
    ResourceShape { type_name: String },

    #[error("Only one {type_name} resource can be provided for this variable, got {count}")]
    TooManyResources { type_name: String, count: usize },

    #[error("No {type_name} value was provided for a required variable")]
    EmptyValue { type_name: String },

    #[error("Parameters for {type_name} resource '{title}' must be a mapping")]
    ResourceParams { type_name: String, title: String },

    #[error("{type_name} accepts many values and must be specified as a list of parameter mappings")]
    PropertyListShape { type_name: String },

    #[error("Element {index} of the {type_name} list must be a mapping of parameters")]
    PropertyElementShape { type_name: String, index: usize },

    #[error("{type_name} for a single property must be specified as a mapping of parameters")]
    PropertyShape { type_name: String },
}

/// Failure of [`TypedResourceAdapter::create`](crate::adapter::TypedResourceAdapter::create).
///
/// Errors raised by the wrapped type's own factory or `validate_props` hook
/// surface as `Invalid`, untouched.
#[derive(Debug, Error)]
pub enum CreateError<E> {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Invalid(E),
}

impl<E> CreateError<E> {
    pub fn configuration(&self) -> Option<&ConfigurationError> {
        match self {
            CreateError::Configuration(err) => Some(err),
            CreateError::Invalid(_) => None,
        }
    }

    pub fn invalid(&self) -> Option<&E> {
        match self {
            CreateError::Invalid(err) => Some(err),
            CreateError::Configuration(_) => None,
        }
    }
}

/// Variable resolution errors.
#[derive(Debug, Error)]
pub enum VariableError {
    #[error("Variable {variable} in blueprint {blueprint} is missing and has no default")]
    MissingVariable { blueprint: String, variable: String },

    #[error("Unknown type '{type_name}' declared for variable {variable}")]
    UnknownVariableType { variable: String, type_name: String },

    #[error("Validator {validator} failed for variable {variable} with value {value}: {source}")]
    ValidatorFailed {
        variable: String,
        validator: String,
        value: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Variable {variable} must be of type {expected}, got {actual}")]
    WrongType {
        variable: String,
        expected: String,
        actual: String,
    },

    #[error("Invalid value {value} for variable {variable} in blueprint {blueprint}, must be one of: {allowed}")]
    NotAllowed {
        blueprint: String,
        variable: String,
        value: String,
        allowed: String,
    },

    #[error("Parameter {name} value must be one of str, int, bool, or list, got: {value}")]
    InvalidParameterValue { name: String, value: String },
}

/// Crate-level error for the loading and tooling layers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Failed to load settings: {0}")]
    Settings(#[from] config::ConfigError),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Unsupported file format for {0} (expected .yaml, .yml, .json or .toml)")]
    UnsupportedFormat(String),

    #[error("Unknown parameter type: {0}")]
    UnknownParameterType(String),

    #[error(transparent)]
    Variable(#[from] VariableError),
}
