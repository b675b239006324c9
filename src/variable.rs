//! Blueprint Variable Resolution
//!
//! Each blueprint declares its variables with a type. Resolution takes the
//! configured value (or the declared default) and dispatches on that type:
//! parameter tags pass the value through to the provider, template adapters
//! build typed instances, and native types are checked in place.

use crate::adapter::{Converted, TypedResourceAdapter};
use crate::error::VariableError;
use crate::parameter::{self, ParameterTypeTag, ParameterValue};
use crate::template::{Params, TemplateType};
use crate::values::kind_name;
use indexmap::IndexMap;
use serde_json::{json, Map, Value};
use std::fmt;
use tracing::{debug, warn};

/// Plain configuration value types a variable may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeType {
    String,
    Integer,
    Float,
    Boolean,
    List,
    Mapping,
    Any,
}

impl NativeType {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "str" | "string" => Some(NativeType::String),
            "int" | "integer" => Some(NativeType::Integer),
            "float" | "number" => Some(NativeType::Float),
            "bool" | "boolean" => Some(NativeType::Boolean),
            "list" => Some(NativeType::List),
            "dict" | "mapping" => Some(NativeType::Mapping),
            "any" => Some(NativeType::Any),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            NativeType::String => "str",
            NativeType::Integer => "int",
            NativeType::Float => "float",
            NativeType::Boolean => "bool",
            NativeType::List => "list",
            NativeType::Mapping => "dict",
            NativeType::Any => "any",
        }
    }

    pub fn matches(&self, value: &Value) -> bool {
        match self {
            NativeType::String => value.is_string(),
            NativeType::Integer => value.is_i64() || value.is_u64(),
            // Integers are accepted where a float is declared.
            NativeType::Float => value.is_number(),
            NativeType::Boolean => value.is_boolean(),
            NativeType::List => value.is_array(),
            NativeType::Mapping => value.is_object(),
            NativeType::Any => true,
        }
    }
}

/// Declared type of a blueprint variable.
pub enum VariableType<T: TemplateType> {
    Parameter(&'static ParameterTypeTag),
    Typed(TypedResourceAdapter<T>),
    Native(NativeType),
}

impl<T: TemplateType> VariableType<T> {
    /// Resolve a declared type name: parameter tags first, then native types.
    pub fn from_declared_name(variable: &str, type_name: &str) -> Result<Self, VariableError> {
        if let Some(tag) = parameter::lookup(type_name) {
            return Ok(VariableType::Parameter(tag));
        }
        NativeType::from_name(type_name)
            .map(VariableType::Native)
            .ok_or_else(|| VariableError::UnknownVariableType {
                variable: variable.to_string(),
                type_name: type_name.to_string(),
            })
    }

    pub fn describe(&self) -> String {
        match self {
            VariableType::Parameter(tag) => tag.name().to_string(),
            VariableType::Typed(adapter) => adapter.resource_name().to_string(),
            VariableType::Native(native) => native.name().to_string(),
        }
    }
}

impl<T: TemplateType> Clone for VariableType<T> {
    fn clone(&self) -> Self {
        match self {
            VariableType::Parameter(tag) => VariableType::Parameter(*tag),
            VariableType::Typed(adapter) => VariableType::Typed(adapter.clone()),
            VariableType::Native(native) => VariableType::Native(*native),
        }
    }
}

impl<T: TemplateType> fmt::Debug for VariableType<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariableType::Parameter(tag) => f.debug_tuple("Parameter").field(tag).finish(),
            VariableType::Typed(adapter) => f.debug_tuple("Typed").field(adapter).finish(),
            VariableType::Native(native) => f.debug_tuple("Native").field(native).finish(),
        }
    }
}

/// Validator applied to a value before its type is checked.
pub type Validator = fn(Value) -> Result<Value, String>;

/// One declared blueprint variable.
pub struct VariableDefinition<T: TemplateType> {
    pub name: String,
    pub variable_type: VariableType<T>,
    pub default: Option<Value>,
    pub description: Option<String>,
    pub allowed_values: Option<Vec<Value>>,
    pub validator: Option<(String, Validator)>,
}

impl<T: TemplateType> VariableDefinition<T> {
    pub fn new(name: impl Into<String>, variable_type: VariableType<T>) -> Self {
        Self {
            name: name.into(),
            variable_type,
            default: None,
            description: None,
            allowed_values: None,
            validator: None,
        }
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_allowed_values(mut self, allowed: Vec<Value>) -> Self {
        self.allowed_values = Some(allowed);
        self
    }

    pub fn with_validator(mut self, name: impl Into<String>, validator: Validator) -> Self {
        self.validator = Some((name.into(), validator));
        self
    }
}

impl<T: TemplateType> fmt::Debug for VariableDefinition<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariableDefinition")
            .field("name", &self.name)
            .field("variable_type", &self.variable_type)
            .field("default", &self.default)
            .field("description", &self.description)
            .field("allowed_values", &self.allowed_values)
            .finish()
    }
}

/// A resolved variable value.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedVariable<T> {
    Parameter(ParameterValue),
    Typed(Converted<T>),
    Value(Value),
}

impl<T> ResolvedVariable<T> {
    pub fn as_parameter(&self) -> Option<&ParameterValue> {
        match self {
            ResolvedVariable::Parameter(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_typed(&self) -> Option<&Converted<T>> {
        match self {
            ResolvedVariable::Typed(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            ResolvedVariable::Value(v) => Some(v),
            _ => None,
        }
    }
}

/// Resolve one variable against its provided value.
pub fn resolve_variable<T: TemplateType>(
    definition: &VariableDefinition<T>,
    provided: Option<&Value>,
    blueprint: &str,
) -> Result<ResolvedVariable<T>, VariableError> {
    let name = definition.name.as_str();
    let mut value = match provided.or(definition.default.as_ref()) {
        Some(value) => value.clone(),
        None => {
            return Err(VariableError::MissingVariable {
                blueprint: blueprint.to_string(),
                variable: name.to_string(),
            })
        }
    };

    if let Some((validator_name, validator)) = &definition.validator {
        let original = value.to_string();
        value = validator(value).map_err(|message| VariableError::ValidatorFailed {
            variable: name.to_string(),
            validator: validator_name.clone(),
            value: original,
            source: message.into(),
        })?;
    }

    let resolved = match &definition.variable_type {
        VariableType::Parameter(tag) => {
            debug!(variable = name, parameter_type = tag.parameter_type(), "binding parameter");
            // Allowed values for parameters are enforced by the provider.
            return ParameterValue::new(name, value).map(ResolvedVariable::Parameter);
        }
        VariableType::Typed(adapter) => {
            let converted = adapter.create(&value).map_err(|e| VariableError::ValidatorFailed {
                variable: name.to_string(),
                validator: format!("{}.create", adapter.resource_name()),
                value: value.to_string(),
                source: Box::new(e),
            })?;
            ResolvedVariable::Typed(converted)
        }
        VariableType::Native(native) => {
            if !native.matches(&value) {
                return Err(VariableError::WrongType {
                    variable: name.to_string(),
                    expected: native.name().to_string(),
                    actual: kind_name(&value).to_string(),
                });
            }
            ResolvedVariable::Value(value.clone())
        }
    };

    if let Some(allowed) = definition.allowed_values.as_ref().filter(|a| !a.is_empty()) {
        if !allowed.contains(&value) {
            return Err(VariableError::NotAllowed {
                blueprint: blueprint.to_string(),
                variable: name.to_string(),
                value: value.to_string(),
                allowed: allowed
                    .iter()
                    .map(Value::to_string)
                    .collect::<Vec<_>>()
                    .join(", "),
            });
        }
    }

    Ok(resolved)
}

/// Declared variables of a blueprint.
pub struct VariableSchema<T: TemplateType> {
    blueprint: String,
    definitions: Vec<VariableDefinition<T>>,
}

impl<T: TemplateType> VariableSchema<T> {
    pub fn new(blueprint: impl Into<String>) -> Self {
        Self {
            blueprint: blueprint.into(),
            definitions: Vec::new(),
        }
    }

    pub fn with_variable(mut self, definition: VariableDefinition<T>) -> Self {
        self.add(definition);
        self
    }

    /// Add a definition, replacing any earlier one with the same name.
    pub fn add(&mut self, definition: VariableDefinition<T>) {
        match self.definitions.iter_mut().find(|d| d.name == definition.name) {
            Some(existing) => *existing = definition,
            None => self.definitions.push(definition),
        }
    }

    pub fn blueprint(&self) -> &str {
        &self.blueprint
    }

    pub fn definitions(&self) -> &[VariableDefinition<T>] {
        &self.definitions
    }

    pub fn get(&self, name: &str) -> Option<&VariableDefinition<T>> {
        self.definitions.iter().find(|d| d.name == name)
    }

    /// Resolve every declared variable against `provided`.
    pub fn resolve(&self, provided: &Params) -> Result<ResolvedVariables<T>, VariableError> {
        for key in provided.keys() {
            if self.get(key).is_none() {
                warn!(
                    blueprint = %self.blueprint,
                    variable = %key,
                    "blueprint does not use provided variable"
                );
            }
        }

        let mut resolved = IndexMap::with_capacity(self.definitions.len());
        for definition in &self.definitions {
            let value = resolve_variable(definition, provided.get(&definition.name), &self.blueprint)?;
            resolved.insert(definition.name.clone(), value);
        }
        debug!(blueprint = %self.blueprint, count = resolved.len(), "resolved variables");
        Ok(ResolvedVariables { values: resolved })
    }

    /// Provider parameter declarations for parameter-typed variables.
    pub fn parameter_definitions(&self) -> Map<String, Value> {
        let mut out = Map::new();
        for definition in &self.definitions {
            let VariableType::Parameter(tag) = &definition.variable_type else {
                continue;
            };
            let mut entry = Map::new();
            entry.insert("Type".to_string(), json!(tag.parameter_type()));
            if let Some(default) = &definition.default {
                let default = ParameterValue::new(definition.name.clone(), default.clone())
                    .map(|p| Value::String(p.to_parameter_value()))
                    .unwrap_or_else(|_| default.clone());
                entry.insert("Default".to_string(), default);
            }
            if let Some(description) = &definition.description {
                entry.insert("Description".to_string(), json!(description));
            }
            if let Some(allowed) = &definition.allowed_values {
                entry.insert("AllowedValues".to_string(), Value::Array(allowed.clone()));
            }
            out.insert(definition.name.clone(), Value::Object(entry));
        }
        out
    }
}

impl<T: TemplateType> fmt::Debug for VariableSchema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariableSchema")
            .field("blueprint", &self.blueprint)
            .field("definitions", &self.definitions)
            .finish()
    }
}

/// Resolved variables of a blueprint, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedVariables<T> {
    values: IndexMap<String, ResolvedVariable<T>>,
}

impl<T> ResolvedVariables<T> {
    pub fn get(&self, name: &str) -> Option<&ResolvedVariable<T>> {
        self.values.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ResolvedVariable<T>)> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Provider parameter values, keyed by variable name.
    pub fn parameter_values(&self) -> IndexMap<String, String> {
        self.values
            .iter()
            .filter_map(|(name, resolved)| {
                resolved
                    .as_parameter()
                    .map(|p| (name.clone(), p.to_parameter_value()))
            })
            .collect()
    }
}
