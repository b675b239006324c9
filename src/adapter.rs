//! Typed Resource Adapter
//!
//! Converts a raw configured value into one or many instances of a template
//! type. Resources are keyed by title; properties are untitled.

use crate::error::{ConfigurationError, CreateError};
use crate::template::{Factory, Kind, Params, TargetType, TemplateType};
use crate::values::is_falsy;
use serde_json::Value;
use std::fmt;
use tracing::trace;

/// How many values an adapter accepts, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Arity {
    /// Exactly one value.
    One,
    /// One value, or nothing when the configured value is falsy.
    MaybeOne,
    /// A collection of values.
    Many,
}

/// Result of [`TypedResourceAdapter::create`].
#[derive(Debug, Clone, PartialEq)]
pub enum Converted<T> {
    /// Optional variable with no value configured.
    Absent,
    One(T),
    Many(Vec<T>),
}

impl<T> Converted<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Converted::Absent)
    }

    pub fn as_one(&self) -> Option<&T> {
        match self {
            Converted::One(item) => Some(item),
            _ => None,
        }
    }

    pub fn as_many(&self) -> Option<&[T]> {
        match self {
            Converted::Many(items) => Some(items),
            _ => None,
        }
    }

    pub fn into_one(self) -> Option<T> {
        match self {
            Converted::One(item) => Some(item),
            _ => None,
        }
    }

    /// All instances, in input order.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Converted::Absent => Vec::new(),
            Converted::One(item) => vec![item],
            Converted::Many(items) => items,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Converted::Absent => 0,
            Converted::One(_) => 1,
            Converted::Many(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Adapter from configured values to a template type.
pub struct TypedResourceAdapter<T: TemplateType> {
    type_name: String,
    resource_name: String,
    factory: Factory<T>,
    arity: Arity,
}

impl<T: TemplateType> TypedResourceAdapter<T> {
    /// Build an adapter for `target`.
    ///
    /// Fails when the target has no `from_dict` factory, or when `many` and
    /// `optional` are both set.
    pub fn new(target: TargetType<T>, many: bool, optional: bool) -> Result<Self, ConfigurationError> {
        let factory = target
            .factory()
            .ok_or_else(|| ConfigurationError::MissingFactory {
                type_name: target.type_name().to_string(),
            })?;

        let arity = match (many, optional) {
            (true, true) => {
                return Err(ConfigurationError::ConflictingOptions {
                    type_name: target.type_name().to_string(),
                })
            }
            (true, false) => Arity::Many,
            (false, true) => Arity::MaybeOne,
            (false, false) => Arity::One,
        };

        let resource_name = target
            .declared_resource_name()
            .unwrap_or_else(|| target.type_name())
            .to_string();

        Ok(Self {
            type_name: target.type_name().to_string(),
            resource_name,
            factory,
            arity,
        })
    }

    /// Adapter accepting exactly one value.
    pub fn single(target: TargetType<T>) -> Result<Self, ConfigurationError> {
        Self::new(target, false, false)
    }

    /// Adapter accepting a collection of values.
    pub fn many(target: TargetType<T>) -> Result<Self, ConfigurationError> {
        Self::new(target, true, false)
    }

    /// Adapter accepting one value or nothing.
    pub fn optional(target: TargetType<T>) -> Result<Self, ConfigurationError> {
        Self::new(target, false, true)
    }

    /// Declared resource name of the target, falling back to its type name.
    pub fn resource_name(&self) -> &str {
        &self.resource_name
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn kind(&self) -> Kind {
        self.factory.kind()
    }

    pub fn is_many(&self) -> bool {
        self.arity == Arity::Many
    }

    pub fn is_optional(&self) -> bool {
        self.arity == Arity::MaybeOne
    }

    /// Convert `value` into instances of the target type.
    ///
    /// Every instance runs its own `validate_props` before being returned.
    pub fn create(&self, value: &Value) -> Result<Converted<T>, CreateError<T::Error>> {
        if self.arity == Arity::MaybeOne && is_falsy(value) {
            trace!(type_name = %self.type_name, "optional value absent");
            return Ok(Converted::Absent);
        }

        let built = match self.factory {
            Factory::Resource { build, .. } => self.build_resources(build, value)?,
            Factory::Property { build } => self.build_properties(build, value)?,
        };

        for item in &built {
            item.validate_props().map_err(CreateError::Invalid)?;
        }

        trace!(
            type_name = %self.type_name,
            count = built.len(),
            "converted configured value"
        );

        if self.arity == Arity::Many {
            return Ok(Converted::Many(built));
        }
        match built.into_iter().next() {
            Some(item) => Ok(Converted::One(item)),
            None => Err(self.empty_value().into()),
        }
    }

    fn build_resources(
        &self,
        build: fn(&str, &Params) -> Result<T, T::Error>,
        value: &Value,
    ) -> Result<Vec<T>, CreateError<T::Error>> {
        let Value::Object(by_title) = value else {
            return Err(ConfigurationError::ResourceShape {
                type_name: self.type_name.clone(),
            }
            .into());
        };

        if self.arity != Arity::Many {
            if by_title.len() > 1 {
                return Err(ConfigurationError::TooManyResources {
                    type_name: self.type_name.clone(),
                    count: by_title.len(),
                }
                .into());
            }
            if by_title.is_empty() {
                return Err(self.empty_value().into());
            }
        }

        by_title
            .iter()
            .map(|(title, params)| -> Result<T, CreateError<T::Error>> {
                let params = params.as_object().ok_or_else(|| ConfigurationError::ResourceParams {
                    type_name: self.type_name.clone(),
                    title: title.clone(),
                })?;
                build(title, params).map_err(CreateError::Invalid)
            })
            .collect()
    }

    fn build_properties(
        &self,
        build: fn(&Params) -> Result<T, T::Error>,
        value: &Value,
    ) -> Result<Vec<T>, CreateError<T::Error>> {
        if self.arity == Arity::Many {
            let Value::Array(items) = value else {
                return Err(ConfigurationError::PropertyListShape {
                    type_name: self.type_name.clone(),
                }
                .into());
            };
            return items
                .iter()
                .enumerate()
                .map(|(index, item)| -> Result<T, CreateError<T::Error>> {
                    let params = item.as_object().ok_or_else(|| ConfigurationError::PropertyElementShape {
                        type_name: self.type_name.clone(),
                        index,
                    })?;
                    build(params).map_err(CreateError::Invalid)
                })
                .collect();
        }

        let Value::Object(params) = value else {
            return Err(ConfigurationError::PropertyShape {
                type_name: self.type_name.clone(),
            }
            .into());
        };
        if params.is_empty() {
            return Err(self.empty_value().into());
        }
        Ok(vec![build(params).map_err(CreateError::Invalid)?])
    }

    fn empty_value(&self) -> ConfigurationError {
        ConfigurationError::EmptyValue {
            type_name: self.type_name.clone(),
        }
    }
}

impl<T: TemplateType> Clone for TypedResourceAdapter<T> {
    fn clone(&self) -> Self {
        Self {
            type_name: self.type_name.clone(),
            resource_name: self.resource_name.clone(),
            factory: self.factory,
            arity: self.arity,
        }
    }
}

impl<T: TemplateType> fmt::Debug for TypedResourceAdapter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedResourceAdapter")
            .field("type_name", &self.type_name)
            .field("resource_name", &self.resource_name)
            .field("kind", &self.kind())
            .field("many", &self.is_many())
            .field("optional", &self.is_optional())
            .finish()
    }
}
