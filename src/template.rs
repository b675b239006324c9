//! Template type capabilities
//!
//! A blueprint variable can be declared with a template type: a titled
//! resource or an untitled property. The traits here describe what such a type
//! must offer so an adapter can build it from configured parameters.

use serde_json::{Map, Value};
use std::convert::Infallible;
use std::fmt;

/// Parameter mapping handed to a type's `from_dict` factory.
pub type Params = Map<String, Value>;

/// Whether a template type is a titled resource or an untitled property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Resource,
    Property,
}

/// Behaviour shared by every template type.
pub trait TemplateType: Sized {
    /// Error raised by the type's factory and property validation.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Declared resource name, when the type carries one.
    const RESOURCE_NAME: Option<&'static str> = None;

    /// The type's own name.
    fn type_name() -> &'static str {
        short_type_name(std::any::type_name::<Self>())
    }

    /// Post-construction check of the instance's properties.
    fn validate_props(&self) -> Result<(), Self::Error>;
}

/// A titled resource, unique by title within a template.
pub trait ResourceFactory: TemplateType {
    /// Provider resource type marker, e.g. `AWS::EC2::Instance`.
    const RESOURCE_TYPE: &'static str;

    fn from_dict(title: &str, params: &Params) -> Result<Self, Self::Error>;
}

/// An untitled property value attached to a resource.
pub trait PropertyFactory: TemplateType {
    fn from_dict(params: &Params) -> Result<Self, Self::Error>;
}

/// Schemas without template-typed variables use `Infallible` as their type.
impl TemplateType for Infallible {
    type Error = Infallible;

    fn type_name() -> &'static str {
        "Infallible"
    }

    fn validate_props(&self) -> Result<(), Self::Error> {
        match *self {}
    }
}

pub type ResourceBuilder<T> = fn(&str, &Params) -> Result<T, <T as TemplateType>::Error>;
pub type PropertyBuilder<T> = fn(&Params) -> Result<T, <T as TemplateType>::Error>;

/// The factory capability a target type exposes.
pub enum Factory<T: TemplateType> {
    Resource {
        resource_type: &'static str,
        build: ResourceBuilder<T>,
    },
    Property {
        build: PropertyBuilder<T>,
    },
}

impl<T: TemplateType> Factory<T> {
    pub fn kind(&self) -> Kind {
        match self {
            Factory::Resource { .. } => Kind::Resource,
            Factory::Property { .. } => Kind::Property,
        }
    }
}

impl<T: TemplateType> Clone for Factory<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: TemplateType> Copy for Factory<T> {}

impl<T: TemplateType> fmt::Debug for Factory<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Factory::Resource { resource_type, .. } => f
                .debug_struct("Resource")
                .field("resource_type", resource_type)
                .finish(),
            Factory::Property { .. } => f.write_str("Property"),
        }
    }
}

/// Runtime descriptor of a template type.
///
/// Built from a [`ResourceFactory`] or [`PropertyFactory`] implementation, or
/// from a bare name when the type is only known by name and offers no factory.
pub struct TargetType<T: TemplateType> {
    type_name: String,
    resource_name: Option<String>,
    factory: Option<Factory<T>>,
}

impl<T: TemplateType> TargetType<T> {
    pub fn resource() -> Self
    where
        T: ResourceFactory,
    {
        Self {
            type_name: T::type_name().to_string(),
            resource_name: T::RESOURCE_NAME.map(str::to_string),
            factory: Some(Factory::Resource {
                resource_type: T::RESOURCE_TYPE,
                build: <T as ResourceFactory>::from_dict,
            }),
        }
    }

    pub fn property() -> Self
    where
        T: PropertyFactory,
    {
        Self {
            type_name: T::type_name().to_string(),
            resource_name: T::RESOURCE_NAME.map(str::to_string),
            factory: Some(Factory::Property {
                build: <T as PropertyFactory>::from_dict,
            }),
        }
    }

    /// A type known only by name, with no `from_dict` factory.
    pub fn named(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            resource_name: None,
            factory: None,
        }
    }

    /// Override the declared resource name.
    pub fn with_resource_name(mut self, resource_name: impl Into<String>) -> Self {
        self.resource_name = Some(resource_name.into());
        self
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn declared_resource_name(&self) -> Option<&str> {
        self.resource_name.as_deref()
    }

    pub fn factory(&self) -> Option<Factory<T>> {
        self.factory
    }

    pub fn kind(&self) -> Option<Kind> {
        self.factory.as_ref().map(Factory::kind)
    }
}

impl<T: TemplateType> Clone for TargetType<T> {
    fn clone(&self) -> Self {
        Self {
            type_name: self.type_name.clone(),
            resource_name: self.resource_name.clone(),
            factory: self.factory,
        }
    }
}

impl<T: TemplateType> fmt::Debug for TargetType<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TargetType")
            .field("type_name", &self.type_name)
            .field("resource_name", &self.resource_name)
            .field("factory", &self.factory)
            .finish()
    }
}

/// Last path segment of a fully qualified type name, generics stripped.
fn short_type_name(full: &str) -> &str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
