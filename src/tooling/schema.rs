//! Blueprint schema files: variable declarations written as data.
//!
//! ```yaml
//! blueprint: vpc
//! variables:
//!   VpcId:
//!     type: EC2VPCId
//!   InstanceCount:
//!     type: int
//!     default: 1
//!     allowed_values: [1, 2, 3]
//! ```

use crate::error::ApiError;
use crate::values::load_document;
use crate::variable::{VariableDefinition, VariableSchema, VariableType};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::convert::Infallible;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaFile {
    #[serde(default)]
    pub blueprint: Option<String>,
    #[serde(default)]
    pub variables: IndexMap<String, VariableSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariableSpec {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub default: Option<Value>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub allowed_values: Option<Vec<Value>>,
}

impl SchemaFile {
    pub fn load(path: &Path) -> Result<Self, ApiError> {
        load_document(path)
    }

    /// Build a variable schema. Template-typed variables cannot be declared
    /// in a data file, so the schema carries no template type.
    pub fn into_schema(self, fallback_name: &str) -> Result<VariableSchema<Infallible>, ApiError> {
        let blueprint = self.blueprint.unwrap_or_else(|| fallback_name.to_string());
        let mut schema = VariableSchema::new(blueprint);
        for (name, spec) in self.variables {
            let variable_type = VariableType::from_declared_name(&name, &spec.type_name)?;
            let mut definition = VariableDefinition::new(name, variable_type);
            definition.default = spec.default;
            definition.description = spec.description;
            definition.allowed_values = spec.allowed_values;
            schema.add(definition);
        }
        Ok(schema)
    }
}
