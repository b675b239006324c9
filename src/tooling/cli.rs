//! CLI Tooling
//!
//! Lists the provider parameter types and checks variable files against a
//! blueprint schema.

use crate::config::{Settings, SettingsLoader};
use crate::error::ApiError;
use crate::parameter::{self, ParameterTypeTag, REGISTRY};
use crate::tooling::schema::SchemaFile;
use crate::values::load_document;
use crate::variable::{ResolvedVariable, ResolvedVariables, VariableSchema};
use clap::{Parser, Subcommand};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use serde_json::{json, Value};
use std::convert::Infallible;
use std::path::PathBuf;
use tracing::info;

/// Stackvars CLI - typed blueprint variables
#[derive(Parser)]
#[command(name = "stackvars")]
#[command(about = "Inspect parameter types and check blueprint variables")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Settings file path
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// List the provider parameter types
    Types {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show the provider type string for a parameter type name
    Lookup {
        /// Symbolic name, e.g. EC2VPCId
        name: String,
    },
    /// Resolve a values file against a blueprint schema
    Check {
        /// Schema file declaring the blueprint's variables
        #[arg(long)]
        schema: PathBuf,
        /// Values file with the configured variables
        #[arg(long)]
        values: PathBuf,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

impl Cli {
    /// Effective settings: the settings file overlaid with CLI log flags.
    pub fn settings(&self) -> Result<Settings, ApiError> {
        let mut settings = SettingsLoader::load(self.config.as_deref())?;
        let logging = &mut settings.logging;
        if let Some(level) = &self.log_level {
            logging.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            logging.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            logging.output = output.clone();
        }
        if self.log_file.is_some() {
            logging.file = self.log_file.clone();
        }
        Ok(settings)
    }
}

/// CLI execution context
pub struct CliContext {
    settings: Settings,
}

impl CliContext {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Execute a CLI command
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Types { format } => match format.as_str() {
                "json" => Ok(format_types_json(&REGISTRY)),
                "text" => Ok(format_types_text(&REGISTRY)),
                other => Err(invalid_format(other)),
            },
            Commands::Lookup { name } => parameter::lookup(name)
                .map(|tag| tag.parameter_type().to_string())
                .ok_or_else(|| ApiError::UnknownParameterType(name.clone())),
            Commands::Check {
                schema,
                values,
                format,
            } => {
                if format != "json" && format != "text" {
                    return Err(invalid_format(format));
                }
                let fallback = schema
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("blueprint")
                    .to_string();
                let schema = SchemaFile::load(schema)?.into_schema(&fallback)?;
                let provided: Value = load_document(values)?;
                let provided = match provided {
                    Value::Object(map) => map,
                    Value::Null => serde_json::Map::new(),
                    _ => {
                        return Err(ApiError::ConfigError(format!(
                            "Values file {} must contain a mapping of variable names",
                            values.display()
                        )))
                    }
                };
                let resolved = schema.resolve(&provided)?;
                info!(
                    blueprint = schema.blueprint(),
                    variables = resolved.len(),
                    "checked variables"
                );
                if format == "json" {
                    Ok(format_check_json(&schema, &resolved))
                } else {
                    Ok(format_check_text(&schema, &resolved))
                }
            }
        }
    }
}

fn invalid_format(format: &str) -> ApiError {
    ApiError::ConfigError(format!(
        "Invalid output format: {} (must be 'text' or 'json')",
        format
    ))
}

/// Format the parameter type registry as a table
fn format_types_text(tags: &[ParameterTypeTag]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Name", "Parameter Type"]);
    for tag in tags {
        table.add_row(vec![tag.name(), tag.parameter_type()]);
    }
    format!("{}\n\nTotal: {} parameter type(s)", table, tags.len())
}

/// Format the parameter type registry as JSON
fn format_types_json(tags: &[ParameterTypeTag]) -> String {
    let out = json!({ "parameter_types": tags, "total": tags.len() });
    serde_json::to_string_pretty(&out).unwrap_or_else(|_| "{}".to_string())
}

fn format_check_text(
    schema: &VariableSchema<Infallible>,
    resolved: &ResolvedVariables<Infallible>,
) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Variable", "Type", "Value"]);
    for (name, value) in resolved.iter() {
        let declared = schema
            .get(name)
            .map(|d| d.variable_type.describe())
            .unwrap_or_default();
        let rendered = match value {
            ResolvedVariable::Parameter(p) => p.to_parameter_value(),
            ResolvedVariable::Value(v) => v.to_string(),
            ResolvedVariable::Typed(c) => format!("{} instance(s)", c.len()),
        };
        table.add_row(vec![name.clone(), declared, rendered]);
    }
    format!(
        "Blueprint: {}\n{}\n\nTotal: {} variable(s)",
        schema.blueprint(),
        table,
        resolved.len()
    )
}

fn format_check_json(
    schema: &VariableSchema<Infallible>,
    resolved: &ResolvedVariables<Infallible>,
) -> String {
    let values: serde_json::Map<String, Value> = resolved
        .iter()
        .filter_map(|(name, value)| value.as_value().map(|v| (name.clone(), v.clone())))
        .collect();
    let out = json!({
        "blueprint": schema.blueprint(),
        "parameters": resolved.parameter_values(),
        "parameter_definitions": schema.parameter_definitions(),
        "values": values,
    });
    serde_json::to_string_pretty(&out).unwrap_or_else(|_| "{}".to_string())
}
