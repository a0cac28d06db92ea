//! Named, versioned tables of embed parameters and their defaults.

use std::collections::HashSet;

use serde_json::{Map, Value};
use thiserror::Error;

/// Errors found while validating a parameter schema.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Parameter schema '{0}' contains an empty parameter name")]
    EmptyName(String),

    #[error("Parameter '{parameter}' is declared twice in schema '{schema}'")]
    DuplicateParameter { schema: String, parameter: String },

    #[error("Inline parameter '{inline}' refers to unknown url parameter '{parameter}'")]
    UnknownSource { inline: String, parameter: String },
}

/// Default value of a parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefaultValue {
    Null,
    Bool(bool),
    Int(i64),
    Str(&'static str),
}

impl DefaultValue {
    pub fn to_value(self) -> Value {
        match self {
            DefaultValue::Null => Value::Null,
            DefaultValue::Bool(b) => Value::Bool(b),
            DefaultValue::Int(i) => Value::from(i),
            DefaultValue::Str(s) => Value::from(s),
        }
    }
}

/// One url parameter: name, default and what it does.
#[derive(Debug, Clone, Copy)]
pub struct ParameterSpec {
    pub name: &'static str,
    pub default: DefaultValue,
    pub description: &'static str,
}

impl ParameterSpec {
    pub const fn new(name: &'static str, default: DefaultValue, description: &'static str) -> Self {
        Self {
            name,
            default,
            description,
        }
    }
}

/// Where an inline player parameter takes its default from.
#[derive(Debug, Clone, Copy)]
pub enum InlineSource {
    /// Same default as the url parameter of that name.
    UrlParameter(&'static str),
    /// A fixed value.
    Fixed(DefaultValue),
    /// The per-call `allow_script_access` option, or this fallback.
    ScriptAccess(&'static str),
}

/// Default entry of the inline player parameter table.
#[derive(Debug, Clone, Copy)]
pub struct InlineParameter {
    pub name: &'static str,
    pub source: InlineSource,
}

impl InlineParameter {
    pub const fn new(name: &'static str, source: InlineSource) -> Self {
        Self { name, source }
    }
}

/// Url parameter table plus the inline player defaults derived from it.
#[derive(Debug, Clone, Copy)]
pub struct ParameterSchema {
    pub name: &'static str,
    pub version: u32,
    pub url_parameters: &'static [ParameterSpec],
    pub inline_parameters: &'static [InlineParameter],
}

impl ParameterSchema {
    /// Check names are non-empty and unique, and that inline parameters
    /// only derive from declared url parameters.
    pub fn validate(&self) -> Result<(), SchemaError> {
        let mut seen = HashSet::new();
        for spec in self.url_parameters {
            if spec.name.is_empty() {
                return Err(SchemaError::EmptyName(self.name.to_string()));
            }
            if !seen.insert(spec.name) {
                return Err(SchemaError::DuplicateParameter {
                    schema: self.name.to_string(),
                    parameter: spec.name.to_string(),
                });
            }
        }

        let mut seen_inline = HashSet::new();
        for inline in self.inline_parameters {
            if inline.name.is_empty() {
                return Err(SchemaError::EmptyName(self.name.to_string()));
            }
            if !seen_inline.insert(inline.name) {
                return Err(SchemaError::DuplicateParameter {
                    schema: self.name.to_string(),
                    parameter: inline.name.to_string(),
                });
            }
            if let InlineSource::UrlParameter(source) = inline.source {
                if self.get(source).is_none() {
                    return Err(SchemaError::UnknownSource {
                        inline: inline.name.to_string(),
                        parameter: source.to_string(),
                    });
                }
            }
        }

        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&ParameterSpec> {
        self.url_parameters.iter().find(|spec| spec.name == name)
    }

    /// Url parameter defaults in declaration order.
    pub fn url_defaults(&self) -> Map<String, Value> {
        self.url_parameters
            .iter()
            .map(|spec| (spec.name.to_string(), spec.default.to_value()))
            .collect()
    }

    /// Inline player defaults in declaration order.
    pub fn inline_defaults(&self, allow_script_access: Option<&str>) -> Map<String, Value> {
        self.inline_parameters
            .iter()
            .map(|inline| {
                let value = match inline.source {
                    InlineSource::UrlParameter(source) => self
                        .get(source)
                        .map(|spec| spec.default.to_value())
                        .unwrap_or(Value::Null),
                    InlineSource::Fixed(default) => default.to_value(),
                    InlineSource::ScriptAccess(fallback) => {
                        Value::from(allow_script_access.unwrap_or(fallback))
                    }
                };
                (inline.name.to_string(), value)
            })
            .collect()
    }
}
