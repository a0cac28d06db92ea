use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Presentation data about a provider (labels, icon, translation domain).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderDescriptor {
    pub title: String,
    /// Translation key of the description.
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Translation domain for title and description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default)]
    pub options: Map<String, Value>,
}

impl ProviderDescriptor {
    pub fn option(&self, name: &str) -> Option<&Value> {
        self.options.get(name)
    }

    pub fn option_or<'a>(&'a self, name: &str, default: &'a Value) -> &'a Value {
        self.options.get(name).unwrap_or(default)
    }
}
