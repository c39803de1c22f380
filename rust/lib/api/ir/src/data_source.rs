//! Data sources: named, typed bindings that expressions reference by id.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Data sources keyed by id, in project order.
pub type DataSources = IndexMap<String, DataSource>;

/// A named binding owned by an instance scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSource {
    /// Unique id.
    pub id: String,

    /// Display name. Not unique; code generation derives identifiers from it.
    pub name: String,

    /// Instance whose scope owns this binding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope_instance_id: Option<String>,

    #[serde(flatten)]
    pub kind: DataSourceKind,
}

/// Type-specific payload, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DataSourceKind {
    /// Literal value bound at build time.
    Variable { value: VariableValue },

    /// Supplied from outside (page system object, component props).
    Parameter,

    /// Result of fetching a [`crate::Resource`].
    Resource {
        #[serde(rename = "resourceId")]
        resource_id: String,
    },
}

/// Typed literal stored in a variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum VariableValue {
    #[serde(rename = "string")]
    String(String),
    #[serde(rename = "number")]
    Number(serde_json::Number),
    #[serde(rename = "boolean")]
    Boolean(bool),
    #[serde(rename = "string[]")]
    StringArray(Vec<String>),
    #[serde(rename = "json")]
    Json(serde_json::Value),
}

impl VariableValue {
    /// The literal as a JSON value.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            VariableValue::String(s) => serde_json::Value::String(s.clone()),
            VariableValue::Number(n) => serde_json::Value::Number(n.clone()),
            VariableValue::Boolean(b) => serde_json::Value::Bool(*b),
            VariableValue::StringArray(items) => serde_json::Value::Array(
                items
                    .iter()
                    .map(|s| serde_json::Value::String(s.clone()))
                    .collect(),
            ),
            VariableValue::Json(v) => v.clone(),
        }
    }
}

impl DataSource {
    pub fn variable(id: impl Into<String>, name: impl Into<String>, value: VariableValue) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            scope_instance_id: None,
            kind: DataSourceKind::Variable { value },
        }
    }

    pub fn parameter(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            scope_instance_id: None,
            kind: DataSourceKind::Parameter,
        }
    }

    pub fn resource(
        id: impl Into<String>,
        name: impl Into<String>,
        resource_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            scope_instance_id: None,
            kind: DataSourceKind::Resource {
                resource_id: resource_id.into(),
            },
        }
    }

    /// Set the owning instance.
    pub fn scoped_to(mut self, instance_id: impl Into<String>) -> Self {
        self.scope_instance_id = Some(instance_id.into());
        self
    }

    /// The backing resource id, for resource data sources.
    pub fn resource_id(&self) -> Option<&str> {
        match &self.kind {
            DataSourceKind::Resource { resource_id } => Some(resource_id),
            _ => None,
        }
    }
}

/// Collect data sources into an id-keyed map, keeping input order.
pub fn data_sources_from(items: impl IntoIterator<Item = DataSource>) -> DataSources {
    items.into_iter().map(|ds| (ds.id.clone(), ds)).collect()
}
