//! Pages and the instance tree they own.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Instance id of the global scope. Data sources scoped here are visible
/// on every page.
pub const ROOT_INSTANCE_ID: &str = ":root";

/// Instances keyed by id.
pub type Instances = IndexMap<String, Instance>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: String,
    pub name: String,

    /// Route pattern, e.g. `/blog/:slug`.
    pub path: String,

    pub root_instance_id: String,

    /// Parameter data source that carries the page `system` object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_data_source_id: Option<String>,

    /// Concrete paths previously opened for this page, most recent first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<String>,
}

impl Page {
    pub fn new(
        id: impl Into<String>,
        path: impl Into<String>,
        root_instance_id: impl Into<String>,
    ) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            path: path.into(),
            root_instance_id: root_instance_id.into(),
            system_data_source_id: None,
            history: vec![],
        }
    }

    pub fn with_system(mut self, data_source_id: impl Into<String>) -> Self {
        self.system_data_source_id = Some(data_source_id.into());
        self
    }

    /// Whether `data_source_id` is this page's system parameter.
    pub fn is_system(&self, data_source_id: &str) -> bool {
        self.system_data_source_id.as_deref() == Some(data_source_id)
    }
}

/// A node of the page tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
    pub id: String,
    pub component: String,
    #[serde(default)]
    pub children: Vec<InstanceChild>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum InstanceChild {
    /// Nested instance, by id.
    Id(String),
    Text(String),
    Expression(String),
}

impl Instance {
    pub fn new(id: impl Into<String>, component: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            component: component.into(),
            children: vec![],
        }
    }

    pub fn with_child(mut self, child_id: impl Into<String>) -> Self {
        self.children.push(InstanceChild::Id(child_id.into()));
        self
    }

    /// Ids of directly nested instances.
    pub fn child_ids(&self) -> impl Iterator<Item = &str> {
        self.children.iter().filter_map(|child| match child {
            InstanceChild::Id(id) => Some(id.as_str()),
            _ => None,
        })
    }
}
