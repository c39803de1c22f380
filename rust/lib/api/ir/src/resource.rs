//! Resources: declarative HTTP request templates.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Resources keyed by id, in project order.
pub type Resources = IndexMap<String, Resource>;

/// HTTP method of a resource request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "get",
            Method::Post => "post",
            Method::Put => "put",
            Method::Delete => "delete",
        }
    }
}

/// A request header whose value is an expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceHeader {
    pub name: String,
    pub value: String,
}

/// Request template. `url`, header values and `body` are expressions that
/// may reference other data sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    pub name: String,
    pub url: String,
    pub method: Method,
    #[serde(default)]
    pub headers: Vec<ResourceHeader>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl Resource {
    /// A `get` request without headers or body.
    pub fn get(id: impl Into<String>, name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            url: url.into(),
            method: Method::Get,
            headers: vec![],
            body: None,
        }
    }

    /// The body expression, unless absent or empty.
    pub fn body_expression(&self) -> Option<&str> {
        self.body.as_deref().filter(|body| !body.is_empty())
    }
}

/// Collect resources into an id-keyed map, keeping input order.
pub fn resources_from(items: impl IntoIterator<Item = Resource>) -> Resources {
    items.into_iter().map(|r| (r.id.clone(), r)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_body_is_no_body() {
        let mut resource = Resource::get("r", "r", "\"https://api.test\"");
        assert_eq!(resource.body_expression(), None);
        resource.body = Some(String::new());
        assert_eq!(resource.body_expression(), None);
        resource.body = Some("{}".into());
        assert_eq!(resource.body_expression(), Some("{}"));
    }

    #[test]
    fn method_lowercase_on_the_wire() {
        let resource: Resource = serde_json::from_str(
            r#"{"id":"r","name":"n","url":"\"/\"","method":"post","headers":[{"name":"a","value":"\"b\""}]}"#,
        )
        .unwrap();
        assert_eq!(resource.method, Method::Post);
        assert_eq!(resource.method.as_str(), "post");
        assert_eq!(resource.headers.len(), 1);
    }
}
