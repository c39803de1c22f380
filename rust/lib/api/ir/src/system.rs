//! The page `system` object: route params, search params and origin.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::path_pattern::match_pathname_pattern;

/// Runtime navigation state bound to a page's system parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct System {
    #[serde(default)]
    pub params: IndexMap<String, String>,
    #[serde(default)]
    pub search: IndexMap<String, String>,
    pub origin: String,
}

/// A partial `System` supplied at runtime. Absent or `null` fields, and
/// `null` entries inside `params`/`search`, leave the defaults alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<IndexMap<String, Option<String>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<IndexMap<String, Option<String>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
}

/// Default system for a page: the first history entry that matches the
/// page path supplies `params` and its query string supplies `search`.
pub fn default_system(origin: &str, path: &str, history: &[String]) -> System {
    let mut system = System {
        origin: origin.to_string(),
        ..Default::default()
    };
    for pathname in history {
        if let Some(params) = match_pathname_pattern(path, pathname) {
            system.params = params;
            system.search = parse_search(pathname);
            break;
        }
    }
    system
}

/// Lay `right` over `left`. `params` and `search` merge key by key.
pub fn merge_system(left: &System, right: Option<&SystemOverride>) -> System {
    let mut merged = left.clone();
    let Some(right) = right else {
        return merged;
    };
    if let Some(origin) = &right.origin {
        merged.origin = origin.clone();
    }
    merge_entries(&mut merged.params, right.params.as_ref());
    merge_entries(&mut merged.search, right.search.as_ref());
    merged
}

fn merge_entries(
    target: &mut IndexMap<String, String>,
    source: Option<&IndexMap<String, Option<String>>>,
) {
    for (key, value) in source.into_iter().flatten() {
        if let Some(value) = value {
            target.insert(key.clone(), value.clone());
        }
    }
}

fn parse_search(pathname: &str) -> IndexMap<String, String> {
    let Some((_, query)) = pathname.split_once('?') else {
        return IndexMap::new();
    };
    let query = query.split('#').next().unwrap_or_default();
    url::form_urlencoded::parse(query.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}
