//! Project data: everything the generator reads, loaded from JSON.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::data_source::{DataSource, DataSources};
use crate::page::{Instance, Instances, Page, ROOT_INSTANCE_ID};
use crate::resource::{Resource, Resources};

/// Serialized form: flat arrays, as exported by the builder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectData {
    #[serde(default)]
    pub pages: Vec<Page>,
    #[serde(default)]
    pub instances: Vec<Instance>,
    #[serde(default)]
    pub data_sources: Vec<DataSource>,
    #[serde(default)]
    pub resources: Vec<Resource>,
}

/// Project data indexed by id. Map order is input order.
#[derive(Debug, Clone, Default)]
pub struct Project {
    pub pages: Vec<Page>,
    pub instances: Instances,
    pub data_sources: DataSources,
    pub resources: Resources,
}

impl From<ProjectData> for Project {
    fn from(data: ProjectData) -> Self {
        Self {
            pages: data.pages,
            instances: data.instances.into_iter().map(|i| (i.id.clone(), i)).collect(),
            data_sources: data
                .data_sources
                .into_iter()
                .map(|ds| (ds.id.clone(), ds))
                .collect(),
            resources: data.resources.into_iter().map(|r| (r.id.clone(), r)).collect(),
        }
    }
}

impl Project {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let data: ProjectData = serde_json::from_str(json)?;
        Ok(data.into())
    }

    /// Find a page by id, or by path when no id matches.
    pub fn page(&self, id_or_path: &str) -> Option<&Page> {
        self.pages
            .iter()
            .find(|p| p.id == id_or_path)
            .or_else(|| self.pages.iter().find(|p| p.path == id_or_path))
    }

    /// Ids of every instance reachable from the page root.
    /// Dangling child ids are ignored and cycles are visited once.
    pub fn page_instance_ids<'a>(&'a self, page: &'a Page) -> HashSet<&'a str> {
        let mut visited = HashSet::new();
        let mut stack = vec![page.root_instance_id.as_str()];
        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                continue;
            }
            if let Some(instance) = self.instances.get(id) {
                stack.extend(instance.child_ids());
            }
        }
        visited
    }

    /// Data sources visible on `page`: those scoped inside its instance
    /// tree, in the global root scope, or unscoped. Project order is kept.
    pub fn page_data_sources(&self, page: &Page) -> DataSources {
        let instance_ids = self.page_instance_ids(page);
        self.data_sources
            .iter()
            .filter(|(_, ds)| match ds.scope_instance_id.as_deref() {
                None => true,
                Some(ROOT_INSTANCE_ID) => true,
                Some(scope) => instance_ids.contains(scope),
            })
            .map(|(id, ds)| (id.clone(), ds.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_source::DataSource;

    fn two_page_project() -> Project {
        ProjectData {
            pages: vec![
                Page::new("home", "/", "home-body"),
                Page::new("blog", "/blog/:slug", "blog-body"),
            ],
            instances: vec![
                Instance::new("home-body", "Body").with_child("home-box"),
                Instance::new("home-box", "Box").with_child("home-body"),
                Instance::new("blog-body", "Body").with_child("missing"),
            ],
            data_sources: vec![
                DataSource::parameter("global", "global").scoped_to(ROOT_INSTANCE_ID),
                DataSource::parameter("on-home-box", "a").scoped_to("home-box"),
                DataSource::parameter("on-blog", "b").scoped_to("blog-body"),
                DataSource::parameter("loose", "c"),
            ],
            resources: vec![],
        }
        .into()
    }

    #[test]
    fn page_lookup_by_id_or_path() {
        let project = two_page_project();
        assert_eq!(project.page("blog").map(|p| p.id.as_str()), Some("blog"));
        assert_eq!(project.page("/").map(|p| p.id.as_str()), Some("home"));
        assert!(project.page("/missing").is_none());
    }

    #[test]
    fn page_data_sources_follow_instance_tree() {
        let project = two_page_project();

        let home = project.page("home").unwrap();
        let ids: Vec<String> = project.page_data_sources(home).into_keys().collect();
        assert_eq!(ids, vec!["global", "on-home-box", "loose"]);

        let blog = project.page("blog").unwrap();
        let ids: Vec<String> = project.page_data_sources(blog).into_keys().collect();
        assert_eq!(ids, vec!["global", "on-blog", "loose"]);
    }

    #[test]
    fn from_json_builds_maps() {
        let project = Project::from_json(
            r#"{"pages":[],"dataSources":[{"type":"parameter","id":"p","name":"p"}]}"#,
        )
        .unwrap();
        assert!(project.data_sources.contains_key("p"));
        assert!(project.resources.is_empty());
    }
}
