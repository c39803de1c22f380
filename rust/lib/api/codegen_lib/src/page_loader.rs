//! Per-page resources loader modules for a whole project.

use std::collections::HashMap;

use anyhow::{Result, bail};
use sitegen_ir::Project;
use sitegen_ir::path_pattern::{Modifier, PathToken, tokenize_pathname_pattern};
use tracing::debug;

use crate::resources::{LoaderOptions, build_resources_loader, loader_scope};
use crate::render::render_module;

pub struct ResourcesLoaderGenerator {
    pub options: LoaderOptions,
}

impl crate::Codegen for ResourcesLoaderGenerator {
    fn generate(&self, project: &Project) -> Result<crate::GeneratedCode> {
        let mut files = Vec::new();
        let mut owners: HashMap<String, &str> = HashMap::new();

        for page in &project.pages {
            let data_sources = project.page_data_sources(page);
            let mut scope = loader_scope();
            let module = build_resources_loader(
                &mut scope,
                page,
                &data_sources,
                &project.resources,
                &self.options,
            );
            let path = format!("$resources.{}.ts", route_file_name(&page.path));
            if let Some(owner) = owners.insert(path.clone(), &page.id) {
                bail!(
                    "pages {} and {} both generate {}",
                    owner,
                    page.id,
                    path
                );
            }
            debug!("page {} -> {}", page.id, path);
            files.push(crate::GeneratedFile {
                path,
                content: render_module(&module),
            });
        }

        Ok(crate::GeneratedCode { files })
    }

    fn language(&self) -> &str {
        "typescript-resources-loader"
    }
}

/// Remix flat-route file name for a page path.
///
/// `/` → `_index`, `/blog/:slug` → `blog.$slug`, `/:lang?/about` →
/// `($lang).about`, `/docs/*` → `docs.$`.
pub fn route_file_name(path: &str) -> String {
    let segments: Vec<String> = tokenize_pathname_pattern(path)
        .into_iter()
        .map(|token| match token {
            PathToken::Static(segment) => {
                if segment.contains(['.', '$', '(', ')', '[', ']']) {
                    format!("[{}]", segment)
                } else {
                    segment
                }
            }
            PathToken::Param { name, modifier } => match modifier {
                Modifier::Required => format!("${}", name),
                Modifier::Optional => format!("(${})", name),
                Modifier::ZeroOrMore => "$".to_string(),
            },
            PathToken::Wildcard(_) => "$".to_string(),
        })
        .collect();

    if segments.is_empty() {
        return "_index".to_string();
    }
    segments.join(".")
}
