//! Resources loader generator.
//!
//! For one page, emits a module exporting
//! `loadResources(props: { system: System })` that fetches every resource
//! data source in parallel and returns their values keyed by binding name.
//! Only variables and the system parameter actually referenced by some
//! resource expression get bindings.

use indexmap::IndexSet;
use sitegen_core::GeneratorConfig;
use sitegen_core::config::{DEFAULT_SDK_MODULE, DEFAULT_SITEMAP_MODULE};
use sitegen_ir::{DataSourceKind, DataSources, Page, Resources};
use tracing::debug;

use crate::ast::*;
use crate::expression::generate_expression;
use crate::render::render_module;
use crate::scope::Scope;

pub const LOADER_FUNCTION: &str = "loadResources";
pub const LOADER_PROPS: &str = "_props";
pub const CUSTOM_FETCH: &str = "customFetch";
pub const SITEMAP_BINDING: &str = "sitemap";

/// Identifiers the loader module declares or relies on. Data source
/// names must never shadow them.
pub const LOADER_IDENTIFIERS: &[&str] = &[
    "loadResource",
    "isLocalResource",
    "System",
    SITEMAP_BINDING,
    LOADER_FUNCTION,
    LOADER_PROPS,
    CUSTOM_FETCH,
    "fetch",
    "Response",
    "Promise",
    "JSON",
    "Record",
];

/// Module specifiers the generated code imports from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderOptions {
    pub sdk_module: String,
    pub sitemap_module: String,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            sdk_module: DEFAULT_SDK_MODULE.to_string(),
            sitemap_module: DEFAULT_SITEMAP_MODULE.to_string(),
        }
    }
}

impl From<&GeneratorConfig> for LoaderOptions {
    fn from(config: &GeneratorConfig) -> Self {
        Self {
            sdk_module: config.sdk_module.clone(),
            sitemap_module: config.sitemap_module.clone(),
        }
    }
}

/// A fresh scope with the loader's own identifiers occupied.
pub fn loader_scope() -> Scope {
    Scope::new(LOADER_IDENTIFIERS.iter().copied())
}

/// Generate the loader module source with default import specifiers.
pub fn generate_resources_loader(
    scope: &mut Scope,
    page: &Page,
    data_sources: &DataSources,
    resources: &Resources,
) -> String {
    let module =
        build_resources_loader(scope, page, data_sources, resources, &LoaderOptions::default());
    render_module(&module)
}

/// Build the loader module AST.
///
/// Resource data sources whose resource no longer exists are skipped.
/// Parameters other than the page system parameter get no binding even
/// when referenced.
pub fn build_resources_loader(
    scope: &mut Scope,
    page: &Page,
    data_sources: &DataSources,
    resources: &Resources,
    options: &LoaderOptions,
) -> LoaderModule {
    let mut targets = Vec::new();
    let mut loaders = Vec::new();
    let mut used: IndexSet<String> = IndexSet::new();

    for data_source in data_sources.values() {
        let Some(resource_id) = data_source.resource_id() else {
            continue;
        };
        let Some(resource) = resources.get(resource_id) else {
            debug!(
                "data source {} points at missing resource {}, skipping",
                data_source.id, resource_id
            );
            continue;
        };

        let target = scope.get_name(&resource.id, &data_source.name);

        let url = generate_expression(&resource.url, data_sources, scope);
        used.extend(url.used);

        let mut headers = Vec::with_capacity(resource.headers.len());
        for header in &resource.headers {
            let value = generate_expression(&header.value, data_sources, scope);
            used.extend(value.used);
            headers.push(HeaderDescriptor {
                name: header.name.clone(),
                value: value.code,
            });
        }

        let body = resource.body_expression().map(|body| {
            let body = generate_expression(body, data_sources, scope);
            used.extend(body.used);
            body.code
        });

        targets.push(target);
        loaders.push(ResourceDescriptor {
            id: resource.id.clone(),
            name: resource.name.clone(),
            url: url.code,
            method: resource.method,
            headers,
            body,
        });
    }

    let mut bindings = Vec::new();
    for id in &used {
        let Some(data_source) = data_sources.get(id) else {
            continue;
        };
        match &data_source.kind {
            DataSourceKind::Variable { value } => bindings.push(Binding::Variable {
                name: scope.get_name(&data_source.id, &data_source.name),
                value: value.to_json(),
            }),
            DataSourceKind::Parameter if page.is_system(&data_source.id) => {
                bindings.push(Binding::System {
                    name: scope.get_name(&data_source.id, &data_source.name),
                })
            }
            DataSourceKind::Parameter => {
                debug!(
                    "parameter {} is referenced by a resource but is not the page system parameter",
                    data_source.id
                );
            }
            DataSourceKind::Resource { .. } => {}
        }
    }

    let has_resources = !loaders.is_empty();
    debug!(
        "page {}: {} resources, {} bindings",
        page.id,
        loaders.len(),
        bindings.len()
    );

    let mut imports = vec![Import {
        specifiers: vec![
            ImportSpecifier::value("loadResource"),
            ImportSpecifier::value("isLocalResource"),
            ImportSpecifier::type_only("System"),
        ],
        source: options.sdk_module.clone(),
    }];
    if has_resources {
        imports.push(Import {
            specifiers: vec![ImportSpecifier::value(SITEMAP_BINDING)],
            source: options.sitemap_module.clone(),
        });
    }

    let fetch = has_resources.then(|| ParallelFetch {
        fetcher: CUSTOM_FETCH.to_string(),
        sitemap: SITEMAP_BINDING.to_string(),
        targets: targets.clone(),
        loaders,
    });

    LoaderModule {
        imports,
        function: LoaderFunction {
            name: LOADER_FUNCTION.to_string(),
            props: LOADER_PROPS.to_string(),
            bindings,
            fetch,
            result: targets,
        },
    }
}
