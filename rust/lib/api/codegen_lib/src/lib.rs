//! Codegen Library - resources loader generation
//!
//! Turns pages, data sources and resources into TypeScript modules that
//! load every page resource in parallel at request time.

pub mod ast;
pub mod expression;
pub mod page_loader;
pub mod render;
pub mod resources;
pub mod scope;

pub use expression::{GeneratedExpression, generate_expression};
pub use page_loader::ResourcesLoaderGenerator;
pub use resources::{LoaderOptions, build_resources_loader, generate_resources_loader, loader_scope};
pub use scope::Scope;

use sitegen_ir::Project;

/// Codegen trait - implement this for each generated artifact
pub trait Codegen {
    fn generate(&self, project: &Project) -> anyhow::Result<GeneratedCode>;
    fn language(&self) -> &str;
}

#[derive(Debug)]
pub struct GeneratedCode {
    pub files: Vec<GeneratedFile>,
}

#[derive(Debug)]
pub struct GeneratedFile {
    pub path: String,
    pub content: String,
}
