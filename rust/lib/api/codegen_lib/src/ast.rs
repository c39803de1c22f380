//! Loader module AST.
//!
//! The generated module is modelled as data first and serialized by
//! [`crate::render::render_module`]. Tests assert on this structure.

use sitegen_ir::Method;

/// One generated `$resources.*` module.
#[derive(Debug, Clone, PartialEq)]
pub struct LoaderModule {
    pub imports: Vec<Import>,
    pub function: LoaderFunction,
}

/// `import { a, type B } from "source";`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    pub specifiers: Vec<ImportSpecifier>,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSpecifier {
    pub name: String,
    pub type_only: bool,
}

impl ImportSpecifier {
    pub fn value(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_only: false,
        }
    }

    pub fn type_only(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_only: true,
        }
    }
}

/// `export const <name> = async (<props>: { system: System }) => { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct LoaderFunction {
    pub name: String,
    pub props: String,
    pub bindings: Vec<Binding>,
    /// Absent when the page has no resources; the function then returns
    /// an empty record without touching the network.
    pub fetch: Option<ParallelFetch>,
    /// Keys of the returned record, in first-encounter order.
    pub result: Vec<String>,
}

/// A binding that resource expressions read from.
#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    /// `let <name> = <json literal>`
    Variable {
        name: String,
        value: serde_json::Value,
    },
    /// `const <name> = <props>.system`
    System { name: String },
}

/// The fetch wrapper plus one `Promise.all` over every resource.
#[derive(Debug, Clone, PartialEq)]
pub struct ParallelFetch {
    /// Name of the wrapped fetch passed to each `loadResource` call.
    pub fetcher: String,
    /// Module-level name of the build-time sitemap data.
    pub sitemap: String,
    /// Destructuring targets, one per loader, same order.
    pub targets: Vec<String>,
    pub loaders: Vec<ResourceDescriptor>,
}

/// Argument of one `loadResource(fetcher, { ... })` call. `url`, header
/// values and `body` hold generated code; the rest are literals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDescriptor {
    pub id: String,
    pub name: String,
    pub url: String,
    pub method: Method,
    pub headers: Vec<HeaderDescriptor>,
    pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderDescriptor {
    pub name: String,
    pub value: String,
}
