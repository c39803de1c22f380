//! Site data model consumed by the code generators.
//!
//! Read-only value objects:
//! - data sources (variables, parameters, resources)
//! - resources (request templates built from expressions)
//! - pages and their instance trees
//! - the page `system` object with its default/merge rules

pub mod data_source;
pub mod page;
pub mod path_pattern;
pub mod project;
pub mod resource;
pub mod system;

pub use data_source::*;
pub use page::*;
pub use path_pattern::{match_pathname_pattern, PathParams};
pub use project::*;
pub use resource::*;
pub use system::*;
