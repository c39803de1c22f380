pub mod config;
pub mod error;

pub use config::{ConfigOverrides, GeneratorConfig};
pub use error::SitegenError;
