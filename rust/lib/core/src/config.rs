use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::SitegenError;

/// Module the generated loaders import `loadResource`, `isLocalResource`
/// and `System` from.
pub const DEFAULT_SDK_MODULE: &str = "@webstudio-is/sdk";

/// Build-time generated sibling that exports the `sitemap` array.
pub const DEFAULT_SITEMAP_MODULE: &str = "./$resources.sitemap.xml";

/// Generator configuration.
///
/// Values come from an optional TOML file first, then command-line
/// overrides ([`ConfigOverrides`]) are applied on top.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct GeneratorConfig {
    /// Project data JSON (pages, instances, data sources, resources).
    pub project: Option<PathBuf>,

    /// Directory the generated `$resources.*.ts` modules are written to.
    pub out_dir: PathBuf,

    /// Published origin, used for the default `system.origin`.
    pub origin: String,

    pub sdk_module: String,

    pub sitemap_module: String,
}

/// Values given on the command line. `None` keeps the configured value.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub project: Option<PathBuf>,
    pub out_dir: Option<PathBuf>,
    pub origin: Option<String>,
    pub sdk_module: Option<String>,
    pub sitemap_module: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            project: None,
            out_dir: PathBuf::from("app/__generated__"),
            origin: "http://localhost:3000".to_string(),
            sdk_module: DEFAULT_SDK_MODULE.to_string(),
            sitemap_module: DEFAULT_SITEMAP_MODULE.to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from a TOML file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self, SitegenError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SitegenError::Config(format!("{}: {}", path.display(), e)))?;
        let config: GeneratorConfig = toml::from_str(&content)
            .map_err(|e| SitegenError::Config(format!("{}: {}", path.display(), e)))?;
        debug!("loaded generator config from {}", path.display());
        Ok(config)
    }

    /// Load from `path` if given, otherwise start from defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, SitegenError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Lay command-line values over the loaded configuration.
    pub fn apply(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(project) = overrides.project {
            self.project = Some(project);
        }
        if let Some(out_dir) = overrides.out_dir {
            self.out_dir = out_dir;
        }
        if let Some(origin) = overrides.origin {
            self.origin = origin;
        }
        if let Some(sdk_module) = overrides.sdk_module {
            self.sdk_module = sdk_module;
        }
        if let Some(sitemap_module) = overrides.sitemap_module {
            self.sitemap_module = sitemap_module;
        }
        self
    }

    /// The project file, or a config error if none was configured.
    pub fn require_project(&self) -> Result<&Path, SitegenError> {
        self.project
            .as_deref()
            .ok_or_else(|| SitegenError::Config("no project file configured".to_string()))
    }
}
