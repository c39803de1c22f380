//! Reading project data and writing generated modules.

use std::fs;
use std::path::Path;

use sitegen_codegen_lib::GeneratedCode;
use sitegen_core::SitegenError;
use sitegen_ir::{Project, SystemOverride};
use tracing::debug;

/// Load project data JSON.
pub fn load_project(path: &Path) -> Result<Project, SitegenError> {
    let json = fs::read_to_string(path)
        .map_err(|e| SitegenError::Io(format!("{}: {}", path.display(), e)))?;
    let project = Project::from_json(&json)
        .map_err(|e| SitegenError::Parse(format!("{}: {}", path.display(), e)))?;
    debug!(
        "loaded {} pages, {} data sources, {} resources from {}",
        project.pages.len(),
        project.data_sources.len(),
        project.resources.len(),
        path.display()
    );
    Ok(project)
}

/// Write every generated file under `out_dir`. Returns the file count.
pub fn write_files(out_dir: &Path, code: &GeneratedCode) -> Result<usize, SitegenError> {
    fs::create_dir_all(out_dir)
        .map_err(|e| SitegenError::Io(format!("{}: {}", out_dir.display(), e)))?;
    for file in &code.files {
        let path = out_dir.join(&file.path);
        fs::write(&path, &file.content)
            .map_err(|e| SitegenError::Io(format!("{}: {}", path.display(), e)))?;
        debug!("wrote {}", path.display());
    }
    Ok(code.files.len())
}

/// Parse a `system` override object.
pub fn parse_override(json: &str) -> Result<SystemOverride, SitegenError> {
    serde_json::from_str(json).map_err(|e| SitegenError::Parse(format!("system override: {}", e)))
}
