use thiserror::Error;

// ── Exit codes ──────────────────────────────────────────────────────
//
// sysexits(3) values. Build scripts match on these, never on the
// human-readable message.

/// Stable process exit codes for the `sitegen` binary.
pub mod exit_code {
    pub const DATA_ERR: i32 = 65;
    pub const NO_INPUT: i32 = 66;
    pub const IO_ERR: i32 = 74;
    pub const CONFIG: i32 = 78;
}

// ── SitegenError ────────────────────────────────────────────────────

/// Errors raised around code generation: loading project data, reading
/// configuration, writing generated modules.
///
/// Generation itself never fails. Broken references inside the project
/// data degrade the output instead of producing one of these.
#[derive(Error, Debug)]
pub enum SitegenError {
    /// Reading or writing a file failed.
    #[error("io error: {0}")]
    Io(String),

    /// Project data or an override object is not valid JSON for its shape.
    #[error("parse error: {0}")]
    Parse(String),

    /// Configuration file is unreadable or inconsistent.
    #[error("config error: {0}")]
    Config(String),

    /// A page (or other entity) requested by the caller does not exist.
    #[error("not found: {0}")]
    NotFound(String),
}

impl SitegenError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            SitegenError::Io(_) => exit_code::IO_ERR,
            SitegenError::Parse(_) => exit_code::DATA_ERR,
            SitegenError::Config(_) => exit_code::CONFIG,
            SitegenError::NotFound(_) => exit_code::NO_INPUT,
        }
    }
}

impl From<std::io::Error> for SitegenError {
    fn from(e: std::io::Error) -> Self {
        SitegenError::Io(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_code_mapping() {
        assert_eq!(SitegenError::Io("x".into()).exit_code(), 74);
        assert_eq!(SitegenError::Parse("x".into()).exit_code(), 65);
        assert_eq!(SitegenError::Config("x".into()).exit_code(), 78);
        assert_eq!(SitegenError::NotFound("x".into()).exit_code(), 66);
    }

    #[test]
    fn display_has_category_prefix() {
        assert_eq!(
            SitegenError::NotFound("page '/blog'".into()).to_string(),
            "not found: page '/blog'"
        );
        assert_eq!(
            SitegenError::Parse("expected value at line 1".into()).to_string(),
            "parse error: expected value at line 1"
        );
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.json");
        let err: SitegenError = io.into();
        assert!(matches!(err, SitegenError::Io(ref m) if m.contains("missing.json")));
    }
}
