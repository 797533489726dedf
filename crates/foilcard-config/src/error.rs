//! Errors raised while loading, saving and looking up presets and settings.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::validation::ValidationError;

/// The file operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOp {
    /// Reading a preset or settings file.
    Read,
    /// Writing a preset or settings file.
    Write,
    /// Creating the directory a file goes into.
    CreateDir,
}

impl fmt::Display for FileOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FileOp::Read => "read",
            FileOp::Write => "write",
            FileOp::CreateDir => "create directory",
        })
    }
}

/// Errors from the preset catalog, preset files and engine settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A file or directory operation failed.
    #[error("could not {op} '{}': {source}", .path.display())]
    Io {
        /// What was being attempted.
        op: FileOp,
        /// Path the operation was applied to.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Preset or settings TOML did not parse.
    #[error("malformed TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// A preset or settings value could not be encoded.
    #[error("could not encode TOML: {0}")]
    Encode(#[from] toml::ser::Error),

    /// No preset with this id in the catalog.
    #[error("unknown preset '{0}'")]
    UnknownPreset(String),

    /// A preset id that cannot double as a file stem.
    #[error("invalid preset id '{0}' (use letters, digits, '-' or '_')")]
    InvalidPresetId(String),

    /// Preset values do not fit the effect registry.
    #[error("preset failed validation: {0}")]
    Validation(#[from] ValidationError),
}

impl ConfigError {
    /// Reading `path` failed.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::io(FileOp::Read, path, source)
    }

    /// Writing `path` failed.
    pub fn write_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::io(FileOp::Write, path, source)
    }

    /// Creating the directory `path` failed.
    pub fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::io(FileOp::CreateDir, path, source)
    }

    fn io(op: FileOp, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::Io {
            op,
            path: path.into(),
            source,
        }
    }

    /// The path involved, for I/O failures.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            ConfigError::Io { path, .. } => Some(path),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    fn not_found() -> std::io::Error {
        std::io::Error::new(std::io::ErrorKind::NotFound, "gone")
    }

    #[test]
    fn io_errors_name_operation_and_path() {
        let err = ConfigError::read_file("/presets/gold-rush.toml", not_found());
        assert_eq!(
            err.to_string(),
            "could not read '/presets/gold-rush.toml': gone"
        );
        assert!(err.source().is_some());
        assert!(matches!(err, ConfigError::Io { op: FileOp::Read, .. }));

        let err = ConfigError::create_dir("/presets", not_found());
        assert!(err.to_string().starts_with("could not create directory"));
        assert_eq!(err.path(), Some(std::path::Path::new("/presets")));
    }

    #[test]
    fn lookup_errors_have_no_source() {
        let err = ConfigError::UnknownPreset("gold-rush".to_string());
        assert_eq!(err.to_string(), "unknown preset 'gold-rush'");
        assert!(err.source().is_none());
        assert!(err.path().is_none());

        let err = ConfigError::InvalidPresetId("../up".to_string());
        assert!(err.to_string().contains("'../up'"));
    }

    #[test]
    fn validation_wraps_source() {
        let err = ConfigError::from(ValidationError::UnknownEffect("sparkles".to_string()));
        assert_eq!(
            err.to_string(),
            "preset failed validation: unknown effect: sparkles"
        );
        assert!(err.source().is_some());
    }
}
