//! Platform-specific paths for presets and configuration.
//!
//! # Directory Structure
//!
//! - **User config**: `~/.config/foilcard/` (Linux), `~/Library/Application Support/foilcard/` (macOS), `%APPDATA%\foilcard\` (Windows)
//! - **User presets**: `<user config>/presets/`
//! - **Settings file**: `<user config>/settings.toml`
//!
//! # Example
//!
//! ```rust,no_run
//! use foilcard_config::paths;
//!
//! let presets_dir = paths::user_presets_dir();
//! println!("User presets: {:?}", presets_dir);
//!
//! if let Some(path) = paths::find_preset("gold-rush") {
//!     println!("Found preset at: {:?}", path);
//! }
//! ```

use std::path::{Path, PathBuf};

/// Application name used for directory paths.
const APP_NAME: &str = "foilcard";

/// Subdirectory name for presets.
const PRESETS_SUBDIR: &str = "presets";

/// File name of the engine settings.
const SETTINGS_FILE: &str = "settings.toml";

/// Returns the user-specific configuration directory.
///
/// Returns a fallback path if the config directory cannot be determined.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Returns the user-specific presets directory.
pub fn user_presets_dir() -> PathBuf {
    user_config_dir().join(PRESETS_SUBDIR)
}

/// Returns the path of the user's settings file.
pub fn settings_file() -> PathBuf {
    user_config_dir().join(SETTINGS_FILE)
}

/// Find a preset file by path or by id.
///
/// Searches in the following order:
/// 1. The name as a file path
/// 2. `<user presets>/<name>.toml`
pub fn find_preset(name: &str) -> Option<PathBuf> {
    let path = PathBuf::from(name);
    if path.is_file() {
        return Some(path);
    }

    let filename = if name.ends_with(".toml") {
        name.to_string()
    } else {
        format!("{name}.toml")
    };

    let user_path = user_presets_dir().join(filename);
    user_path.is_file().then_some(user_path)
}

/// Ensure the user presets directory exists.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_user_presets_dir() -> Result<PathBuf, crate::ConfigError> {
    let dir = user_presets_dir();

    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| crate::ConfigError::create_dir(&dir, e))?;
    }

    Ok(dir)
}

/// List all preset files in the user presets directory.
///
/// Returns an empty vector if the directory doesn't exist or can't be read.
pub fn list_user_presets() -> Vec<PathBuf> {
    list_presets_in_dir(&user_presets_dir())
}

/// List the `.toml` files in a directory, sorted by path.
pub fn list_presets_in_dir(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    paths.sort();
    paths
}

/// Get the preset id from a file path (the file stem).
///
/// ```rust
/// use foilcard_config::paths::preset_id_from_path;
/// use std::path::Path;
///
/// let id = preset_id_from_path(Path::new("/path/to/gold-rush.toml"));
/// assert_eq!(id, Some("gold-rush".to_string()));
/// ```
pub fn preset_id_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
}
