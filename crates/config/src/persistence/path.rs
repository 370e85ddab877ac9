//! Path helpers for the preferences file location.

use std::path::PathBuf;

use crate::loader::ConfigError;

/// Returns the default path to the preferences file.
///
/// - Linux: `~/.config/api-connector/state.json`
/// - macOS: `~/Library/Application Support/api-connector/state.json`
/// - Windows: `%AppData%\api-connector\config\state.json`
pub fn default_state_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs = directories::ProjectDirs::from("", "", "api-connector").ok_or_else(|| {
        ConfigError::ConfigDirUnavailable("no home directory for this user".to_string())
    })?;

    Ok(proj_dirs.config_dir().join("state.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_path_uses_project_dir() {
        let path = default_state_path().unwrap();
        assert!(path.ends_with("state.json"));
        assert!(path.to_string_lossy().contains("api-connector"));
    }
}
