use super::model::ConfigurationModel;
use super::paths::resolve_config_path;
use crate::error::{ShellError, ShellResult};
use std::fs;
use std::path::Path;

/// Load the user's configuration file. No file at all is not an error: the defaults
/// are returned.
pub fn load() -> ShellResult<ConfigurationModel> {
    match resolve_config_path() {
        Some(path) => load_from(&path),
        None => Ok(ConfigurationModel::default()),
    }
}

/// Load and parse a specific configuration file.
pub fn load_from(path: &Path) -> ShellResult<ConfigurationModel> {
    let contents = fs::read_to_string(path).map_err(|source| ShellError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;

    // An empty document deserializes to unit, not to a mapping.
    if contents.trim().is_empty() {
        let mut cfg = ConfigurationModel::default();
        cfg.set_source_path(path.to_path_buf());
        return Ok(cfg);
    }

    let mut cfg = serde_yaml::from_str::<ConfigurationModel>(&contents).map_err(|source| {
        ShellError::ConfigParse {
            path: path.to_path_buf(),
            source,
        }
    })?;
    cfg.set_source_path(path.to_path_buf());
    Ok(cfg)
}
