use super::paths::expand_path;
use super::section::{HistoryConfigSection, ShellConfigSection};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ConfigurationModel {
    #[serde(default)]
    pub shell: ShellConfigSection,
    #[serde(default)]
    pub history: HistoryConfigSection,
    #[serde(skip)]
    source_path: Option<PathBuf>,
}

impl ConfigurationModel {
    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    pub(crate) fn set_source_path(&mut self, path: PathBuf) {
        self.source_path = Some(path);
    }

    /// Expand `~` and anchor relative paths at the directory holding the config file.
    pub fn resolve_path(&self, raw: &str) -> PathBuf {
        let expanded = expand_path(raw);
        if expanded.is_absolute() {
            return expanded;
        }

        match self.source_path.as_deref().and_then(Path::parent) {
            Some(dir) => dir.join(expanded),
            None => expanded,
        }
    }
}
