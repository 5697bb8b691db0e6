use super::super::model::ConfigurationModel;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct HistoryConfigSection {
    pub enabled: Option<bool>,
    pub path: Option<String>,
    pub max_entries: Option<usize>,
}

impl HistoryConfigSection {
    pub fn resolved_path(&self, config: &ConfigurationModel) -> Option<PathBuf> {
        self.path.as_ref().map(|raw| config.resolve_path(raw))
    }
}
