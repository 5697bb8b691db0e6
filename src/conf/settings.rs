use super::model::ConfigurationModel;
use super::paths::home_dir;
use crate::cli::Options;
use std::path::PathBuf;

const DEFAULT_HISTORY_FILE: &str = ".psh_history";
const DEFAULT_HISTORY_ENTRIES: usize = 1000;

/// History behaviour for terminal sessions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistorySettings {
    pub enabled: bool,
    pub path: Option<PathBuf>,
    pub max_entries: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            enabled: true,
            path: home_dir().map(|home| home.join(DEFAULT_HISTORY_FILE)),
            max_entries: DEFAULT_HISTORY_ENTRIES,
        }
    }
}

/// Effective shell configuration: command-line flags over the config file over defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub verbose: bool,
    pub emit_prompt: bool,
    pub log_filter: Option<String>,
    pub history: HistorySettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            verbose: false,
            emit_prompt: true,
            log_filter: None,
            history: HistorySettings::default(),
        }
    }
}

impl Settings {
    pub fn resolve(options: &Options, config: &ConfigurationModel) -> Self {
        let defaults = Settings::default();
        let shell = &config.shell;
        let history = &config.history;

        let verbose = options.verbose || shell.verbose.unwrap_or(defaults.verbose);
        let emit_prompt = !options.no_prompt && shell.emit_prompt.unwrap_or(defaults.emit_prompt);

        Self {
            verbose,
            emit_prompt,
            log_filter: shell.log_filter.clone(),
            history: HistorySettings {
                enabled: history.enabled.unwrap_or(defaults.history.enabled),
                path: history.resolved_path(config).or(defaults.history.path),
                max_entries: history
                    .max_entries
                    .unwrap_or(defaults.history.max_entries),
            },
        }
    }
}
