use psh::cli::Options;
use psh::conf::{ConfigurationModel, HistoryConfigSection, Settings, ShellConfigSection};
use std::path::PathBuf;

fn model(shell: ShellConfigSection, history: HistoryConfigSection) -> ConfigurationModel {
    let mut cfg = ConfigurationModel::default();
    cfg.shell = shell;
    cfg.history = history;
    cfg
}

#[test]
fn defaults_without_flags_or_file() {
    let settings = Settings::resolve(&Options::default(), &ConfigurationModel::default());

    assert!(!settings.verbose);
    assert!(settings.emit_prompt);
    assert_eq!(settings.log_filter, None);
    assert!(settings.history.enabled);
    assert_eq!(settings.history.max_entries, 1000);
}

#[test]
fn file_values_apply_when_flags_are_absent() {
    let cfg = model(
        ShellConfigSection {
            verbose: Some(true),
            emit_prompt: Some(false),
            log_filter: Some("psh=info".into()),
        },
        HistoryConfigSection {
            enabled: Some(false),
            path: Some("/tmp/psh-history".into()),
            max_entries: Some(10),
        },
    );

    let settings = Settings::resolve(&Options::default(), &cfg);

    assert!(settings.verbose);
    assert!(!settings.emit_prompt);
    assert_eq!(settings.log_filter.as_deref(), Some("psh=info"));
    assert!(!settings.history.enabled);
    assert_eq!(settings.history.path, Some(PathBuf::from("/tmp/psh-history")));
    assert_eq!(settings.history.max_entries, 10);
}

#[test]
fn flags_override_the_file() {
    let cfg = model(
        ShellConfigSection {
            verbose: Some(false),
            emit_prompt: Some(true),
            log_filter: None,
        },
        HistoryConfigSection::default(),
    );
    let options = Options {
        verbose: true,
        no_prompt: true,
        ..Options::default()
    };

    let settings = Settings::resolve(&options, &cfg);

    assert!(settings.verbose);
    assert!(!settings.emit_prompt);
}
