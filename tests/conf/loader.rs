use once_cell::sync::Lazy;
use psh::conf::{self, CONFIG_PATH_ENV, ConfigurationModel};
use psh::error::ShellError;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};
use tempfile::TempDir;

static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

fn lock_env<'a>() -> MutexGuard<'a, ()> {
    match ENV_LOCK.lock() {
        Ok(guard) => guard,
        Err(poison) => poison.into_inner(),
    }
}

struct SavedVar {
    key: &'static str,
    value: Option<String>,
}

impl SavedVar {
    fn set(key: &'static str, value: impl AsRef<str>) -> Self {
        let saved = Self {
            key,
            value: env::var(key).ok(),
        };
        unsafe {
            env::set_var(key, value.as_ref());
        }
        saved
    }
}

impl Drop for SavedVar {
    fn drop(&mut self) {
        match &self.value {
            Some(val) => unsafe { env::set_var(self.key, val) },
            None => unsafe { env::remove_var(self.key) },
        }
    }
}

fn write_config(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn parses_all_sections() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        &dir,
        "pshrc.yaml",
        "shell:\n  verbose: true\n  emit_prompt: false\n  log_filter: psh=trace\nhistory:\n  enabled: false\n  path: hist/psh\n  max_entries: 50\n",
    );

    let cfg = conf::load_from(&path).unwrap();

    assert_eq!(cfg.shell.verbose, Some(true));
    assert_eq!(cfg.shell.emit_prompt, Some(false));
    assert_eq!(cfg.shell.log_filter.as_deref(), Some("psh=trace"));
    assert_eq!(cfg.history.enabled, Some(false));
    assert_eq!(cfg.history.max_entries, Some(50));
    assert_eq!(cfg.source_path(), Some(path.as_path()));
    assert_eq!(
        cfg.history.resolved_path(&cfg),
        Some(dir.path().join("hist/psh"))
    );
}

#[test]
fn missing_sections_fall_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "partial.yaml", "shell:\n  verbose: true\n");

    let cfg = conf::load_from(&path).unwrap();

    assert_eq!(cfg.shell.verbose, Some(true));
    assert_eq!(cfg.shell.emit_prompt, None);
    assert_eq!(cfg.history, Default::default());
}

#[test]
fn empty_file_is_accepted() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "empty.yaml", "  \n");

    let cfg = conf::load_from(&path).unwrap();

    assert_eq!(cfg.shell, Default::default());
    assert_eq!(cfg.source_path(), Some(path.as_path()));
}

#[test]
fn malformed_yaml_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "bad.yaml", "shell: [unterminated\n");

    let err = conf::load_from(&path).unwrap_err();

    assert!(matches!(err, ShellError::ConfigParse { .. }));
    assert!(err.to_string().contains("bad.yaml"));
}

#[test]
fn unreadable_file_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();

    let err = conf::load_from(&dir.path().join("absent.yaml")).unwrap_err();

    assert!(matches!(err, ShellError::ConfigRead { .. }));
}

#[test]
fn env_variable_selects_the_config_file() {
    let _guard = lock_env();
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "custom.yaml", "shell:\n  emit_prompt: false\n");
    let _config = SavedVar::set(CONFIG_PATH_ENV, path.to_str().unwrap());

    assert_eq!(conf::resolve_config_path(), Some(path.clone()));
    let cfg = conf::load().unwrap();
    assert_eq!(cfg.shell.emit_prompt, Some(false));
}

#[test]
fn home_pshrc_is_used_only_when_present() {
    let _guard = lock_env();
    let home = tempfile::tempdir().unwrap();
    let _config = SavedVar::set(CONFIG_PATH_ENV, "  ");
    let _home = SavedVar::set("HOME", home.path().to_str().unwrap());

    assert_eq!(conf::resolve_config_path(), None);
    let cfg = conf::load().unwrap();
    assert_eq!(cfg.source_path(), None);

    let rc = home.path().join(".pshrc");
    fs::write(&rc, "shell:\n  verbose: true\n").unwrap();
    assert_eq!(conf::resolve_config_path(), Some(rc));
    assert_eq!(conf::load().unwrap().shell.verbose, Some(true));
}

#[test]
fn tilde_paths_expand_against_home() {
    let _guard = lock_env();
    let home = tempfile::tempdir().unwrap();
    let _home = SavedVar::set("HOME", home.path().to_str().unwrap());

    assert_eq!(conf::expand_path("~"), home.path().to_path_buf());
    assert_eq!(conf::expand_path("~/a/b"), home.path().join("a/b"));
    assert_eq!(conf::expand_path("/abs"), PathBuf::from("/abs"));

    let cfg = ConfigurationModel::default();
    assert_eq!(cfg.resolve_path("rel/file"), PathBuf::from("rel/file"));
}
