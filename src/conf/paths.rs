use std::env;
use std::path::PathBuf;

pub const CONFIG_PATH_ENV: &str = "PSH_CONFIG";
const RC_FILE: &str = ".pshrc";

/// `$PSH_CONFIG` when set and non-blank, otherwise `~/.pshrc` if that file exists.
pub fn resolve_config_path() -> Option<PathBuf> {
    let explicit = env::var(CONFIG_PATH_ENV)
        .ok()
        .filter(|raw| !raw.trim().is_empty())
        .map(|raw| expand_path(&raw));

    explicit.or_else(|| {
        home_dir()
            .map(|home| home.join(RC_FILE))
            .filter(|path| path.is_file())
    })
}

/// Expand a leading `~` or `~/` against `$HOME`. Anything else is returned as is.
pub fn expand_path(input: &str) -> PathBuf {
    let under_home = match input.strip_prefix('~') {
        Some("") => Some(""),
        Some(rest) => rest.strip_prefix('/'),
        None => None,
    };

    match (under_home, home_dir()) {
        (Some(""), Some(home)) => home,
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(input),
    }
}

pub(crate) fn home_dir() -> Option<PathBuf> {
    env::var_os("HOME").map(PathBuf::from)
}
