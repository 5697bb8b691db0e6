use std::env;
use std::ffi::{CString, OsStr};
use std::os::unix::ffi::OsStrExt;

/// Snapshot of the process environment handed to every spawned child.
///
/// Captured once when the control state is built so the evaluator never reaches for
/// ambient globals; each entry is already in `KEY=VALUE` form for `execve`.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    entries: Vec<CString>,
}

impl Environment {
    /// Capture the variables of the current process.
    pub fn capture() -> Self {
        Self::from_vars(env::vars_os())
    }

    /// Build a snapshot from explicit pairs. Pairs that cannot be represented as a
    /// C string (embedded NUL) are skipped.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<OsStr>,
        V: AsRef<OsStr>,
    {
        let entries = vars
            .into_iter()
            .filter_map(|(key, value)| {
                let mut entry = key.as_ref().as_bytes().to_vec();
                entry.push(b'=');
                entry.extend_from_slice(value.as_ref().as_bytes());
                CString::new(entry).ok()
            })
            .collect();

        Self { entries }
    }

    /// Entries in the layout `execve` expects.
    pub fn entries(&self) -> &[CString] {
        &self.entries
    }

    /// Look up a variable in the snapshot.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.iter().find_map(|entry| {
            let text = entry.to_str().ok()?;
            let (name, value) = text.split_once('=')?;
            (name == key).then_some(value)
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
