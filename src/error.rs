use nix::errno::Errno;
use rustyline::error::ReadlineError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("read error: {0}")]
    Input(#[from] ReadlineError),
    #[error("fork error: {0}")]
    Fork(Errno),
    #[error("waitpid error for pid {pid}: {source}")]
    Wait { pid: i32, source: Errno },
    #[error("unable to install signal handling: {0}")]
    SignalSetup(Errno),
    #[error("unable to redirect stderr to stdout: {0}")]
    Redirect(Errno),
    #[error("empty command")]
    EmptyCommand,
    #[error("{0}: argument contains a NUL byte")]
    NulArgument(String),
    #[error("unable to read config file '{}': {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("unable to parse config file '{}': {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

impl ShellError {
    /// Whether the shell should keep reading commands after reporting this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ShellError::EmptyCommand
                | ShellError::NulArgument(_)
                | ShellError::ConfigRead { .. }
                | ShellError::ConfigParse { .. }
        )
    }
}

pub type ShellResult<T> = Result<T, ShellError>;
