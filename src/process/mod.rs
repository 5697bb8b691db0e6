//! Command evaluation: builtin dispatch and the fork/exec/wait lifecycle.

pub mod builtin;
pub mod quit;
pub mod reap;
pub mod spawn;

use nix::unistd::Pid;
use crate::error::ShellResult;
use crate::parser::CommandLine;
use nix::sys::wait::WaitStatus;
use crate::environment::Environment;
use crate::process::spawn::WaitOutcome;
use crate::process::builtin::map::BuiltinMap;

/// What a single evaluation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Blank line; nothing ran.
    Empty,
    /// A builtin ran in-process and returned this status.
    Builtin(Option<i32>),
    /// The `quit` builtin asked the shell to stop.
    Quit,
    /// A foreground child ran to completion.
    Foreground(Pid, Option<WaitStatus>),
    /// A background child was started and left running.
    Background(Pid),
    /// The quit signal arrived while waiting on a foreground child.
    Interrupted(Pid),
}

/// Evaluate a parsed command line: builtins first, otherwise spawn `argv[0]`.
///
/// Foreground children are waited on before returning; background children are not.
pub fn execute(
    builtin_map: &BuiltinMap,
    environment: &Environment,
    command: &CommandLine,
) -> ShellResult<Dispatch> {
    let Some(name) = command.name() else {
        return Ok(Dispatch::Empty);
    };

    // Determine if command is builtin, and call function
    if let Some(result) = builtin_map.invoke(name, command.args()) {
        if result == Some(quit::QUIT_CODE) {
            return Ok(Dispatch::Quit);
        }
        return Ok(Dispatch::Builtin(result));
    }

    let pid = spawn::spawn(&command.argv, environment)?;
    if command.background {
        return Ok(Dispatch::Background(pid));
    }

    match spawn::wait_foreground(pid)? {
        WaitOutcome::Finished(status) => Ok(Dispatch::Foreground(pid, status)),
        WaitOutcome::Interrupted => Ok(Dispatch::Interrupted(pid)),
    }
}
