//! fork/exec/wait for external commands.

use nix::libc;
use crate::signals;
use nix::errno::Errno;
use std::ffi::CString;
use std::io::{self, Write};
use crate::environment::Environment;
use crate::error::{ShellError, ShellResult};
use nix::sys::wait::{WaitPidFlag, WaitStatus, waitpid};
use nix::unistd::{ForkResult, Pid, execve, fork, write};

/// Status a child exits with when its program image could not be replaced.
pub const EXEC_FAILURE_STATUS: i32 = 127;

/// Outcome of blocking on a foreground child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// The child terminated. `None` if it had already been collected elsewhere.
    Finished(Option<WaitStatus>),
    /// A quit signal arrived while waiting; the child was left running.
    Interrupted,
}

/// Diagnostic the child prints when `execve` fails.
pub fn not_a_command(name: &str) -> String {
    format!("{}: is not a command.\n", name)
}

/// Fork a child that replaces its image with `argv[0]`, passing `argv` and `environment`.
///
/// Only the child execs. If that fails it prints the not-a-command diagnostic and
/// exits; it never returns into shell code.
pub fn spawn(argv: &[String], environment: &Environment) -> ShellResult<Pid> {
    let Some(name) = argv.first() else {
        return Err(ShellError::EmptyCommand);
    };
    let c_argv = argv
        .iter()
        .map(|arg| CString::new(arg.as_str()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| ShellError::NulArgument(name.clone()))?;
    let diagnostic = not_a_command(name);

    // Anything still buffered would otherwise be written twice.
    let _ = io::stdout().flush();

    // SAFETY: the child only calls execve, write and _exit before leaving this process.
    match unsafe { fork() } {
        Ok(ForkResult::Child) => {
            let _ = execve(c_argv[0].as_c_str(), c_argv.as_slice(), environment.entries());
            let _ = write(io::stdout(), diagnostic.as_bytes());
            // SAFETY: _exit is async-signal-safe and flushes nothing inherited from the parent.
            unsafe { libc::_exit(EXEC_FAILURE_STATUS) }
        }
        Ok(ForkResult::Parent { child }) => {
            tracing::debug!(pid = child.as_raw(), command = %name, "spawned child");
            Ok(child)
        }
        Err(errno) => Err(ShellError::Fork(errno)),
    }
}

/// Block until `pid` terminates.
///
/// With a `QuitSignal` installed the wait never blocks inside `waitpid`: it polls the
/// child without hanging and sleeps on the signal pipes in between, so a quit that
/// arrives at any moment ends the wait. Without one, interrupted waits are retried
/// unless the quit signal is pending.
pub fn wait_foreground(pid: Pid) -> ShellResult<WaitOutcome> {
    let watching = signals::watching_children();
    let options = watching.then_some(WaitPidFlag::WNOHANG);

    loop {
        if signals::quit_requested() {
            return Ok(WaitOutcome::Interrupted);
        }
        match waitpid(pid, options) {
            Ok(status @ (WaitStatus::Exited(..) | WaitStatus::Signaled(..))) => {
                tracing::debug!(pid = pid.as_raw(), ?status, "foreground child finished");
                return Ok(WaitOutcome::Finished(Some(status)));
            }
            Ok(WaitStatus::StillAlive) => {
                signals::wait_for_activity().map_err(|source| ShellError::Wait {
                    pid: pid.as_raw(),
                    source,
                })?;
            }
            Ok(_) => continue,
            Err(Errno::EINTR) => continue,
            Err(Errno::ECHILD) => {
                tracing::warn!(pid = pid.as_raw(), "foreground child was already reaped");
                return Ok(WaitOutcome::Finished(None));
            }
            Err(source) => {
                return Err(ShellError::Wait {
                    pid: pid.as_raw(),
                    source,
                });
            }
        }
    }
}
