use nix::unistd::Pid;
use nix::errno::Errno;
use nix::sys::wait::{WaitPidFlag, WaitStatus, waitpid};

/// Background children the shell started and has not yet collected.
///
/// Not a job table: nothing can be listed, resumed or brought to the foreground.
/// It only exists so finished background children do not linger as zombies.
#[derive(Debug, Default)]
pub struct PendingChildren {
    pids: Vec<Pid>,
}

impl PendingChildren {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn track(&mut self, pid: Pid) {
        self.pids.push(pid);
    }

    pub fn len(&self) -> usize {
        self.pids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pids.is_empty()
    }

    /// Collect every tracked child that has terminated, without blocking.
    ///
    /// Returns the pids that were collected.
    pub fn reap(&mut self) -> Vec<Pid> {
        let mut reaped = Vec::new();

        self.pids.retain(|&pid| match waitpid(pid, Some(WaitPidFlag::WNOHANG)) {
            Ok(WaitStatus::StillAlive) => true,
            Ok(status @ (WaitStatus::Exited(..) | WaitStatus::Signaled(..))) => {
                tracing::debug!(pid = pid.as_raw(), ?status, "reaped background child");
                reaped.push(pid);
                false
            }
            Ok(_) => true,
            Err(Errno::EINTR) => true,
            Err(errno) => {
                tracing::debug!(pid = pid.as_raw(), %errno, "dropping untrackable background child");
                false
            }
        });

        return reaped;
    }
}
