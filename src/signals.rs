//! Quit-signal plumbing.
//!
//! The SIGQUIT handler only records the request and pokes a self-pipe. Everything
//! observable (the notice, the exit) happens later in normal execution context.
//! SIGCHLD pokes a second pipe so a foreground wait can sleep in `poll` on both
//! and never miss a quit that lands just before it blocks.

use crate::error::{ShellError, ShellResult};
use nix::errno::Errno;
use nix::fcntl::{FcntlArg, FdFlag, OFlag, fcntl};
use nix::libc;
use nix::poll::{PollFd, PollFlags, PollTimeout, poll};
use nix::sys::signal::{SaFlags, SigAction, SigHandler, SigSet, Signal, sigaction};
use nix::unistd::{pipe, read, write};
use std::os::fd::{AsFd, AsRawFd, BorrowedFd, OwnedFd, RawFd};
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};

/// Written verbatim, trailing NUL included, when the quit signal ends the shell.
pub const QUIT_NOTICE: &[u8; 45] = b"Terminating after receipt of SIGQUIT signal\n\0";

/// Exit status once the notice has been written in full.
pub const QUIT_STATUS: u8 = 1;

/// Exit status when the notice could not be written in full.
pub const NOTICE_TRUNCATED_STATUS: u8 = 25;

static QUIT_REQUESTED: AtomicBool = AtomicBool::new(false);
static WAKEUP_FD: AtomicI32 = AtomicI32::new(-1);
static WAKEUP_READ_FD: AtomicI32 = AtomicI32::new(-1);
static CHILD_FD: AtomicI32 = AtomicI32::new(-1);
static CHILD_READ_FD: AtomicI32 = AtomicI32::new(-1);

fn poke(published: &AtomicI32) {
    let fd = published.load(Ordering::SeqCst);
    if fd >= 0 {
        // SAFETY: the descriptor stays open while it is published.
        let fd = unsafe { BorrowedFd::borrow_raw(fd) };
        let _ = write(fd, &[1]);
    }
}

extern "C" fn on_quit(_signal: libc::c_int) {
    QUIT_REQUESTED.store(true, Ordering::SeqCst);
    poke(&WAKEUP_FD);
}

extern "C" fn on_child(_signal: libc::c_int) {
    poke(&CHILD_FD);
}

/// True once a quit signal has been received.
pub fn quit_requested() -> bool {
    QUIT_REQUESTED.load(Ordering::SeqCst)
}

/// Installed SIGQUIT handler together with its self-pipe.
///
/// The read end is what line readers poll alongside stdin.
pub struct QuitSignal {
    reader: OwnedFd,
    writer: OwnedFd,
    child_reader: OwnedFd,
    child_writer: OwnedFd,
}

impl QuitSignal {
    /// Create the self-pipes and route SIGQUIT and SIGCHLD into them.
    pub fn install() -> ShellResult<Self> {
        let (reader, writer) = pipe().map_err(ShellError::SignalSetup)?;
        let (child_reader, child_writer) = pipe().map_err(ShellError::SignalSetup)?;
        for fd in [&reader, &writer, &child_reader, &child_writer] {
            configure_pipe_end(fd.as_raw_fd())?;
        }

        WAKEUP_FD.store(writer.as_raw_fd(), Ordering::SeqCst);
        WAKEUP_READ_FD.store(reader.as_raw_fd(), Ordering::SeqCst);
        CHILD_FD.store(child_writer.as_raw_fd(), Ordering::SeqCst);
        CHILD_READ_FD.store(child_reader.as_raw_fd(), Ordering::SeqCst);

        // No SA_RESTART: a blocking waitpid or poll must return EINTR so the loop
        // can notice the request.
        let quit = SigAction::new(
            SigHandler::Handler(on_quit),
            SaFlags::empty(),
            SigSet::empty(),
        );
        let child = SigAction::new(
            SigHandler::Handler(on_child),
            SaFlags::SA_RESTART | SaFlags::SA_NOCLDSTOP,
            SigSet::empty(),
        );
        // SAFETY: both handlers only touch atomics and call write(2).
        unsafe {
            sigaction(Signal::SIGQUIT, &quit).map_err(ShellError::SignalSetup)?;
            sigaction(Signal::SIGCHLD, &child).map_err(ShellError::SignalSetup)?;
        }

        tracing::debug!("SIGQUIT and SIGCHLD handlers installed");
        Ok(Self {
            reader,
            writer,
            child_reader,
            child_writer,
        })
    }
}

impl AsFd for QuitSignal {
    fn as_fd(&self) -> BorrowedFd<'_> {
        self.reader.as_fd()
    }
}

impl Drop for QuitSignal {
    fn drop(&mut self) {
        let published = [
            (&WAKEUP_FD, &self.writer),
            (&WAKEUP_READ_FD, &self.reader),
            (&CHILD_FD, &self.child_writer),
            (&CHILD_READ_FD, &self.child_reader),
        ];
        for (slot, fd) in published {
            let _ = slot.compare_exchange(fd.as_raw_fd(), -1, Ordering::SeqCst, Ordering::SeqCst);
        }
    }
}

/// True while a `QuitSignal` is installed, so `wait_for_activity` can block.
pub fn watching_children() -> bool {
    WAKEUP_READ_FD.load(Ordering::SeqCst) >= 0 && CHILD_READ_FD.load(Ordering::SeqCst) >= 0
}

/// Sleep until a quit signal is pending or some child has changed state since the
/// last call. Returns at once if no `QuitSignal` is installed.
pub fn wait_for_activity() -> nix::Result<()> {
    let (quit, child) = (
        WAKEUP_READ_FD.load(Ordering::SeqCst),
        CHILD_READ_FD.load(Ordering::SeqCst),
    );
    if quit < 0 || child < 0 {
        return Ok(());
    }

    // SAFETY: both descriptors stay open while they are published.
    let (quit, child) = unsafe { (BorrowedFd::borrow_raw(quit), BorrowedFd::borrow_raw(child)) };
    let mut fds = [
        PollFd::new(quit, PollFlags::POLLIN),
        PollFd::new(child, PollFlags::POLLIN),
    ];
    match poll(&mut fds, PollTimeout::NONE) {
        Ok(_) | Err(Errno::EINTR) => {}
        Err(errno) => return Err(errno),
    }

    // The quit byte stays put so line readers still see it.
    let mut buf = [0u8; 64];
    while let Ok(count) = read(child.as_raw_fd(), &mut buf) {
        if count == 0 {
            break;
        }
    }
    Ok(())
}

fn configure_pipe_end(fd: RawFd) -> ShellResult<()> {
    fcntl(fd, FcntlArg::F_SETFD(FdFlag::FD_CLOEXEC)).map_err(ShellError::SignalSetup)?;
    fcntl(fd, FcntlArg::F_SETFL(OFlag::O_NONBLOCK)).map_err(ShellError::SignalSetup)?;
    Ok(())
}

/// Write the quit notice to `out` with a single write and return the exit status
/// the process should end with.
pub fn deliver_quit_notice<Fd: AsFd>(out: Fd) -> u8 {
    match write(out, QUIT_NOTICE) {
        Ok(written) if written == QUIT_NOTICE.len() => QUIT_STATUS,
        _ => NOTICE_TRUNCATED_STATUS,
    }
}
