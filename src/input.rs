//! Line sources for the control loop.
//!
//! `ReadlineError::Eof` ends the session and `ReadlineError::Interrupted` means a
//! signal woke the reader before a full line arrived.

use crate::conf::HistorySettings;
use nix::errno::Errno;
use nix::poll::{PollFd, PollFlags, PollTimeout, poll};
use nix::unistd::read;
use rustyline::error::ReadlineError;
use rustyline::Config;
use rustyline::history::{FileHistory, History};
use std::io::{self, Write};
use std::mem;
use std::os::fd::{AsFd, AsRawFd, BorrowedFd};

const READ_CHUNK: usize = 4096;

enum Readiness {
    Input,
    Wakeup,
    Retry,
}

pub trait LineEditor {
    /// Print `prompt` (if non-empty) and return the next line without its newline.
    fn readline(&mut self, prompt: &str) -> Result<String, ReadlineError>;

    fn add_history_entry(&mut self, _entry: &str) -> rustyline::Result<bool> {
        Ok(false)
    }

    /// Called once when the control loop stops reading.
    fn close(&mut self) {}
}

/// Non-interactive reader over a raw descriptor (normally stdin).
///
/// Waits on the input and, when given, a wake-up descriptor such as the quit
/// signal's self-pipe, so a signal is noticed even while no input is arriving.
pub struct PipeReader<'a, I: AsFd> {
    input: I,
    wakeup: Option<BorrowedFd<'a>>,
    pending: Vec<u8>,
    eof: bool,
}

impl<'a, I: AsFd> PipeReader<'a, I> {
    pub fn new(input: I) -> Self {
        Self {
            input,
            wakeup: None,
            pending: Vec::new(),
            eof: false,
        }
    }

    /// Also wake up when `wakeup` becomes readable.
    pub fn with_wakeup(mut self, wakeup: BorrowedFd<'a>) -> Self {
        self.wakeup = Some(wakeup);
        self
    }

    fn take_line(&mut self) -> Option<String> {
        let newline = self.pending.iter().position(|&byte| byte == b'\n')?;
        let rest = self.pending.split_off(newline + 1);
        let mut line = mem::replace(&mut self.pending, rest);
        line.truncate(newline);
        Some(String::from_utf8_lossy(&line).into_owned())
    }

    /// Wait until the input or the wake-up descriptor is ready.
    fn wait_ready(&self) -> Result<Readiness, ReadlineError> {
        let mut fds = vec![PollFd::new(self.input.as_fd(), PollFlags::POLLIN)];
        if let Some(wakeup) = self.wakeup {
            fds.push(PollFd::new(wakeup, PollFlags::POLLIN));
        }

        match poll(&mut fds, PollTimeout::NONE) {
            Ok(_) => {}
            Err(Errno::EINTR) => return Ok(Readiness::Retry),
            Err(errno) => return Err(ReadlineError::Io(io::Error::from(errno))),
        }

        let woken = fds
            .get(1)
            .and_then(|fd| fd.revents())
            .is_some_and(|events| events.contains(PollFlags::POLLIN));
        if woken {
            Ok(Readiness::Wakeup)
        } else {
            Ok(Readiness::Input)
        }
    }

    fn fill(&mut self) -> Result<(), ReadlineError> {
        let mut buf = [0u8; READ_CHUNK];
        match read(self.input.as_fd().as_raw_fd(), &mut buf) {
            Ok(0) => self.eof = true,
            Ok(count) => self.pending.extend_from_slice(&buf[..count]),
            Err(Errno::EINTR) | Err(Errno::EAGAIN) => {}
            Err(errno) => return Err(ReadlineError::Io(io::Error::from(errno))),
        }
        Ok(())
    }
}

impl<I: AsFd> LineEditor for PipeReader<'_, I> {
    fn readline(&mut self, prompt: &str) -> Result<String, ReadlineError> {
        if !prompt.is_empty() {
            let mut stdout = io::stdout().lock();
            stdout.write_all(prompt.as_bytes())?;
            stdout.flush()?;
        }

        loop {
            if let Some(line) = self.take_line() {
                return Ok(line);
            }
            // A trailing fragment without a newline is dropped along with the input.
            if self.eof {
                return Err(ReadlineError::Eof);
            }

            match self.wait_ready()? {
                Readiness::Input => self.fill()?,
                Readiness::Wakeup => return Err(ReadlineError::Interrupted),
                Readiness::Retry => {}
            }
        }
    }
}

/// Terminal sessions: any line source plus a persistent history file.
///
/// Reading stays with the wrapped source so the quit signal's wake-up descriptor is
/// still polled; the kernel's canonical mode provides the line editing.
pub struct HistoryEditor<E: LineEditor> {
    inner: E,
    history: FileHistory,
    settings: HistorySettings,
}

impl<E: LineEditor> HistoryEditor<E> {
    pub fn new(inner: E, settings: HistorySettings) -> rustyline::Result<Self> {
        let config = Config::builder()
            .max_history_size(settings.max_entries)?
            .build();
        let mut history = FileHistory::with_config(config);

        if let Some(path) = settings.path.as_ref().filter(|_| settings.enabled) {
            if path.exists() {
                if let Err(err) = history.load(path) {
                    tracing::warn!("unable to load history from '{}': {err}", path.display());
                }
            }
        }

        Ok(Self {
            inner,
            history,
            settings,
        })
    }

    /// Recorded entries, oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &String> + '_ {
        self.history.iter()
    }
}

impl<E: LineEditor> LineEditor for HistoryEditor<E> {
    fn readline(&mut self, prompt: &str) -> Result<String, ReadlineError> {
        self.inner.readline(prompt)
    }

    fn add_history_entry(&mut self, entry: &str) -> rustyline::Result<bool> {
        self.history.add(entry)
    }

    fn close(&mut self) {
        self.inner.close();
        if !self.settings.enabled {
            return;
        }
        if let Some(path) = &self.settings.path {
            if let Err(err) = self.history.save(path) {
                tracing::warn!("unable to save history to '{}': {err}", path.display());
            }
        }
    }
}
