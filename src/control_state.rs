//! State machine backing the interactive control loop.

use crate::parser;
use crate::conf::Settings;
use crate::error::ShellResult;
use crate::environment::Environment;
use crate::process::{self, Dispatch};
use crate::process::reap::PendingChildren;
use crate::process::builtin::map::BuiltinMap;

/// Fixed prompt printed before each read when prompting is enabled.
pub const PROMPT: &str = "psh> ";

/// Signals whether the control loop should continue or exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlFlow {
    /// Keep reading user input.
    CONTINUE,
    /// Terminate the control loop (the `quit` builtin).
    EXIT,
    /// The quit signal arrived; stop and let the caller print the notice.
    SIGNALLED,
}

/// Shared state that backs the interactive control loop.
pub struct ControlState {
    settings: Settings,
    builtin_map: BuiltinMap,
    environment: Environment,
    background: PendingChildren,
    last_dispatch: Option<Dispatch>,
}

impl ControlState {
    /// Build a control state with the default builtin set and a snapshot of the
    /// current process environment.
    pub fn new(settings: Settings) -> Self {
        Self::with_environment(settings, Environment::capture())
    }

    pub fn with_environment(settings: Settings, environment: Environment) -> Self {
        Self {
            settings,
            builtin_map: BuiltinMap::new(),
            environment,
            background: PendingChildren::new(),
            last_dispatch: None,
        }
    }

    /// The prompt to show, or an empty string when prompting is off.
    pub fn prompt(&self) -> &'static str {
        if self.settings.emit_prompt { PROMPT } else { "" }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// What the most recent non-blank line did.
    pub fn last_dispatch(&self) -> Option<Dispatch> {
        self.last_dispatch
    }

    /// Number of background children not yet collected.
    pub fn pending_background(&self) -> usize {
        self.background.len()
    }

    /// Collect finished background children without blocking.
    pub fn reap_background(&mut self) {
        self.background.reap();
    }

    /// Parse and evaluate a single line of user input.
    pub fn handle_line(&mut self, line: &str) -> ShellResult<ControlFlow> {
        let command = parser::parse(line);
        if command.is_empty() {
            return Ok(ControlFlow::CONTINUE);
        }

        tracing::debug!(argv = ?command.argv, background = command.background, "dispatching");
        let dispatch = process::execute(&self.builtin_map, &self.environment, &command)?;
        self.last_dispatch = Some(dispatch);

        let flow = match dispatch {
            Dispatch::Quit => ControlFlow::EXIT,
            Dispatch::Interrupted(_) => ControlFlow::SIGNALLED,
            Dispatch::Background(pid) => {
                self.background.track(pid);
                ControlFlow::CONTINUE
            }
            Dispatch::Empty | Dispatch::Builtin(_) | Dispatch::Foreground(..) => {
                ControlFlow::CONTINUE
            }
        };
        return Ok(flow);
    }
}
