use crate::signals;
use std::io::{self, Write};
use crate::input::LineEditor;
use rustyline::error::ReadlineError;
use crate::error::{ShellError, ShellResult};
use crate::control_state::{ControlFlow, ControlState};

/// Why the control loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The input reached end-of-file.
    EndOfInput,
    /// The `quit` builtin ran.
    Quit,
    /// A quit signal was received; the caller owes the user the notice.
    QuitSignal,
}

/// Read, evaluate, repeat until end of input, `quit`, or the quit signal.
pub fn run_loop_with_editor<E: LineEditor>(
    control_state: &mut ControlState,
    editor: &mut E,
) -> ShellResult<Termination> {
    let result = read_eval_loop(control_state, editor);
    editor.close();
    result
}

fn read_eval_loop<E: LineEditor>(
    control_state: &mut ControlState,
    editor: &mut E,
) -> ShellResult<Termination> {
    let mut stdout = io::stdout();

    // Main command control loop for processing commands
    loop {
        if signals::quit_requested() {
            return Ok(Termination::QuitSignal);
        }
        control_state.reap_background();

        let readline = editor.readline(control_state.prompt());

        match readline {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = editor.add_history_entry(&line);
                }

                let flow = match control_state.handle_line(&line) {
                    Ok(flow) => flow,
                    Err(err) if err.is_recoverable() => {
                        eprintln!("psh: {err}");
                        ControlFlow::CONTINUE
                    }
                    Err(err) => return Err(err),
                };
                let _ = stdout.flush();

                match flow {
                    ControlFlow::CONTINUE => {}
                    ControlFlow::EXIT => return Ok(Termination::Quit),
                    ControlFlow::SIGNALLED => return Ok(Termination::QuitSignal),
                }
            }
            Err(ReadlineError::Eof) => {
                let _ = stdout.flush();
                return Ok(Termination::EndOfInput);
            }
            // Woken by a signal other than quit (or ^C in the line editor): read again.
            Err(ReadlineError::Interrupted) => {}
            Err(err) => return Err(ShellError::Input(err)),
        }
    }
}
