use nix::unistd::dup2;
use psh::cli::{self, Options};
use psh::conf::{self, ConfigurationModel, Settings};
use psh::control::{self, Termination};
use psh::control_state::ControlState;
use psh::error::{ShellError, ShellResult};
use psh::input::{HistoryEditor, PipeReader};
use psh::logging;
use psh::signals::{self, QuitSignal};
use std::io::{self, IsTerminal, Write};
use std::os::fd::{AsFd, AsRawFd};
use std::process::ExitCode;

const USAGE_STATUS: u8 = 1;
const FATAL_STATUS: u8 = 1;

/// Entry point: set up the process, then hand over to the control loop.
fn main() -> ExitCode {
    let options = match Options::parse_args(std::env::args_os()) {
        Ok(options) => options,
        Err(_) => {
            cli::print_usage();
            return ExitCode::from(USAGE_STATUS);
        }
    };

    match run(&options) {
        Ok(Termination::EndOfInput) | Ok(Termination::Quit) => {
            let _ = io::stdout().flush();
            ExitCode::SUCCESS
        }
        Ok(Termination::QuitSignal) => {
            let _ = io::stdout().flush();
            ExitCode::from(signals::deliver_quit_notice(io::stdout()))
        }
        Err(err) => {
            println!("{err}");
            ExitCode::from(FATAL_STATUS)
        }
    }
}

fn run(options: &Options) -> ShellResult<Termination> {
    // Everything goes to stdout so a driver on one pipe sees all output.
    redirect_stderr()?;

    let (config, config_error) = match conf::load() {
        Ok(config) => (config, None),
        Err(err) => (ConfigurationModel::default(), Some(err)),
    };
    let settings = Settings::resolve(options, &config);
    logging::init_tracing(settings.verbose, settings.log_filter.as_deref());
    if let Some(err) = config_error {
        tracing::warn!("{err}; using defaults");
    }

    let quit_signal = QuitSignal::install()?;
    let with_history = settings.history.enabled && io::stdin().is_terminal();
    let history = settings.history.clone();
    let mut control_state = ControlState::new(settings);

    // Both paths poll stdin together with the self-pipe so a quit signal ends a blocked read.
    let mut reader = PipeReader::new(io::stdin()).with_wakeup(quit_signal.as_fd());
    if with_history {
        let mut editor = HistoryEditor::new(reader, history)?;
        return control::run_loop_with_editor(&mut control_state, &mut editor);
    }

    return control::run_loop_with_editor(&mut control_state, &mut reader);
}

fn redirect_stderr() -> ShellResult<()> {
    dup2(io::stdout().as_raw_fd(), io::stderr().as_raw_fd()).map_err(ShellError::Redirect)?;
    Ok(())
}
