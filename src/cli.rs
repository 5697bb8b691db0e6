use clap::Parser;
use std::ffi::OsString;

pub const USAGE: &str = "\
Usage: psh [-hvp]
   -h   print this message
   -v   print additional diagnostic information
   -p   do not emit a command prompt
";

/// Startup flags. Short options only and they combine (`-vp`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Parser)]
#[command(name = "psh", disable_help_flag = true, disable_version_flag = true)]
pub struct Options {
    /// Print the usage message and exit.
    #[arg(short = 'h')]
    pub help: bool,
    /// Print additional diagnostic information.
    #[arg(short = 'v')]
    pub verbose: bool,
    /// Do not emit a command prompt.
    #[arg(short = 'p')]
    pub no_prompt: bool,
}

/// Why startup stopped before the shell ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsageRequest {
    /// `-h` was given.
    Help,
    /// The arguments could not be parsed.
    Invalid(String),
}

impl Options {
    /// Parse the process arguments (program name first).
    pub fn parse_args<I, T>(args: I) -> Result<Self, UsageRequest>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let options =
            Options::try_parse_from(args).map_err(|err| UsageRequest::Invalid(err.to_string()))?;
        if options.help {
            return Err(UsageRequest::Help);
        }
        Ok(options)
    }
}

pub fn print_usage() {
    print!("{}", USAGE);
}
