use std::io::{self, IsTerminal};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_ENV: &str = "PSH_LOG";

/// Pick the filter directive: `PSH_LOG`, then the config file, then the verbosity default.
pub fn filter_directive(verbose: bool, configured: Option<&str>) -> String {
    if let Ok(from_env) = std::env::var(LOG_ENV) {
        if !from_env.trim().is_empty() {
            return from_env;
        }
    }

    match configured {
        Some(directive) if !directive.trim().is_empty() => directive.to_string(),
        _ if verbose => "psh=debug".to_string(),
        _ => "psh=warn".to_string(),
    }
}

/// Install the global subscriber. Output goes to stderr, which the shell has
/// already pointed at stdout.
pub fn init_tracing(verbose: bool, configured: Option<&str>) {
    let directive = filter_directive(verbose, configured);
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("psh=warn"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_ansi(io::stderr().is_terminal())
                .without_time()
                .with_target(false),
        )
        .try_init();
}
