//! Splits a raw command line into an argument vector and a background flag.

/// Trailing token that requests background execution.
pub const BACKGROUND_MARKER: &str = "&";

/// A tokenized command line, ready for dispatch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandLine {
    /// Command name followed by its arguments. Never contains the background marker
    /// when it was the final token.
    pub argv: Vec<String>,
    /// Set when the last token of the line was exactly `&`.
    pub background: bool,
}

impl CommandLine {
    /// True for blank lines (and a lone `&`), which dispatch nothing.
    pub fn is_empty(&self) -> bool {
        self.argv.is_empty()
    }

    /// The command name, `argv[0]`.
    pub fn name(&self) -> Option<&str> {
        self.argv.first().map(String::as_str)
    }

    /// Everything after the command name.
    pub fn args(&self) -> &[String] {
        self.argv.get(1..).unwrap_or(&[])
    }
}

/// Tokenize `line` on runs of whitespace. No quoting, escaping, pipes or redirection
/// are recognized, so this never fails; degenerate input yields an empty vector.
pub fn parse(line: &str) -> CommandLine {
    let mut argv: Vec<String> = line.split_whitespace().map(String::from).collect();

    let background = argv
        .last()
        .is_some_and(|token| token == BACKGROUND_MARKER);
    if background {
        argv.pop();
    }

    CommandLine { argv, background }
}
