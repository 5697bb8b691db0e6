mod history;
mod shell;

pub use history::HistoryConfigSection;
pub use shell::ShellConfigSection;
