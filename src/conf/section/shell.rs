use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct ShellConfigSection {
    pub verbose: Option<bool>,
    pub emit_prompt: Option<bool>,
    pub log_filter: Option<String>,
}
