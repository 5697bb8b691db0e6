mod loader;
mod model;
mod paths;
pub mod section;
mod settings;

pub use loader::{load, load_from};
pub use model::ConfigurationModel;
pub use paths::{CONFIG_PATH_ENV, expand_path, resolve_config_path};
pub use section::{HistoryConfigSection, ShellConfigSection};
pub use settings::{HistorySettings, Settings};
