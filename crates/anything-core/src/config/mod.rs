mod dirs;
mod settings;
mod store;
mod validation;

pub use dirs::Directories;
pub use settings::{Config, EmptyEscape, LauncherConfig, SearchConfig, WindowConfig};
pub use store::SettingsStore;
pub use validation::{warn_unknown_fields, warn_unknown_settings_fields};
