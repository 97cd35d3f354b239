//! Tool configuration: settings types, the workspace config file and path resolution.
mod loader;
mod manager;
mod types;

pub use manager::ConfigManager;
pub use types::{
    ConfigError,
    HelpMenuConfig,
    TemplatesConfig,
    ToolSettings,
    ValidationError,
};
