//! Configuration module
//!
//! Handles loading and parsing of the user config file (`config.toml`).

pub mod settings;
pub mod types;

pub use settings::{default_config_path, init_config_file, load_settings};
pub use types::{
    normalize_base_url, ApiSettings, Settings, UiSettings, ViewerSettings, DEFAULT_API_BASE_URL,
};
