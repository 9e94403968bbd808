//! Settings loader for config.toml

use super::types::{normalize_base_url, Settings};
use gtview_core::prelude::*;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.toml";
const APP_DIR: &str = "gtview";

const DEFAULT_CONFIG: &str = r#"# gtview configuration

[api]
base_url = "http://localhost:8000/"   # Comparison backend
request_timeout_secs = 30             # Requests taking longer fail

[viewer]
show_table = true       # Panes visible when a file is opened
show_html = true
show_pdf = true
# save_dir = "/path/to/saves"   # Saved edits and exported PDF pages

[ui]
show_final_summary = true         # Start on the all-runs summary
show_indentation_result = false
confirm_discard = true            # Ask before dropping unsaved viewer edits
"#;

/// Default config file location (`<config_dir>/gtview/config.toml`)
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join(CONFIG_FILENAME)
}

/// Load settings from `config_path`
///
/// Returns default settings if the file doesn't exist or is invalid.
pub fn load_settings(config_path: &Path) -> Settings {
    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    let mut settings = match std::fs::read_to_string(config_path) {
        Ok(content) => match toml::from_str::<Settings>(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", config_path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", config_path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", config_path, e);
            Settings::default()
        }
    };

    settings.api.base_url = normalize_base_url(&settings.api.base_url);
    settings
}

/// Write a commented default config file if none exists
///
/// Returns the path of the config file.
pub fn init_config_file(config_path: &Path) -> Result<PathBuf> {
    if let Some(parent) = config_path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| {
                Error::config(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }
    }

    if config_path.exists() {
        debug!("Config file already exists at {:?}", config_path);
    } else {
        std::fs::write(config_path, DEFAULT_CONFIG)
            .map_err(|e| Error::config(format!("Failed to write config.toml: {}", e)))?;
        info!("Created default config at {:?}", config_path);
    }

    Ok(config_path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_settings_missing_file() {
        let temp = tempdir().unwrap();
        let settings = load_settings(&temp.path().join("config.toml"));
        assert_eq!(settings.api.base_url, "http://localhost:8000/");
        assert!(settings.ui.show_final_summary);
    }

    #[test]
    fn test_load_settings_custom_values() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[api]
base_url = "http://10.0.0.5:9000"
request_timeout_secs = 5

[ui]
show_indentation_result = true
confirm_discard = false
"#,
        )
        .unwrap();

        let settings = load_settings(&path);
        assert_eq!(settings.api.base_url, "http://10.0.0.5:9000/");
        assert_eq!(settings.api.request_timeout_secs, 5);
        assert!(settings.ui.show_indentation_result);
        assert!(!settings.ui.confirm_discard);
        assert!(settings.viewer.show_html);
    }

    #[test]
    fn test_load_settings_invalid_toml() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "this is not [valid toml").unwrap();

        let settings = load_settings(&path);
        assert_eq!(settings.api.request_timeout_secs, 30);
    }

    #[test]
    fn test_init_config_file_creates_parseable_defaults() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("nested").join("config.toml");

        let written = init_config_file(&path).unwrap();
        assert_eq!(written, path);
        assert!(path.exists());

        let settings = load_settings(&path);
        assert_eq!(settings.api.base_url, "http://localhost:8000/");
        assert!(settings.viewer.show_pdf);
    }

    #[test]
    fn test_init_config_file_keeps_existing() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "[ui]\nconfirm_discard = false\n").unwrap();

        init_config_file(&path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("confirm_discard = false"));
    }
}
