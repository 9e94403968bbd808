//! Configuration types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/";

/// Application settings (config.toml)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub viewer: ViewerSettings,

    #[serde(default)]
    pub ui: UiSettings,
}

/// Backend connection settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiSettings {
    /// Base URL of the comparison backend; always ends with `/`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl ApiSettings {
    /// Replace the base URL, normalising the trailing slash
    pub fn set_base_url(&mut self, url: &str) {
        self.base_url = normalize_base_url(url);
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

fn default_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

/// Ensure a base URL ends with exactly one `/`
pub fn normalize_base_url(url: &str) -> String {
    let trimmed = url.trim().trim_end_matches('/');
    format!("{trimmed}/")
}

/// Three-way viewer settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ViewerSettings {
    /// Structured comparison table visible on open
    #[serde(default = "default_true")]
    pub show_table: bool,

    /// Rendered HTML pane visible on open
    #[serde(default = "default_true")]
    pub show_html: bool,

    /// PDF page pane visible on open
    #[serde(default = "default_true")]
    pub show_pdf: bool,

    /// Where saved edits and exported PDF pages are written
    #[serde(default = "default_save_dir")]
    pub save_dir: PathBuf,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            show_table: true,
            show_html: true,
            show_pdf: true,
            save_dir: default_save_dir(),
        }
    }
}

fn default_save_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("gtview")
        .join("saves")
}

/// UI settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UiSettings {
    /// All-runs summary checked on startup
    #[serde(default = "default_true")]
    pub show_final_summary: bool,

    /// Indentation summary checked on startup
    #[serde(default)]
    pub show_indentation_result: bool,

    /// Ask before discarding unsaved viewer edits on close/quit
    #[serde(default = "default_true")]
    pub confirm_discard: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            show_final_summary: true,
            show_indentation_result: false,
            confirm_discard: true,
        }
    }
}

fn default_true() -> bool {
    true
}
