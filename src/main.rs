//! gtview - terminal dashboard for ground-truth comparison runs
//!
//! This is the binary entry point. All logic lives in the workspace crates.

use std::path::PathBuf;

use clap::Parser;
use gtview_app::config::{default_config_path, init_config_file, load_settings};
use gtview_core::prelude::*;

/// Browse comparison runs and inspect pages side by side
#[derive(Parser, Debug)]
#[command(name = "gtview", version)]
#[command(about = "Terminal dashboard for ground-truth document comparison runs", long_about = None)]
struct Args {
    /// Config file (default: <config_dir>/gtview/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Backend base URL, overrides [api].base_url
    #[arg(long, env = "GTVIEW_API_URL", value_name = "URL")]
    api_url: Option<String>,

    /// Write a commented default config file and exit
    #[arg(long)]
    init_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config_path = args.config.unwrap_or_else(default_config_path);

    if args.init_config {
        let path = init_config_file(&config_path)?;
        println!("Config written to {}", path.display());
        return Ok(());
    }

    color_eyre::install().map_err(|e| Error::terminal(e.to_string()))?;

    // to file, since the TUI owns stdout
    gtview_core::logging::init()?;

    let mut settings = load_settings(&config_path);
    if let Some(url) = args.api_url.as_deref() {
        settings.api.set_base_url(url);
    }
    info!("Config: {}", config_path.display());

    let result = gtview_tui::run(settings).await;
    if let Err(ref e) = result {
        error!("Application error: {:?}", e);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parse_overrides() {
        let args = Args::try_parse_from([
            "gtview",
            "--config",
            "/tmp/gtview.toml",
            "--api-url",
            "http://backend:9000",
        ])
        .unwrap();
        assert_eq!(args.config, Some(PathBuf::from("/tmp/gtview.toml")));
        assert_eq!(args.api_url.as_deref(), Some("http://backend:9000"));
        assert!(!args.init_config);
    }

    #[test]
    fn test_init_config_writes_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        init_config_file(&path).unwrap();

        let settings = load_settings(&path);
        assert_eq!(settings.api.base_url, "http://localhost:8000/");
    }

    #[test]
    fn test_args_verify() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
