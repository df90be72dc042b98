mod settings;
mod state;

pub use settings::{ApiSettings, Config, DownloadSettings, TableSettings};
pub use state::State;

use crate::error::{FaturasError, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path (~/.faturas/)
pub fn config_dir() -> Result<PathBuf> {
    // First try XDG-style directories
    if let Some(proj_dirs) = ProjectDirs::from("", "", "faturas") {
        return Ok(proj_dirs.config_dir().to_path_buf());
    }

    // Fallback to ~/.faturas/
    let home = dirs_home().ok_or_else(|| {
        FaturasError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        ))
    })?;

    Ok(home.join(".faturas"))
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

/// Expand ~ in paths
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs_home() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Resolve the download directory; relative paths are taken from the config dir.
pub fn resolve_output_dir(output_dir: &str, config_dir: &Path) -> PathBuf {
    let path = expand_path(output_dir);
    if path.is_absolute() {
        path
    } else {
        config_dir.join(path)
    }
}

/// Load the main config.toml
pub fn load_config(config_dir: &Path) -> Result<Config> {
    let path = config_dir.join("config.toml");
    if !path.exists() {
        return Err(FaturasError::ConfigFileNotFound(path));
    }
    let content = fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(|e| FaturasError::ConfigParse { path, source: e })
}

/// Load state.toml (default view if missing)
pub fn load_state(config_dir: &Path) -> Result<State> {
    let path = config_dir.join("state.toml");
    if !path.exists() {
        return Ok(State::default());
    }
    let content = fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(|e| FaturasError::ConfigParse { path, source: e })
}

/// Save state.toml
pub fn save_state(config_dir: &Path, state: &State) -> Result<()> {
    let content = toml::to_string_pretty(state)?;
    fs::write(config_dir.join("state.toml"), content)?;
    Ok(())
}

/// Template content for config.toml
pub const CONFIG_TEMPLATE: &str = r#"[api]
base_url = "http://localhost:3333"   # invoice backend serving /invoices
timeout_secs = 10

[table]
per_page = 10   # 5, 10, 20 or 50

[download]
output_dir = "downloads"   # relative to this directory, or an absolute/~ path
"#;
