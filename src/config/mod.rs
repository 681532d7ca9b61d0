// ABOUTME: Configuration management for byoman
// Layered TOML files, then environment, then CLI flags

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::byobu::client::DEFAULT_STATUS_RIGHT;

/// Resolved application configuration, built once at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Multiplexer executable
    #[serde(default = "default_binary")]
    pub binary: String,

    /// Auto-refresh period for the session list
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,

    /// status-right format applied to new sessions
    #[serde(default = "default_status_right")]
    pub status_right: String,

    /// Maximum length of a typed session name
    #[serde(default = "default_name_char_limit")]
    pub name_char_limit: usize,

    #[serde(default)]
    pub ui: UiPreferences,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiPreferences {
    /// Render without colors (also forced by `NO_COLOR`)
    #[serde(default)]
    pub no_color: bool,

    /// List title
    #[serde(default = "default_title")]
    pub title: String,
}

impl Default for UiPreferences {
    fn default() -> Self {
        Self {
            no_color: false,
            title: default_title(),
        }
    }
}

/// On-disk shape: every key optional so layers only override what they set
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    binary: Option<String>,
    refresh_interval_secs: Option<u64>,
    status_right: Option<String>,
    name_char_limit: Option<usize>,
    #[serde(default)]
    ui: UiFile,
}

#[derive(Debug, Default, Deserialize)]
struct UiFile {
    no_color: Option<bool>,
    title: Option<String>,
}

fn default_binary() -> String {
    "byobu".to_string()
}

const fn default_refresh_interval_secs() -> u64 {
    3
}

fn default_status_right() -> String {
    DEFAULT_STATUS_RIGHT.to_string()
}

const fn default_name_char_limit() -> usize {
    64
}

fn default_title() -> String {
    "byobu sessions".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            refresh_interval_secs: default_refresh_interval_secs(),
            status_right: default_status_right(),
            name_char_limit: default_name_char_limit(),
            ui: UiPreferences::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default locations plus an optional extra file
    pub fn load(extra: Option<&Path>) -> Result<Self> {
        let mut paths = Self::get_config_paths();
        if let Some(path) = extra {
            if !path.exists() {
                anyhow::bail!("Config file {} does not exist", path.display());
            }
            paths.push(path.to_path_buf());
        }

        let mut config = Self::load_from_paths(&paths)?;
        config.apply_env(std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()));
        Ok(config)
    }

    /// Merge every existing file in `paths`, later paths winning
    pub fn load_from_paths(paths: &[PathBuf]) -> Result<Self> {
        let mut config = Self::default();

        for path in paths {
            if !path.exists() {
                continue;
            }
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            let file: ConfigFile = toml::from_str(&content)
                .with_context(|| format!("Failed to parse config from {}", path.display()))?;

            debug!("Loaded config layer from {}", path.display());
            config.merge(file);
        }

        config.validate()?;
        Ok(config)
    }

    /// Configuration file paths in increasing order of precedence
    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("/etc/byoman/config.toml")];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("byoman").join("config.toml"));
        }

        if let Ok(cwd) = std::env::current_dir() {
            paths.push(cwd.join(".byoman.toml"));
        }

        paths
    }

    fn merge(&mut self, file: ConfigFile) {
        if let Some(binary) = file.binary {
            self.binary = binary;
        }
        if let Some(secs) = file.refresh_interval_secs {
            self.refresh_interval_secs = secs;
        }
        if let Some(status_right) = file.status_right {
            self.status_right = status_right;
        }
        if let Some(limit) = file.name_char_limit {
            self.name_char_limit = limit;
        }
        if let Some(no_color) = file.ui.no_color {
            self.ui.no_color = no_color;
        }
        if let Some(title) = file.ui.title {
            self.ui.title = title;
        }
    }

    fn validate(&self) -> Result<()> {
        if self.binary.trim().is_empty() {
            anyhow::bail!("binary must not be empty");
        }
        if self.refresh_interval_secs == 0 {
            anyhow::bail!("refresh_interval_secs must be at least 1");
        }
        if self.name_char_limit == 0 {
            anyhow::bail!("name_char_limit must be at least 1");
        }
        Ok(())
    }

    /// `NO_COLOR` can only turn colors off, never back on
    pub fn apply_env(&mut self, no_color_env: bool) {
        if no_color_env {
            self.ui.no_color = true;
        }
    }

    pub const fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.binary, "byobu");
        assert_eq!(config.refresh_interval(), Duration::from_secs(3));
        assert_eq!(config.status_right, "%H:%M %d-%b");
        assert_eq!(config.name_char_limit, 64);
        assert!(!config.ui.no_color);
        assert_eq!(config.ui.title, "byobu sessions");
    }

    #[test]
    fn test_missing_files_yield_defaults() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::load_from_paths(&[dir.path().join("nope.toml")]).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_later_layers_override_earlier_ones() {
        let dir = TempDir::new().unwrap();
        let system = write(
            &dir,
            "system.toml",
            "binary = \"tmux\"\nrefresh_interval_secs = 10\n[ui]\ntitle = \"system\"\n",
        );
        let user = write(&dir, "user.toml", "refresh_interval_secs = 5\n[ui]\nno_color = true\n");

        let config = AppConfig::load_from_paths(&[system, user]).unwrap();

        assert_eq!(config.binary, "tmux");
        assert_eq!(config.refresh_interval_secs, 5);
        assert!(config.ui.no_color);
        assert_eq!(config.ui.title, "system");
        assert_eq!(config.status_right, "%H:%M %d-%b");
    }

    #[test]
    fn test_invalid_toml_reports_path() {
        let dir = TempDir::new().unwrap();
        let bad = write(&dir, "bad.toml", "refresh_interval_secs = \"soon\"");

        let err = AppConfig::load_from_paths(&[bad]).unwrap_err();
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn test_zero_refresh_interval_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "zero.toml", "refresh_interval_secs = 0");
        assert!(AppConfig::load_from_paths(&[path]).is_err());
    }

    #[test]
    fn test_no_color_env_only_disables_colors() {
        let mut config = AppConfig::default();
        config.apply_env(false);
        assert!(!config.ui.no_color);
        config.apply_env(true);
        assert!(config.ui.no_color);
    }

    #[test]
    fn test_load_rejects_missing_extra_file() {
        let dir = TempDir::new().unwrap();
        assert!(AppConfig::load(Some(&dir.path().join("missing.toml"))).is_err());
    }
}
