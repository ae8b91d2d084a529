use anyhow::{Context, Result};
use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::{
    CONFIG_ENV_PREFIX, CONFIG_FILE_NAME, DEFAULT_AGENT_BASE_URL, HTTP_REQUEST_TIMEOUT_SECS,
    LOCAL_CONFIG_DIR,
};
use crate::utils::ReportChatError;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Remote dialogue agent configuration
    #[serde(default)]
    pub agent: AgentConfig,

    /// UI configuration
    #[serde(default)]
    pub ui: UIConfig,
}

/// Remote dialogue agent configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Base URL of the agent API; `/chat` and friends are appended to it
    pub base_url: String,
    /// Transport timeout for a single request
    pub request_timeout_secs: u64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_AGENT_BASE_URL.to_string(),
            request_timeout_secs: HTTP_REQUEST_TIMEOUT_SECS,
        }
    }
}

/// UI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UIConfig {
    /// Prefix transcript lines with the time they were recorded
    pub show_timestamps: bool,
    /// Copy the command to the clipboard as soon as it is generated
    pub auto_copy: bool,
}

impl Default for UIConfig {
    fn default() -> Self {
        Self {
            show_timestamps: true,
            auto_copy: false,
        }
    }
}

/// Load configuration from multiple sources
pub fn load_config() -> Result<Config> {
    let global_config = get_config_dir()?.join(CONFIG_FILE_NAME);
    let local_config = PathBuf::from(LOCAL_CONFIG_DIR).join(CONFIG_FILE_NAME);
    load_config_from(&[global_config, local_config])
}

/// Load configuration from explicit files (later files win), then the environment
pub fn load_config_from(files: &[PathBuf]) -> Result<Config> {
    let mut figment = Figment::from(Serialized::defaults(Config::default()));

    for file in files {
        if file.exists() {
            figment = figment.merge(Toml::file(file));
        }
    }

    // REPORT_CHAT_AGENT__BASE_URL -> agent.base_url
    figment = figment.merge(Env::prefixed(CONFIG_ENV_PREFIX).split("__"));

    figment
        .extract()
        .map_err(|e| ReportChatError::ConfigError(e.to_string()))
        .context("Failed to load configuration")
}

/// Get the configuration directory
pub fn get_config_dir() -> Result<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", "report-chat") {
        Ok(proj_dirs.config_dir().to_path_buf())
    } else {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .context("Could not determine home directory")?;
        Ok(PathBuf::from(home).join(".config").join("report-chat"))
    }
}

/// Save configuration to file
pub fn save_config(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let toml_string = toml::to_string_pretty(config)?;
    std::fs::write(path, toml_string)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;

    Ok(())
}

/// Create a default configuration file if it doesn't exist
///
/// Returns the path of the config file and whether it was created.
pub fn init_config() -> Result<(PathBuf, bool)> {
    let config_file = get_config_dir()?.join(CONFIG_FILE_NAME);

    if config_file.exists() {
        return Ok((config_file, false));
    }

    save_config(&Config::default(), &config_file)?;
    Ok((config_file, true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_when_no_files() {
        let config = load_config_from(&[PathBuf::from("/nonexistent/config.toml")]).unwrap();
        assert_eq!(config.agent.base_url, DEFAULT_AGENT_BASE_URL);
        assert_eq!(config.agent.request_timeout_secs, HTTP_REQUEST_TIMEOUT_SECS);
        assert!(config.ui.show_timestamps);
        assert!(!config.ui.auto_copy);
    }

    #[test]
    fn test_later_file_overrides_earlier() {
        let dir = TempDir::new().unwrap();
        let global = dir.path().join("global.toml");
        let local = dir.path().join("local.toml");

        std::fs::write(
            &global,
            "[agent]\nbase_url = \"http://global:9000/api\"\nrequest_timeout_secs = 5\n",
        )
        .unwrap();
        std::fs::write(&local, "[agent]\nbase_url = \"http://local:9001/api\"\n").unwrap();

        let config = load_config_from(&[global, local]).unwrap();
        assert_eq!(config.agent.base_url, "http://local:9001/api");
        assert_eq!(config.agent.request_timeout_secs, 5);
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.ui.auto_copy = true;
        save_config(&config, &path).unwrap();

        let loaded = load_config_from(&[path]).unwrap();
        assert!(loaded.ui.auto_copy);
    }
}
