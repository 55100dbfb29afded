//! Configuration file management for physio.
//!
//! Provides a TOML-based config file at `~/.config/physio/config.toml` and a
//! resolution chain: CLI flag > env var > config file > default.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use physio_core::llm::LlmConfig;

pub const ENV_BASE_URL: &str = "PHYSIO_LLM_BASE_URL";
pub const ENV_MODEL: &str = "PHYSIO_LLM_MODEL";
pub const ENV_API_KEY: &str = "PHYSIO_LLM_API_KEY";
pub const ENV_PROFILES: &str = "PHYSIO_PROFILES";

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub llm: LlmSection,
    #[serde(default)]
    pub profiles: ProfilesSection,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSection {
    pub base_url: String,
    pub model: String,
    /// Prefer `PHYSIO_LLM_API_KEY` over storing the key here.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub temperature: f32,
    pub connect_timeout_secs: u64,
    pub read_timeout_secs: u64,
    pub write_timeout_secs: u64,
}

impl Default for LlmSection {
    fn default() -> Self {
        Self {
            base_url: LlmConfig::DEFAULT_BASE_URL.to_string(),
            model: LlmConfig::DEFAULT_MODEL.to_string(),
            api_key: None,
            temperature: LlmConfig::DEFAULT_TEMPERATURE,
            connect_timeout_secs: LlmConfig::DEFAULT_CONNECT_TIMEOUT_SECS,
            read_timeout_secs: LlmConfig::DEFAULT_READ_TIMEOUT_SECS,
            write_timeout_secs: LlmConfig::DEFAULT_WRITE_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ProfilesSection {
    /// TOML file of `[[profiles]]` entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the physio config directory.
///
/// Always uses XDG layout: `$XDG_CONFIG_HOME/physio` or `~/.config/physio`.
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("physio");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("physio")
}

/// Return the path to the physio config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

// -----------------------------------------------------------------------
// Read / write
// -----------------------------------------------------------------------

/// Load and parse a config file. Returns an error if it does not exist.
pub fn load_config_from(path: &Path) -> Result<ConfigFile> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&contents)
        .with_context(|| format!("failed to parse config file at {}", path.display()))?;
    Ok(config)
}

/// Load the default config file if there is one.
///
/// A missing file is not an error; a malformed one is.
pub fn load_config_if_present() -> Result<Option<ConfigFile>> {
    let path = config_path();
    if !path.exists() {
        return Ok(None);
    }
    load_config_from(&path).map(Some)
}

/// Serialize and write a config file, creating parent dirs as needed.
/// Sets file permissions to 0600 on Unix.
pub fn save_config_to(config: &ConfigFile, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create config directory {}", dir.display()))?;
    }

    let contents = toml::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(path, &contents)
        .with_context(|| format!("failed to write config file at {}", path.display()))?;

    // The file may hold an API key.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(path, perms)
            .with_context(|| format!("failed to set permissions on {}", path.display()))?;
    }

    Ok(())
}

// -----------------------------------------------------------------------
// Resolved config
// -----------------------------------------------------------------------

/// Values given on the command line, highest precedence.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub profiles: Option<PathBuf>,
}

/// Fully resolved configuration, ready for use.
#[derive(Debug)]
pub struct PhysioConfig {
    pub llm: LlmConfig,
    pub profiles_path: Option<PathBuf>,
}

impl PhysioConfig {
    /// Resolve configuration from the default config file location.
    pub fn resolve(overrides: &CliOverrides) -> Result<Self> {
        let file = load_config_if_present()?;
        Ok(Self::resolve_with(overrides, file))
    }

    /// Resolve using the chain: CLI flag > env var > config file > default.
    ///
    /// - Base URL: `--base-url` > `PHYSIO_LLM_BASE_URL` > `llm.base_url` > built-in
    /// - Model: `--model` > `PHYSIO_LLM_MODEL` > `llm.model` > built-in
    /// - API key: `PHYSIO_LLM_API_KEY` > `llm.api_key` > none
    /// - Profiles: `--profiles` > `PHYSIO_PROFILES` > `profiles.path` > none
    pub fn resolve_with(overrides: &CliOverrides, file: Option<ConfigFile>) -> Self {
        let file = file.unwrap_or_default();
        let section = file.llm;

        let base_url = overrides
            .base_url
            .clone()
            .or_else(|| env_value(ENV_BASE_URL))
            .unwrap_or(section.base_url);
        let model = overrides
            .model
            .clone()
            .or_else(|| env_value(ENV_MODEL))
            .unwrap_or(section.model);
        let api_key = env_value(ENV_API_KEY).or(section.api_key);
        let profiles_path = overrides
            .profiles
            .clone()
            .or_else(|| env_value(ENV_PROFILES).map(PathBuf::from))
            .or(file.profiles.path);

        let llm = LlmConfig {
            base_url,
            api_key,
            model,
            temperature: section.temperature,
            connect_timeout: Duration::from_secs(section.connect_timeout_secs),
            read_timeout: Duration::from_secs(section.read_timeout_secs),
            write_timeout: Duration::from_secs(section.write_timeout_secs),
        };

        Self { llm, profiles_path }
    }
}

/// Read an env var, treating empty as unset.
fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------
