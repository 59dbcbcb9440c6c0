//! Application configuration for Docsmith.
//!
//! User config lives at `~/.docsmith/docsmith.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DocsmithError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "docsmith.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".docsmith";

// ---------------------------------------------------------------------------
// Config structs (matching docsmith.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Global defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Generation-service settings.
    #[serde(default)]
    pub genai: GenAiSettings,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Default output directory for generated documents.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Default documentation profile: "element" or "ses".
    #[serde(default = "default_profile")]
    pub profile: String,

    /// Fixed delay between elements, in ms (external rate-limit courtesy).
    #[serde(default = "default_element_delay_ms")]
    pub element_delay_ms: u64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            profile: default_profile(),
            element_delay_ms: default_element_delay_ms(),
        }
    }
}

fn default_output_dir() -> String {
    "docs/elements/isbd".into()
}
fn default_profile() -> String {
    "element".into()
}
fn default_element_delay_ms() -> u64 {
    2000
}

/// `[genai]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenAiSettings {
    /// Name of the env var holding the API key (never store the key itself).
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Model to use for generation.
    #[serde(default = "default_model")]
    pub model: String,

    /// Service base URL. Overridable for tests against a mock server.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Seconds between readiness polls after a reference upload.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Overall deadline for the reference document to become ready.
    #[serde(default = "default_upload_deadline_secs")]
    pub upload_deadline_secs: u64,

    /// Per-request timeout for generation calls.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Attempts for transient service failures (1 = no retry).
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,

    /// Base delay for exponential retry backoff, in ms.
    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,

    /// Sampling temperature for generation.
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Output token cap per generation call.
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
}

impl Default for GenAiSettings {
    fn default() -> Self {
        Self {
            api_key_env: default_api_key_env(),
            model: default_model(),
            base_url: default_base_url(),
            poll_interval_secs: default_poll_interval_secs(),
            upload_deadline_secs: default_upload_deadline_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            retry_attempts: default_retry_attempts(),
            retry_base_delay_ms: default_retry_base_delay_ms(),
            temperature: default_temperature(),
            max_output_tokens: default_max_output_tokens(),
        }
    }
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".into()
}
fn default_model() -> String {
    "gemini-1.5-pro".into()
}
fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".into()
}
fn default_poll_interval_secs() -> u64 {
    10
}
fn default_upload_deadline_secs() -> u64 {
    600
}
fn default_request_timeout_secs() -> u64 {
    120
}
fn default_retry_attempts() -> u32 {
    3
}
fn default_retry_base_delay_ms() -> u64 {
    500
}
fn default_temperature() -> f64 {
    0.1
}
fn default_max_output_tokens() -> u32 {
    2048
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.docsmith/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| DocsmithError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.docsmith/docsmith.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| DocsmithError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| DocsmithError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| DocsmithError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| DocsmithError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| DocsmithError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

/// Resolve the API key from the configured env var.
///
/// The caller is expected to have loaded any `.env` file beforehand; the key
/// itself is never stored in the config file.
pub fn resolve_api_key(config: &AppConfig) -> Result<String> {
    let var_name = &config.genai.api_key_env;
    match std::env::var(var_name) {
        Ok(val) if !val.is_empty() => Ok(val),
        _ => Err(DocsmithError::config(format!(
            "API key not found. Either:\n\
             \x20 1. Create a .env file with: {var_name}=your-key-here\n\
             \x20 2. Export it: export {var_name}=your-key-here"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("output_dir"));
        assert!(toml_str.contains("GEMINI_API_KEY"));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.defaults.element_delay_ms, 2000);
        assert_eq!(parsed.genai.api_key_env, "GEMINI_API_KEY");
        assert_eq!(parsed.genai.model, "gemini-1.5-pro");
    }

    #[test]
    fn partial_config_fills_defaults() {
        let toml_str = r#"
[genai]
model = "gemini-2.0-flash"
poll_interval_secs = 1
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.genai.model, "gemini-2.0-flash");
        assert_eq!(config.genai.poll_interval_secs, 1);
        // Untouched fields keep their defaults
        assert_eq!(config.genai.retry_attempts, 3);
        assert_eq!(config.defaults.output_dir, "docs/elements/isbd");
    }

    #[test]
    fn api_key_resolution_fails_without_env() {
        let mut config = AppConfig::default();
        // Use a unique env var name to avoid interfering with other tests
        config.genai.api_key_env = "DOCSMITH_TEST_NONEXISTENT_KEY_12345".into();
        let result = resolve_api_key(&config);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("API key not found"));
    }
}
