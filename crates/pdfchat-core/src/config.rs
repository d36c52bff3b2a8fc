use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Resolved settings for the external generation service.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Base URL of the inference server (no trailing slash needed).
    pub endpoint: String,
    /// Optional bearer token sent with each request.
    pub api_key: Option<String>,
    /// Per-request timeout. Generation is slow; default is generous.
    pub timeout: Duration,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8080".to_string(),
            api_key: None,
            timeout: Duration::from_secs(120),
        }
    }
}

impl std::fmt::Display for ModelConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (timeout {}s)", self.endpoint, self.timeout.as_secs())
    }
}

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub model: Option<ModelSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelSection {
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Platform config directory path: `<config_dir>/pdfchat/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("pdfchat").join("config.toml"))
}

/// Load config by cascading CWD `.pdfchat.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".pdfchat.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    toml::from_str(&content).ok()
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    ConfigFile {
        model: Some(ModelSection {
            endpoint: overlay
                .model
                .as_ref()
                .and_then(|m| m.endpoint.clone())
                .or_else(|| base.model.as_ref().and_then(|m| m.endpoint.clone())),
            api_key: overlay
                .model
                .as_ref()
                .and_then(|m| m.api_key.clone())
                .or_else(|| base.model.as_ref().and_then(|m| m.api_key.clone())),
            timeout_secs: overlay
                .model
                .as_ref()
                .and_then(|m| m.timeout_secs)
                .or_else(|| base.model.as_ref().and_then(|m| m.timeout_secs)),
        }),
    }
}

/// Resolve the model configuration: defaults, then config file, then the
/// process environment (`PDFCHAT_MODEL_URL`, `PDFCHAT_MODEL_API_KEY`,
/// `PDFCHAT_MODEL_TIMEOUT_SECS`). Environment wins.
pub fn resolve_model_config(file: &ConfigFile) -> ModelConfig {
    resolve_model_config_with(file, |key| std::env::var(key).ok())
}

fn resolve_model_config_with(
    file: &ConfigFile,
    env: impl Fn(&str) -> Option<String>,
) -> ModelConfig {
    let mut cfg = ModelConfig::default();

    if let Some(model) = &file.model {
        if let Some(endpoint) = &model.endpoint {
            cfg.endpoint = endpoint.clone();
        }
        if let Some(key) = &model.api_key {
            cfg.api_key = Some(key.clone());
        }
        if let Some(secs) = model.timeout_secs {
            cfg.timeout = Duration::from_secs(secs);
        }
    }

    if let Some(endpoint) = env("PDFCHAT_MODEL_URL").filter(|v| !v.is_empty()) {
        cfg.endpoint = endpoint;
    }
    if let Some(key) = env("PDFCHAT_MODEL_API_KEY").filter(|v| !v.is_empty()) {
        cfg.api_key = Some(key);
    }
    if let Some(secs) = env("PDFCHAT_MODEL_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
        cfg.timeout = Duration::from_secs(secs);
    }

    cfg
}
