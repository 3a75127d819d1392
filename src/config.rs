use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "campus.toml";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub assistant: AssistantConfig,
    #[serde(default)]
    pub coordinator: CoordinatorConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AssistantConfig {
    #[serde(default = "default_assistant_name")]
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CoordinatorConfig {
    #[serde(default = "default_thinking_min_ms")]
    pub thinking_min_ms: u64,
    #[serde(default = "default_thinking_max_ms")]
    pub thinking_max_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UiConfig {
    #[serde(default = "default_timestamps")]
    pub timestamps: bool,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            name: default_assistant_name(),
        }
    }
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            thinking_min_ms: default_thinking_min_ms(),
            thinking_max_ms: default_thinking_max_ms(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            timestamps: default_timestamps(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        let cfg: Config = toml::from_str(&content).context("failed to parse config toml")?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Explicit paths must load; without one, a `campus.toml` next to the
    /// binary is used when present, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_PATH);
                if fallback.exists() {
                    Self::load(fallback)
                } else {
                    Ok(Config::default())
                }
            }
        }
    }

    fn validate(&self) -> Result<()> {
        if self.assistant.name.trim().is_empty() {
            bail!("assistant.name must not be empty");
        }
        if self.coordinator.thinking_min_ms > self.coordinator.thinking_max_ms {
            bail!("coordinator.thinking_min_ms must not exceed thinking_max_ms");
        }
        Ok(())
    }
}

fn default_assistant_name() -> String {
    "Campus AI".to_string()
}

fn default_thinking_min_ms() -> u64 {
    1000
}

fn default_thinking_max_ms() -> u64 {
    2000
}

fn default_timestamps() -> bool {
    true
}
