//! Configuration loading and management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub hn: HnConfig,

    #[serde(default)]
    pub alerts: AlertsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_state_dir")]
    pub state_dir: PathBuf,

    #[serde(default = "default_limit")]
    pub limit: usize,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HnConfig {
    #[serde(default = "default_hn_section_title")]
    pub section_title: String,

    #[serde(default = "default_hn_keywords")]
    pub keywords: Vec<String>,

    #[serde(default = "default_item_delay_ms")]
    pub item_delay_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertsConfig {
    #[serde(default = "default_feed_url")]
    pub feed_url: String,

    #[serde(default = "default_alerts_section_title")]
    pub section_title: String,

    #[serde(default = "default_alerts_keywords")]
    pub keywords: Vec<String>,
}

// Default value functions
fn default_state_dir() -> PathBuf {
    PathBuf::from("./state")
}

fn default_limit() -> usize {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_hn_section_title() -> String {
    "AI threads worth a look".to_string()
}

fn default_hn_keywords() -> Vec<String> {
    [
        "ai",
        "artificial intelligence",
        "llm",
        "agent",
        "model",
        "openai",
        "anthropic",
        "gpt",
    ]
    .map(String::from)
    .to_vec()
}

fn default_item_delay_ms() -> u64 {
    150
}

fn default_feed_url() -> String {
    "https://news.google.com/rss/search?q=business".to_string()
}

fn default_alerts_section_title() -> String {
    "Business alerts".to_string()
}

fn default_alerts_keywords() -> Vec<String> {
    [
        "funding",
        "acquisition",
        "merger",
        "ipo",
        "earnings",
        "layoffs",
        "partnership",
        "regulation",
    ]
    .map(String::from)
    .to_vec()
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            state_dir: default_state_dir(),
            limit: default_limit(),
            log_level: default_log_level(),
        }
    }
}

impl Default for HnConfig {
    fn default() -> Self {
        Self {
            section_title: default_hn_section_title(),
            keywords: default_hn_keywords(),
            item_delay_ms: default_item_delay_ms(),
        }
    }
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            feed_url: default_feed_url(),
            section_title: default_alerts_section_title(),
            keywords: default_alerts_keywords(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        // Try default config path if none specified
        let default_path = PathBuf::from("./config.toml");
        let path = config_path.unwrap_or(&default_path);

        if path.exists() {
            builder = builder.add_source(config::File::from(path));
        } else if config_path.is_some() {
            // User specified a path that doesn't exist
            anyhow::bail!("Config file not found: {}", path.display());
        }

        // Add environment variable overrides
        builder = builder.add_source(
            config::Environment::with_prefix("NEWS_DIGEST")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}
