// src/config.rs

//! Application configuration structures.

use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Fetch/publish engine behavior settings
    #[serde(default)]
    pub engine: EngineConfig,

    /// Location allow/block lists
    #[serde(default)]
    pub filter: FilterConfig,

    /// Fetch source settings
    #[serde(default)]
    pub sources: SourcesConfig,

    /// Publish channel settings
    #[serde(default)]
    pub channels: ChannelsConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Overlay channel credentials from the environment.
    ///
    /// Called once by `main` before handing the config to the engine; core
    /// components never read the environment themselves.
    pub fn apply_env(&mut self) {
        let overlay = |slot: &mut Option<String>, var: &str| {
            if let Ok(value) = env::var(var) {
                if !value.trim().is_empty() {
                    *slot = Some(value);
                }
            }
        };

        overlay(&mut self.channels.telegram.bot_token, "TELEGRAM_BOT_TOKEN");
        overlay(&mut self.channels.telegram.channel_id, "TELEGRAM_CHANNEL_ID");
        overlay(&mut self.channels.blog.api_url, "BLOG_API_URL");
        overlay(&mut self.channels.blog.username, "BLOG_USERNAME");
        overlay(&mut self.channels.blog.password, "BLOG_PASSWORD");
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.engine.user_agent.trim().is_empty() {
            return Err(AppError::validation("engine.user_agent is empty"));
        }
        if self.engine.request_timeout_secs == 0 {
            return Err(AppError::validation(
                "engine.request_timeout_secs must be > 0",
            ));
        }
        if self.engine.fetch_interval_minutes == 0 {
            return Err(AppError::validation(
                "engine.fetch_interval_minutes must be > 0",
            ));
        }
        if self.engine.max_concurrent == 0 {
            return Err(AppError::validation("engine.max_concurrent must be > 0"));
        }
        if self.engine.db_path.trim().is_empty() {
            return Err(AppError::validation("engine.db_path is empty"));
        }
        Ok(())
    }
}

/// Fetch/publish engine behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds (fetch and publish calls)
    #[serde(default = "defaults::request_timeout")]
    pub request_timeout_secs: u64,

    /// Minutes between cycles when running the scheduler
    #[serde(default = "defaults::fetch_interval")]
    pub fetch_interval_minutes: u64,

    /// Maximum concurrent source fetches
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,

    /// Path to the SQLite database file
    #[serde(default = "defaults::db_path")]
    pub db_path: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            request_timeout_secs: defaults::request_timeout(),
            fetch_interval_minutes: defaults::fetch_interval(),
            max_concurrent: defaults::max_concurrent(),
            db_path: defaults::db_path(),
        }
    }
}

/// Location allow/block keyword lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Accept a posting only if its location contains one of these keywords.
    /// Empty list accepts every location not blocked.
    #[serde(default = "defaults::allowed_locations")]
    pub allowed_locations: Vec<String>,

    /// Reject a posting if its location contains one of these keywords.
    /// Takes precedence over the allowlist.
    #[serde(default = "defaults::blocked_locations")]
    pub blocked_locations: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            allowed_locations: defaults::allowed_locations(),
            blocked_locations: defaults::blocked_locations(),
        }
    }
}

/// Fetch source settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SourcesConfig {
    #[serde(default)]
    pub linkedin: LinkedInSourceConfig,

    #[serde(default)]
    pub python_org: PythonOrgSourceConfig,
}

/// LinkedIn guest search settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkedInSourceConfig {
    #[serde(default = "defaults::enabled")]
    pub enabled: bool,

    /// Search keywords
    #[serde(default = "defaults::linkedin_keywords")]
    pub keywords: String,

    /// Search location
    #[serde(default = "defaults::linkedin_location")]
    pub location: String,
}

impl Default for LinkedInSourceConfig {
    fn default() -> Self {
        Self {
            enabled: defaults::enabled(),
            keywords: defaults::linkedin_keywords(),
            location: defaults::linkedin_location(),
        }
    }
}

/// python.org jobs board settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PythonOrgSourceConfig {
    #[serde(default)]
    pub enabled: bool,
}

impl Default for PythonOrgSourceConfig {
    fn default() -> Self {
        Self { enabled: false }
    }
}

/// Publish channel settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ChannelsConfig {
    #[serde(default)]
    pub telegram: TelegramConfig,

    #[serde(default)]
    pub blog: BlogConfig,

    #[serde(default)]
    pub social: SocialConfig,
}

/// Telegram bot credentials ("chat" channel).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TelegramConfig {
    /// Bot API token; channel is skipped when missing
    #[serde(default)]
    pub bot_token: Option<String>,

    /// Target channel/chat id
    #[serde(default)]
    pub channel_id: Option<String>,
}

/// Blog REST endpoint credentials ("blog" channel).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BlogConfig {
    /// Posts endpoint (WordPress-style REST); channel is skipped when missing
    #[serde(default)]
    pub api_url: Option<String>,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub password: Option<String>,
}

/// Social share settings ("social" channel).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SocialConfig {
    /// Render the post even though no posting API is wired up
    #[serde(default)]
    pub enabled: bool,
}

mod defaults {
    // Engine defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; jobwire/0.1)".into()
    }
    pub fn request_timeout() -> u64 {
        10
    }
    pub fn fetch_interval() -> u64 {
        15
    }
    pub fn max_concurrent() -> usize {
        4
    }
    pub fn db_path() -> String {
        "data/jobs.db".into()
    }
    pub fn enabled() -> bool {
        true
    }

    // Filter defaults
    pub fn allowed_locations() -> Vec<String> {
        [
            "India",
            "Remote",
            "Bengaluru",
            "Bangalore",
            "Delhi",
            "Mumbai",
            "Pune",
            "Hyderabad",
            "Chennai",
            "Gurgaon",
            "Noida",
        ]
        .map(String::from)
        .to_vec()
    }
    pub fn blocked_locations() -> Vec<String> {
        ["United States", "USA", "UK", "London", "Europe", "China"]
            .map(String::from)
            .to_vec()
    }

    // Source defaults
    pub fn linkedin_keywords() -> String {
        "Software Engineer".into()
    }
    pub fn linkedin_location() -> String {
        "India".into()
    }
}
