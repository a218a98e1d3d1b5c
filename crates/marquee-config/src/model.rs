// SPDX-FileCopyrightText: 2026 Marquee Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Marquee notification engine.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use std::time::Duration;

use marquee_core::NotificationMode;
use serde::{Deserialize, Serialize};

/// Fallback thumbnail when no poster could be resolved.
pub const DEFAULT_PLACEHOLDER_THUMBNAIL: &str =
    "https://github.com/HaveAGitGat/Tdarr/raw/master/src/assets/images/favicon.png";

/// Top-level Marquee configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MarqueeConfig {
    /// Webhook destination settings.
    #[serde(default)]
    pub discord: DiscordConfig,

    /// Poster metadata API settings.
    #[serde(default)]
    pub omdb: OmdbConfig,

    /// Management portal link shown on cards.
    #[serde(default)]
    pub portal: PortalConfig,

    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// In-process message-state settings.
    #[serde(default)]
    pub state: StateConfig,
}

/// Webhook destination configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DiscordConfig {
    /// Webhook URL. Required; validated against the webhook pattern.
    #[serde(default)]
    pub webhook_url: Option<String>,

    /// Edit the job's earlier message (`updates`) or always post (`sequential`).
    #[serde(default)]
    pub mode: NotificationMode,

    /// Per-request deadline for webhook calls.
    #[serde(default = "default_webhook_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent sent with every webhook call.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Thumbnail used when no poster is available.
    #[serde(default = "default_placeholder_thumbnail")]
    pub placeholder_thumbnail: String,
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            mode: NotificationMode::default(),
            timeout_secs: default_webhook_timeout_secs(),
            user_agent: default_user_agent(),
            placeholder_thumbnail: default_placeholder_thumbnail(),
        }
    }
}

impl DiscordConfig {
    /// Deadline for one webhook call.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_webhook_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    concat!("Marquee-Notifier/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_placeholder_thumbnail() -> String {
    DEFAULT_PLACEHOLDER_THUMBNAIL.to_string()
}

/// Poster metadata API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OmdbConfig {
    /// API key. `None` disables poster lookups entirely.
    #[serde(default)]
    pub api_key: Option<String>,

    /// API endpoint.
    #[serde(default = "default_omdb_base_url")]
    pub base_url: String,

    /// Per-request deadline for metadata lookups.
    #[serde(default = "default_omdb_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for OmdbConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_omdb_base_url(),
            timeout_secs: default_omdb_timeout_secs(),
        }
    }
}

impl OmdbConfig {
    /// Deadline for one metadata lookup.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The API key, treating a blank value as unset.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }
}

fn default_omdb_base_url() -> String {
    "https://www.omdbapi.com/".to_string()
}

fn default_omdb_timeout_secs() -> u64 {
    5
}

/// Management portal configuration (display only).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PortalConfig {
    /// Portal URL linked from the card title. `None` omits the link.
    #[serde(default)]
    pub url: Option<String>,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Message-state configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StateConfig {
    /// Forget stored message ids after this many seconds. `None` keeps them
    /// for the life of the process. Applies to the in-process store; ids kept
    /// in the host's job variables live as long as the host keeps them.
    #[serde(default)]
    pub ttl_secs: Option<u64>,
}

impl StateConfig {
    /// Entry lifetime, if bounded.
    pub fn ttl(&self) -> Option<Duration> {
        self.ttl_secs.map(Duration::from_secs)
    }
}
