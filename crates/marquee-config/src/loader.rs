// SPDX-FileCopyrightText: 2026 Marquee Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./marquee.toml` > `~/.config/marquee/marquee.toml` > `/etc/marquee/marquee.toml`
//! with environment variable overrides via `MARQUEE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::MarqueeConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/marquee/marquee.toml` (system-wide)
/// 3. `~/.config/marquee/marquee.toml` (user XDG config)
/// 4. `./marquee.toml` (local directory)
/// 5. `MARQUEE_*` environment variables
pub fn load_config() -> Result<MarqueeConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<MarqueeConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(MarqueeConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<MarqueeConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(MarqueeConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading (exposed for diagnostic use).
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(MarqueeConfig::default()))
        .merge(Toml::file("/etc/marquee/marquee.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("marquee/marquee.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("marquee.toml"))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `MARQUEE_DISCORD_WEBHOOK_URL` must map to
/// `discord.webhook_url`, not `discord.webhook.url`.
fn env_provider() -> Env {
    Env::prefixed("MARQUEE_")
        .ignore(&["log"])
        .map(|key| {
            // `key` is the lowercased env var name with prefix stripped.
            let key_str = key.as_str();
            let mapped = key_str
                .replacen("discord_", "discord.", 1)
                .replacen("omdb_", "omdb.", 1)
                .replacen("portal_", "portal.", 1)
                .replacen("logging_", "logging.", 1)
                .replacen("state_", "state.", 1);
            mapped.into()
        })
}
