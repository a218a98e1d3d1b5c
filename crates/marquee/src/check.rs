// SPDX-FileCopyrightText: 2026 Marquee Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `marquee check-config` command implementation.

use marquee_config::MarqueeConfig;
use marquee_security::{redact_api_key, redact_webhook_url};

/// Print the effective configuration with secrets masked.
pub fn print_summary(config: &MarqueeConfig) {
    println!();
    println!("  marquee check-config");
    println!("  {}", "-".repeat(50));
    for (name, value) in summary(config) {
        println!("    {name:<22} {value}");
    }
    println!();
    println!("  configuration OK");
}

/// Name/value rows shown by `check-config`.
pub fn summary(config: &MarqueeConfig) -> Vec<(&'static str, String)> {
    let webhook = config
        .discord
        .webhook_url
        .as_deref()
        .map(redact_webhook_url)
        .unwrap_or_else(|| "(not set)".to_string());
    let api_key = config
        .omdb
        .api_key()
        .map(redact_api_key)
        .unwrap_or_else(|| "(not set, posters disabled)".to_string());
    let ttl = match config.state.ttl_secs {
        Some(secs) => format!("{secs}s"),
        None => "none".to_string(),
    };

    vec![
        ("discord.webhook_url", webhook),
        ("discord.mode", config.discord.mode.to_string()),
        ("discord.timeout_secs", config.discord.timeout_secs.to_string()),
        ("discord.user_agent", config.discord.user_agent.clone()),
        ("omdb.api_key", api_key),
        ("omdb.base_url", config.omdb.base_url.clone()),
        ("omdb.timeout_secs", config.omdb.timeout_secs.to_string()),
        (
            "portal.url",
            config.portal.url.clone().unwrap_or_else(|| "(not set)".to_string()),
        ),
        ("logging.level", config.logging.level.clone()),
        ("state.ttl", ttl),
    ]
}
