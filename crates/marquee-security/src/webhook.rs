// SPDX-FileCopyrightText: 2026 Marquee Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Webhook URL policy.
//!
//! Only Discord webhook endpoints of the form
//! `https://discord.com/api/webhooks/<id>/<token>` are accepted. The check runs
//! before any request is built so a mistyped URL never leaves the process.

use std::sync::LazyLock;

use marquee_core::MarqueeError;
use regex::Regex;
use tracing::warn;

use crate::redact::redact_webhook_url;

static WEBHOOK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https://discord(?:app)?\.com/api/webhooks/\d+/[\w\-]+$").unwrap()
});

/// Returns true when `url` parses and matches the webhook pattern.
pub fn is_valid_webhook_url(url: &str) -> bool {
    url::Url::parse(url).is_ok() && WEBHOOK_PATTERN.is_match(url)
}

/// Parse and check a webhook URL, returning the parsed form.
pub fn validate_webhook_url(url: &str) -> Result<url::Url, MarqueeError> {
    let parsed = url::Url::parse(url).map_err(|_| {
        warn!(url = %redact_webhook_url(url), "webhook URL does not parse");
        MarqueeError::Config(format!("Invalid URL format: {}", redact_webhook_url(url)))
    })?;

    if !WEBHOOK_PATTERN.is_match(url) {
        warn!(url = %redact_webhook_url(url), "webhook URL rejected by policy");
        return Err(MarqueeError::Config(format!(
            "Invalid Discord webhook URL format: {}",
            redact_webhook_url(url)
        )));
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_discord_and_discordapp_hosts() {
        assert!(is_valid_webhook_url(
            "https://discord.com/api/webhooks/123456/abc_DEF-ghi"
        ));
        assert!(is_valid_webhook_url(
            "https://discordapp.com/api/webhooks/1/token"
        ));
    }

    #[test]
    fn rejects_other_hosts_schemes_and_shapes() {
        assert!(!is_valid_webhook_url("http://discord.com/api/webhooks/1/token"));
        assert!(!is_valid_webhook_url("https://evil.com/api/webhooks/1/token"));
        assert!(!is_valid_webhook_url("https://discord.com/api/webhooks/abc/token"));
        assert!(!is_valid_webhook_url("https://discord.com/api/webhooks/1/token?x=1"));
        assert!(!is_valid_webhook_url("not a url"));
    }

    #[test]
    fn validation_error_never_contains_token() {
        let err = validate_webhook_url("https://discord.com/api/webhooks/1/tok en")
            .unwrap_err()
            .to_string();
        assert!(err.contains("https://discord.com/api/webhooks/1/***"), "got: {err}");
        assert!(!err.contains("tok en"));
    }

    #[test]
    fn validate_returns_parsed_url() {
        let url = validate_webhook_url("https://discord.com/api/webhooks/42/abc").unwrap();
        assert_eq!(url.host_str(), Some("discord.com"));
        assert_eq!(url.path(), "/api/webhooks/42/abc");
    }
}
