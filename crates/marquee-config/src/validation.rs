// SPDX-FileCopyrightText: 2026 Marquee Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as the webhook URL pattern, API key shape, and non-zero timeouts.
//! Messages never contain secrets in clear text.

use marquee_security::{is_valid_webhook_url, redact_api_key, redact_webhook_url};

use crate::diagnostic::ConfigError;
use crate::model::MarqueeConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &MarqueeConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    match config.discord.webhook_url.as_deref().map(str::trim) {
        None | Some("") => errors.push(ConfigError::Validation {
            message: "discord.webhook_url is required".to_string(),
        }),
        Some(url) if url::Url::parse(url).is_err() => errors.push(ConfigError::Validation {
            message: format!(
                "discord.webhook_url is not a valid URL: {}",
                redact_webhook_url(url)
            ),
        }),
        Some(url) if !is_valid_webhook_url(url) => errors.push(ConfigError::Validation {
            message: format!(
                "discord.webhook_url has an invalid webhook format: {}",
                redact_webhook_url(url)
            ),
        }),
        Some(_) => {}
    }

    if let Some(key) = config.omdb.api_key.as_deref() {
        if key.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: "omdb.api_key cannot be empty".to_string(),
            });
        } else if key.len() < 8 || key.len() > 50 {
            errors.push(ConfigError::Validation {
                message: format!(
                    "omdb.api_key has invalid length: {}",
                    redact_api_key(key)
                ),
            });
        } else if !key.chars().all(|c| c.is_ascii_alphanumeric()) {
            errors.push(ConfigError::Validation {
                message: format!(
                    "omdb.api_key contains invalid characters: {}",
                    redact_api_key(key)
                ),
            });
        }
    }

    if url::Url::parse(&config.omdb.base_url).is_err() {
        errors.push(ConfigError::Validation {
            message: format!("omdb.base_url `{}` is not a valid URL", config.omdb.base_url),
        });
    }

    if let Some(portal) = config.portal.url.as_deref()
        && url::Url::parse(portal).is_err()
    {
        errors.push(ConfigError::Validation {
            message: format!("portal.url `{portal}` is not a valid URL"),
        });
    }

    if config.discord.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "discord.timeout_secs must be at least 1".to_string(),
        });
    }

    if config.omdb.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "omdb.timeout_secs must be at least 1".to_string(),
        });
    }

    if config.discord.user_agent.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "discord.user_agent must not be empty".to_string(),
        });
    }

    if !LOG_LEVELS.contains(&config.logging.level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "logging.level `{}` is not one of {}",
                config.logging.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WEBHOOK: &str = "https://discord.com/api/webhooks/123456/abcDEF_-9";

    fn valid_config() -> MarqueeConfig {
        let mut config = MarqueeConfig::default();
        config.discord.webhook_url = Some(WEBHOOK.to_string());
        config
    }

    fn messages(errors: &[ConfigError]) -> Vec<String> {
        errors.iter().map(|e| e.to_string()).collect()
    }

    #[test]
    fn default_config_only_lacks_webhook() {
        let errors = validate_config(&MarqueeConfig::default()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(messages(&errors)[0].contains("discord.webhook_url is required"));
    }

    #[test]
    fn config_with_webhook_validates() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn non_discord_webhook_fails_without_leaking_token() {
        let mut config = valid_config();
        config.discord.webhook_url =
            Some("https://discord.com/api/webhooks/notdigits/secret-token".to_string());
        let errors = validate_config(&config).unwrap_err();
        let text = messages(&errors).join("\n");
        assert!(text.contains("invalid webhook format"));
        assert!(!text.contains("secret-token"));
    }

    #[test]
    fn api_key_shape_is_checked() {
        let mut config = valid_config();
        config.omdb.api_key = Some("short".to_string());
        let text = messages(&validate_config(&config).unwrap_err()).join("\n");
        assert!(text.contains("invalid length"));

        config.omdb.api_key = Some("abcd!efgh12".to_string());
        let text = messages(&validate_config(&config).unwrap_err()).join("\n");
        assert!(text.contains("invalid characters"));
        assert!(text.contains("abcd***12"));
        assert!(!text.contains("abcd!efgh12"));

        config.omdb.api_key = Some("   ".to_string());
        let text = messages(&validate_config(&config).unwrap_err()).join("\n");
        assert!(text.contains("cannot be empty"));

        config.omdb.api_key = Some("a1b2c3d4".to_string());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn all_errors_are_collected() {
        let mut config = MarqueeConfig::default();
        config.portal.url = Some("not a url".to_string());
        config.discord.timeout_secs = 0;
        config.logging.level = "loud".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4, "got: {:?}", messages(&errors));
    }
}
