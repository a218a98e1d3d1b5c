// SPDX-FileCopyrightText: 2026 Marquee Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Marquee notification engine.
//!
//! Provides TOML configuration parsing with strict validation (`deny_unknown_fields`),
//! XDG file hierarchy lookup, `MARQUEE_*` environment variable overrides, and
//! miette diagnostic rendering with typo suggestions.
//!
//! # Usage
//!
//! ```no_run
//! use marquee_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("mode: {}", config.discord.mode);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

pub use diagnostic::{render_errors, ConfigError};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::MarqueeConfig;

/// Load configuration from the XDG hierarchy and validate it.
///
/// Returns either a valid `MarqueeConfig` or every diagnostic collected
/// (figment errors, or all validation failures at once).
pub fn load_and_validate() -> Result<MarqueeConfig, Vec<ConfigError>> {
    finish(loader::load_config(), collect_toml_sources)
}

/// Load configuration from a specific file (plus env overrides) and validate it.
pub fn load_and_validate_path(path: &std::path::Path) -> Result<MarqueeConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_path(path), || {
        std::fs::read_to_string(path)
            .map(|content| vec![(path.display().to_string(), content)])
            .unwrap_or_default()
    })
}

/// Load configuration from a TOML string and validate it.
///
/// Useful for testing and explicit configuration.
pub fn load_and_validate_str(toml_content: &str) -> Result<MarqueeConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_str(toml_content), || {
        vec![("<inline>".to_string(), toml_content.to_string())]
    })
}

fn finish(
    loaded: Result<MarqueeConfig, figment::Error>,
    sources: impl FnOnce() -> Vec<(String, String)>,
) -> Result<MarqueeConfig, Vec<ConfigError>> {
    match loaded {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(err, &sources())),
    }
}

/// Collect TOML source file contents for error span resolution.
fn collect_toml_sources() -> Vec<(String, String)> {
    let mut sources = Vec::new();

    if let Ok(content) = std::fs::read_to_string("marquee.toml") {
        let path = std::env::current_dir()
            .map(|d| d.join("marquee.toml").display().to_string())
            .unwrap_or_else(|_| "marquee.toml".to_string());
        sources.push((path, content));
    }

    if let Some(config_dir) = dirs::config_dir() {
        let path = config_dir.join("marquee/marquee.toml");
        if let Ok(content) = std::fs::read_to_string(&path) {
            sources.push((path.display().to_string(), content));
        }
    }

    let system_path = std::path::Path::new("/etc/marquee/marquee.toml");
    if let Ok(content) = std::fs::read_to_string(system_path) {
        sources.push((system_path.display().to_string(), content));
    }

    sources
}
