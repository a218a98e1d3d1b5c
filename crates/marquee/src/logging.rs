// SPDX-FileCopyrightText: 2026 Marquee Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tracing setup for the CLI. Everything goes to stderr so stdout stays
//! reserved for the outcome JSON.

use std::sync::{Arc, RwLock};

use marquee_config::MarqueeConfig;
use marquee_security::RedactingWriter;
use tracing_subscriber::EnvFilter;

/// Environment variable checked before `RUST_LOG`.
pub const LOG_ENV: &str = "MARQUEE_LOG";

/// Install the global subscriber.
///
/// `MARQUEE_LOG` wins over `RUST_LOG`; without either the configured level
/// applies to Marquee crates and everything else logs warnings only.
pub fn init_tracing(config: &MarqueeConfig) {
    let secrets = secret_values(config);

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(&config.logging.level))
        .with_target(true)
        .with_thread_names(false)
        .with_ansi(false)
        .with_writer(move || RedactingWriter::new(std::io::stderr(), secrets.clone()))
        .init();
}

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_directives(level)))
}

/// Shorter webhook tokens are only masked by the URL pattern.
const MIN_TOKEN_SECRET_LEN: usize = 16;

fn default_directives(level: &str) -> String {
    format!("marquee={level},warn")
}

/// Exact values scrubbed from every log line.
fn secret_values(config: &MarqueeConfig) -> Arc<RwLock<Vec<String>>> {
    let values = Arc::new(RwLock::new(Vec::new()));
    if let Some(url) = config.discord.webhook_url.as_deref() {
        RedactingWriter::<std::io::Stderr>::add_secret_value(&values, url.to_string());
        if let Some(token) = url
            .rsplit('/')
            .next()
            .filter(|t| t.len() >= MIN_TOKEN_SECRET_LEN)
        {
            RedactingWriter::<std::io::Stderr>::add_secret_value(&values, token.to_string());
        }
    }
    if let Some(key) = config.omdb.api_key() {
        RedactingWriter::<std::io::Stderr>::add_secret_value(&values, key.to_string());
    }
    values
}
