// SPDX-FileCopyrightText: 2026 Marquee Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Secret redaction for log output and error messages.
//!
//! Two complementary mechanisms:
//! 1. **Regex-based**: Catches webhook tokens and `apikey=` query parameters.
//! 2. **Exact-match**: Catches configured secret values loaded at startup.

use std::io::Write;
use std::sync::{Arc, LazyLock, RwLock};

use regex::{Captures, Regex};

/// Webhook URLs: everything after `/webhooks/<id>/` is the token.
static WEBHOOK_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(https://discord(?:app)?\.com/api/webhooks/\d+/)[\w\-]+").unwrap()
});

/// Metadata API keys passed as a query parameter.
static APIKEY_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(apikey=)([^&\s]+)").unwrap());

/// The redaction placeholder for exact-match values.
const REDACTED: &str = "[REDACTED]";

/// Reduce a webhook URL to its non-secret prefix.
///
/// `https://discord.com/api/webhooks/123/abc` becomes
/// `https://discord.com/api/webhooks/123/***`. Anything that is not a webhook
/// URL is replaced entirely.
pub fn redact_webhook_url(url: &str) -> String {
    match WEBHOOK_TOKEN.captures(url) {
        Some(caps) if caps.get(0).map(|m| m.start()) == Some(0) => format!("{}***", &caps[1]),
        _ => "***[INVALID_WEBHOOK]***".to_string(),
    }
}

/// Keep the first four and last two characters of an API key.
pub fn redact_api_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() > 6 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 2..].iter().collect();
        format!("{head}***{tail}")
    } else {
        "***".to_string()
    }
}

/// Redact secrets from a string using the known patterns and optional exact-match values.
///
/// This is a standalone function for use outside the logging pipeline (e.g.,
/// error messages built from request URLs).
pub fn redact(input: &str, secret_values: &[String]) -> String {
    let mut result = WEBHOOK_TOKEN.replace_all(input, "${1}***").to_string();
    result = APIKEY_PARAM
        .replace_all(&result, |caps: &Captures| {
            format!("{}{}", &caps[1], redact_api_key(&caps[2]))
        })
        .to_string();

    // Longest first to avoid partial matches.
    let mut sorted_values: Vec<&String> = secret_values.iter().collect();
    sorted_values.sort_by_key(|v| std::cmp::Reverse(v.len()));
    for value in sorted_values {
        if !value.is_empty() {
            result = result.replace(value.as_str(), REDACTED);
        }
    }

    result
}

/// A writer wrapper that redacts secrets from output.
///
/// Wraps any `Write` implementor and replaces webhook tokens, API keys and
/// exact configured secret values before they reach the sink.
pub struct RedactingWriter<W> {
    inner: W,
    secret_values: Arc<RwLock<Vec<String>>>,
}

impl<W: Write> RedactingWriter<W> {
    /// Create a new redacting writer.
    pub fn new(inner: W, secret_values: Arc<RwLock<Vec<String>>>) -> Self {
        Self {
            inner,
            secret_values,
        }
    }

    /// Add a new secret value to the redaction list.
    pub fn add_secret_value(secret_values: &Arc<RwLock<Vec<String>>>, value: String) {
        if let Ok(mut values) = secret_values.write()
            && !value.is_empty()
            && !values.contains(&value)
        {
            values.push(value);
        }
    }
}

impl<W: Write> Write for RedactingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let input = String::from_utf8_lossy(buf);
        let secrets = self
            .secret_values
            .read()
            .map(|v| v.clone())
            .unwrap_or_default();
        let redacted = redact(&input, &secrets);
        self.inner.write_all(redacted.as_bytes())?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}
