// SPDX-FileCopyrightText: 2026 Marquee Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Marquee notification engine.

use thiserror::Error;

/// The primary error type used across Marquee traits and core operations.
#[derive(Debug, Error)]
pub enum MarqueeError {
    /// Configuration errors (missing webhook, malformed API key, bad selector).
    #[error("configuration error: {0}")]
    Config(String),

    /// Outbound HTTP errors (DNS, connect, TLS, body read).
    #[error("http error: {message}")]
    Http {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Operation timed out.
    #[error("request timeout after {}ms", duration.as_millis())]
    Timeout { duration: std::time::Duration },

    /// The in-flight request was cancelled by its owner.
    #[error("request cancelled")]
    Cancelled,

    /// Metadata API errors (non-2xx lookup, malformed JSON).
    #[error("metadata error: {message}")]
    Metadata {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Payload rejected before sending (oversized or malformed embeds).
    #[error("payload error: {0}")]
    Payload(String),

    /// Message-state store errors.
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl MarqueeError {
    /// Returns true for errors produced by the transport deadline.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}
