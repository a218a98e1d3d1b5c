// SPDX-FileCopyrightText: 2026 Marquee Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Secret handling for the Marquee notification engine.
//!
//! Provides redaction of webhook tokens and metadata API keys for log output,
//! and the webhook URL policy checked before any request is made.

pub mod redact;
pub mod webhook;

pub use redact::{redact, redact_api_key, redact_webhook_url, RedactingWriter};
pub use webhook::{is_valid_webhook_url, validate_webhook_url};
