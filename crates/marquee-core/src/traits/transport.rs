// SPDX-FileCopyrightText: 2026 Marquee Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outbound HTTP transport trait used by every network-facing component.

use std::time::Duration;

use async_trait::async_trait;
use strum::{Display, EnumString};

use crate::error::MarqueeError;

/// HTTP verbs the engine issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
}

/// A single outbound request.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
    pub timeout: Duration,
}

impl HttpRequest {
    /// Creates a request without headers or body.
    pub fn new(method: HttpMethod, url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
            timeout,
        }
    }

    /// Adds a header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets the request body.
    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }
}

/// A completed HTTP exchange. The body is already bounded by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// True when the status is in `[200, 300)`.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// First `max` characters of the body, for log lines.
    pub fn body_preview(&self, max: usize) -> &str {
        match self.body.char_indices().nth(max) {
            Some((idx, _)) => &self.body[..idx],
            None => &self.body,
        }
    }
}

/// Performs one outbound request with a hard deadline.
///
/// Implementations resolve exactly once per call: a completed exchange
/// (any status) is `Ok`, while connect failures, timeouts and cancellation
/// are `Err` and carry no status. The underlying connection must be released
/// on every path.
#[async_trait]
pub trait HttpTransport: Send + Sync + 'static {
    /// Sends the request and waits for the bounded response.
    async fn request(&self, request: HttpRequest) -> Result<HttpResponse, MarqueeError>;
}
