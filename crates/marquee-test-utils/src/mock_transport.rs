// SPDX-FileCopyrightText: 2026 Marquee Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scripted HTTP transport for deterministic testing.
//!
//! `MockTransport` implements `HttpTransport` with pre-configured replies,
//! enabling tests of the resolver and dispatcher without a server.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use marquee_core::{HttpRequest, HttpResponse, HttpTransport, MarqueeError};

/// A transport that answers from a FIFO script and records what it was sent.
///
/// When the script runs out, requests fail with an `Http` error so that an
/// unexpected extra call shows up as a delivery failure in the test.
#[derive(Clone, Default)]
pub struct MockTransport {
    replies: Arc<Mutex<VecDeque<Result<HttpResponse, MarqueeError>>>>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl MockTransport {
    /// Create a transport with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a completed exchange.
    pub async fn push_reply(&self, status: u16, body: impl Into<String>) {
        self.replies.lock().await.push_back(Ok(HttpResponse {
            status,
            body: body.into(),
        }));
    }

    /// Queue a failed exchange (connect error, timeout, ...).
    pub async fn push_error(&self, error: MarqueeError) {
        self.replies.lock().await.push_back(Err(error));
    }

    /// Every request received so far, in order.
    pub async fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().await.clone()
    }

    /// Number of requests received so far.
    pub async fn request_count(&self) -> usize {
        self.requests.lock().await.len()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn request(&self, request: HttpRequest) -> Result<HttpResponse, MarqueeError> {
        self.requests.lock().await.push(request);
        self.replies
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| {
                Err(MarqueeError::Http {
                    message: "no scripted reply".to_string(),
                    source: None,
                })
            })
    }
}
