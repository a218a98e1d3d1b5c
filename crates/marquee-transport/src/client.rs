// SPDX-FileCopyrightText: 2026 Marquee Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client implementing [`HttpTransport`] on top of reqwest.
//!
//! Each call races three things: the exchange itself, the request deadline,
//! and the transport's cancellation token. Whichever finishes first settles
//! the call; the losers are dropped, which closes the in-flight connection.

use async_trait::async_trait;
use marquee_core::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, MarqueeError};
use marquee_security::redact;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::body::{read_bounded, MAX_RESPONSE_BYTES};

/// reqwest-backed transport with bounded bodies and cooperative cancellation.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    cancel: CancellationToken,
    max_body: usize,
}

impl ReqwestTransport {
    /// Creates a transport that sends `user_agent` on every request.
    pub fn new(user_agent: &str) -> Result<Self, MarqueeError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| MarqueeError::Http {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            cancel: CancellationToken::new(),
            max_body: MAX_RESPONSE_BYTES,
        })
    }

    /// Ties in-flight requests to an external token (e.g. process shutdown).
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Token that aborts every in-flight request when cancelled.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    async fn exchange(&self, request: HttpRequest) -> Result<HttpResponse, MarqueeError> {
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Patch => reqwest::Method::PATCH,
        };

        let mut builder = self.client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(http_error)?;
        let status = response.status().as_u16();
        let body = read_bounded(response, self.max_body)
            .await
            .map_err(http_error)?;

        Ok(HttpResponse { status, body })
    }
}

/// reqwest errors print the full URL, which may carry a webhook token.
fn http_error(e: reqwest::Error) -> MarqueeError {
    let e = e.without_url();
    MarqueeError::Http {
        message: e.to_string(),
        source: Some(Box::new(e)),
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn request(&self, request: HttpRequest) -> Result<HttpResponse, MarqueeError> {
        let deadline = request.timeout;
        let method = request.method;
        let target = redact(&request.url, &[]);

        let outcome = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(MarqueeError::Cancelled),
            settled = tokio::time::timeout(deadline, self.exchange(request)) => {
                settled.unwrap_or_else(|_| Err(MarqueeError::Timeout { duration: deadline }))
            }
        };

        match &outcome {
            Ok(response) => debug!(
                %method,
                url = %target,
                status = response.status,
                bytes = response.body.len(),
                "http exchange completed"
            ),
            Err(e) => warn!(%method, url = %target, error = %e, "http exchange failed"),
        }

        outcome
    }
}
