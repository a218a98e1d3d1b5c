// SPDX-FileCopyrightText: 2026 Marquee Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Poster resolution chain.
//!
//! Attempts run in order: a catalog-id lookup when the file name carries an
//! IMDb id, then a title search. The first usable poster wins. A failed call
//! (transport error, non-2xx, bad JSON) ends the chain; there are no retries.

use std::sync::Arc;
use std::time::Duration;

use marquee_core::{HttpMethod, HttpRequest, HttpTransport, MarqueeError, MediaCategory, MediaInfo};
use marquee_media::extract_catalog_id;
use marquee_security::{redact, redact_api_key};
use tracing::{debug, info, warn};
use url::Url;

use crate::types::OmdbResponse;

/// Public OMDb endpoint.
pub const DEFAULT_BASE_URL: &str = "https://www.omdbapi.com/";

/// Deadline for a single lookup.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// One step of the resolution chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PosterAttempt {
    /// `?i=<id>`
    CatalogId(String),
    /// `?t=<title>&y=<year>&type=<movie|series>`
    TitleSearch {
        title: String,
        year: Option<String>,
        series: bool,
    },
}

impl PosterAttempt {
    /// The ordered attempts for a parsed file. Never more than two.
    pub fn plan(media: &MediaInfo, file_name: &str) -> Vec<Self> {
        let mut attempts = Vec::with_capacity(2);
        if let Some(id) = extract_catalog_id(file_name) {
            attempts.push(Self::CatalogId(id));
        }
        attempts.push(Self::TitleSearch {
            title: media.title.clone(),
            year: media.year.clone(),
            series: media.category == MediaCategory::Series,
        });
        attempts
    }

    /// Short name used in log fields.
    pub fn label(&self) -> &'static str {
        match self {
            Self::CatalogId(_) => "catalog_id",
            Self::TitleSearch { .. } => "title_search",
        }
    }

    fn append_query(&self, url: &mut Url, api_key: &str) {
        let mut pairs = url.query_pairs_mut();
        match self {
            Self::CatalogId(id) => {
                pairs.append_pair("i", id);
            }
            Self::TitleSearch {
                title,
                year,
                series,
            } => {
                pairs.append_pair("t", title);
                if let Some(year) = year {
                    pairs.append_pair("y", year);
                }
                pairs.append_pair("type", if *series { "series" } else { "movie" });
            }
        }
        pairs.append_pair("apikey", api_key);
    }
}

/// Looks up poster artwork for parsed media.
pub struct PosterResolver {
    transport: Arc<dyn HttpTransport>,
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl PosterResolver {
    /// A blank `api_key` disables lookups just like `None`.
    pub fn new(transport: Arc<dyn HttpTransport>, api_key: Option<String>) -> Self {
        Self {
            transport,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// True when an API key is configured.
    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    /// Resolve a poster URL for `media`, or `None` to go without artwork.
    pub async fn resolve(&self, media: &MediaInfo, file_name: &str) -> Option<String> {
        let Some(api_key) = self.api_key.as_deref() else {
            debug!("no metadata API key configured, skipping poster lookup");
            return None;
        };

        for attempt in PosterAttempt::plan(media, file_name) {
            match self.lookup(&attempt, api_key).await {
                Ok(record) => match record.usable_poster() {
                    Some(poster) => {
                        info!(attempt = attempt.label(), "resolved poster");
                        return Some(poster.to_string());
                    }
                    None => debug!(
                        attempt = attempt.label(),
                        reason = record.error.as_deref().unwrap_or("no poster"),
                        "lookup returned no usable poster"
                    ),
                },
                Err(e) => {
                    warn!(
                        attempt = attempt.label(),
                        api_key = %redact_api_key(api_key),
                        error = %redact(&e.to_string(), &[api_key.to_string()]),
                        "poster lookup failed"
                    );
                    return None;
                }
            }
        }

        None
    }

    async fn lookup(
        &self,
        attempt: &PosterAttempt,
        api_key: &str,
    ) -> Result<OmdbResponse, MarqueeError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| MarqueeError::Metadata {
            message: format!("invalid metadata API base URL: {e}"),
            source: Some(Box::new(e)),
        })?;
        attempt.append_query(&mut url, api_key);

        let request = HttpRequest::new(HttpMethod::Get, url.as_str(), self.timeout);
        let response = self.transport.request(request).await?;

        if !response.is_success() {
            return Err(MarqueeError::Metadata {
                message: format!("HTTP {}: {}", response.status, response.body_preview(100)),
                source: None,
            });
        }

        serde_json::from_str(&response.body).map_err(|e| MarqueeError::Metadata {
            message: format!("invalid JSON response: {e}"),
            source: Some(Box::new(e)),
        })
    }
}
