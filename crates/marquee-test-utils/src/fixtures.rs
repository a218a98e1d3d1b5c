// SPDX-FileCopyrightText: 2026 Marquee Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Event and configuration fixtures.

use chrono::{DateTime, Duration, TimeZone, Utc};

use marquee_config::MarqueeConfig;
use marquee_core::{
    FileContext, JobId, NotificationEvent, NotificationKind, StreamInfo, StreamKind, StreamRole,
};

/// An API key that passes configuration validation.
pub const TEST_API_KEY: &str = "abcd1234ef";

/// One 1080p HEVC video stream, a 5.1 English main track and a French
/// stereo commentary track.
pub fn sample_streams() -> Vec<StreamInfo> {
    vec![
        StreamInfo {
            kind: StreamKind::Video,
            codec_name: "hevc".to_string(),
            channels: None,
            language: None,
            role: None,
            width: Some(1920),
            height: Some(1080),
        },
        StreamInfo {
            kind: StreamKind::Audio,
            codec_name: "eac3".to_string(),
            channels: Some(6),
            language: Some("eng".to_string()),
            role: Some(StreamRole::Main),
            width: None,
            height: None,
        },
        StreamInfo {
            kind: StreamKind::Audio,
            codec_name: "aac".to_string(),
            channels: Some(2),
            language: Some("fr".to_string()),
            role: Some(StreamRole::Commentary),
            width: None,
            height: None,
        },
    ]
}

/// Builder for notification events with realistic defaults.
///
/// Defaults: job `job-1`, an episode file of 1000 MB lasting 1:02:05,
/// library `TV Shows`, started 125 seconds before a fixed `now`.
pub struct EventBuilder {
    event: NotificationEvent,
}

impl EventBuilder {
    pub fn new(kind: NotificationKind) -> Self {
        let now = Utc
            .with_ymd_and_hms(2026, 3, 14, 12, 0, 0)
            .single()
            .unwrap_or_else(Utc::now);

        Self {
            event: NotificationEvent {
                kind,
                job_id: Some(JobId("job-1".to_string())),
                file: FileContext {
                    path: "/media/tv/Show.Name.2020.S1E3.mkv".to_string(),
                    size_mb: 1000.0,
                    duration_seconds: 3725.0,
                    streams: sample_streams(),
                    original_size_mb: None,
                },
                library_name: "TV Shows".to_string(),
                job_start: Some(now - Duration::seconds(125)),
                now,
            },
        }
    }

    pub fn job_id(mut self, job_id: Option<&str>) -> Self {
        self.event.job_id = job_id.map(|id| JobId(id.to_string()));
        self
    }

    pub fn path(mut self, path: &str) -> Self {
        self.event.file.path = path.to_string();
        self
    }

    pub fn size_mb(mut self, size_mb: f64) -> Self {
        self.event.file.size_mb = size_mb;
        self
    }

    pub fn original_size_mb(mut self, original: Option<f64>) -> Self {
        self.event.file.original_size_mb = original;
        self
    }

    pub fn duration_seconds(mut self, seconds: f64) -> Self {
        self.event.file.duration_seconds = seconds;
        self
    }

    pub fn streams(mut self, streams: Vec<StreamInfo>) -> Self {
        self.event.file.streams = streams;
        self
    }

    pub fn library(mut self, name: &str) -> Self {
        self.event.library_name = name.to_string();
        self
    }

    pub fn job_start(mut self, start: Option<DateTime<Utc>>) -> Self {
        self.event.job_start = start;
        self
    }

    /// Elapsed time between job start and `now`.
    pub fn elapsed(mut self, elapsed: Duration) -> Self {
        self.event.job_start = Some(self.event.now - elapsed);
        self
    }

    pub fn build(self) -> NotificationEvent {
        self.event
    }
}

/// A configuration that delivers to `webhook_url` with poster lookups off.
///
/// The URL is not validated, so a local mock server can stand in for the
/// webhook host.
pub fn test_config(webhook_url: &str) -> MarqueeConfig {
    let mut config = MarqueeConfig::default();
    config.discord.webhook_url = Some(webhook_url.to_string());
    config
}
