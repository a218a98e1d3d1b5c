// SPDX-FileCopyrightText: 2026 Marquee Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared by the parser, builder, resolver and dispatcher.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Opaque job identifier supplied by the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub String);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier the webhook destination assigned to a posted message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(pub String);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle event that triggered a notification.
///
/// The wire names match the selector values the host passes in; the short
/// names are accepted too.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum NotificationKind {
    #[serde(rename = "start_processing", alias = "started")]
    #[strum(to_string = "start_processing", serialize = "started")]
    Started,
    #[serde(rename = "transcode_success", alias = "succeeded")]
    #[strum(to_string = "transcode_success", serialize = "succeeded")]
    Succeeded,
    #[serde(rename = "transcode_error", alias = "failed")]
    #[strum(to_string = "transcode_error", serialize = "failed")]
    Failed,
}

/// How successive notifications for one job are delivered.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NotificationMode {
    /// Edit the message posted earlier for the same job.
    #[default]
    Updates,
    /// Always post a new message.
    Sequential,
}

/// Stream type as reported by the prober.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamKind {
    Video,
    Audio,
    #[serde(other)]
    Other,
}

/// Disposition of an audio track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamRole {
    Commentary,
    Main,
    Dubbed,
    Original,
    Description,
}

impl StreamRole {
    /// Human label shown after the codec.
    pub fn label(self) -> &'static str {
        match self {
            Self::Commentary => "Commentary",
            Self::Main => "Main",
            Self::Dubbed => "Dubbed",
            Self::Original => "Original",
            Self::Description => "Audio Description",
        }
    }
}

/// A single probed stream of the input file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamInfo {
    pub kind: StreamKind,
    #[serde(default)]
    pub codec_name: String,
    #[serde(default)]
    pub channels: Option<u32>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub role: Option<StreamRole>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

/// File facts for the job's current input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileContext {
    pub path: String,
    #[serde(default)]
    pub size_mb: f64,
    #[serde(default)]
    pub duration_seconds: f64,
    #[serde(default)]
    pub streams: Vec<StreamInfo>,
    /// Size before processing; only present for completed jobs.
    #[serde(default)]
    pub original_size_mb: Option<f64>,
}

impl FileContext {
    /// Last path component, accepting either separator.
    pub fn file_name(&self) -> &str {
        self.path
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(self.path.as_str())
    }
}

/// One notification request from the host. Immutable for the call.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationEvent {
    pub kind: NotificationKind,
    pub job_id: Option<JobId>,
    pub file: FileContext,
    pub library_name: String,
    pub job_start: Option<DateTime<Utc>>,
    pub now: DateTime<Utc>,
}

/// Broad classification derived from a file name.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MediaCategory {
    Movie,
    Series,
    Unknown,
}

/// Canonical media facts parsed from a file name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaInfo {
    pub category: MediaCategory,
    pub title: String,
    pub year: Option<String>,
    pub season: Option<String>,
    pub episode: Option<String>,
}

impl MediaInfo {
    /// Title with ` (year)` appended when the year is known.
    pub fn headline(&self) -> String {
        match &self.year {
            Some(year) => format!("{} ({year})", self.title),
            None => self.title.clone(),
        }
    }
}

/// Outcome of a single dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchResult {
    pub delivered: bool,
    pub message_id: Option<MessageId>,
}

impl DispatchResult {
    /// A dispatch that did not reach the destination.
    pub fn failed() -> Self {
        Self {
            delivered: false,
            message_id: None,
        }
    }

    /// A dispatch acknowledged by the destination.
    pub fn delivered(message_id: Option<MessageId>) -> Self {
        Self {
            delivered: true,
            message_id,
        }
    }
}
