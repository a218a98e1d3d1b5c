// SPDX-FileCopyrightText: 2026 Marquee Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Notification card assembly.

use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use marquee_core::{FileContext, MediaCategory, MediaInfo, NotificationEvent, NotificationKind};

use crate::format;
use crate::sanitize::{truncate, DESCRIPTION_MAX, FIELD_NAME_MAX, FIELD_VALUE_MAX, FOOTER_MAX};
use crate::status::StatusStyle;
use crate::streams::stream_lines;

/// Fixed embed title.
pub const CARD_TITLE: &str = "File Processing Status";

/// Library label used when the host sends none.
pub const UNKNOWN_LIBRARY: &str = "Unknown Library";

const EMPTY_DETAILS: &str = "Processing file...";

/// One name/value row of the card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl CardField {
    fn inline(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: truncate(name, FIELD_NAME_MAX),
            value: truncate(&value.into(), FIELD_VALUE_MAX),
            inline: true,
        }
    }

    fn block(name: &str, value: impl Into<String>) -> Self {
        Self {
            inline: false,
            ..Self::inline(name, value)
        }
    }
}

/// A fully sanitized notification, ready to be rendered as an embed.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationCard {
    pub title: String,
    pub url: Option<String>,
    pub color: u32,
    pub headline: String,
    pub description: String,
    pub body_text: String,
    pub fields: Vec<CardField>,
    pub thumbnail_url: String,
    pub footer: String,
    pub issued_at: DateTime<Utc>,
}

impl NotificationCard {
    /// RFC 3339 timestamp with millisecond precision.
    pub fn timestamp(&self) -> String {
        self.issued_at.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

/// The Details text: episode line, then a fenced block of file facts.
pub fn body_text(media: &MediaInfo, file: &FileContext) -> String {
    let mut body = String::new();

    if media.category == MediaCategory::Series {
        if let (Some(season), Some(episode)) = (&media.season, &media.episode) {
            body.push_str(&format!("**Season {season} • Episode {episode}**"));
        }
    }

    let mut details = Vec::new();
    if !file.path.is_empty() {
        details.push(format!("File: {}", file.path));
    }
    details.extend(stream_lines(&file.streams));

    if !details.is_empty() {
        if media.category != MediaCategory::Movie {
            body.push('\n');
        }
        body.push_str("```\n");
        body.push_str(&details.join("\n"));
        body.push_str("\n```");
    }

    body
}

/// Builds cards from events.
#[derive(Debug, Clone)]
pub struct CardBuilder {
    placeholder_thumbnail: String,
    portal_url: Option<String>,
    clock_offset: Option<FixedOffset>,
}

impl CardBuilder {
    pub fn new(placeholder_thumbnail: impl Into<String>) -> Self {
        Self {
            placeholder_thumbnail: placeholder_thumbnail.into(),
            portal_url: None,
            clock_offset: None,
        }
    }

    /// Link the card title to the management portal.
    pub fn with_portal_url(mut self, url: Option<String>) -> Self {
        self.portal_url = url.filter(|u| !u.trim().is_empty());
        self
    }

    /// Render the Started clock in a fixed offset instead of local time.
    pub fn with_clock_offset(mut self, offset: FixedOffset) -> Self {
        self.clock_offset = Some(offset);
        self
    }

    pub fn build(
        &self,
        event: &NotificationEvent,
        media: &MediaInfo,
        poster_url: Option<&str>,
    ) -> NotificationCard {
        let style = StatusStyle::for_kind(event.kind);
        let headline = media.headline();
        let body = body_text(media, &event.file);

        let library = match event.library_name.trim() {
            "" => UNKNOWN_LIBRARY,
            name => name,
        };
        let description = truncate(&format!("`{library}`\n### {headline}"), DESCRIPTION_MAX);

        let mut fields = vec![
            CardField::inline("Current Status", style.status_line()),
            CardField::inline(
                "Started",
                format::clock(event.job_start.unwrap_or(event.now), self.clock_offset),
            ),
            CardField::inline(
                "Processing Time",
                format::processing_time(event.kind, event.job_start, event.now),
            ),
            CardField::inline("File Duration", format::file_duration(event.file.duration_seconds)),
        ];
        fields.extend(size_fields(event.kind, &event.file));
        fields.push(CardField::block(
            "Details",
            if body.is_empty() { EMPTY_DETAILS.to_string() } else { body.clone() },
        ));

        let footer = match &event.job_id {
            Some(id) => format!("Job ID: {id}"),
            None => "Job ID: Unknown".to_string(),
        };

        NotificationCard {
            title: truncate(CARD_TITLE, FIELD_NAME_MAX),
            url: self.portal_url.clone(),
            color: style.color,
            headline: truncate(&headline, DESCRIPTION_MAX),
            description,
            body_text: truncate(&body, DESCRIPTION_MAX),
            fields,
            thumbnail_url: poster_url
                .filter(|p| !p.is_empty())
                .unwrap_or(self.placeholder_thumbnail.as_str())
                .to_string(),
            footer: truncate(&footer, FOOTER_MAX),
            issued_at: event.now,
        }
    }
}

fn size_fields(kind: NotificationKind, file: &FileContext) -> Vec<CardField> {
    let current = file.size_mb;

    match kind {
        NotificationKind::Started if current > 0.0 => {
            vec![CardField::inline("Original Size", format::size_mb(current))]
        }
        NotificationKind::Started => Vec::new(),
        NotificationKind::Succeeded => match file.original_size_mb {
            Some(original) if original > 0.0 && current > 0.0 => vec![
                CardField::inline("Original Size", format::size_mb(original)),
                CardField::inline("New Size", format::size_mb(current)),
                CardField::inline("Compression", format::compression(original, current)),
            ],
            _ if current > 0.0 => vec![CardField::inline("New Size", format::size_mb(current))],
            _ => vec![CardField::inline("New Size", "Unknown")],
        },
        NotificationKind::Failed if current > 0.0 => {
            vec![CardField::inline("File Size", format::size_mb(current))]
        }
        NotificationKind::Failed => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use marquee_core::{JobId, StreamInfo, StreamKind};

    use super::*;

    const PLACEHOLDER: &str = "https://placeholder.test/icon.png";

    fn builder() -> CardBuilder {
        CardBuilder::new(PLACEHOLDER).with_clock_offset(FixedOffset::east_opt(0).unwrap())
    }

    fn hevc() -> StreamInfo {
        StreamInfo {
            kind: StreamKind::Video,
            codec_name: "hevc".to_string(),
            channels: None,
            language: None,
            role: None,
            width: Some(1920),
            height: Some(1080),
        }
    }

    fn aac() -> StreamInfo {
        StreamInfo {
            kind: StreamKind::Audio,
            codec_name: "aac".to_string(),
            channels: Some(2),
            language: Some("en".to_string()),
            role: None,
            width: None,
            height: None,
        }
    }

    fn event(kind: NotificationKind) -> NotificationEvent {
        let now = Utc.with_ymd_and_hms(2026, 3, 14, 12, 0, 0).unwrap();
        NotificationEvent {
            kind,
            job_id: Some(JobId("abc123".to_string())),
            file: FileContext {
                path: "/tv/Show.Name.2020.S1E3.mkv".to_string(),
                size_mb: 800.0,
                duration_seconds: 3725.0,
                streams: vec![hevc(), aac()],
                original_size_mb: None,
            },
            library_name: "TV".to_string(),
            job_start: Some(now - chrono::Duration::seconds(125)),
            now,
        }
    }

    fn series() -> MediaInfo {
        MediaInfo {
            category: MediaCategory::Series,
            title: "Show Name".to_string(),
            year: Some("2020".to_string()),
            season: Some("01".to_string()),
            episode: Some("03".to_string()),
        }
    }

    fn movie() -> MediaInfo {
        MediaInfo {
            category: MediaCategory::Movie,
            title: "Alien".to_string(),
            year: Some("1979".to_string()),
            season: None,
            episode: None,
        }
    }

    fn field<'a>(card: &'a NotificationCard, name: &str) -> Option<&'a str> {
        card.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }

    fn names(card: &NotificationCard) -> Vec<&str> {
        card.fields.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn series_body_text() {
        let ev = event(NotificationKind::Started);
        assert_eq!(
            body_text(&series(), &ev.file),
            "**Season 01 • Episode 03**\n```\nFile: /tv/Show.Name.2020.S1E3.mkv\nVideo: HEVC • 1920x1080\nAudio: AAC Stereo 🇺🇸 EN\n```"
        );
    }

    #[test]
    fn movie_body_has_no_leading_newline() {
        let mut ev = event(NotificationKind::Started);
        ev.file.streams.clear();
        assert_eq!(
            body_text(&movie(), &ev.file),
            "```\nFile: /tv/Show.Name.2020.S1E3.mkv\n```"
        );
    }

    #[test]
    fn started_card_layout() {
        let card = builder().build(&event(NotificationKind::Started), &series(), None);

        assert_eq!(card.title, CARD_TITLE);
        assert_eq!(card.color, 0x3498db);
        assert_eq!(card.description, "`TV`\n### Show Name (2020)");
        assert_eq!(
            names(&card),
            [
                "Current Status",
                "Started",
                "Processing Time",
                "File Duration",
                "Original Size",
                "Details"
            ]
        );
        assert_eq!(field(&card, "Current Status"), Some("🚀 Started processing file"));
        assert_eq!(field(&card, "Started"), Some("11:57:55"));
        assert_eq!(field(&card, "Processing Time"), Some("Starting..."));
        assert_eq!(field(&card, "File Duration"), Some("1:02:05"));
        assert_eq!(field(&card, "Original Size"), Some("800.00 MB"));
        assert!(!card.fields.last().unwrap().inline);
        assert!(card.fields[..card.fields.len() - 1].iter().all(|f| f.inline));
        assert_eq!(card.thumbnail_url, PLACEHOLDER);
        assert_eq!(card.footer, "Job ID: abc123");
        assert_eq!(card.timestamp(), "2026-03-14T12:00:00.000Z");
        assert_eq!(card.url, None);
    }

    #[test]
    fn succeeded_card_reports_compression() {
        let mut ev = event(NotificationKind::Succeeded);
        ev.file.original_size_mb = Some(1000.0);
        let card = builder().build(&ev, &series(), Some("https://img/poster.jpg"));

        assert_eq!(card.color, 0x2ecc71);
        assert_eq!(field(&card, "Processing Time"), Some("2m 5s"));
        assert_eq!(field(&card, "Original Size"), Some("1000.00 MB"));
        assert_eq!(field(&card, "New Size"), Some("800.00 MB"));
        assert_eq!(field(&card, "Compression"), Some("20.0% (200.00 MB saved)"));
        assert_eq!(card.thumbnail_url, "https://img/poster.jpg");
    }

    #[test]
    fn succeeded_without_original_size_shows_new_size_only() {
        let card = builder().build(&event(NotificationKind::Succeeded), &series(), None);
        assert_eq!(field(&card, "New Size"), Some("800.00 MB"));
        assert_eq!(field(&card, "Compression"), None);

        let mut ev = event(NotificationKind::Succeeded);
        ev.file.size_mb = 0.0;
        let card = builder().build(&ev, &series(), None);
        assert_eq!(field(&card, "New Size"), Some("Unknown"));
    }

    #[test]
    fn failed_card_uses_generic_size() {
        let card = builder().build(&event(NotificationKind::Failed), &movie(), None);
        assert_eq!(card.color, 0xe74c3c);
        assert_eq!(field(&card, "Current Status"), Some("❌ Transcode failed"));
        assert_eq!(field(&card, "File Size"), Some("800.00 MB"));
        assert_eq!(field(&card, "Original Size"), None);
    }

    #[test]
    fn missing_facts_fall_back() {
        let mut ev = event(NotificationKind::Failed);
        ev.job_id = None;
        ev.job_start = None;
        ev.library_name = "  ".to_string();
        ev.file = FileContext::default();
        let media = MediaInfo {
            category: MediaCategory::Unknown,
            title: String::new(),
            year: None,
            season: None,
            episode: None,
        };

        let card = builder().build(&ev, &media, None);

        assert_eq!(card.footer, "Job ID: Unknown");
        assert_eq!(card.description, "`Unknown Library`\n### ");
        assert_eq!(field(&card, "Processing Time"), Some("Unknown"));
        assert_eq!(field(&card, "Started"), Some("12:00:00"));
        assert_eq!(field(&card, "File Duration"), Some("Unknown"));
        assert_eq!(field(&card, "File Size"), None);
        assert_eq!(field(&card, "Details"), Some("Processing file..."));
    }

    #[test]
    fn long_text_is_capped() {
        let mut ev = event(NotificationKind::Started);
        ev.file.path = format!("/{}.mkv", "a".repeat(5000));
        ev.job_id = Some(JobId("j".repeat(3000)));
        ev.library_name = "L".repeat(5000);

        let card = builder().build(&ev, &movie(), None);

        let details = field(&card, "Details").unwrap();
        assert_eq!(details.chars().count(), 1024);
        assert!(details.ends_with("..."));
        assert_eq!(card.footer.chars().count(), 2048);
        assert_eq!(card.description.chars().count(), 4000);
        assert_eq!(card.body_text.chars().count(), 4000);
        assert!(card.body_text.ends_with("..."));
    }

    #[test]
    fn long_headline_is_capped() {
        let mut media = movie();
        media.title = "T".repeat(5000);

        let card = builder().build(&event(NotificationKind::Started), &media, None);

        assert_eq!(card.headline.chars().count(), 4000);
        assert!(card.headline.ends_with("..."));
        assert_eq!(card.description.chars().count(), 4000);
    }

    #[test]
    fn portal_link_is_optional() {
        let card = builder()
            .with_portal_url(Some("http://tdarr.local:8265".to_string()))
            .build(&event(NotificationKind::Started), &movie(), None);
        assert_eq!(card.url.as_deref(), Some("http://tdarr.local:8265"));

        let card = builder()
            .with_portal_url(Some(String::new()))
            .build(&event(NotificationKind::Started), &movie(), None);
        assert_eq!(card.url, None);
    }
}
