// SPDX-FileCopyrightText: 2026 Marquee Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Title pattern cascade.
//!
//! Patterns are tried in order and the first match wins. Every pattern names
//! its captures `title`, `year`, `season` and `episode`; a pattern that
//! captures a season produces a series, otherwise a movie.

use std::sync::LazyLock;

use marquee_core::{MediaCategory, MediaInfo};
use regex::{Captures, Regex};
use tracing::debug;

/// One entry of the parser cascade.
#[derive(Debug)]
pub struct TitlePattern {
    pub name: &'static str,
    regex: Regex,
}

impl TitlePattern {
    fn new(name: &'static str, pattern: &str) -> Self {
        Self {
            name,
            regex: Regex::new(pattern).expect("title pattern must compile"),
        }
    }

    fn apply(&self, file_name: &str) -> Option<MediaInfo> {
        let caps = self.regex.captures(file_name)?;
        let season = caps.name("season").map(|m| pad2(m.as_str()));
        let category = if season.is_some() {
            MediaCategory::Series
        } else {
            MediaCategory::Movie
        };

        Some(MediaInfo {
            category,
            title: clean_title(group(&caps, "title").unwrap_or_default()),
            year: group(&caps, "year").map(str::to_string),
            season,
            episode: group(&caps, "episode").map(pad2),
        })
    }
}

fn group<'h>(caps: &Captures<'h>, name: &str) -> Option<&'h str> {
    caps.name(name).map(|m| m.as_str())
}

fn pad2(digits: &str) -> String {
    format!("{digits:0>2}")
}

/// The cascade, most specific first.
pub static TITLE_PATTERNS: LazyLock<Vec<TitlePattern>> = LazyLock::new(|| {
    vec![
        TitlePattern::new(
            "series_with_year",
            r"(?i)^(?P<title>.+?)[\s.\-]*[(\[]?(?P<year>\d{4})[)\]]?[\s.\-]*S(?P<season>\d+)E(?P<episode>\d+)[\s.\-]*(?P<rest>.*)$",
        ),
        TitlePattern::new(
            "series",
            r"(?i)^(?P<title>.+?)[\s.\-]*S(?P<season>\d+)E(?P<episode>\d+)[\s.\-]*(?P<rest>.*)$",
        ),
        TitlePattern::new(
            "series_spelled_out",
            r"(?i)^(?P<title>.+?)[\s.\-]*Season[\s.\-]*(?P<season>\d+)[\s.\-]*Episode[\s.\-]*(?P<episode>\d+)[\s.\-]*(?P<rest>.*)$",
        ),
        TitlePattern::new(
            "movie",
            r"(?i)^(?P<title>.+?)[\s.\-]*[(\[]?(?P<year>\d{4})[)\]]?",
        ),
    ]
});

static SEPARATORS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[._\-]").unwrap());
static EXTENSION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.[^/.]+$").unwrap());

/// Replace `.`, `-` and `_` with spaces and trim.
pub fn clean_title(raw: &str) -> String {
    SEPARATORS.replace_all(raw, " ").trim().to_string()
}

/// Parse a file name (or full path) into media facts.
///
/// Never fails: names no pattern recognises come back as
/// [`MediaCategory::Unknown`] with the extension stripped.
pub fn parse_media_info(path: &str) -> MediaInfo {
    let file_name = path.rsplit(['/', '\\']).next().unwrap_or(path);

    for pattern in TITLE_PATTERNS.iter() {
        if let Some(info) = pattern.apply(file_name) {
            debug!(pattern = pattern.name, title = %info.title, "parsed media title");
            return info;
        }
    }

    debug!(file_name, "no title pattern matched");
    MediaInfo {
        category: MediaCategory::Unknown,
        title: clean_title(&EXTENSION.replace(file_name, "")),
        year: None,
        season: None,
        episode: None,
    }
}
