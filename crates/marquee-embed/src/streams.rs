// SPDX-FileCopyrightText: 2026 Marquee Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One-line summaries of probed video and audio streams.

use marquee_core::{StreamInfo, StreamKind};

/// Flag shown for languages without an entry in the table.
pub const UNKNOWN_LANGUAGE_FLAG: &str = "🌐";

/// Named channel layouts; anything else is `<n>ch`.
pub fn channel_label(channels: u32) -> Option<String> {
    let label = match channels {
        0 => return None,
        1 => "Mono",
        2 => "Stereo",
        6 => "5.1",
        8 => "7.1",
        n => return Some(format!("{n}ch")),
    };
    Some(label.to_string())
}

/// Flag for an ISO 639-1 or 639-2 language code, case-insensitive.
pub fn language_flag(code: &str) -> &'static str {
    match code.to_ascii_lowercase().as_str() {
        "en" | "eng" => "🇺🇸",
        "fr" | "fre" | "fra" => "🇫🇷",
        "es" | "spa" => "🇪🇸",
        "de" | "ger" | "deu" => "🇩🇪",
        "it" | "ita" => "🇮🇹",
        "ja" | "jpn" => "🇯🇵",
        "ko" | "kor" => "🇰🇷",
        "zh" | "chi" | "zho" => "🇨🇳",
        _ => UNKNOWN_LANGUAGE_FLAG,
    }
}

fn codec(stream: &StreamInfo) -> String {
    if stream.codec_name.trim().is_empty() {
        "UNKNOWN".to_string()
    } else {
        stream.codec_name.to_uppercase()
    }
}

/// `EAC3 5.1 (Main) 🇺🇸 ENG`; parts without data are left out.
pub fn audio_summary(stream: &StreamInfo) -> String {
    let mut line = codec(stream);

    if let Some(label) = stream.channels.and_then(channel_label) {
        line.push(' ');
        line.push_str(&label);
    }
    if let Some(role) = stream.role {
        line.push_str(&format!(" ({})", role.label()));
    }
    if let Some(language) = stream.language.as_deref().map(str::trim).filter(|l| !l.is_empty()) {
        line.push_str(&format!(
            " {} {}",
            language_flag(language),
            language.to_uppercase()
        ));
    }

    line
}

/// `Video: HEVC • 1920x1080`, or `Unknown` resolution.
pub fn video_summary(stream: &StreamInfo) -> String {
    let resolution = match (stream.width, stream.height) {
        (Some(w), Some(h)) if w > 0 && h > 0 => format!("{w}x{h}"),
        _ => "Unknown".to_string(),
    };
    format!("Video: {} • {resolution}", codec(stream))
}

/// Lines for the details block: the first video stream, then audio.
pub fn stream_lines(streams: &[StreamInfo]) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(video) = streams.iter().find(|s| s.kind == StreamKind::Video) {
        lines.push(video_summary(video));
    }

    let audio: Vec<String> = streams
        .iter()
        .filter(|s| s.kind == StreamKind::Audio)
        .map(audio_summary)
        .collect();

    match audio.as_slice() {
        [] => {}
        [only] => lines.push(format!("Audio: {only}")),
        tracks => {
            let numbered: Vec<String> = tracks
                .iter()
                .enumerate()
                .map(|(i, track)| format!("{}. {track}", i + 1))
                .collect();
            lines.push(format!("Audio Tracks:\n{}", numbered.join("\n")));
        }
    }

    lines
}
