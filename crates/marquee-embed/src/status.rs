// SPDX-FileCopyrightText: 2026 Marquee Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-kind presentation: accent color, glyph and status label.

use marquee_core::NotificationKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusStyle {
    pub color: u32,
    pub glyph: &'static str,
    pub label: &'static str,
}

impl StatusStyle {
    pub fn for_kind(kind: NotificationKind) -> Self {
        match kind {
            NotificationKind::Started => Self {
                color: 0x3498db,
                glyph: "🚀",
                label: "Started processing file",
            },
            NotificationKind::Succeeded => Self {
                color: 0x2ecc71,
                glyph: "✅",
                label: "Transcode completed",
            },
            NotificationKind::Failed => Self {
                color: 0xe74c3c,
                glyph: "❌",
                label: "Transcode failed",
            },
        }
    }

    /// `"<glyph> <label>"`, the Current Status field value.
    pub fn status_line(&self) -> String {
        format!("{} {}", self.glyph, self.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_match_kinds() {
        assert_eq!(StatusStyle::for_kind(NotificationKind::Started).color, 0x3498db);
        assert_eq!(StatusStyle::for_kind(NotificationKind::Succeeded).color, 0x2ecc71);
        assert_eq!(StatusStyle::for_kind(NotificationKind::Failed).color, 0xe74c3c);
    }

    #[test]
    fn status_line() {
        assert_eq!(
            StatusStyle::for_kind(NotificationKind::Failed).status_line(),
            "❌ Transcode failed"
        );
    }
}
