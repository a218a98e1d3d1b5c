// SPDX-FileCopyrightText: 2026 Marquee Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Length caps for embed text.

/// Field names and the embed title.
pub const FIELD_NAME_MAX: usize = 256;
/// Field values, including the details block.
pub const FIELD_VALUE_MAX: usize = 1024;
/// Embed description.
pub const DESCRIPTION_MAX: usize = 4000;
/// Footer text.
pub const FOOTER_MAX: usize = 2048;

const ELLIPSIS: &str = "...";

/// Cap `text` at `max` characters.
///
/// Longer input is cut so that the result, ellipsis included, is exactly
/// `max` characters long.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }

    let keep = max.saturating_sub(ELLIPSIS.len());
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(&ELLIPSIS[..max.min(ELLIPSIS.len())]);
    out
}
