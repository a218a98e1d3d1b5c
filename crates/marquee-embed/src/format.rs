// SPDX-FileCopyrightText: 2026 Marquee Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Field value formatting: clocks, durations and sizes.

use chrono::{DateTime, FixedOffset, Local, Utc};
use marquee_core::NotificationKind;

/// Media length as `H:MM:SS`, or `Unknown` for zero/negative input.
pub fn file_duration(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "Unknown".to_string();
    }
    let total = seconds.floor() as u64;
    format!("{}:{:02}:{:02}", total / 3600, (total % 3600) / 60, total % 60)
}

/// Elapsed time as `Xh Ym`, `Xm Ys` or `Xs`.
pub fn elapsed(duration: chrono::Duration) -> String {
    let seconds = duration.num_seconds().unsigned_abs();
    let minutes = seconds / 60;
    let hours = minutes / 60;

    if hours > 0 {
        format!("{hours}h {}m", minutes % 60)
    } else if minutes > 0 {
        format!("{minutes}m {}s", seconds % 60)
    } else {
        format!("{seconds}s")
    }
}

/// The Processing Time field value.
pub fn processing_time(
    kind: NotificationKind,
    job_start: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> String {
    if kind == NotificationKind::Started {
        return "Starting...".to_string();
    }
    match job_start {
        Some(start) => elapsed(now - start),
        None => "Unknown".to_string(),
    }
}

/// 24-hour `HH:MM:SS` wall clock, in `offset` or the host's local zone.
pub fn clock(at: DateTime<Utc>, offset: Option<FixedOffset>) -> String {
    match offset {
        Some(offset) => at.with_timezone(&offset).format("%H:%M:%S").to_string(),
        None => at.with_timezone(&Local).format("%H:%M:%S").to_string(),
    }
}

/// `123.45 MB`
pub fn size_mb(mb: f64) -> String {
    format!("{mb:.2} MB")
}

/// `20.0% (200.00 MB saved)` or `-10.0% (100.00 MB larger)`.
///
/// `original_mb` must be positive.
pub fn compression(original_mb: f64, new_mb: f64) -> String {
    let savings = original_mb - new_mb;
    let ratio = savings / original_mb * 100.0;

    if savings >= 0.0 {
        format!("{ratio:.1}% ({savings:.2} MB saved)")
    } else {
        format!("{ratio:.1}% ({:.2} MB larger)", savings.abs())
    }
}
