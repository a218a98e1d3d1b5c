// SPDX-FileCopyrightText: 2026 Marquee Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The notification pipeline: parse → poster → card → dispatch.

pub mod engine;

pub use engine::{NotificationEngine, NotifyOutcome};
