// SPDX-FileCopyrightText: 2026 Marquee Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Notification cards for the Marquee notification engine.
//!
//! [`CardBuilder`] turns a [`NotificationEvent`](marquee_core::NotificationEvent)
//! and its parsed [`MediaInfo`](marquee_core::MediaInfo) into a
//! [`NotificationCard`] with every text field already length-capped, and
//! [`WebhookPayload`] is the JSON shape sent to the webhook.

pub mod card;
pub mod format;
pub mod sanitize;
pub mod status;
pub mod streams;
pub mod wire;

pub use card::{body_text, CardBuilder, CardField, NotificationCard, CARD_TITLE};
pub use sanitize::truncate;
pub use status::StatusStyle;
pub use wire::{Embed, WebhookPayload, MAX_PAYLOAD_BYTES};
