// SPDX-FileCopyrightText: 2026 Marquee Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Marquee notification engine.
//!
//! This crate provides the error type, the domain types passed between the
//! parser, card builder, poster resolver and dispatcher, and the two trait
//! seams the engine is assembled from: [`HttpTransport`] and
//! [`MessageStateStore`].

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::MarqueeError;
pub use types::{
    DispatchResult, FileContext, JobId, MediaCategory, MediaInfo, MessageId, NotificationEvent,
    NotificationKind, NotificationMode, StreamInfo, StreamKind, StreamRole,
};

pub use traits::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, MessageStateStore};
