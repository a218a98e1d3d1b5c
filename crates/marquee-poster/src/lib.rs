// SPDX-FileCopyrightText: 2026 Marquee Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Poster artwork lookup against the OMDb API.
//!
//! Lookups are optional: without an API key the resolver never touches the
//! network, and any failure simply means the card goes out without a poster.

pub mod resolver;
pub mod types;

pub use resolver::{PosterAttempt, PosterResolver, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use types::OmdbResponse;
