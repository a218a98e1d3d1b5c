// SPDX-FileCopyrightText: 2026 Marquee Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! File-name understanding for the Marquee notification engine.
//!
//! [`parse_media_info`] turns a release-style file name into a
//! [`MediaInfo`](marquee_core::MediaInfo) (movie, series or unknown), and
//! [`extract_catalog_id`] pulls an IMDb-style identifier out of it for
//! poster lookups.

pub mod catalog;
pub mod parser;

pub use catalog::extract_catalog_id;
pub use parser::{clean_title, parse_media_info, TitlePattern};
