// SPDX-FileCopyrightText: 2026 Marquee Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! reqwest-backed [`HttpTransport`](marquee_core::HttpTransport).
//!
//! Every request runs under a hard deadline and an optional cancellation
//! token, and response bodies are read only up to a fixed limit.

pub mod body;
pub mod client;

pub use body::{MAX_RESPONSE_BYTES, TRUNCATION_MARKER};
pub use client::ReqwestTransport;
