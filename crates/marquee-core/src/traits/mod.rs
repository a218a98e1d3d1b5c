// SPDX-FileCopyrightText: 2026 Marquee Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait seams between the engine and its collaborators.
//!
//! All traits use `#[async_trait]` for dynamic dispatch compatibility so that
//! the engine can hold them as `Arc<dyn ...>`.

pub mod store;
pub mod transport;

pub use store::MessageStateStore;
pub use transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
