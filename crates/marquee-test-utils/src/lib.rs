// SPDX-FileCopyrightText: 2026 Marquee Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Marquee integration tests.
//!
//! Provides a scripted transport and event fixtures for fast,
//! deterministic tests without external services.
//!
//! # Components
//!
//! - [`MockTransport`] - Scripted `HttpTransport` that records every request
//! - [`EventBuilder`] - Notification events with realistic defaults
//! - [`test_config`] - A valid configuration pointing at a test server

pub mod fixtures;
pub mod mock_transport;

pub use fixtures::{sample_streams, test_config, EventBuilder, TEST_API_KEY};
pub use mock_transport::MockTransport;
