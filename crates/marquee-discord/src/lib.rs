// SPDX-FileCopyrightText: 2026 Marquee Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Discord webhook delivery for the Marquee notification engine.
//!
//! [`WebhookDispatcher`] posts or edits a single embed per call. In
//! `updates` mode it remembers the message created for each job through a
//! [`MessageStateStore`](marquee_core::MessageStateStore) and edits that
//! message on later events.

pub mod dispatcher;
pub mod store;
pub mod validate;

pub use dispatcher::{WebhookDispatcher, WEBHOOK_TIMEOUT};
pub use store::{
    message_variable, InMemoryMessageStore, JobVariablesStore, MESSAGE_VARIABLE_PREFIX,
    USER_VARIABLES,
};
pub use validate::validate_payload;
