// SPDX-FileCopyrightText: 2026 Marquee Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message-state store trait: job id to the remote message posted for it.

use async_trait::async_trait;

use crate::error::MarqueeError;
use crate::types::{JobId, MessageId};

/// Maps a job to the message that update-mode dispatches should edit.
///
/// Entries are written only after a successful create and are never cleared
/// by a failed edit.
#[async_trait]
pub trait MessageStateStore: Send + Sync + 'static {
    /// Returns the message previously posted for `job_id`, if any.
    async fn get(&self, job_id: &JobId) -> Result<Option<MessageId>, MarqueeError>;

    /// Records the message posted for `job_id`, replacing any earlier entry.
    async fn put(&self, job_id: &JobId, message_id: MessageId) -> Result<(), MarqueeError>;
}
