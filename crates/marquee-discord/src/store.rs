// SPDX-FileCopyrightText: 2026 Marquee Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message-state stores.
//!
//! [`InMemoryMessageStore`] serves long-lived processes. [`JobVariablesStore`]
//! keeps the ids in the host's job variables so they survive between the
//! separate invocations the host makes for one job.

use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use marquee_core::{JobId, MarqueeError, MessageId, MessageStateStore};
use serde_json::{Map, Value};
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;

/// Variable-name prefix for stored message ids.
pub const MESSAGE_VARIABLE_PREFIX: &str = "discordMessage_";

/// Host variable scope that holds the message ids.
pub const USER_VARIABLES: &str = "user";

/// `discordMessage_<job>`
pub fn message_variable(job_id: &JobId) -> String {
    format!("{MESSAGE_VARIABLE_PREFIX}{job_id}")
}

struct Entry {
    message_id: MessageId,
    stored_at: Instant,
}

/// Process-wide job → message map with an optional entry lifetime.
#[derive(Default)]
pub struct InMemoryMessageStore {
    entries: DashMap<JobId, Entry>,
    ttl: Option<Duration>,
}

impl InMemoryMessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget entries older than `ttl`. `None` keeps them forever.
    pub fn with_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn expired(&self, entry: &Entry) -> bool {
        self.ttl
            .is_some_and(|ttl| entry.stored_at.elapsed() >= ttl)
    }
}

#[async_trait]
impl MessageStateStore for InMemoryMessageStore {
    async fn get(&self, job_id: &JobId) -> Result<Option<MessageId>, MarqueeError> {
        if self.entries.remove_if(job_id, |_, e| self.expired(e)).is_some() {
            debug!(job_id = %job_id, "stored message id expired");
        }
        Ok(self.entries.get(job_id).map(|e| e.message_id.clone()))
    }

    async fn put(&self, job_id: &JobId, message_id: MessageId) -> Result<(), MarqueeError> {
        self.entries.insert(
            job_id.clone(),
            Entry {
                message_id,
                stored_at: Instant::now(),
            },
        );
        Ok(())
    }
}

/// Message ids kept in the host's job-scoped variables.
///
/// Ids live under `user.discordMessage_<job>`; a top-level
/// `discordMessage_<job>` is still read when the `user` scope has none.
/// Seeded from the variables the host passed in; [`snapshot`](Self::snapshot)
/// returns them, updated, for the host to persist.
#[derive(Default)]
pub struct JobVariablesStore {
    variables: RwLock<Map<String, Value>>,
}

impl JobVariablesStore {
    pub fn new(variables: Map<String, Value>) -> Self {
        Self {
            variables: RwLock::new(variables),
        }
    }

    /// Current variables, including ids stored during this run.
    pub async fn snapshot(&self) -> Map<String, Value> {
        self.variables.read().await.clone()
    }
}

#[async_trait]
impl MessageStateStore for JobVariablesStore {
    async fn get(&self, job_id: &JobId) -> Result<Option<MessageId>, MarqueeError> {
        let variables = self.variables.read().await;
        let key = message_variable(job_id);
        let stored = variables
            .get(USER_VARIABLES)
            .and_then(Value::as_object)
            .and_then(|user| user.get(&key))
            .or_else(|| variables.get(&key));
        let id = match stored {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        };
        Ok(id.map(MessageId))
    }

    async fn put(&self, job_id: &JobId, message_id: MessageId) -> Result<(), MarqueeError> {
        let mut variables = self.variables.write().await;
        let scope = variables
            .entry(USER_VARIABLES)
            .or_insert_with(|| Value::Object(Map::new()));
        let Value::Object(user) = scope else {
            return Err(MarqueeError::Storage {
                source: format!("job variable `{USER_VARIABLES}` is not an object").into(),
            });
        };
        user.insert(message_variable(job_id), Value::String(message_id.0));
        debug!(job_id = %job_id, "stored message id in job variables");
        Ok(())
    }
}
