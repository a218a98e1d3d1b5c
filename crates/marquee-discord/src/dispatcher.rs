// SPDX-FileCopyrightText: 2026 Marquee Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Webhook dispatch: create or edit one message per call.
//!
//! Per job the dispatcher moves from "no message" to "has message" on the
//! first successful create and stays there; a failed edit falls back to a
//! create but never clears the stored id.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use marquee_core::{
    DispatchResult, HttpMethod, HttpRequest, HttpTransport, JobId, MessageId, MessageStateStore,
    NotificationMode,
};
use marquee_embed::{WebhookPayload, MAX_PAYLOAD_BYTES};
use marquee_security::redact_webhook_url;
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::validate::validate_payload;

/// Deadline for a single webhook call.
pub const WEBHOOK_TIMEOUT: Duration = Duration::from_secs(10);

const DEFAULT_USER_AGENT: &str = concat!("Marquee-Notifier/", env!("CARGO_PKG_VERSION"));

/// Log previews of error bodies are cut to this many characters.
const BODY_PREVIEW: usize = 100;

#[derive(Deserialize)]
struct CreatedMessage {
    id: Option<Value>,
}

/// Delivers payloads to one webhook.
pub struct WebhookDispatcher {
    transport: Arc<dyn HttpTransport>,
    store: Arc<dyn MessageStateStore>,
    webhook_url: String,
    target: String,
    user_agent: String,
    timeout: Duration,
    job_locks: DashMap<JobId, Arc<Mutex<()>>>,
}

impl WebhookDispatcher {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        store: Arc<dyn MessageStateStore>,
        webhook_url: impl Into<String>,
    ) -> Self {
        let webhook_url = webhook_url.into();
        Self {
            transport,
            store,
            target: redact_webhook_url(&webhook_url),
            webhook_url,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: WEBHOOK_TIMEOUT,
            job_locks: DashMap::new(),
        }
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Send `payload`, editing the job's earlier message in `updates` mode.
    pub async fn dispatch(
        &self,
        payload: &WebhookPayload,
        job_id: Option<&JobId>,
        mode: NotificationMode,
    ) -> DispatchResult {
        match serde_json::to_value(payload) {
            Ok(value) => self.dispatch_value(&value, job_id, mode).await,
            Err(e) => {
                warn!(error = %e, "failed to serialize webhook payload");
                DispatchResult::failed()
            }
        }
    }

    /// Like [`dispatch`](Self::dispatch) for an already-built JSON payload.
    pub async fn dispatch_value(
        &self,
        payload: &Value,
        job_id: Option<&JobId>,
        mode: NotificationMode,
    ) -> DispatchResult {
        if let Err(e) = validate_payload(payload) {
            warn!(error = %e, "rejected webhook payload");
            return DispatchResult::failed();
        }

        let body = match serde_json::to_vec(payload) {
            Ok(body) => body,
            Err(e) => {
                warn!(error = %e, "failed to serialize webhook payload");
                return DispatchResult::failed();
            }
        };
        if body.len() > MAX_PAYLOAD_BYTES {
            warn!(
                size = body.len(),
                limit = MAX_PAYLOAD_BYTES,
                "payload too large for webhook"
            );
            return DispatchResult::failed();
        }

        match (mode, job_id) {
            (NotificationMode::Updates, Some(job_id)) => self.dispatch_update(body, job_id).await,
            _ => self.create(body).await,
        }
    }

    async fn dispatch_update(&self, body: Vec<u8>, job_id: &JobId) -> DispatchResult {
        let lock = self
            .job_locks
            .entry(job_id.clone())
            .or_default()
            .clone();

        let result = {
            let _guard = lock.lock().await;
            self.edit_or_create(body, job_id).await
        };

        drop(lock);
        self.job_locks
            .remove_if(job_id, |_, lock| Arc::strong_count(lock) == 1);

        result
    }

    async fn edit_or_create(&self, body: Vec<u8>, job_id: &JobId) -> DispatchResult {
        let existing = match self.store.get(job_id).await {
            Ok(existing) => existing,
            Err(e) => {
                warn!(job_id = %job_id, error = %e, "message-state lookup failed");
                None
            }
        };

        if let Some(message_id) = existing {
            debug!(job_id = %job_id, "found existing message, editing");
            if self.edit(body.clone(), &message_id).await {
                return DispatchResult::delivered(Some(message_id));
            }
        }

        let result = self.create(body).await;
        if let (true, Some(message_id)) = (result.delivered, &result.message_id) {
            match self.store.put(job_id, message_id.clone()).await {
                Ok(()) => debug!(job_id = %job_id, "stored message id for future updates"),
                Err(e) => warn!(job_id = %job_id, error = %e, "failed to store message id"),
            }
        }
        result
    }

    /// `<webhook>?wait=true`, keeping any query already present.
    fn create_url(&self) -> String {
        let separator = if self.webhook_url.contains('?') { '&' } else { '?' };
        format!("{}{separator}wait=true", self.webhook_url)
    }

    /// `<webhook path>/messages/<id>?<query>&wait=true`
    fn edit_url(&self, message_id: &MessageId) -> String {
        let create = self.create_url();
        let (base, query) = create.split_once('?').unwrap_or((create.as_str(), ""));
        format!(
            "{}/messages/{message_id}?{query}",
            base.trim_end_matches('/')
        )
    }

    fn request(&self, method: HttpMethod, url: String, body: Vec<u8>) -> HttpRequest {
        HttpRequest::new(method, url, self.timeout)
            .header("Content-Type", "application/json")
            .header("Content-Length", body.len().to_string())
            .header("User-Agent", self.user_agent.clone())
            .body(body)
    }

    async fn create(&self, body: Vec<u8>) -> DispatchResult {
        let request = self.request(HttpMethod::Post, self.create_url(), body);

        match self.transport.request(request).await {
            Ok(response) if response.is_success() => {
                info!(webhook = %self.target, status = response.status, "notification sent");
                DispatchResult::delivered(parse_message_id(&response.body))
            }
            Ok(response) => {
                warn!(
                    webhook = %self.target,
                    status = response.status,
                    body = response.body_preview(BODY_PREVIEW),
                    "webhook rejected notification"
                );
                DispatchResult::failed()
            }
            Err(e) => {
                warn!(webhook = %self.target, error = %e, "webhook request failed");
                DispatchResult::failed()
            }
        }
    }

    async fn edit(&self, body: Vec<u8>, message_id: &MessageId) -> bool {
        let request = self.request(HttpMethod::Patch, self.edit_url(message_id), body);

        match self.transport.request(request).await {
            Ok(response) if response.is_success() => {
                info!(webhook = %self.target, status = response.status, "message edited");
                true
            }
            Ok(response) => {
                warn!(
                    webhook = %self.target,
                    status = response.status,
                    body = response.body_preview(BODY_PREVIEW),
                    "message edit failed, posting a new message"
                );
                false
            }
            Err(e) => {
                warn!(webhook = %self.target, error = %e, "message edit failed, posting a new message");
                false
            }
        }
    }
}

/// The `id` of a created message, if the body carries one.
fn parse_message_id(body: &str) -> Option<MessageId> {
    if body.trim().is_empty() {
        warn!("notification sent but the response had no body");
        return None;
    }

    match serde_json::from_str::<CreatedMessage>(body) {
        Ok(CreatedMessage {
            id: Some(Value::String(id)),
        }) if !id.is_empty() => Some(MessageId(id)),
        Ok(CreatedMessage {
            id: Some(Value::Number(id)),
        }) => Some(MessageId(id.to_string())),
        Ok(_) => {
            warn!("notification sent but the response carried no message id");
            None
        }
        Err(e) => {
            warn!(error = %e, "notification sent but the response could not be parsed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryMessageStore;
    use marquee_test_utils::MockTransport;
    use serde_json::json;

    const HOOK: &str = "https://discord.com/api/webhooks/123/token";

    fn dispatcher(transport: &MockTransport) -> (WebhookDispatcher, Arc<InMemoryMessageStore>) {
        let store = Arc::new(InMemoryMessageStore::new());
        let dispatcher = WebhookDispatcher::new(Arc::new(transport.clone()), store.clone(), HOOK);
        (dispatcher, store)
    }

    fn payload() -> Value {
        json!({"embeds": [{"title": "File Processing Status"}]})
    }

    fn job() -> JobId {
        JobId("job-1".to_string())
    }

    #[test]
    fn urls() {
        let transport = MockTransport::new();
        let (d, _) = dispatcher(&transport);
        assert_eq!(d.create_url(), format!("{HOOK}?wait=true"));
        assert_eq!(
            d.edit_url(&MessageId("99".into())),
            format!("{HOOK}/messages/99?wait=true")
        );

        let d = WebhookDispatcher::new(
            Arc::new(transport),
            Arc::new(InMemoryMessageStore::new()),
            format!("{HOOK}?thread_id=5"),
        );
        assert_eq!(d.create_url(), format!("{HOOK}?thread_id=5&wait=true"));
        assert_eq!(
            d.edit_url(&MessageId("99".into())),
            format!("{HOOK}/messages/99?thread_id=5&wait=true")
        );
    }

    #[test]
    fn message_id_parsing() {
        assert_eq!(parse_message_id(r#"{"id":"42"}"#), Some(MessageId("42".into())));
        assert_eq!(parse_message_id(r#"{"id":42}"#), Some(MessageId("42".into())));
        assert_eq!(parse_message_id(""), None);
        assert_eq!(parse_message_id("not json"), None);
        assert_eq!(parse_message_id(r#"{"type":0}"#), None);
    }

    #[tokio::test]
    async fn sequential_always_creates() {
        let transport = MockTransport::new();
        transport.push_reply(200, r#"{"id":"1"}"#).await;
        transport.push_reply(200, r#"{"id":"2"}"#).await;
        let (d, store) = dispatcher(&transport);

        let first = d.dispatch_value(&payload(), Some(&job()), NotificationMode::Sequential).await;
        let second = d.dispatch_value(&payload(), Some(&job()), NotificationMode::Sequential).await;

        assert_eq!(first, DispatchResult::delivered(Some(MessageId("1".into()))));
        assert_eq!(second, DispatchResult::delivered(Some(MessageId("2".into()))));
        assert!(store.is_empty());
        let requests = transport.requests().await;
        assert!(requests.iter().all(|r| r.method == HttpMethod::Post));
    }

    #[tokio::test]
    async fn updates_edits_on_second_dispatch() {
        let transport = MockTransport::new();
        transport.push_reply(200, r#"{"id":"555"}"#).await;
        transport.push_reply(200, r#"{"id":"555"}"#).await;
        let (d, store) = dispatcher(&transport);

        let first = d.dispatch_value(&payload(), Some(&job()), NotificationMode::Updates).await;
        assert_eq!(first.message_id, Some(MessageId("555".into())));
        assert_eq!(store.get(&job()).await.unwrap(), Some(MessageId("555".into())));

        let second = d.dispatch_value(&payload(), Some(&job()), NotificationMode::Updates).await;
        assert_eq!(second, DispatchResult::delivered(Some(MessageId("555".into()))));

        let requests = transport.requests().await;
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].method, HttpMethod::Post);
        assert_eq!(requests[0].url, format!("{HOOK}?wait=true"));
        assert_eq!(requests[1].method, HttpMethod::Patch);
        assert_eq!(requests[1].url, format!("{HOOK}/messages/555?wait=true"));
    }

    #[tokio::test]
    async fn failed_edit_falls_back_to_create_and_keeps_state_consistent() {
        let transport = MockTransport::new();
        transport.push_reply(404, r#"{"message":"Unknown Message"}"#).await;
        transport.push_reply(200, r#"{"id":"777"}"#).await;
        let (d, store) = dispatcher(&transport);
        store.put(&job(), MessageId("555".into())).await.unwrap();

        let result = d.dispatch_value(&payload(), Some(&job()), NotificationMode::Updates).await;

        assert_eq!(result, DispatchResult::delivered(Some(MessageId("777".into()))));
        assert_eq!(store.get(&job()).await.unwrap(), Some(MessageId("777".into())));
        assert_eq!(transport.request_count().await, 2);
    }

    #[tokio::test]
    async fn failed_edit_and_failed_create_keep_the_stored_id() {
        let transport = MockTransport::new();
        transport.push_reply(500, "boom").await;
        transport.push_reply(500, "boom").await;
        let (d, store) = dispatcher(&transport);
        store.put(&job(), MessageId("555".into())).await.unwrap();

        let result = d.dispatch_value(&payload(), Some(&job()), NotificationMode::Updates).await;

        assert_eq!(result, DispatchResult::failed());
        assert_eq!(store.get(&job()).await.unwrap(), Some(MessageId("555".into())));
    }

    #[tokio::test]
    async fn updates_without_job_id_behaves_like_sequential() {
        let transport = MockTransport::new();
        transport.push_reply(200, r#"{"id":"1"}"#).await;
        let (d, store) = dispatcher(&transport);

        let result = d.dispatch_value(&payload(), None, NotificationMode::Updates).await;

        assert!(result.delivered);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn success_without_body_stores_nothing() {
        let transport = MockTransport::new();
        transport.push_reply(204, "").await;
        let (d, store) = dispatcher(&transport);

        let result = d.dispatch_value(&payload(), Some(&job()), NotificationMode::Updates).await;

        assert_eq!(result, DispatchResult::delivered(None));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn invalid_payload_is_never_sent() {
        let transport = MockTransport::new();
        let (d, _) = dispatcher(&transport);

        let result = d
            .dispatch_value(&json!({"embeds": ["x"]}), Some(&job()), NotificationMode::Updates)
            .await;

        assert_eq!(result, DispatchResult::failed());
        assert_eq!(transport.request_count().await, 0);
    }

    #[tokio::test]
    async fn oversized_payload_is_never_sent() {
        let transport = MockTransport::new();
        let (d, _) = dispatcher(&transport);
        let big = json!({"embeds": [{"description": "x".repeat(MAX_PAYLOAD_BYTES)}]});

        let result = d.dispatch_value(&big, None, NotificationMode::Sequential).await;

        assert_eq!(result, DispatchResult::failed());
        assert_eq!(transport.request_count().await, 0);
    }

    #[tokio::test]
    async fn transport_error_is_a_failed_dispatch() {
        let transport = MockTransport::new();
        transport
            .push_error(marquee_core::MarqueeError::Timeout {
                duration: WEBHOOK_TIMEOUT,
            })
            .await;
        let (d, _) = dispatcher(&transport);

        let result = d.dispatch_value(&payload(), None, NotificationMode::Sequential).await;
        assert_eq!(result, DispatchResult::failed());
    }

    #[tokio::test]
    async fn requests_carry_headers_and_timeout() {
        let transport = MockTransport::new();
        transport.push_reply(200, r#"{"id":"1"}"#).await;
        let (d, _) = dispatcher(&transport);
        let d = d.with_user_agent("Marquee-Test/1.0");

        d.dispatch_value(&payload(), None, NotificationMode::Sequential).await;

        let request = &transport.requests().await[0];
        let body = request.body.as_ref().unwrap();
        let header = |name: &str| {
            request
                .headers
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v.as_str())
        };
        assert_eq!(header("Content-Type"), Some("application/json"));
        assert_eq!(header("Content-Length"), Some(body.len().to_string().as_str()));
        assert_eq!(header("User-Agent"), Some("Marquee-Test/1.0"));
        assert_eq!(request.timeout, WEBHOOK_TIMEOUT);
        assert_eq!(serde_json::from_slice::<Value>(body).unwrap(), payload());
    }

    #[tokio::test]
    async fn job_locks_are_released() {
        let transport = MockTransport::new();
        transport.push_reply(200, r#"{"id":"1"}"#).await;
        let (d, _) = dispatcher(&transport);

        d.dispatch_value(&payload(), Some(&job()), NotificationMode::Updates).await;
        assert!(d.job_locks.is_empty());
    }
}
