// SPDX-FileCopyrightText: 2026 Marquee Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Runs one notification event end to end.

use std::sync::Arc;

use marquee_config::{ConfigError, MarqueeConfig};
use marquee_core::{
    DispatchResult, HttpTransport, MessageId, MessageStateStore, NotificationEvent,
    NotificationMode,
};
use marquee_discord::{InMemoryMessageStore, WebhookDispatcher};
use marquee_embed::{CardBuilder, WebhookPayload};
use marquee_media::parse_media_info;
use marquee_poster::PosterResolver;
use serde::Serialize;
use tracing::{debug, info, warn};

/// What the host gets back for one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotifyOutcome {
    pub delivered: bool,
    pub message_id: Option<MessageId>,
}

impl NotifyOutcome {
    /// Host routing: 1 when delivered, 2 otherwise.
    pub fn output_number(&self) -> u8 {
        if self.delivered { 1 } else { 2 }
    }
}

impl From<DispatchResult> for NotifyOutcome {
    fn from(result: DispatchResult) -> Self {
        Self {
            delivered: result.delivered,
            message_id: result.message_id,
        }
    }
}

/// Assembled pipeline for one webhook destination.
pub struct NotificationEngine {
    resolver: PosterResolver,
    cards: CardBuilder,
    dispatcher: WebhookDispatcher,
    mode: NotificationMode,
}

impl NotificationEngine {
    pub fn new(
        resolver: PosterResolver,
        cards: CardBuilder,
        dispatcher: WebhookDispatcher,
        mode: NotificationMode,
    ) -> Self {
        Self {
            resolver,
            cards,
            dispatcher,
            mode,
        }
    }

    /// Validate `config`, then assemble the engine.
    ///
    /// Every configuration problem is reported at once and nothing is sent.
    pub fn from_config(
        config: &MarqueeConfig,
        transport: Arc<dyn HttpTransport>,
        store: Arc<dyn MessageStateStore>,
    ) -> Result<Self, Vec<ConfigError>> {
        if let Err(errors) = marquee_config::validation::validate_config(config) {
            for error in &errors {
                warn!(error = %error, "configuration rejected");
            }
            return Err(errors);
        }
        Ok(Self::assemble(config, transport, store))
    }

    /// Validate `config`, then assemble the engine over an in-process store
    /// whose entries expire after `state.ttl_secs`.
    pub fn with_memory_store(
        config: &MarqueeConfig,
        transport: Arc<dyn HttpTransport>,
    ) -> Result<Self, Vec<ConfigError>> {
        let store = InMemoryMessageStore::new().with_ttl(config.state.ttl());
        Self::from_config(config, transport, Arc::new(store))
    }

    /// Assemble the engine without validating `config`.
    ///
    /// The webhook URL is used as given, so tests can point it at a local
    /// server.
    pub fn assemble(
        config: &MarqueeConfig,
        transport: Arc<dyn HttpTransport>,
        store: Arc<dyn MessageStateStore>,
    ) -> Self {
        let resolver = PosterResolver::new(
            transport.clone(),
            config.omdb.api_key().map(str::to_string),
        )
        .with_base_url(config.omdb.base_url.clone())
        .with_timeout(config.omdb.timeout());

        let cards = CardBuilder::new(config.discord.placeholder_thumbnail.clone())
            .with_portal_url(config.portal.url.clone());

        let dispatcher = WebhookDispatcher::new(
            transport,
            store,
            config.discord.webhook_url.clone().unwrap_or_default(),
        )
        .with_user_agent(config.discord.user_agent.clone())
        .with_timeout(config.discord.timeout());

        Self::new(resolver, cards, dispatcher, config.discord.mode)
    }

    /// Replace the card builder (e.g. to pin the clock offset).
    pub fn with_cards(mut self, cards: CardBuilder) -> Self {
        self.cards = cards;
        self
    }

    pub fn mode(&self) -> NotificationMode {
        self.mode
    }

    /// Deliver one event. Never fails; problems are logged and reported as
    /// an undelivered outcome.
    pub async fn notify(&self, event: &NotificationEvent) -> NotifyOutcome {
        let media = parse_media_info(&event.file.path);
        debug!(
            kind = %event.kind,
            category = %media.category,
            title = %media.title,
            "parsed media info"
        );

        let poster = self
            .resolver
            .resolve(&media, event.file.file_name())
            .await;
        let card = self.cards.build(event, &media, poster.as_deref());
        let payload = WebhookPayload::from_card(&card);

        let outcome = NotifyOutcome::from(
            self.dispatcher
                .dispatch(&payload, event.job_id.as_ref(), self.mode)
                .await,
        );

        let job_id = event.job_id.as_ref().map(|id| id.0.as_str()).unwrap_or("unknown");
        if outcome.delivered {
            info!(kind = %event.kind, job_id, mode = %self.mode, "notification delivered");
        } else {
            warn!(kind = %event.kind, job_id, mode = %self.mode, "notification not delivered");
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use marquee_core::NotificationKind;
    use marquee_core::HttpMethod;
    use marquee_test_utils::{test_config, EventBuilder, MockTransport, TEST_API_KEY};

    fn engine(config: &MarqueeConfig, transport: &MockTransport) -> NotificationEngine {
        NotificationEngine::assemble(
            config,
            Arc::new(transport.clone()),
            Arc::new(InMemoryMessageStore::new()),
        )
    }

    #[test]
    fn output_numbers() {
        let delivered = NotifyOutcome {
            delivered: true,
            message_id: None,
        };
        let failed = NotifyOutcome {
            delivered: false,
            message_id: None,
        };
        assert_eq!(delivered.output_number(), 1);
        assert_eq!(failed.output_number(), 2);
    }

    #[test]
    fn invalid_webhook_is_rejected_before_any_request() {
        let config = test_config("https://example.com/not-a-webhook");
        let transport = MockTransport::new();

        let result = NotificationEngine::from_config(
            &config,
            Arc::new(transport),
            Arc::new(InMemoryMessageStore::new()),
        );

        let errors = result.err().expect("config must be rejected");
        assert!(errors
            .iter()
            .any(|e| e.to_string().contains("invalid webhook format")));
    }

    #[test]
    fn valid_config_builds() {
        let config = test_config("https://discord.com/api/webhooks/123/abcDEF-_9");
        let engine = NotificationEngine::from_config(
            &config,
            Arc::new(MockTransport::new()),
            Arc::new(InMemoryMessageStore::new()),
        );
        assert!(engine.is_ok());
    }

    #[tokio::test]
    async fn without_api_key_only_the_webhook_is_called() {
        let transport = MockTransport::new();
        transport.push_reply(200, r#"{"id":"10"}"#).await;
        let config = test_config("https://discord.com/api/webhooks/1/t");

        let outcome = engine(&config, &transport)
            .notify(&EventBuilder::new(NotificationKind::Started).build())
            .await;

        assert_eq!(outcome.output_number(), 1);
        assert_eq!(outcome.message_id, Some(MessageId("10".to_string())));
        let requests = transport.requests().await;
        assert_eq!(requests.len(), 1);
        assert!(requests[0].url.starts_with("https://discord.com/api/webhooks/1/t?wait=true"));
    }

    #[tokio::test]
    async fn poster_lands_in_the_thumbnail() {
        let transport = MockTransport::new();
        transport
            .push_reply(200, r#"{"Poster":"https://img.test/p.jpg","Response":"True"}"#)
            .await;
        transport.push_reply(200, r#"{"id":"10"}"#).await;
        let mut config = test_config("https://discord.com/api/webhooks/1/t");
        config.omdb.api_key = Some(TEST_API_KEY.to_string());

        let outcome = engine(&config, &transport)
            .notify(&EventBuilder::new(NotificationKind::Started).build())
            .await;

        assert!(outcome.delivered);
        let requests = transport.requests().await;
        assert_eq!(requests.len(), 2);
        assert!(requests[0].url.starts_with("https://www.omdbapi.com/?t=Show+Name"));
        let body: serde_json::Value =
            serde_json::from_slice(requests[1].body.as_ref().unwrap()).unwrap();
        assert_eq!(body["embeds"][0]["thumbnail"]["url"], "https://img.test/p.jpg");
    }

    #[tokio::test(start_paused = true)]
    async fn configured_ttl_expires_the_stored_message() {
        let config = marquee_config::load_and_validate_str(
            "[discord]\nwebhook_url = \"https://discord.com/api/webhooks/1/t\"\n\n[state]\nttl_secs = 60\n",
        )
        .unwrap();
        let transport = MockTransport::new();
        let engine =
            NotificationEngine::with_memory_store(&config, Arc::new(transport.clone())).unwrap();

        transport.push_reply(200, r#"{"id":"10"}"#).await;
        assert!(engine.notify(&EventBuilder::new(NotificationKind::Started).build()).await.delivered);

        tokio::time::advance(Duration::from_secs(30)).await;
        transport.push_reply(200, r#"{"id":"10"}"#).await;
        assert!(engine.notify(&EventBuilder::new(NotificationKind::Succeeded).build()).await.delivered);

        tokio::time::advance(Duration::from_secs(31)).await;
        transport.push_reply(200, r#"{"id":"11"}"#).await;
        let outcome = engine.notify(&EventBuilder::new(NotificationKind::Failed).build()).await;
        assert_eq!(outcome.message_id, Some(MessageId("11".to_string())));

        let methods: Vec<HttpMethod> =
            transport.requests().await.iter().map(|r| r.method).collect();
        assert_eq!(methods, [HttpMethod::Post, HttpMethod::Patch, HttpMethod::Post]);
    }

    #[tokio::test]
    async fn failed_webhook_maps_to_output_two() {
        let transport = MockTransport::new();
        transport.push_reply(401, r#"{"message":"Invalid Webhook Token"}"#).await;
        let config = test_config("https://discord.com/api/webhooks/1/t");

        let outcome = engine(&config, &transport)
            .notify(&EventBuilder::new(NotificationKind::Failed).build())
            .await;

        assert_eq!(outcome.output_number(), 2);
        assert_eq!(outcome.message_id, None);
    }
}
