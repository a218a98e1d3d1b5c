// SPDX-FileCopyrightText: 2026 Marquee Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Discord webhook JSON shapes.

use serde::{Deserialize, Serialize};

use crate::card::{CardField, NotificationCard};

/// Serialized payloads above this size are never sent.
pub const MAX_PAYLOAD_BYTES: usize = 50_000;

/// Discord embed structure for rich notifications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Embed {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub color: u32,
    pub fields: Vec<EmbedField>,
    pub thumbnail: EmbedImage,
    pub footer: EmbedFooter,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedImage {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedFooter {
    pub text: String,
}

/// Discord webhook message payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookPayload {
    pub embeds: Vec<Embed>,
}

impl From<&CardField> for EmbedField {
    fn from(field: &CardField) -> Self {
        Self {
            name: field.name.clone(),
            value: field.value.clone(),
            inline: field.inline,
        }
    }
}

impl From<&NotificationCard> for Embed {
    fn from(card: &NotificationCard) -> Self {
        Self {
            title: card.title.clone(),
            description: card.description.clone(),
            url: card.url.clone(),
            color: card.color,
            fields: card.fields.iter().map(EmbedField::from).collect(),
            thumbnail: EmbedImage {
                url: card.thumbnail_url.clone(),
            },
            footer: EmbedFooter {
                text: card.footer.clone(),
            },
            timestamp: card.timestamp(),
        }
    }
}

impl WebhookPayload {
    /// `{"embeds": [card]}`
    pub fn from_card(card: &NotificationCard) -> Self {
        Self {
            embeds: vec![Embed::from(card)],
        }
    }
}
