//! What the router needs from the messaging platform.

use std::sync::Arc;

use anyhow::Result;
use cmdisco_model::{Author, UserId};

/// Sends text back to the conversation a message came from.
#[serenity::async_trait]
pub trait Reply: Send + Sync {
    async fn send(&self, content: &str) -> Result<()>;
}

/// Identity lookups used by the owner check and the user converter.
#[serenity::async_trait]
pub trait UserDirectory: Send + Sync {
    async fn application_owner(&self) -> Result<UserId>;

    async fn user_by_id(&self, id: UserId) -> Result<Option<Author>>;

    async fn user_by_name(&self, name: &str) -> Result<Option<Author>>;
}

#[derive(Clone)]
pub struct InboundMessage {
    pub content: String,
    pub author: Author,
    pub reply: Arc<dyn Reply>,
}

impl InboundMessage {
    pub fn new(content: impl Into<String>, author: Author, reply: Arc<dyn Reply>) -> Self {
        Self {
            content: content.into(),
            author,
            reply,
        }
    }
}
