use std::sync::Arc;

use anyhow::{Context as _, Result};
use serenity::all::{ChannelId, Http};

use crate::router::Reply;

/// Replies to the channel a message came from.
pub struct ChannelReply {
    http: Arc<Http>,
    channel_id: ChannelId,
}

impl ChannelReply {
    pub fn new(http: Arc<Http>, channel_id: ChannelId) -> Self {
        Self { http, channel_id }
    }
}

#[serenity::async_trait]
impl Reply for ChannelReply {
    async fn send(&self, content: &str) -> Result<()> {
        self.channel_id
            .say(self.http.as_ref(), content)
            .await
            .with_context(|| format!("Sending reply to channel {}", self.channel_id))?;
        Ok(())
    }
}
