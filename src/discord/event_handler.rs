use std::sync::Arc;

use cmdisco_model::UserId;
use log::{debug, info};
use serenity::all::{Context, EventHandler, Message, Ready};

use super::directory::{author, SerenityDirectory};
use super::reply::ChannelReply;
use crate::router::{InboundMessage, Router};

#[derive(Clone)]
pub struct DiscordHandler {
    router: Router,
    directory: Arc<SerenityDirectory>,
}

impl DiscordHandler {
    pub fn new(router: Router, directory: Arc<SerenityDirectory>) -> Self {
        Self { router, directory }
    }
}

#[serenity::async_trait]
impl EventHandler for DiscordHandler {
    async fn message(&self, ctx: Context, msg: Message) {
        // Don't answer bots, own messages included
        if msg.author.bot {
            return;
        }
        let author = author(&msg.author);
        self.directory.remember(&author).await;
        let reply = Arc::new(ChannelReply::new(ctx.http.clone(), msg.channel_id));
        let outcome = self
            .router
            .process_input(InboundMessage::new(msg.content, author, reply))
            .await;
        debug!("Discord: message {} -> {:?}", msg.id, outcome);
    }

    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!("{} is connected!", ready.user.name);
        self.router.set_self_id(UserId::from(ready.user.id.get()));
        info!("Discord client ready");
    }
}
