use std::sync::Arc;

use anyhow::{Context as _, Result};
use log::info;
use serenity::all::GatewayIntents;

use crate::router::Router;
use crate::utils::ResultExt as _;

mod directory;
mod event_handler;
mod reply;

pub use directory::SerenityDirectory;
pub use event_handler::DiscordHandler;
pub use reply::ChannelReply;

async fn start_serenity(token: &str, handler: DiscordHandler) -> Result<()> {
    let intents = GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;
    let mut client = serenity::Client::builder(token, intents)
        .event_handler(handler)
        .await?;

    info!("Discord: Starting Discord client");
    Ok(client.start().await?)
}

/// Runs the Discord client until the connection is closed for good.
pub async fn start_discord(token: String, router: Router, directory: Arc<SerenityDirectory>) {
    let handler = DiscordHandler::new(router, directory);
    start_serenity(&token, handler)
        .await
        .context("Failed to start serenity")
        .print_err();
}
