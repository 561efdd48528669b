use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use anyhow::{Context, Result};
use cmdisco::discord::{start_discord, SerenityDirectory};
use cmdisco::utils::{print_err, unwrap_or_def_verbose};
use cmdisco::{logging, store, units, Router};
use log::{error, info};
use serenity::futures;
use tokio::signal;

async fn terminate_on_signal() -> Result<()> {
    let interrupt_signal: Pin<Box<dyn Future<Output = _>>> = Box::pin(async {
        signal::unix::signal(signal::unix::SignalKind::interrupt())
            .context("Failed to register terminate signal handlers!")?
            .recv()
            .await;
        Ok(())
    });
    let terminate_signal = Box::pin(async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .context("Failed to register terminate signal handlers!")?
            .recv()
            .await;
        Ok(())
    });
    futures::future::select_all([interrupt_signal, terminate_signal])
        .await
        .0
}

#[tokio::main]
async fn main() {
    let _logger = logging::init();
    let config = unwrap_or_def_verbose(store::load_config());
    if config.discord_bot_token.is_empty() {
        error!("No discord bot token configured");
        return;
    }

    let directory = Arc::new(SerenityDirectory::new(&config.discord_bot_token));
    let router = match Router::builder(config.router.clone(), directory.clone()).build() {
        Ok(router) => router,
        Err(e) => {
            error!("Failed to set up commands: {e}");
            return;
        }
    };
    if let Err(e) = units::load_all(&router).await {
        error!("Failed to set up commands: {e}");
        return;
    }
    let discord_task = tokio::spawn(start_discord(
        config.discord_bot_token.clone(),
        router,
        directory,
    ));

    info!("Running");
    let _ = terminate_on_signal().await.inspect_err(print_err);
    info!("Terminating.");
    discord_task.abort();
}
