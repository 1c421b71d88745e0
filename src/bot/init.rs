use crate::bot::Handler;
use crate::utils::board::RequestBoard;
use crate::utils::config::Config;
use anyhow::Result;
use chrono::Utc;
use serenity::prelude::*;
use std::sync::Arc;
use std::time::Duration;

const SWEEP_INTERVAL: Duration = Duration::from_secs(10 * 60);

/// Initialize and start the Discord bot
pub async fn start_bot() -> Result<()> {
    tracing::info!("[INIT] Starting request board bot");

    let config = Config::from_env()?;
    let token = config.token.clone();
    let application_id = config.client_id;

    let handler = Handler::new(config);
    spawn_sweeper(Arc::clone(&handler.board));

    let mut client = Client::builder(token, GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES)
        .application_id(application_id)
        .event_handler(handler)
        .await?;

    if let Err(why) = client.start().await {
        tracing::error!("[ERROR] Discord client error: {why:?}");
    }

    Ok(())
}

/// Periodically drop sessions whose claim or completion window has passed.
fn spawn_sweeper(board: Arc<RequestBoard>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            let removed = board.sweep(Utc::now()).await;
            if removed > 0 {
                tracing::debug!(
                    "[BOARD] Swept {} closed requests, {} still tracked",
                    removed,
                    board.len().await
                );
            }
        }
    });
}
