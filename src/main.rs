use std::sync::Arc;

use teloxide::prelude::*;
use tracing_subscriber::EnvFilter;

mod bot;
mod config;
mod photos;
mod weather;

use config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("🌦 Starting weather bot...");

    // Load config; a missing credential stops us before polling starts
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration error: {}", e);
            return Err(e.into());
        }
    };
    tracing::info!("Config loaded. Weather provider: {}", config.owm_base_url);

    // Build shared application state
    let state = Arc::new(bot::AppState::new(config));

    // Create the Telegram bot
    let mut tg = Bot::new(&state.config.bot_token);
    if let Some(api_url) = &state.config.telegram_api_url {
        tg = tg.set_api_url(api_url.clone());
        tracing::info!("Using Bot API server at {}", api_url);
    }

    // A rejected token must stop us here, not inside the dispatcher
    let me = match tg.get_me().await {
        Ok(me) => me,
        Err(e) => {
            tracing::error!("Telegram rejected the bot credentials: {}", e);
            return Err(e.into());
        }
    };
    tracing::info!("Authorized as {} (id {})", me.user.first_name, me.user.id.0);

    bot::register_commands(&tg).await;

    // Build the dispatcher
    let handler = bot::build_handler();

    Dispatcher::builder(tg, handler)
        .dependencies(dptree::deps![state])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
