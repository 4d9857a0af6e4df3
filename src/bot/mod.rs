pub mod commands;

use teloxide::dispatching::{HandlerExt, UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use crate::config::AppConfig;
use crate::photos::PhotoPool;
use crate::weather::WeatherClient;

pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state, accessible from all handlers.
pub struct AppState {
    pub config: AppConfig,
    pub weather: WeatherClient,
    pub photos: PhotoPool,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let weather = WeatherClient::new(config.owm_api_key.clone(), config.owm_base_url.clone());
        Self {
            config,
            weather,
            photos: PhotoPool::new(),
        }
    }
}

/// Build the teloxide update handler tree.
pub fn build_handler() -> UpdateHandler<HandlerError> {
    let command_handler = Update::filter_message()
        .filter_command::<commands::BotCommand>()
        .endpoint(commands::handle_command);

    dptree::entry().branch(command_handler)
}

/// Publish the command list so clients can offer completions.
pub async fn register_commands(bot: &Bot) {
    match bot.set_my_commands(commands::BotCommand::bot_commands()).await {
        Ok(_) => tracing::info!("Bot commands registered."),
        Err(e) => tracing::warn!("Failed to register bot commands: {}", e),
    }
}
