use std::sync::Arc;
use teloxide::macros::BotCommands;
use teloxide::prelude::*;
use teloxide::types::{InputFile, ParseMode};

use crate::bot::{AppState, HandlerError};
use crate::photos::PHOTO_CAPTION;
use crate::weather::{WeatherClient, MOSCOW};

#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase", description = "Команды:")]
pub enum BotCommand {
    #[command(description = "Начать")]
    Start,
    #[command(description = "Помощь")]
    Help,
    #[command(description = "Погода в Москве")]
    Weather,
    #[command(description = "Случайное фото")]
    Photo,
}

/// Greeting for `/start`, HTML formatted.
pub fn start_text() -> &'static str {
    "<b>Привет!</b> Я бот погоды.\n\
     Отправь /weather для прогноза в <i>Москве</i>"
}

pub fn help_text() -> &'static str {
    "Команды:\n\
     /start - Начать\n\
     /help - Помощь\n\
     /weather - Погода в Москве\n\
     /photo - Случайное фото"
}

/// Reply for `/weather`. Provider failures are logged and turned into an error line.
pub async fn weather_reply(client: &WeatherClient) -> String {
    match client.current(&MOSCOW).await {
        Ok(reading) => reading.render(&MOSCOW),
        Err(e) => {
            tracing::error!("Weather request failed: {}", e);
            e.user_message().to_string()
        }
    }
}

pub async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: BotCommand,
    state: Arc<AppState>,
) -> Result<(), HandlerError> {
    tracing::info!("Command {:?} in chat {}", cmd, msg.chat.id.0);

    match cmd {
        BotCommand::Start => {
            bot.send_message(msg.chat.id, start_text())
                .parse_mode(ParseMode::Html)
                .await?;
        }

        BotCommand::Help => {
            bot.send_message(msg.chat.id, help_text()).await?;
        }

        BotCommand::Weather => {
            let reply = weather_reply(&state.weather).await;
            bot.send_message(msg.chat.id, reply).await?;
        }

        BotCommand::Photo => {
            let photo = InputFile::url(reqwest::Url::parse(state.photos.pick())?);
            bot.send_photo(msg.chat.id, photo)
                .caption(PHOTO_CAPTION)
                .await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use std::io::Write;
    use std::sync::Mutex;
    use teloxide::utils::command::BotCommands as _;
    use tracing_subscriber::fmt::MakeWriter;

    /// In-memory sink for formatted log lines.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLogs {
        type Writer = CapturedLogs;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    /// Route this thread's tracing output into a buffer until the guard drops.
    fn capture_logs() -> (CapturedLogs, tracing::subscriber::DefaultGuard) {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .finish();
        let guard = tracing::subscriber::set_default(subscriber);
        (logs, guard)
    }

    #[test]
    fn parses_known_commands() {
        let parse = |text| BotCommand::parse(text, "weather_bot").ok();

        assert_eq!(parse("/start"), Some(BotCommand::Start));
        assert_eq!(parse("/help"), Some(BotCommand::Help));
        assert_eq!(parse("/weather@weather_bot"), Some(BotCommand::Weather));
        assert_eq!(parse("/photo"), Some(BotCommand::Photo));
        assert_eq!(parse("/forecast"), None);
    }

    #[test]
    fn start_and_help_are_fixed() {
        assert_eq!(
            start_text(),
            "<b>Привет!</b> Я бот погоды.\nОтправь /weather для прогноза в <i>Москве</i>"
        );
        assert_eq!(
            help_text(),
            "Команды:\n/start - Начать\n/help - Помощь\n/weather - Погода в Москве\n/photo - Случайное фото"
        );
    }

    #[tokio::test]
    async fn weather_reply_renders_reading() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/data/2.5/weather")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(
                r#"{"weather": [{"description": "небольшой снег"}],
                    "main": {"temp": -2.3, "feels_like": -6.7, "humidity": 93}}"#,
            )
            .create_async()
            .await;

        let reply = weather_reply(&WeatherClient::new("k", server.url())).await;

        assert_eq!(
            reply,
            "🌆 Погода в Москве:\n☁️ Небольшой снег\n🌡️ -2.3°C (ощущается как -6.7°C)\n💧 Влажность: 93%"
        );
    }

    #[tokio::test]
    async fn weather_reply_on_bad_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/data/2.5/weather")
            .match_query(Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let (logs, _guard) = capture_logs();
        let reply = weather_reply(&WeatherClient::new("k", server.url())).await;

        assert_eq!(reply, "❌ Ошибка при получении данных.");
        let logs = logs.contents();
        assert!(logs.contains("ERROR"));
        assert!(logs.contains("Weather request failed"));
        assert!(logs.contains("500"));
    }

    #[tokio::test]
    async fn weather_reply_on_network_failure() {
        let (logs, _guard) = capture_logs();
        let reply = weather_reply(&WeatherClient::new("k", "http://127.0.0.1:1")).await;

        assert_eq!(reply, "⚠️ Ошибка при получении данных о погоде.");
        let logs = logs.contents();
        assert!(logs.contains("Weather request failed: request to weather provider failed"));
    }
}
