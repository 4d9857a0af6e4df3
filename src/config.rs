use reqwest::Url;

const DEFAULT_OWM_BASE_URL: &str = "https://api.openweathermap.org";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    Missing(&'static str),
    #[error("environment variable {0} is not a valid URL: {1}")]
    InvalidUrl(&'static str, #[source] url::ParseError),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bot_token: String,
    pub owm_api_key: String,

    /// Base URL of the OpenWeatherMap API, without a trailing slash
    pub owm_base_url: String,
    /// Alternate Bot API server, e.g. a local `telegram-bot-api`
    pub telegram_api_url: Option<Url>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));
        let parse_url = |key: &'static str, raw: &str| {
            Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidUrl(key, e))
        };

        let owm_base_url = match get("OWM_BASE_URL") {
            Some(raw) => {
                parse_url("OWM_BASE_URL", &raw)?;
                raw.trim().trim_end_matches('/').to_string()
            }
            None => DEFAULT_OWM_BASE_URL.to_string(),
        };

        let telegram_api_url = get("TELEGRAM_API_URL")
            .map(|raw| parse_url("TELEGRAM_API_URL", &raw))
            .transpose()?;

        Ok(Self {
            bot_token: require("BOT_TOKEN")?,
            owm_api_key: require("OWM_API_KEY")?,
            owm_base_url,
            telegram_api_url,
        })
    }
}
