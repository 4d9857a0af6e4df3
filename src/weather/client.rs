use reqwest::{Client, StatusCode};

use super::reading::{OwmCurrentResponse, WeatherReading};
use super::Location;

/// Why a current-weather lookup did not produce a reading.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("request to weather provider failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("weather provider answered with status {0}")]
    Status(StatusCode),
    #[error("unexpected weather payload: {0}")]
    Malformed(String),
}

impl WeatherError {
    /// Text shown to the chat instead of a forecast.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Status(_) => "❌ Ошибка при получении данных.",
            Self::Request(_) | Self::Malformed(_) => "⚠️ Ошибка при получении данных о погоде.",
        }
    }
}

pub struct WeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl WeatherClient {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }

    /// Fetch current conditions at `location` (metric units, Russian descriptions).
    pub async fn current(&self, location: &Location) -> Result<WeatherReading, WeatherError> {
        let lat = location.lat.to_string();
        let lon = location.lon.to_string();

        let resp = self
            .client
            .get(format!("{}/data/2.5/weather", self.base_url))
            .query(&[
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
                ("lang", "ru"),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!("OpenWeatherMap error ({}): {}", status, truncate(&body, 200));
            return Err(WeatherError::Status(status));
        }

        let body = resp.text().await?;
        let payload: OwmCurrentResponse =
            serde_json::from_str(&body).map_err(|e| WeatherError::Malformed(e.to_string()))?;

        payload
            .into_reading()
            .ok_or_else(|| WeatherError::Malformed("empty `weather` array".to_string()))
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
