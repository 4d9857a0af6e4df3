use serde::Deserialize;

use super::Location;

/// Current conditions as returned by one provider call.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReading {
    pub description: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: u8,
}

impl WeatherReading {
    /// Render the reading into the chat reply for `location`.
    pub fn render(&self, location: &Location) -> String {
        format!(
            "🌆 Погода в {}:\n\
             ☁️ {}\n\
             🌡️ {}°C (ощущается как {}°C)\n\
             💧 Влажность: {}%",
            location.name,
            capitalize(&self.description),
            self.temperature,
            self.feels_like,
            self.humidity,
        )
    }
}

// ── Provider payload ───────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct OwmCurrentResponse {
    weather: Vec<OwmWeather>,
    main: OwmMain,
}

#[derive(Debug, Deserialize)]
struct OwmWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
}

impl OwmCurrentResponse {
    /// `None` when the provider sent an empty `weather` array.
    pub(crate) fn into_reading(self) -> Option<WeatherReading> {
        let description = self.weather.into_iter().next()?.description;
        Some(WeatherReading {
            description,
            temperature: self.main.temp,
            feels_like: self.main.feels_like,
            humidity: self.main.humidity,
        })
    }
}

/// Upper-case the first character and lower-case the rest.
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
