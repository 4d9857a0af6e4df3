pub mod client;
pub mod reading;

pub use client::WeatherClient;

/// A fixed point the bot reports weather for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    /// City name as it reads after "в" ("Погода в Москве").
    pub name: &'static str,
    pub lat: f64,
    pub lon: f64,
}

pub const MOSCOW: Location = Location {
    name: "Москве",
    lat: 55.7558,
    lon: 37.6173,
};
