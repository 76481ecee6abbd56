use async_trait::async_trait;

use crate::{ForecastError, ForecastResponse};

pub mod openweather;

pub use openweather::OpenWeatherClient;

pub const UNITS_METRIC: &str = "metric";
pub const LANG_FR: &str = "fr";

/// Query parameters sent to the forecast endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastQuery {
    pub city: String,
    pub api_key: String,
    pub units: &'static str,
    pub lang: &'static str,
}

impl ForecastQuery {
    /// Build a query from raw user input. The city is lower-cased; nothing else
    /// is normalised, so an empty string is a legal (if pointless) query.
    pub fn new(city_input: &str, api_key: &str) -> Self {
        Self {
            city: city_input.to_lowercase(),
            api_key: api_key.to_owned(),
            units: UNITS_METRIC,
            lang: LANG_FR,
        }
    }

    /// Parameters in the order they are sent.
    pub fn params(&self) -> [(&'static str, &str); 4] {
        [
            ("q", self.city.as_str()),
            ("APPID", self.api_key.as_str()),
            ("units", self.units),
            ("lang", self.lang),
        ]
    }

    /// `key=value` pairs joined with `&`, each value percent-encoded on its own.
    pub fn query_string(&self) -> String {
        self.params()
            .iter()
            .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Anything able to resolve a city query into a forecast.
///
/// Futures are not required to be `Send`: the search pipeline runs on a single
/// UI thread.
#[async_trait(?Send)]
pub trait ForecastSource {
    async fn fetch(&self, query: &ForecastQuery) -> Result<ForecastResponse, ForecastError>;
}
