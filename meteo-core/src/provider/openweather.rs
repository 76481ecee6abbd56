use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::{ForecastError, ForecastResponse};

use super::{ForecastQuery, ForecastSource};

pub const DEFAULT_ENDPOINT: &str = "https://api.openweathermap.org/data/2.5/forecast/daily";

/// Client for the OpenWeather daily forecast endpoint.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    endpoint: String,
    days: Option<u8>,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new() -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT)
    }

    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self { endpoint: endpoint.into(), days: None, http: Client::new() }
    }

    /// Ask for a specific number of days (`cnt`) instead of the API default.
    pub fn with_days(mut self, days: u8) -> Self {
        self.days = Some(days);
        self
    }

    pub fn request_url(&self, query: &ForecastQuery) -> String {
        let mut url = format!("{}?{}", self.endpoint, query.query_string());
        if let Some(days) = self.days {
            url.push_str(&format!("&cnt={days}"));
        }
        url
    }
}

impl Default for OpenWeatherClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl ForecastSource for OpenWeatherClient {
    async fn fetch(&self, query: &ForecastQuery) -> Result<ForecastResponse, ForecastError> {
        tracing::info!(city = %query.city, "requesting daily forecast");

        let res = self.http.get(self.request_url(query)).send().await?;

        let status = res.status();
        let body = res.text().await?;

        tracing::debug!(%status, body = %truncate_body(&body), "forecast response");

        classify_status(status)?;
        ForecastResponse::from_json(&body)
    }
}

/// Map a non-200 status onto the failure taxonomy.
pub fn classify_status(status: StatusCode) -> Result<(), ForecastError> {
    match status {
        StatusCode::OK => Ok(()),
        StatusCode::NOT_FOUND => Err(ForecastError::CityNotFound),
        other => Err(ForecastError::Status(other.as_u16())),
    }
}

fn truncate_body(body: &str) -> &str {
    const MAX: usize = 2000;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
