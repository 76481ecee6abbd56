use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ForecastError;

/// City the forecast was resolved to by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    /// ISO 3166-1 alpha-2 code, as delivered (e.g. "FR").
    pub country_code: String,
}

/// One day of the multi-day forecast. Temperatures are in °C (metric units).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayForecast {
    pub timestamp_seconds: i64,
    pub condition_id: u32,
    pub condition_description: String,
    pub temp_min: f64,
    pub temp_day: f64,
    pub temp_max: f64,
    pub humidity_percent: u8,
    pub wind_speed: f64,
    pub pressure_hpa: f64,
}

impl DayForecast {
    pub fn date(&self) -> Option<DateTime<Utc>> {
        unix_to_utc(self.timestamp_seconds)
    }
}

/// A successful forecast lookup. `days` keeps the API's chronological order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResponse {
    pub city: City,
    pub days: Vec<DayForecast>,
}

impl ForecastResponse {
    /// Parse the raw body of a `forecast/daily` response.
    pub fn from_json(body: &str) -> Result<Self, ForecastError> {
        let parsed: OwDailyResponse = serde_json::from_str(body)?;
        parsed.try_into()
    }
}

#[derive(Debug, Deserialize)]
struct OwCity {
    name: String,
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    id: u32,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwTemp {
    min: f64,
    day: f64,
    max: f64,
}

#[derive(Debug, Deserialize)]
struct OwDailyEntry {
    dt: i64,
    weather: Vec<OwWeather>,
    temp: OwTemp,
    humidity: u8,
    speed: f64,
    pressure: f64,
}

#[derive(Debug, Deserialize)]
struct OwDailyResponse {
    city: OwCity,
    list: Vec<OwDailyEntry>,
}

impl TryFrom<OwDailyResponse> for ForecastResponse {
    type Error = ForecastError;

    fn try_from(raw: OwDailyResponse) -> Result<Self, Self::Error> {
        let days = raw
            .list
            .into_iter()
            .map(DayForecast::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ForecastResponse {
            city: City { name: raw.city.name, country_code: raw.city.country },
            days,
        })
    }
}

impl TryFrom<OwDailyEntry> for DayForecast {
    type Error = ForecastError;

    fn try_from(entry: OwDailyEntry) -> Result<Self, Self::Error> {
        let weather = entry.weather.into_iter().next().ok_or_else(|| {
            ForecastError::InvalidPayload(format!("day {} has no weather condition", entry.dt))
        })?;

        Ok(DayForecast {
            timestamp_seconds: entry.dt,
            condition_id: weather.id,
            condition_description: weather.description,
            temp_min: entry.temp.min,
            temp_day: entry.temp.day,
            temp_max: entry.temp.max,
            humidity_percent: entry.humidity,
            wind_speed: entry.speed,
            pressure_hpa: entry.pressure,
        })
    }
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(ts, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARIS: &str = r#"{"city":{"name":"Paris","country":"FR"},"list":[{"dt":1700000000,"weather":[{"id":800,"description":"clear sky"}],"temp":{"min":5,"day":10,"max":15},"humidity":60,"speed":12,"pressure":1013}]}"#;

    #[test]
    fn parses_daily_forecast() {
        let resp = ForecastResponse::from_json(PARIS).expect("valid payload");

        assert_eq!(resp.city.name, "Paris");
        assert_eq!(resp.city.country_code, "FR");
        assert_eq!(resp.days.len(), 1);

        let day = &resp.days[0];
        assert_eq!(day.condition_id, 800);
        assert_eq!(day.condition_description, "clear sky");
        assert_eq!(day.temp_day, 10.0);
        assert_eq!(day.humidity_percent, 60);
        assert_eq!(day.pressure_hpa, 1013.0);
    }

    #[test]
    fn keeps_day_order() {
        let body = r#"{"city":{"name":"Lyon","country":"FR"},"list":[
            {"dt":300,"weather":[{"id":500,"description":"pluie"}],"temp":{"min":1,"day":2,"max":3},"humidity":1,"speed":1,"pressure":1},
            {"dt":100,"weather":[{"id":800,"description":"ciel"}],"temp":{"min":1,"day":2,"max":3},"humidity":1,"speed":1,"pressure":1},
            {"dt":200,"weather":[{"id":600,"description":"neige"}],"temp":{"min":1,"day":2,"max":3},"humidity":1,"speed":1,"pressure":1}
        ]}"#;

        let resp = ForecastResponse::from_json(body).unwrap();
        let stamps: Vec<i64> = resp.days.iter().map(|d| d.timestamp_seconds).collect();

        assert_eq!(stamps, vec![300, 100, 200]);
    }

    #[test]
    fn ignores_extra_api_fields() {
        let body = r#"{"cod":"200","city":{"id":1,"name":"Nice","country":"FR","population":0},"cnt":1,"list":[{"dt":1,"sunrise":2,"weather":[{"id":801,"main":"Clouds","description":"peu nuageux","icon":"02d"}],"temp":{"min":1,"day":2,"max":3,"night":1,"eve":2,"morn":1},"humidity":1,"speed":1.5,"deg":180,"pressure":1000.5,"clouds":20}]}"#;

        let resp = ForecastResponse::from_json(body).unwrap();
        assert_eq!(resp.days[0].wind_speed, 1.5);
    }

    #[test]
    fn day_without_weather_is_invalid() {
        let body = r#"{"city":{"name":"Nice","country":"FR"},"list":[{"dt":1,"weather":[],"temp":{"min":1,"day":2,"max":3},"humidity":1,"speed":1,"pressure":1}]}"#;

        let err = ForecastResponse::from_json(body).unwrap_err();
        assert!(matches!(err, ForecastError::InvalidPayload(_)));
    }

    #[test]
    fn garbage_body_is_malformed() {
        let err = ForecastResponse::from_json("<html>oops</html>").unwrap_err();
        assert!(matches!(err, ForecastError::Malformed(_)));
    }

    #[test]
    fn date_is_utc() {
        let resp = ForecastResponse::from_json(PARIS).unwrap();
        let date = resp.days[0].date().unwrap();

        assert_eq!(date.to_rfc3339(), "2023-11-14T22:13:20+00:00");
    }
}
