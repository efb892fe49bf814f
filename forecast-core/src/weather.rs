//! Open-Meteo forecast API client.
//!
//! Fetches current conditions (temperature, WMO weather code, day/night flag)
//! plus a daily min/max series, in the location's local timezone as resolved
//! by the provider.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT, USER_AGENT};
use serde::{Deserialize, Deserializer};
use std::fmt::Debug;
use thiserror::Error;

const OPEN_METEO_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Weather retrieval failure. Non-success statuses and unparsable bodies are
/// never papered over with default values.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to send request to Open-Meteo: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Open-Meteo request failed with status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Failed to parse Open-Meteo response: {0}")]
    Parse(String),
}

/// Fetches the raw forecast payload for a coordinate pair.
#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    async fn fetch_raw(
        &self,
        latitude: f64,
        longitude: f64,
        horizon_days: u8,
    ) -> Result<RawForecast, FetchError>;
}

/// Day/night flag as reported by the provider. Accepts booleans, numbers and
/// numeric strings; anything that does not coerce to exactly 1 counts as night.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IsDay(pub u8);

impl<'de> Deserialize<'de> for IsDay {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde_json::Value;

        let coerced = match Value::deserialize(deserializer)? {
            Value::Bool(b) => i64::from(b),
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f as i64))
                .unwrap_or(0),
            Value::String(s) => s.trim().parse::<i64>().unwrap_or(0),
            _ => 0,
        };

        Ok(IsDay(u8::from(coerced == 1)))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RawCurrent {
    pub temperature_2m: Option<f64>,
    /// Legacy key used by older API versions.
    pub temperature: Option<f64>,
    pub weather_code: Option<i64>,
    #[serde(default)]
    pub is_day: IsDay,
}

impl RawCurrent {
    pub fn temperature_c(&self) -> Option<f64> {
        self.temperature_2m.or(self.temperature)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RawDaily {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(default)]
    pub temperature_2m_max: Vec<Option<f64>>,
    #[serde(default)]
    pub temperature_2m_min: Vec<Option<f64>>,
}

/// Raw API payload: current conditions plus index-aligned daily arrays.
#[derive(Debug, Default, Deserialize)]
pub struct RawForecast {
    #[serde(default)]
    pub current: RawCurrent,
    #[serde(default)]
    pub daily: RawDaily,
}

#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    http: Client,
    base_url: String,
}

impl Default for OpenMeteoClient {
    fn default() -> Self {
        Self::new()
    }
}

impl OpenMeteoClient {
    pub fn new() -> Self {
        Self::with_base_url(OPEN_METEO_URL)
    }

    /// Point the client at a different endpoint, e.g. a local mock server.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl ForecastProvider for OpenMeteoClient {
    async fn fetch_raw(
        &self,
        latitude: f64,
        longitude: f64,
        horizon_days: u8,
    ) -> Result<RawForecast, FetchError> {
        let res = self
            .http
            .get(&self.base_url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                (
                    "current",
                    "temperature_2m,weather_code,is_day".to_string(),
                ),
                (
                    "daily",
                    "temperature_2m_max,temperature_2m_min".to_string(),
                ),
                ("timezone", "auto".to_string()),
                ("forecast_days", horizon_days.to_string()),
            ])
            .header(USER_AGENT, crate::USER_AGENT)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(FetchError::Status {
                status,
                body: truncate_body(&body),
            });
        }

        serde_json::from_str(&body).map_err(|e| FetchError::Parse(e.to_string()))
    }
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn is_day_of(value: serde_json::Value) -> u8 {
        let payload = serde_json::json!({ "current": { "is_day": value } });
        let raw: RawForecast = serde_json::from_value(payload).unwrap();
        raw.current.is_day.0
    }

    #[test]
    fn is_day_accepts_bool_int_and_string() {
        assert_eq!(is_day_of(serde_json::json!(true)), 1);
        assert_eq!(is_day_of(serde_json::json!(1)), 1);
        assert_eq!(is_day_of(serde_json::json!("1")), 1);

        assert_eq!(is_day_of(serde_json::json!(false)), 0);
        assert_eq!(is_day_of(serde_json::json!(0)), 0);
        assert_eq!(is_day_of(serde_json::json!("0")), 0);
    }

    #[test]
    fn is_day_coerces_junk_to_night() {
        assert_eq!(is_day_of(serde_json::json!("noon")), 0);
        assert_eq!(is_day_of(serde_json::json!(null)), 0);
        assert_eq!(is_day_of(serde_json::json!(2)), 0);
    }

    #[test]
    fn current_prefers_modern_temperature_key() {
        let payload = serde_json::json!({
            "current": { "temperature_2m": 21.3, "temperature": 99.0 }
        });
        let raw: RawForecast = serde_json::from_value(payload).unwrap();
        assert_eq!(raw.current.temperature_c(), Some(21.3));
    }

    #[test]
    fn current_falls_back_to_legacy_temperature_key() {
        let payload = serde_json::json!({ "current": { "temperature": 18.5 } });
        let raw: RawForecast = serde_json::from_value(payload).unwrap();
        assert_eq!(raw.current.temperature_c(), Some(18.5));
    }

    #[test]
    fn daily_arrays_tolerate_nulls() {
        let payload = serde_json::json!({
            "daily": {
                "time": ["2025-09-04", "2025-09-05"],
                "temperature_2m_max": [27.2, null],
                "temperature_2m_min": [null, 17.9]
            }
        });
        let raw: RawForecast = serde_json::from_value(payload).unwrap();
        assert_eq!(raw.daily.temperature_2m_max, vec![Some(27.2), None]);
        assert_eq!(raw.daily.temperature_2m_min, vec![None, Some(17.9)]);
    }

    #[tokio::test]
    async fn sends_expected_query_parameters() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("current", "temperature_2m,weather_code,is_day"))
            .and(query_param("daily", "temperature_2m_max,temperature_2m_min"))
            .and(query_param("timezone", "auto"))
            .and(query_param("forecast_days", "8"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "current": { "temperature_2m": 20.0, "weather_code": 0, "is_day": 1 },
                "daily": {
                    "time": ["2025-09-04"],
                    "temperature_2m_max": [25.0],
                    "temperature_2m_min": [15.0]
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = OpenMeteoClient::with_base_url(server.uri());
        let raw = client.fetch_raw(40.7, -74.0, 8).await.unwrap();
        assert_eq!(raw.current.temperature_c(), Some(20.0));
        assert_eq!(raw.daily.time.len(), 1);
    }

    #[tokio::test]
    async fn non_success_status_carries_the_status_code() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
            .mount(&server)
            .await;

        let client = OpenMeteoClient::with_base_url(server.uri());
        let err = client.fetch_raw(0.0, 0.0, 8).await.unwrap_err();
        match err {
            FetchError::Status { status, body } => {
                assert_eq!(status.as_u16(), 500);
                assert_eq!(body, "oops");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_json_is_a_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not-json"))
            .mount(&server)
            .await;

        let client = OpenMeteoClient::with_base_url(server.uri());
        let err = client.fetch_raw(0.0, 0.0, 8).await.unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
    }

    #[test]
    fn truncate_body_caps_long_bodies() {
        let long = "x".repeat(500);
        let truncated = truncate_body(&long);
        assert!(truncated.ends_with("..."));
        assert!(truncated.len() <= 204);
        assert_eq!(truncate_body("short"), "short");
    }
}
