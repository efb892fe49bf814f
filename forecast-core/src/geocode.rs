//! Free-text address resolution via the Nominatim (OpenStreetMap) search API.
//! Free, no API key; requests must carry an identifying user-agent.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT, USER_AGENT};
use serde::Deserialize;
use std::fmt::Debug;
use thiserror::Error;

use crate::model::Location;
use crate::weather::truncate_body;

const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/search";

/// Geocoding failure. Distinct from "no match", which is a successful lookup
/// with an empty result list.
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("Failed to send request to Nominatim: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Nominatim request failed with status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Failed to parse Nominatim response: {0}")]
    Parse(String),
}

/// Resolves free text to a location. `Ok(None)` means the provider had no
/// match for the query.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    async fn geocode(&self, query: &str) -> Result<Option<Location>, GeocodeError>;
}

#[derive(Debug, Clone)]
pub struct NominatimClient {
    http: Client,
    base_url: String,
}

impl Default for NominatimClient {
    fn default() -> Self {
        Self::new()
    }
}

impl NominatimClient {
    pub fn new() -> Self {
        Self::with_base_url(NOMINATIM_URL)
    }

    /// Point the client at a different endpoint, e.g. a local mock server.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
    display_name: String,
    #[serde(default)]
    address: SearchAddress,
}

#[derive(Debug, Default, Deserialize)]
struct SearchAddress {
    postcode: Option<String>,
    country_code: Option<String>,
}

#[async_trait]
impl Geocoder for NominatimClient {
    async fn geocode(&self, query: &str) -> Result<Option<Location>, GeocodeError> {
        let res = self
            .http
            .get(&self.base_url)
            .query(&[
                ("q", query),
                ("format", "json"),
                ("addressdetails", "1"),
                ("limit", "1"),
            ])
            .header(USER_AGENT, crate::USER_AGENT)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(GeocodeError::Status {
                status,
                body: truncate_body(&body),
            });
        }

        let hits: Vec<SearchHit> = serde_json::from_str(&body)
            .map_err(|e| GeocodeError::Parse(e.to_string()))?;

        let Some(first) = hits.into_iter().next() else {
            tracing::debug!(query, "geocoding returned no matches");
            return Ok(None);
        };

        let latitude = parse_coordinate(&first.lat, "lat")?;
        let longitude = parse_coordinate(&first.lon, "lon")?;

        Ok(Some(Location {
            display_name: first.display_name,
            postal_code: first.address.postcode,
            country_code: first.address.country_code.map(|cc| cc.to_lowercase()),
            latitude,
            longitude,
        }))
    }
}

// Nominatim serializes coordinates as decimal-degree strings.
fn parse_coordinate(value: &str, field: &str) -> Result<f64, GeocodeError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|e| GeocodeError::Parse(format!("invalid {field} {value:?}: {e}")))
}
