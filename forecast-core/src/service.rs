//! End-to-end orchestration: address validation, geocoding, cache lookup,
//! weather fetch, normalization and cache write, in a single linear pass with
//! no retries.

use std::sync::Arc;

use crate::cache::{ForecastCache, cache_key};
use crate::config::Config;
use crate::geocode::{Geocoder, NominatimClient};
use crate::model::Forecast;
use crate::normalize::normalize;
use crate::weather::{FetchError, ForecastProvider, OpenMeteoClient};

/// Terminal outcome of one request. Exactly one per call; nothing escapes as
/// a panic or an unhandled error.
#[derive(Debug)]
pub enum Outcome {
    /// Empty or all-whitespace address; rejected before any network call.
    InvalidAddress,
    /// Geocoding yielded no usable location.
    LocationNotFound,
    /// The weather API failed; never downgraded to a default forecast.
    Unavailable(FetchError),
    Report(ForecastReport),
}

#[derive(Debug, Clone)]
pub struct ForecastReport {
    pub location_name: String,
    pub forecast: Forecast,
    pub from_cache: bool,
}

pub struct ForecastService {
    geocoder: Box<dyn Geocoder>,
    provider: Box<dyn ForecastProvider>,
    cache: Arc<ForecastCache>,
    horizon_days: u8,
}

impl ForecastService {
    /// Service wired to the real Nominatim and Open-Meteo endpoints. The cache
    /// is injected so callers control its lifetime and tests get a fresh one.
    pub fn new(config: &Config, cache: Arc<ForecastCache>) -> Self {
        Self::with_parts(
            Box::new(NominatimClient::new()),
            Box::new(OpenMeteoClient::new()),
            cache,
            config.forecast_days,
        )
    }

    pub fn with_parts(
        geocoder: Box<dyn Geocoder>,
        provider: Box<dyn ForecastProvider>,
        cache: Arc<ForecastCache>,
        horizon_days: u8,
    ) -> Self {
        Self {
            geocoder,
            provider,
            cache,
            horizon_days,
        }
    }

    pub async fn handle(&self, address: &str) -> Outcome {
        let address = address.trim();
        if address.is_empty() {
            return Outcome::InvalidAddress;
        }

        let location = match self.geocoder.geocode(address).await {
            Ok(Some(location)) => location,
            Ok(None) => return Outcome::LocationNotFound,
            Err(e) => {
                // Provider trouble and "no match" surface the same to callers.
                tracing::warn!(error = %e, "geocoding failed");
                return Outcome::LocationNotFound;
            }
        };

        let key = cache_key(&location, self.horizon_days);

        if let Some(forecast) = self.cache.get(&key) {
            tracing::debug!(%key, "cache hit");
            return Outcome::Report(ForecastReport {
                location_name: location.display_name,
                forecast,
                from_cache: true,
            });
        }

        tracing::debug!(%key, "cache miss, fetching forecast");
        let raw = match self
            .provider
            .fetch_raw(location.latitude, location.longitude, self.horizon_days)
            .await
        {
            Ok(raw) => raw,
            Err(e) => return Outcome::Unavailable(e),
        };

        let forecast = normalize(&raw);
        self.cache.put(key, forecast.clone());

        Outcome::Report(ForecastReport {
            location_name: location.display_name,
            forecast,
            from_cache: false,
        })
    }
}
