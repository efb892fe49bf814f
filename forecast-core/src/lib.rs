//! Core library for the `forecast` CLI.
//!
//! This crate defines:
//! - Geocoding and weather API clients
//! - Forecast normalization and condition classification
//! - A TTL'd in-memory forecast cache
//! - The orchestrating service that wires them together
//!
//! It is used by `forecast-cli`, but can also be reused by other binaries or services.

pub mod cache;
pub mod condition;
pub mod config;
pub mod geocode;
pub mod model;
pub mod normalize;
pub mod service;
pub mod weather;

pub use cache::{ForecastCache, cache_key};
pub use condition::Condition;
pub use config::Config;
pub use geocode::{GeocodeError, Geocoder, NominatimClient};
pub use model::{DailyEntry, Forecast, Location};
pub use normalize::normalize;
pub use service::{ForecastReport, ForecastService, Outcome};
pub use weather::{FetchError, ForecastProvider, OpenMeteoClient};

/// User-agent sent on every outbound API request. Nominatim's usage policy
/// requires an identifying value.
pub(crate) const USER_AGENT: &str = "forecast-cli/0.1 (weather forecast client)";
