//! Forecast cache: deterministic key derivation plus a TTL'd in-memory store.
//!
//! Keys bucket nearby lookups together: postal code + country when the
//! geocoder provides both, otherwise coordinates rounded to four decimal
//! places. The configured horizon is part of the key, so changing it simply
//! starts a new bucket and lets old entries age out.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::model::{Forecast, Location};

/// Every entry lives this long; expiry is absolute, not sliding.
pub const DEFAULT_TTL: Duration = Duration::from_secs(30 * 60);

/// Derive the cache key for a location at a given forecast horizon.
///
/// Postal-keyed when postal code and country code are both present and
/// non-blank (case-insensitive); coordinate-keyed otherwise. Two locations
/// whose coordinates agree to four decimal places share a bucket.
pub fn cache_key(location: &Location, horizon_days: u8) -> String {
    let postal = non_blank(location.postal_code.as_deref());
    let country = non_blank(location.country_code.as_deref());

    match (postal, country) {
        (Some(postal), Some(country)) => format!(
            "forecast:zip:{}-{}:d{}",
            country.to_lowercase(),
            postal.to_lowercase(),
            horizon_days
        ),
        _ => format!(
            "forecast:latlon:{:.4}_{:.4}:d{}",
            location.latitude, location.longitude, horizon_days
        ),
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

struct Entry {
    forecast: Forecast,
    expires_at: Instant,
}

/// Single-process forecast store with per-entry expiry.
///
/// Shared across concurrent requests behind an `Arc`; two simultaneous misses
/// on the same key may both fetch and overwrite, which is fine.
pub struct ForecastCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, Entry>>,
}

impl Default for ForecastCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl ForecastCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Look up a live entry. Expired entries are removed and report a miss.
    pub fn get(&self, key: &str) -> Option<Forecast> {
        self.get_at(key, Instant::now())
    }

    pub fn put(&self, key: impl Into<String>, forecast: Forecast) {
        self.put_at(key, forecast, Instant::now());
    }

    fn get_at(&self, key: &str, now: Instant) -> Option<Forecast> {
        let mut entries = self.entries.lock();
        match entries.get(key) {
            Some(entry) if entry.expires_at > now => Some(entry.forecast.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    fn put_at(&self, key: impl Into<String>, forecast: Forecast, now: Instant) {
        let entry = Entry {
            forecast,
            expires_at: now + self.ttl,
        };
        self.entries.lock().insert(key.into(), entry);
    }
}
