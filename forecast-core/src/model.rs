use serde::{Deserialize, Serialize};

use crate::condition::Condition;

/// A geocoded location. Produced once per lookup; only keys and forecasts
/// derived from it are cached, never the location itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub display_name: String,
    pub postal_code: Option<String>,
    pub country_code: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

/// One day of the forecast series. Temperatures are rounded to whole degrees
/// Celsius; `None` means the provider had no value for that day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyEntry {
    pub date: String,
    pub min_c: Option<i32>,
    pub max_c: Option<i32>,
}

/// Normalized forecast, immutable once built and cached by value.
///
/// All temperatures are pre-rounded for display. Absent upstream values stay
/// `None` through every conversion step; they are never defaulted to zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Forecast {
    pub current_c: Option<i32>,
    pub current_f: Option<i32>,
    pub today_high_c: Option<i32>,
    pub today_low_c: Option<i32>,
    pub daily: Vec<DailyEntry>,
    pub weather_code: Option<i64>,
    /// 1 for day, 0 for night.
    pub is_day: u8,
    pub condition: Condition,
}
