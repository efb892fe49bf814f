//! Converts raw Open-Meteo payloads into the stable internal forecast shape:
//! whole-degree temperatures, a Fahrenheit conversion of the current reading,
//! today's high/low, and the date-indexed daily series.

use crate::condition::classify;
use crate::model::{DailyEntry, Forecast};
use crate::weather::RawForecast;

/// Build a [`Forecast`] from a raw payload.
///
/// Rounding is half-away-from-zero (`f64::round`) for every displayed
/// temperature. Fahrenheit is converted from the unrounded Celsius value and
/// rounded afterwards. Absent upstream values stay absent.
pub fn normalize(raw: &RawForecast) -> Forecast {
    let current_c = raw.current.temperature_c();
    let is_day = raw.current.is_day.0;

    let daily: Vec<DailyEntry> = raw
        .daily
        .time
        .iter()
        .enumerate()
        .map(|(i, date)| DailyEntry {
            date: date.clone(),
            min_c: round(temp_at(&raw.daily.temperature_2m_min, i)),
            max_c: round(temp_at(&raw.daily.temperature_2m_max, i)),
        })
        .collect();

    let today = daily.first();

    Forecast {
        current_c: round(current_c),
        current_f: round(current_c.map(c_to_f)),
        today_high_c: today.and_then(|d| d.max_c),
        today_low_c: today.and_then(|d| d.min_c),
        daily,
        weather_code: raw.current.weather_code,
        is_day,
        condition: classify(raw.current.weather_code, is_day),
    }
}

fn c_to_f(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

fn round(temp: Option<f64>) -> Option<i32> {
    temp.map(|t| t.round() as i32)
}

// Temp arrays run parallel to `daily.time`; a short or null-holed array
// means the value is absent for that day.
fn temp_at(values: &[Option<f64>], index: usize) -> Option<f64> {
    values.get(index).copied().flatten()
}
