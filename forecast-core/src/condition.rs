//! WMO weather code classification.
//!
//! Open-Meteo reports current conditions as WMO code table 4677 values. The
//! display layer only needs a coarse bucket per code, plus day/night awareness
//! for clear skies.

use serde::{Deserialize, Serialize};

/// Coarse weather condition, used for display theming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Sunny,
    ClearNight,
    Cloudy,
    Drizzle,
    Rain,
    Snow,
    Fog,
    Thunder,
}

/// Ordered code table, first match wins. Code 0 and anything unlisted fall
/// through to the day/night default.
const CONDITION_TABLE: &[(Condition, &[i64])] = &[
    (Condition::Sunny, &[1, 2]),
    (Condition::Cloudy, &[3]),
    (Condition::Fog, &[45, 48]),
    (Condition::Drizzle, &[51, 53, 55, 56, 57]),
    (Condition::Rain, &[61, 63, 65, 66, 67, 80, 81, 82]),
    (Condition::Snow, &[71, 73, 75, 77, 85, 86]),
    (Condition::Thunder, &[95, 96, 99]),
];

/// Map a WMO weather code to a condition. Total over all inputs: a missing
/// code is treated as 0, and unmapped codes use the day/night default.
pub fn classify(code: Option<i64>, is_day: u8) -> Condition {
    let code = code.unwrap_or(0);
    if code == 0 {
        return default_condition(is_day);
    }

    for (condition, codes) in CONDITION_TABLE {
        if codes.contains(&code) {
            return *condition;
        }
    }

    default_condition(is_day)
}

fn default_condition(is_day: u8) -> Condition {
    if is_day == 1 {
        Condition::Sunny
    } else {
        Condition::ClearNight
    }
}

impl Condition {
    /// Human-readable label. `is_day` only matters for `Sunny`: a clear sky
    /// classified as sunny but displayed at night reads "Clear".
    pub fn label(&self, is_day: u8) -> &'static str {
        if *self == Condition::Sunny && is_day != 1 {
            return "Clear";
        }

        match self {
            Condition::Sunny => "Sunny",
            Condition::ClearNight => "Clear night",
            Condition::Cloudy => "Cloudy",
            Condition::Drizzle => "Drizzle",
            Condition::Rain => "Rain",
            Condition::Snow => "Snow",
            Condition::Fog => "Fog",
            Condition::Thunder => "Thunderstorms",
        }
    }

    pub fn emoji(&self, is_day: u8) -> &'static str {
        if *self == Condition::Sunny && is_day != 1 {
            return "🌙";
        }

        match self {
            Condition::Sunny => "☀️",
            Condition::ClearNight => "🌙",
            Condition::Cloudy => "☁️",
            Condition::Drizzle => "🌦️",
            Condition::Rain => "🌧️",
            Condition::Snow => "🌨️",
            Condition::Fog => "🌫️",
            Condition::Thunder => "⛈️",
        }
    }
}
