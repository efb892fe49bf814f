//! Condition-themed terminal rendering of a forecast report.

use chrono::NaiveDate;
use forecast_core::{Condition, ForecastReport};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

/// ANSI foreground color per condition; the terminal equivalent of the
/// per-condition page theme.
fn theme_color(condition: Condition) -> &'static str {
    match condition {
        Condition::Sunny => "\x1b[33m",      // yellow
        Condition::ClearNight => "\x1b[34m", // blue
        Condition::Cloudy => "\x1b[37m",     // light gray
        Condition::Drizzle => "\x1b[36m",    // cyan
        Condition::Rain => "\x1b[36m",
        Condition::Snow => "\x1b[97m", // bright white
        Condition::Fog => "\x1b[90m",  // dark gray
        Condition::Thunder => "\x1b[35m", // magenta
    }
}

pub fn print_report(report: &ForecastReport) {
    let f = &report.forecast;
    let color = theme_color(f.condition);

    println!(
        "{color}{BOLD}{} {}{RESET}  {}",
        f.condition.emoji(f.is_day),
        f.condition.label(f.is_day),
        report.location_name,
    );

    match (f.current_c, f.current_f) {
        (Some(c), Some(fh)) => println!("Now: {c}°C / {fh}°F"),
        _ => println!("Now: —"),
    }

    println!(
        "Today: high {}, low {}",
        fmt_temp(f.today_high_c),
        fmt_temp(f.today_low_c)
    );

    if !f.daily.is_empty() {
        println!();
        for day in &f.daily {
            println!(
                "  {:<4}{:<12}{:>6} / {}",
                short_weekday(&day.date),
                format_date_ymd(&day.date),
                fmt_temp(day.max_c),
                fmt_temp(day.min_c),
            );
        }
    }

    if report.from_cache {
        println!("\n{DIM}(from cache){RESET}");
    }
}

fn fmt_temp(temp: Option<i32>) -> String {
    match temp {
        Some(t) => format!("{t}°C"),
        None => "—".to_string(),
    }
}

fn short_weekday(date: &str) -> String {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|d| d.format("%a").to_string())
        .unwrap_or_default()
}

fn format_date_ymd(date: &str) -> String {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|d| d.format("%Y/%m/%d").to_string())
        .unwrap_or_else(|_| date.to_string())
}
