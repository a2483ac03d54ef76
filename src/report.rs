//! Plain-text rendering of a forecast report.
//!
//! Metric order is fixed: rain chance, total rain, temperature, wind,
//! gust, humidity.

use std::fmt::Write;

use crate::types::{DaySummary, ForecastReport};

/// Render one day as an indented block.
pub fn render_day(day: &DaySummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", day.label);
    let _ = writeln!(out, "  Chance of rain: {}%", day.rain_chance);
    let _ = writeln!(out, "  Total rain:     {} mm", day.rain_total.normalize());
    let _ = writeln!(out, "  Temperature:    {} °C", day.temperature);
    let _ = writeln!(out, "  Wind:           {} mph", day.wind);
    let _ = writeln!(out, "  Gust:           {} mph", day.gust);
    let _ = writeln!(out, "  Humidity:       {}%", day.humidity);
    out
}

/// Render every present day, separated by blank lines.
pub fn render(report: &ForecastReport) -> String {
    if report.is_empty() {
        return "No forecast data for today, tomorrow or the day after.\n".to_string();
    }
    report
        .days()
        .map(render_day)
        .collect::<Vec<_>>()
        .join("\n")
}
