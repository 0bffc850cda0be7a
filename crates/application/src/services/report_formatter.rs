//! Report formatting
//!
//! Pure functions rendering analyzer output as fixed-width tables. The same
//! text goes to the logs, into the LLM prompt and into the notification.

use domain::entities::{ForecastDay, RainForecast};
use domain::value_objects::{LIKELY_THRESHOLD, POSSIBLE_THRESHOLD, RiskBand};

use super::rain_analysis::{
    DROP_OFF_HOURS, DayRisk, EARLY_PICKUP_DAY, EARLY_PICKUP_HOURS, PICKUP_HOURS, RainAnalysis,
    hours_label,
};
use super::wind_analysis::WindAnalysis;

// ── Wind ────────────────────────────────────────────────────────

/// Render the wind table
///
/// Rows follow `days`; `analysis` must come from the same slice.
#[must_use]
pub fn format_wind_table(days: &[ForecastDay], analysis: &WindAnalysis) -> String {
    let mut lines = vec![
        format!(
            "{:<10} | {:>8} | {:>8} | {:<3} | E/W",
            "Date", "Wind Max", "Gust Max", "Dir"
        ),
        format!("{}-+-{}-+-{}-+-{}-+----", "-".repeat(10), "-".repeat(8), "-".repeat(8), "-".repeat(3)),
    ];

    for (day, direction) in days.iter().zip(&analysis.per_day) {
        lines.push(format!(
            "{} | {:>8.1} | {:>8.1} | {:<3} | {}",
            day.date.format("%Y-%m-%d"),
            day.wind_speed_max,
            day.wind_gust_max,
            day.compass(),
            direction.short_label()
        ));
    }

    let mut table = lines.join("\n");
    table.push('\n');
    table
}

// ── Rain ────────────────────────────────────────────────────────

/// Render the school-run rain table
///
/// Rows follow `days`; `analysis` must come from the same slice.
#[must_use]
pub fn format_rain_table(days: &[RainForecast], analysis: &RainAnalysis) -> String {
    let mut lines = vec![
        format!(
            "{:<10} | {:<3} | {:>4} | {:<9} | {:<9}",
            "Date", "Day", "Rain", "Drop-off", "Pickup"
        ),
        format!(
            "{}-+-{}-+-{}-+-{}-+-{}",
            "-".repeat(10),
            "-".repeat(3),
            "-".repeat(4),
            "-".repeat(9),
            "-".repeat(9)
        ),
    ];

    for (day, risk) in days.iter().zip(&analysis.per_day) {
        lines.push(format_rain_row(day, risk));
    }

    let mut table = lines.join("\n");
    table.push('\n');
    table
}

fn format_rain_row(day: &RainForecast, risk: &DayRisk) -> String {
    let prefix = format!(
        "{} | {:<3} | {:>3}%",
        day.date.format("%Y-%m-%d"),
        risk.weekday,
        day.precip_prob
    );

    match &risk.school_run {
        None => format!("{prefix} | no school"),
        Some(run) => format!(
            "{prefix} | {} | {}",
            risk_cell(run.drop_off_probability, run.drop_off),
            risk_cell(run.pickup_probability, run.pickup)
        ),
    }
}

fn risk_cell(probability: u8, band: RiskBand) -> String {
    match band.icon() {
        Some(icon) => format!("{icon} {probability:>3}%"),
        None => format!("  {probability:>3}%"),
    }
}

/// Short legend explaining icons and windows
#[must_use]
pub fn rain_legend() -> String {
    format!(
        "{} possible rain ({POSSIBLE_THRESHOLD}-{}%), {} rain likely (≥{LIKELY_THRESHOLD}%). \
         Drop-off {}, pickup {} ({} {}).",
        RiskBand::Possible.icon().unwrap_or_default(),
        LIKELY_THRESHOLD - 1,
        RiskBand::Likely.icon().unwrap_or_default(),
        hours_label(&DROP_OFF_HOURS),
        hours_label(&PICKUP_HOURS),
        EARLY_PICKUP_DAY,
        hours_label(&EARLY_PICKUP_HOURS),
    )
}
