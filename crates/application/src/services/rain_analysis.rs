//! Rain risk analysis for the school run
//!
//! Weekends are reported as "no school". For weekdays the drop-off window is
//! 08:00-09:00 and the pickup window is 17:00-18:00, except Wednesday which
//! has an early pickup at 15:00-16:00. Each window takes the highest hourly
//! probability it covers; a missing or zero hourly value falls back to the
//! day's overall probability.

use std::ops::RangeInclusive;

use chrono::{NaiveDate, Weekday};
use domain::entities::RainForecast;
use domain::value_objects::RiskBand;

/// Local hours of the morning drop-off
pub const DROP_OFF_HOURS: RangeInclusive<u32> = 8..=9;
/// Local hours of the regular afternoon pickup
pub const PICKUP_HOURS: RangeInclusive<u32> = 17..=18;
/// Local hours of the early pickup
pub const EARLY_PICKUP_HOURS: RangeInclusive<u32> = 15..=16;
/// Weekday with the early pickup
pub const EARLY_PICKUP_DAY: Weekday = Weekday::Wed;

/// Pickup hours for a weekday
#[must_use]
pub fn pickup_hours(weekday: Weekday) -> RangeInclusive<u32> {
    if weekday == EARLY_PICKUP_DAY {
        EARLY_PICKUP_HOURS
    } else {
        PICKUP_HOURS
    }
}

/// Rain risk for both school-run windows of a weekday
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchoolRunRisk {
    /// Drop-off rain probability in percent
    pub drop_off_probability: u8,
    /// Drop-off band
    pub drop_off: RiskBand,
    /// Pickup rain probability in percent
    pub pickup_probability: u8,
    /// Pickup band
    pub pickup: RiskBand,
    /// Hours the pickup probability was taken from
    pub pickup_hours: RangeInclusive<u32>,
}

impl SchoolRunRisk {
    /// Derive the school-run risk of a weekday forecast
    #[must_use]
    pub fn from_forecast(day: &RainForecast) -> Self {
        let pickup_hours = pickup_hours(day.weekday());
        let drop_off_probability = with_fallback(day.morning_max(DROP_OFF_HOURS), day.precip_prob);
        let pickup_probability =
            with_fallback(day.afternoon_max(pickup_hours.clone()), day.precip_prob);

        Self {
            drop_off_probability,
            drop_off: RiskBand::from_probability(drop_off_probability),
            pickup_probability,
            pickup: RiskBand::from_probability(pickup_probability),
            pickup_hours,
        }
    }

    /// Highest band of the two windows
    #[must_use]
    pub fn worst(&self) -> RiskBand {
        self.drop_off.max(self.pickup)
    }
}

/// Zero is treated as "no hourly data" and replaced by the daily probability
fn with_fallback(window_max: Option<u8>, daily: u8) -> u8 {
    window_max.filter(|p| *p > 0).unwrap_or(daily)
}

/// Risk for one forecast day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayRisk {
    /// Forecast date
    pub date: NaiveDate,
    /// Day of the week
    pub weekday: Weekday,
    /// `None` on weekends
    pub school_run: Option<SchoolRunRisk>,
}

impl DayRisk {
    /// Classify one forecast day
    #[must_use]
    pub fn from_forecast(day: &RainForecast) -> Self {
        Self {
            date: day.date,
            weekday: day.weekday(),
            school_run: (!day.is_weekend()).then(|| SchoolRunRisk::from_forecast(day)),
        }
    }

    /// Whether this is a weekend day
    #[must_use]
    pub const fn is_no_school(&self) -> bool {
        self.school_run.is_none()
    }
}

/// Verbal summary for the first forecast day
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodaySummary {
    /// The forecast was empty
    NoData,
    /// Today is a weekend day
    NoSchool {
        /// Today's date
        date: NaiveDate,
        /// Today's weekday
        weekday: Weekday,
    },
    /// Today is a school day
    SchoolDay {
        /// Today's date
        date: NaiveDate,
        /// Today's weekday
        weekday: Weekday,
        /// Risk for both windows
        risk: SchoolRunRisk,
    },
}

impl TodaySummary {
    /// Human-readable one-liner
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::NoData => "No forecast data for today.".to_string(),
            Self::NoSchool { date, weekday } => {
                format!("Today ({weekday} {}): no school.", date.format("%Y-%m-%d"))
            },
            Self::SchoolDay {
                date,
                weekday,
                risk,
            } => format!(
                "Today ({weekday} {}): drop-off {} rain {}% ({}); pickup {} rain {}% ({}).",
                date.format("%Y-%m-%d"),
                hours_label(&DROP_OFF_HOURS),
                risk.drop_off_probability,
                risk.drop_off,
                hours_label(&risk.pickup_hours),
                risk.pickup_probability,
                risk.pickup,
            ),
        }
    }
}

/// Render an hour window as `HH:00-HH:00`
#[must_use]
pub fn hours_label(hours: &RangeInclusive<u32>) -> String {
    format!("{:02}:00-{:02}:00", hours.start(), hours.end())
}

/// Output of [`analyze_rain`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RainAnalysis {
    /// Risk per input day, same order and length as the input
    pub per_day: Vec<DayRisk>,
    /// Summary of the first day
    pub today: TodaySummary,
}

/// Classify a window of rain forecast days
#[must_use]
pub fn analyze_rain(days: &[RainForecast]) -> RainAnalysis {
    let per_day: Vec<DayRisk> = days.iter().map(DayRisk::from_forecast).collect();
    let today = match per_day.first() {
        None => TodaySummary::NoData,
        Some(DayRisk {
            date,
            weekday,
            school_run: None,
        }) => TodaySummary::NoSchool {
            date: *date,
            weekday: *weekday,
        },
        Some(DayRisk {
            date,
            weekday,
            school_run: Some(risk),
        }) => TodaySummary::SchoolDay {
            date: *date,
            weekday: *weekday,
            risk: risk.clone(),
        },
    };

    RainAnalysis { per_day, today }
}

impl RainAnalysis {
    /// Deterministic text describing the analysis
    #[must_use]
    pub fn summary_text(&self) -> String {
        let mut lines = vec![self.today.describe()];

        let flagged: Vec<String> = self
            .per_day
            .iter()
            .skip(1)
            .filter_map(|day| {
                let risk = day.school_run.as_ref()?;
                (risk.worst() != RiskBand::Clear).then(|| {
                    format!(
                        "{} {}: {}",
                        day.weekday,
                        day.date.format("%Y-%m-%d"),
                        risk.worst()
                    )
                })
            })
            .collect();

        if !self.per_day.is_empty() {
            if flagged.is_empty() {
                lines.push("Rest of the week: no school-run rain expected.".to_string());
            } else {
                lines.push(format!("Rain risk ahead: {}", flagged.join("; ")));
            }
        }

        lines.join("\n")
    }
}
