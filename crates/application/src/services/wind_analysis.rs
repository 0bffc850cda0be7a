//! Wind risk analysis
//!
//! Classifies each forecast day as easterly or westerly and derives the
//! aggregate picture: dominant direction, the dates the direction flips and
//! the contiguous easterly runs.

use chrono::NaiveDate;
use domain::entities::ForecastDay;
use domain::value_objects::{DominantWind, WindDirection};

/// A day on which the classification differs from the previous day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectionChange {
    /// First day with the new direction
    pub date: NaiveDate,
    /// Direction the wind changes to
    pub to: WindDirection,
}

/// Contiguous run of easterly days, both ends inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EasterlyPeriod {
    /// First easterly day
    pub start: NaiveDate,
    /// Last easterly day
    pub end: NaiveDate,
}

impl EasterlyPeriod {
    /// Number of days in the period
    #[must_use]
    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// Output of [`analyze_wind`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindAnalysis {
    /// Classification per input day, same order and length as the input
    pub per_day: Vec<WindDirection>,
    /// Number of easterly days
    pub east_count: usize,
    /// Number of westerly days
    pub west_count: usize,
    /// Aggregate direction
    pub dominant: DominantWind,
    /// Days on which the direction flips relative to the day before
    pub direction_changes: Vec<DirectionChange>,
    /// Contiguous easterly runs
    pub easterly_periods: Vec<EasterlyPeriod>,
}

/// Classify a window of forecast days
#[must_use]
pub fn analyze_wind(days: &[ForecastDay]) -> WindAnalysis {
    let per_day: Vec<WindDirection> = days.iter().map(ForecastDay::direction).collect();
    let east_count = per_day.iter().filter(|d| d.is_easterly()).count();
    let west_count = per_day.len() - east_count;

    let direction_changes = days
        .iter()
        .zip(&per_day)
        .collect::<Vec<_>>()
        .windows(2)
        .filter(|pair| pair[0].1 != pair[1].1)
        .map(|pair| DirectionChange {
            date: pair[1].0.date,
            to: *pair[1].1,
        })
        .collect();

    let mut easterly_periods = Vec::new();
    let mut current: Option<EasterlyPeriod> = None;
    for (day, direction) in days.iter().zip(&per_day) {
        if direction.is_easterly() {
            if let Some(period) = current.as_mut() {
                period.end = day.date;
            } else {
                current = Some(EasterlyPeriod {
                    start: day.date,
                    end: day.date,
                });
            }
        } else if let Some(period) = current.take() {
            easterly_periods.push(period);
        }
    }
    easterly_periods.extend(current);

    WindAnalysis {
        per_day,
        east_count,
        west_count,
        dominant: DominantWind::from_counts(east_count, west_count),
        direction_changes,
        easterly_periods,
    }
}

impl WindAnalysis {
    /// Deterministic text describing the analysis
    ///
    /// This is what the fallback notification carries when no narrative
    /// summary is available.
    #[must_use]
    pub fn summary_text(&self) -> String {
        if self.per_day.is_empty() {
            return "No forecast data.".to_string();
        }

        let mut lines = vec![format!(
            "Dominant wind: {} ({} easterly, {} westerly days)",
            self.dominant, self.east_count, self.west_count
        )];

        if self.direction_changes.is_empty() {
            lines.push("Direction changes: none".to_string());
        } else {
            let changes: Vec<String> = self
                .direction_changes
                .iter()
                .map(|c| format!("{} to {}", c.date.format("%Y-%m-%d"), c.to))
                .collect();
            lines.push(format!("Direction changes: {}", changes.join(", ")));
        }

        if self.easterly_periods.is_empty() {
            lines.push("Easterly periods: none".to_string());
        } else {
            let periods: Vec<String> = self
                .easterly_periods
                .iter()
                .map(|p| {
                    if p.start == p.end {
                        p.start.format("%Y-%m-%d").to_string()
                    } else {
                        format!("{} to {}", p.start.format("%Y-%m-%d"), p.end.format("%Y-%m-%d"))
                    }
                })
                .collect();
            lines.push(format!("Easterly periods: {}", periods.join(", ")));
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn days(directions: &[f64]) -> Vec<ForecastDay> {
        let start = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        directions
            .iter()
            .enumerate()
            .map(|(i, dir)| {
                ForecastDay::new(start + chrono::Duration::days(i as i64), 20.0, 30.0, *dir)
            })
            .collect()
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    #[test]
    fn two_east_one_west_is_easterly() {
        let analysis = analyze_wind(&days(&[90.0, 270.0, 45.0]));
        assert_eq!(analysis.east_count, 2);
        assert_eq!(analysis.west_count, 1);
        assert_eq!(analysis.dominant, DominantWind::Easterly);
        assert_eq!(
            analysis.per_day,
            vec![
                WindDirection::Easterly,
                WindDirection::Westerly,
                WindDirection::Easterly
            ]
        );
    }

    #[test]
    fn tie_is_mixed() {
        let analysis = analyze_wind(&days(&[90.0, 270.0]));
        assert_eq!(analysis.dominant, DominantWind::Mixed);
    }

    #[test]
    fn empty_input_is_mixed_with_zero_counts() {
        let analysis = analyze_wind(&[]);
        assert_eq!(analysis.east_count, 0);
        assert_eq!(analysis.west_count, 0);
        assert_eq!(analysis.dominant, DominantWind::Mixed);
        assert!(analysis.direction_changes.is_empty());
        assert!(analysis.easterly_periods.is_empty());
        assert_eq!(analysis.summary_text(), "No forecast data.");
    }

    #[test]
    fn boundaries_count_as_westerly() {
        let analysis = analyze_wind(&days(&[0.0, 180.0, 359.0, 179.9]));
        assert_eq!(analysis.west_count, 3);
        assert_eq!(analysis.east_count, 1);
        assert_eq!(analysis.dominant, DominantWind::Westerly);
    }

    #[test]
    fn direction_changes_are_recorded_on_the_new_day() {
        let analysis = analyze_wind(&days(&[270.0, 90.0, 100.0, 250.0]));
        assert_eq!(
            analysis.direction_changes,
            vec![
                DirectionChange {
                    date: date(11),
                    to: WindDirection::Easterly
                },
                DirectionChange {
                    date: date(13),
                    to: WindDirection::Westerly
                },
            ]
        );
    }

    #[test]
    fn easterly_periods_group_consecutive_days() {
        let analysis = analyze_wind(&days(&[90.0, 100.0, 270.0, 45.0, 300.0, 60.0, 70.0]));
        assert_eq!(
            analysis.easterly_periods,
            vec![
                EasterlyPeriod {
                    start: date(10),
                    end: date(11)
                },
                EasterlyPeriod {
                    start: date(13),
                    end: date(13)
                },
                EasterlyPeriod {
                    start: date(15),
                    end: date(16)
                },
            ]
        );
        assert_eq!(analysis.easterly_periods[0].len_days(), 2);
    }

    #[test]
    fn summary_text_lists_changes_and_periods() {
        let text = analyze_wind(&days(&[270.0, 90.0, 100.0])).summary_text();
        assert!(text.contains("Dominant wind: Easterly (2 easterly, 1 westerly days)"));
        assert!(text.contains("Direction changes: 2026-03-11 to Easterly"));
        assert!(text.contains("Easterly periods: 2026-03-11 to 2026-03-12"));
    }

    #[test]
    fn summary_text_for_steady_westerly() {
        let text = analyze_wind(&days(&[250.0, 260.0])).summary_text();
        assert!(text.contains("Direction changes: none"));
        assert!(text.contains("Easterly periods: none"));
    }

    proptest::proptest! {
        #[test]
        fn counts_and_periods_cover_every_day(
            directions in proptest::collection::vec(0.0f64..360.0, 0..16)
        ) {
            let analysis = analyze_wind(&days(&directions));

            proptest::prop_assert_eq!(analysis.per_day.len(), directions.len());
            proptest::prop_assert_eq!(analysis.east_count + analysis.west_count, directions.len());
            let period_days: i64 = analysis.easterly_periods.iter().map(EasterlyPeriod::len_days).sum();
            proptest::prop_assert_eq!(usize::try_from(period_days).unwrap(), analysis.east_count);
            for pair in analysis.easterly_periods.windows(2) {
                // a westerly day separates consecutive periods
                proptest::prop_assert!(pair[1].start - pair[0].end > chrono::Duration::days(1));
            }
        }
    }
}
