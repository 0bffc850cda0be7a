//! Application services - Use case implementations

mod cycle;
pub mod prompts;
pub mod rain_analysis;
pub mod report_formatter;
mod school_run_cycle;
pub mod wind_analysis;
mod wind_report_cycle;

pub use cycle::{CycleOutcome, CycleRunner, CycleSettings, DeliveryStatus};
pub use rain_analysis::{DayRisk, RainAnalysis, SchoolRunRisk, TodaySummary, analyze_rain};
pub use report_formatter::{format_rain_table, format_wind_table, rain_legend};
pub use school_run_cycle::{SCHOOL_RUN_CONCERN, SchoolRunCycle};
pub use wind_analysis::{DirectionChange, EasterlyPeriod, WindAnalysis, analyze_wind};
pub use wind_report_cycle::{WIND_CONCERN, WindReportCycle};
