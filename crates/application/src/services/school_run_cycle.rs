//! School-run rain cycle

use std::sync::Arc;

use async_trait::async_trait;
use tokio::time::Instant;
use tracing::{debug, error, info, instrument};

use super::cycle::{CycleOutcome, CycleRunner, CycleSettings, summarize_and_notify};
use super::prompts::{build_school_run_prompt, display_location};
use super::rain_analysis::analyze_rain;
use super::report_formatter::{format_rain_table, rain_legend};
use crate::ports::{CycleReport, InferencePort, MessengerPort, RainForecastPort};

/// Concern name of the school-run cycle
pub const SCHOOL_RUN_CONCERN: &str = "school-run";

/// Cycle runner for the school-run rain concern
pub struct SchoolRunCycle {
    forecaster: Arc<dyn RainForecastPort>,
    inference: Arc<dyn InferencePort>,
    messenger: Arc<dyn MessengerPort>,
    settings: CycleSettings,
}

impl std::fmt::Debug for SchoolRunCycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchoolRunCycle")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl SchoolRunCycle {
    /// Create the school-run cycle
    #[must_use]
    pub fn new(
        forecaster: Arc<dyn RainForecastPort>,
        inference: Arc<dyn InferencePort>,
        messenger: Arc<dyn MessengerPort>,
        settings: CycleSettings,
    ) -> Self {
        Self {
            forecaster,
            inference,
            messenger,
            settings,
        }
    }
}

#[async_trait]
impl CycleRunner for SchoolRunCycle {
    fn name(&self) -> &'static str {
        SCHOOL_RUN_CONCERN
    }

    #[instrument(skip(self), fields(concern = SCHOOL_RUN_CONCERN, location = %self.settings.location))]
    async fn run_cycle(&self) -> CycleOutcome {
        let started = Instant::now();
        let location = display_location(&self.settings.location_name);

        let days = match self
            .forecaster
            .fetch_rain_forecast(&self.settings.location, self.settings.forecast_days)
            .await
        {
            Ok(days) => days,
            Err(e) => {
                error!(error = %e, "Failed to fetch rain forecast, skipping this cycle");
                return CycleOutcome::FetchFailed;
            },
        };

        let analysis = analyze_rain(&days);
        let legend = rain_legend();
        let table = format!("{}\n{legend}\n", format_rain_table(&days, &analysis));
        let analysis_text = analysis.summary_text();
        info!(days = days.len(), today = %analysis.today.describe(), "Rain forecast analyzed");
        debug!(table = %table, "{}-day {} school-run rain forecast", days.len(), location);

        let prompt = build_school_run_prompt(location, &table, &analysis_text, &legend);
        let report = CycleReport {
            title: format!("{location} school run rain check"),
            report: table,
            analysis_summary: analysis_text,
            llm_summary: None,
        };

        let outcome = summarize_and_notify(
            SCHOOL_RUN_CONCERN,
            self.inference.as_ref(),
            self.messenger.as_ref(),
            &self.settings.destination,
            &prompt,
            report,
        )
        .await;

        info!(
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            ?outcome,
            "School-run cycle finished"
        );
        outcome
    }
}
