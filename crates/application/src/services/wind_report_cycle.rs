//! Wind report cycle for an airport
//!
//! Fetches the daily wind forecast, classifies easterly and westerly days,
//! and delivers a table plus summary.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::time::Instant;
use tracing::{debug, error, info, instrument};

use super::cycle::{CycleOutcome, CycleRunner, CycleSettings, summarize_and_notify};
use super::prompts::{build_wind_prompt, display_location};
use super::report_formatter::format_wind_table;
use super::wind_analysis::analyze_wind;
use crate::ports::{CycleReport, InferencePort, MessengerPort, WindForecastPort};

/// Concern name of the wind cycle
pub const WIND_CONCERN: &str = "wind";

/// Cycle runner for the wind concern
pub struct WindReportCycle {
    forecaster: Arc<dyn WindForecastPort>,
    inference: Arc<dyn InferencePort>,
    messenger: Arc<dyn MessengerPort>,
    settings: CycleSettings,
}

impl std::fmt::Debug for WindReportCycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindReportCycle")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl WindReportCycle {
    /// Create the wind cycle
    #[must_use]
    pub fn new(
        forecaster: Arc<dyn WindForecastPort>,
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
impl CycleRunner for WindReportCycle {
    fn name(&self) -> &'static str {
        WIND_CONCERN
    }

    #[instrument(skip(self), fields(concern = WIND_CONCERN, location = %self.settings.location))]
    async fn run_cycle(&self) -> CycleOutcome {
        let started = Instant::now();
        let location = display_location(&self.settings.location_name);

        let days = match self
            .forecaster
            .fetch_wind_forecast(&self.settings.location, self.settings.forecast_days)
            .await
        {
            Ok(days) => days,
            Err(e) => {
                error!(error = %e, "Failed to fetch wind forecast, skipping this cycle");
                return CycleOutcome::FetchFailed;
            },
        };

        let analysis = analyze_wind(&days);
        let table = format_wind_table(&days, &analysis);
        let analysis_text = analysis.summary_text();
        info!(
            days = days.len(),
            east = analysis.east_count,
            west = analysis.west_count,
            dominant = %analysis.dominant,
            "Wind forecast analyzed"
        );
        debug!(table = %table, "{}-day {} wind forecast (km/h)", days.len(), location);

        let prompt = build_wind_prompt(location, days.len(), &table, &analysis_text);
        let report = CycleReport {
            title: format!("{location} wind outlook ({} days)", days.len()),
            report: table,
            analysis_summary: analysis_text,
            llm_summary: None,
        };

        let outcome = summarize_and_notify(
            WIND_CONCERN,
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
            "Wind cycle finished"
        );
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApplicationError;
    use crate::ports::{
        Destination, MockInferencePort, MockMessengerPort, MockWindForecastPort,
    };
    use crate::services::cycle::DeliveryStatus;
    use crate::services::cycle::test_support::{configured_destination, inference_result};
    use chrono::NaiveDate;
    use domain::entities::ForecastDay;
    use domain::value_objects::GeoLocation;

    fn settings(destination: Destination) -> CycleSettings {
        CycleSettings {
            location: GeoLocation::heathrow(),
            location_name: "London Heathrow".to_string(),
            forecast_days: 3,
            destination,
        }
    }

    fn forecast() -> Vec<ForecastDay> {
        let d = |day| NaiveDate::from_ymd_opt(2026, 3, day).unwrap();
        vec![
            ForecastDay::new(d(10), 20.0, 35.0, 90.0),
            ForecastDay::new(d(11), 25.0, 40.0, 270.0),
            ForecastDay::new(d(12), 15.0, 28.0, 45.0),
        ]
    }

    fn forecaster_ok() -> MockWindForecastPort {
        let mut forecaster = MockWindForecastPort::new();
        forecaster
            .expect_fetch_wind_forecast()
            .withf(|location, days| *location == GeoLocation::heathrow() && *days == 3)
            .times(1)
            .returning(|_, _| Ok(forecast()));
        forecaster
    }

    fn cycle(
        forecaster: MockWindForecastPort,
        inference: MockInferencePort,
        messenger: MockMessengerPort,
        destination: Destination,
    ) -> WindReportCycle {
        WindReportCycle::new(
            Arc::new(forecaster),
            Arc::new(inference),
            Arc::new(messenger),
            settings(destination),
        )
    }

    #[tokio::test]
    async fn full_path_sends_all_three_sections() {
        let mut inference = MockInferencePort::new();
        inference
            .expect_generate()
            .withf(|prompt| prompt.contains("London Heathrow") && prompt.contains("2026-03-10"))
            .times(1)
            .returning(|_| Ok(inference_result("Mostly easterly, change on 11 March.")));

        let mut messenger = MockMessengerPort::new();
        messenger
            .expect_send()
            .withf(|_, report| {
                report.llm_summary.as_deref() == Some("Mostly easterly, change on 11 March.")
                    && report.analysis_summary.contains("Dominant wind: Easterly")
                    && report.report.contains("2026-03-12")
            })
            .times(1)
            .returning(|_, _| Ok(()));
        messenger.expect_transport_name().return_const("test");

        let outcome = cycle(forecaster_ok(), inference, messenger, configured_destination())
            .run_cycle()
            .await;

        assert_eq!(
            outcome,
            CycleOutcome::Completed {
                summarized: true,
                delivery: DeliveryStatus::Sent
            }
        );
    }

    #[tokio::test]
    async fn summarization_failure_sends_fallback() {
        let mut inference = MockInferencePort::new();
        inference
            .expect_generate()
            .times(1)
            .returning(|_| Err(ApplicationError::Inference("connection refused".to_string())));

        let mut messenger = MockMessengerPort::new();
        messenger
            .expect_send()
            .withf(|_, report| {
                report.llm_summary.is_none()
                    && report.analysis_summary.contains("Easterly periods")
                    && report.report.contains("Wind Max")
            })
            .times(1)
            .returning(|_, _| Ok(()));
        messenger.expect_transport_name().return_const("test");

        let outcome = cycle(forecaster_ok(), inference, messenger, configured_destination())
            .run_cycle()
            .await;

        assert_eq!(
            outcome,
            CycleOutcome::Completed {
                summarized: false,
                delivery: DeliveryStatus::Sent
            }
        );
    }

    #[tokio::test]
    async fn fetch_failure_aborts_without_summary_or_notification() {
        let mut forecaster = MockWindForecastPort::new();
        forecaster
            .expect_fetch_wind_forecast()
            .times(1)
            .returning(|_, _| Err(ApplicationError::ExternalService("HTTP 503".to_string())));
        let mut inference = MockInferencePort::new();
        inference.expect_generate().never();
        let mut messenger = MockMessengerPort::new();
        messenger.expect_send().never();

        let outcome = cycle(forecaster, inference, messenger, configured_destination())
            .run_cycle()
            .await;

        assert_eq!(outcome, CycleOutcome::FetchFailed);
    }

    #[tokio::test]
    async fn notify_failure_is_absorbed() {
        let mut inference = MockInferencePort::new();
        inference
            .expect_generate()
            .returning(|_| Ok(inference_result("Summary")));
        let mut messenger = MockMessengerPort::new();
        messenger
            .expect_send()
            .times(1)
            .returning(|_, _| Err(ApplicationError::ExternalService("bad token".to_string())));
        messenger.expect_transport_name().return_const("test");

        let outcome = cycle(forecaster_ok(), inference, messenger, configured_destination())
            .run_cycle()
            .await;

        assert_eq!(
            outcome,
            CycleOutcome::Completed {
                summarized: true,
                delivery: DeliveryStatus::Failed
            }
        );
    }

    #[tokio::test]
    async fn empty_credentials_skip_notification_on_full_path() {
        let mut inference = MockInferencePort::new();
        inference
            .expect_generate()
            .returning(|_| Ok(inference_result("Summary")));
        let mut messenger = MockMessengerPort::new();
        messenger.expect_send().never();

        let outcome = cycle(forecaster_ok(), inference, messenger, Destination::unconfigured())
            .run_cycle()
            .await;

        assert_eq!(
            outcome,
            CycleOutcome::Completed {
                summarized: true,
                delivery: DeliveryStatus::Skipped
            }
        );
    }

    #[tokio::test]
    async fn empty_credentials_skip_notification_on_fallback_path() {
        let mut inference = MockInferencePort::new();
        inference
            .expect_generate()
            .returning(|_| Err(ApplicationError::Inference("timeout".to_string())));
        let mut messenger = MockMessengerPort::new();
        messenger.expect_send().never();

        let outcome = cycle(forecaster_ok(), inference, messenger, Destination::unconfigured())
            .run_cycle()
            .await;

        assert_eq!(
            outcome,
            CycleOutcome::Completed {
                summarized: false,
                delivery: DeliveryStatus::Skipped
            }
        );
    }

    #[test]
    fn cycle_name() {
        let c = cycle(
            MockWindForecastPort::new(),
            MockInferencePort::new(),
            MockMessengerPort::new(),
            Destination::unconfigured(),
        );
        assert_eq!(c.name(), "wind");
    }
}
