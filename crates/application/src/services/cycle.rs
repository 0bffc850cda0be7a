//! Cycle runner contract and the shared summarize-and-notify step
//!
//! A cycle is one fetch, analyze, format, summarize and notify pass for one
//! concern. Every failure inside a cycle is absorbed and logged; the outcome
//! returned to the caller is informational and never drives scheduling.

use async_trait::async_trait;
use domain::value_objects::GeoLocation;
use tracing::{debug, error, info, warn};

use crate::ports::{CycleReport, Destination, InferencePort, MessengerPort};

/// One concern's pipeline, invoked by the periodic task
#[async_trait]
pub trait CycleRunner: Send + Sync {
    /// Stable concern name used in logs and on the command line
    fn name(&self) -> &'static str;

    /// Run one complete cycle
    async fn run_cycle(&self) -> CycleOutcome;
}

/// What happened to the notification of a cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryStatus {
    /// The messenger accepted the report
    Sent,
    /// No destination configured, messenger not called
    Skipped,
    /// The messenger returned an error
    Failed,
}

/// How a cycle ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Fetching the forecast failed; nothing else ran
    FetchFailed,
    /// The pipeline ran to the notify step
    Completed {
        /// Whether a narrative summary was produced
        summarized: bool,
        /// What happened to the notification
        delivery: DeliveryStatus,
    },
}

/// Per-concern construction parameters
#[derive(Debug, Clone)]
pub struct CycleSettings {
    /// Forecast point
    pub location: GeoLocation,
    /// Human-readable name of the forecast point
    pub location_name: String,
    /// Number of forecast days to fetch
    pub forecast_days: u8,
    /// Where reports go
    pub destination: Destination,
}

/// Ask the model for a summary, then deliver the report
///
/// A failed or empty summary sends the report without the narrative section.
/// Delivery is skipped entirely when the destination is not configured.
pub(crate) async fn summarize_and_notify(
    concern: &'static str,
    inference: &dyn InferencePort,
    messenger: &dyn MessengerPort,
    destination: &Destination,
    prompt: &str,
    mut report: CycleReport,
) -> CycleOutcome {
    debug!(concern, prompt = %prompt, "Prompt for summarization");

    report.llm_summary = match inference.generate(prompt).await {
        Ok(result) if !result.content.trim().is_empty() => {
            info!(
                concern,
                model = %result.model,
                latency_ms = result.latency_ms,
                "Summary generated"
            );
            Some(result.content.trim().to_string())
        },
        Ok(result) => {
            warn!(concern, model = %result.model, "Model returned an empty summary, sending analysis only");
            None
        },
        Err(e) => {
            warn!(concern, error = %e, "Summarization failed, sending analysis only");
            None
        },
    };
    let summarized = report.llm_summary.is_some();

    if !destination.is_configured() {
        info!(concern, "No destination configured, skipping notification");
        debug!(concern, report = %report.to_text(), "Undelivered report");
        return CycleOutcome::Completed {
            summarized,
            delivery: DeliveryStatus::Skipped,
        };
    }

    let delivery = match messenger.send(destination, &report).await {
        Ok(()) => {
            info!(
                concern,
                transport = messenger.transport_name(),
                fallback = report.is_fallback(),
                "Report delivered"
            );
            DeliveryStatus::Sent
        },
        Err(e) => {
            error!(
                concern,
                transport = messenger.transport_name(),
                error = %e,
                "Failed to deliver report"
            );
            DeliveryStatus::Failed
        },
    };

    CycleOutcome::Completed {
        summarized,
        delivery,
    }
}
