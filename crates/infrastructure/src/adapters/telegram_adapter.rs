//! Telegram adapter - Implements MessengerPort using integration_telegram
//!
//! Renders a [`CycleReport`] as MarkdownV2: bold title, escaped analysis,
//! the table in a preformatted block and an optional summary section.

use application::{
    error::ApplicationError,
    ports::{CycleReport, Destination, MessengerPort},
};
use async_trait::async_trait;
use integration_telegram::{
    MAX_MESSAGE_LENGTH, ParseMode, TelegramClient, TelegramConfig, TelegramError, bold,
    code_block, escape_markdown_v2,
};
use secrecy::ExposeSecret;
use tracing::{debug, instrument, warn};

/// Adapter for delivering reports through a Telegram bot
#[derive(Debug, Clone)]
pub struct TelegramAdapter {
    client: TelegramClient,
}

impl TelegramAdapter {
    /// Create a new adapter
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: TelegramConfig) -> Result<Self, ApplicationError> {
        let client =
            TelegramClient::new(config).map_err(|e| ApplicationError::Internal(e.to_string()))?;
        Ok(Self { client })
    }

    /// Map integration error to application error
    fn map_error(err: TelegramError) -> ApplicationError {
        match err {
            TelegramError::RateLimited { .. } => ApplicationError::RateLimited,
            TelegramError::Configuration(e) => ApplicationError::Configuration(e),
            other if other.is_transient() => {
                ApplicationError::ExternalService(format!("{other} (transient)"))
            },
            other => ApplicationError::ExternalService(other.to_string()),
        }
    }

    /// Render a report as MarkdownV2 within the Bot API length limit
    ///
    /// Table rows are dropped from the end if the message would be too long.
    /// Once no rows are left the summary is shortened, and dropped as a last
    /// resort.
    pub fn render_markdown(report: &CycleReport) -> String {
        Self::render(report).0
    }

    fn render(report: &CycleReport) -> (String, bool) {
        let all_rows: Vec<&str> = report.report.lines().collect();
        let summary = report.llm_summary.as_deref();

        for kept in (0..=all_rows.len()).rev() {
            let truncated = kept < all_rows.len();
            let text = Self::compose(report, &all_rows[..kept], truncated, summary);
            if fits(&text) {
                return (text, truncated);
            }
        }

        if let Some(summary) = summary {
            let chars: Vec<char> = summary.chars().collect();
            let mut cut = chars.len();
            while cut > 0 {
                let shortened: String = chars[..cut].iter().chain(['.'; 3].iter()).collect();
                let text = Self::compose(report, &[], true, Some(&shortened));
                let length = text.chars().count();
                if length <= MAX_MESSAGE_LENGTH {
                    return (text, true);
                }
                cut = cut.saturating_sub(length - MAX_MESSAGE_LENGTH);
            }
        }

        (Self::compose(report, &[], true, None), true)
    }

    fn compose(
        report: &CycleReport,
        rows: &[&str],
        truncated: bool,
        summary: Option<&str>,
    ) -> String {
        let mut sections = vec![bold(&report.title), escape_markdown_v2(&report.analysis_summary)];

        if !rows.is_empty() {
            let mut table = rows.join("\n");
            if truncated {
                table.push_str("\n...");
            }
            sections.push(code_block(&table));
        }

        if let Some(summary) = summary {
            sections.push(format!("{}\n{}", bold("Summary"), escape_markdown_v2(summary)));
        }

        sections.join("\n\n")
    }
}

fn fits(text: &str) -> bool {
    text.chars().count() <= MAX_MESSAGE_LENGTH
}

#[async_trait]
impl MessengerPort for TelegramAdapter {
    #[instrument(skip(self, destination, report), fields(chat_id = %destination.recipient(), fallback = report.is_fallback()))]
    async fn send(
        &self,
        destination: &Destination,
        report: &CycleReport,
    ) -> Result<(), ApplicationError> {
        let (text, truncated) = Self::render(report);
        if truncated {
            warn!("Report exceeded the Telegram length limit, content truncated");
        }

        let sent = self
            .client
            .send_message(
                destination.credential().expose_secret(),
                destination.recipient(),
                &text,
                Some(ParseMode::MarkdownV2),
            )
            .await
            .map_err(Self::map_error)?;

        debug!(message_id = sent.message_id, "Report delivered");
        Ok(())
    }

    fn transport_name(&self) -> &'static str {
        "telegram"
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn report(summary: Option<&str>) -> CycleReport {
        CycleReport {
            title: "London Heathrow wind outlook (3 days)".to_string(),
            report: "Date       | Dir\n2026-03-10 | W\n".to_string(),
            analysis_summary: "Dominant wind: W (1 easterly, 2 westerly days)".to_string(),
            llm_summary: summary.map(str::to_string),
        }
    }

    #[test]
    fn renders_full_report() {
        let text = TelegramAdapter::render_markdown(&report(Some("Mostly westerly.")));
        assert_eq!(
            text,
            "*London Heathrow wind outlook \\(3 days\\)*\n\n\
             Dominant wind: W \\(1 easterly, 2 westerly days\\)\n\n\
             ```\nDate       | Dir\n2026-03-10 | W\n```\n\n\
             *Summary*\nMostly westerly\\."
        );
    }

    #[test]
    fn fallback_has_no_summary_section() {
        let text = TelegramAdapter::render_markdown(&report(None));
        assert!(!text.contains("Summary"));
        assert!(text.contains("```"));
        assert!(text.contains("Dominant wind"));
    }

    #[test]
    fn long_table_is_truncated_to_fit() {
        let mut long = report(Some("ok"));
        long.report = (0..400)
            .map(|i| format!("2026-03-10 | row {i:04} | padding padding"))
            .collect::<Vec<_>>()
            .join("\n");

        let text = TelegramAdapter::render_markdown(&long);
        assert!(text.chars().count() <= MAX_MESSAGE_LENGTH);
        assert!(text.contains("row 0000"));
        assert!(!text.contains("row 0399"));
        assert!(text.contains("\n...\n```"));
        assert!(text.ends_with("*Summary*\nok"));
    }

    #[test]
    fn long_summary_is_shortened_to_fit() {
        let long = report(Some(&"Winds turn easterly on 12-14 Mar. ".repeat(120)));

        let (text, truncated) = TelegramAdapter::render(&long);
        assert!(truncated);
        assert!(text.chars().count() <= MAX_MESSAGE_LENGTH);
        assert!(text.contains("*Summary*\nWinds turn easterly on 12\\-14 Mar\\."));
        assert!(text.ends_with("\\.\\.\\."));
        assert!(text.contains("Dominant wind"));
    }

    #[test]
    fn multibyte_summary_is_cut_on_char_boundary() {
        let long = report(Some(&"Böen über 40 km/h. ".repeat(300)));

        let text = TelegramAdapter::render_markdown(&long);
        assert!(text.chars().count() <= MAX_MESSAGE_LENGTH);
        assert!(text.contains("Böen über"));
    }

    #[test]
    fn map_error_variants() {
        assert!(matches!(
            TelegramAdapter::map_error(TelegramError::RateLimited { retry_after: None }),
            ApplicationError::RateLimited
        ));
        assert!(matches!(
            TelegramAdapter::map_error(TelegramError::Api {
                code: 400,
                description: "Bad Request".into()
            }),
            ApplicationError::ExternalService(_)
        ));
        assert!(matches!(
            TelegramAdapter::map_error(TelegramError::Configuration("chat id".into())),
            ApplicationError::Configuration(_)
        ));
    }

    #[test]
    fn transient_failures_are_marked() {
        let err = TelegramAdapter::map_error(TelegramError::ConnectionFailed("refused".into()));
        assert!(err.to_string().ends_with("(transient)"));

        let err = TelegramAdapter::map_error(TelegramError::MessageTooLong(5000));
        assert!(!err.to_string().contains("transient"));
    }

    #[test]
    fn transport_name() {
        let adapter = TelegramAdapter::new(TelegramConfig::default()).unwrap();
        assert_eq!(adapter.transport_name(), "telegram");
    }

    proptest! {
        #[test]
        fn rendered_message_fits_limit(
            rows in 0usize..600,
            width in 1usize..80,
            summary in proptest::option::of("[a-z .()!-]{0,200}"),
        ) {
            let mut long = report(summary.as_deref());
            long.report = (0..rows)
                .map(|i| format!("{i:04} | {}", "x".repeat(width)))
                .collect::<Vec<_>>()
                .join("\n");

            let text = TelegramAdapter::render_markdown(&long);
            prop_assert!(text.chars().count() <= MAX_MESSAGE_LENGTH);
        }

        #[test]
        fn long_summaries_fit_limit(
            rows in 0usize..5,
            summary in "[a-zäö .()!-]{3000,6000}",
        ) {
            let mut long = report(Some(&summary));
            long.report = (0..rows).map(|i| format!("{i:04} | row")).collect::<Vec<_>>().join("\n");

            let text = TelegramAdapter::render_markdown(&long);
            prop_assert!(text.chars().count() <= MAX_MESSAGE_LENGTH);
            prop_assert!(text.contains("*Summary*"));
        }
    }
}
