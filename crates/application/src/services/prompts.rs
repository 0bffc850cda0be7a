//! Prompt builders for the narrative summary

/// Name used when no location name is configured
pub const FALLBACK_LOCATION: &str = "the target location";

/// Return the configured name, or a neutral phrase when it is blank
#[must_use]
pub fn display_location(name: &str) -> &str {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        FALLBACK_LOCATION
    } else {
        trimmed
    }
}

/// Prompt asking for an aviation-style wind outlook
#[must_use]
pub fn build_wind_prompt(location: &str, days: usize, table: &str, analysis: &str) -> String {
    format!(
        "Summarize the next {days} days wind forecast for {location} in a compact way:\n\
         - What is the main (predominant) wind direction?\n\
         - On which dates does the wind direction change, and what is the new direction?\n\
         - List all periods with easterly winds (E, ENE, ESE, or SE) and their dates.\n\
         - Output should be concise, suitable for a quick daily aviation risk check.\n\
         - Use simple formatting (no special characters that could break HTML/Markdown parsing).\n\
         \n\
         Computed analysis:\n\
         {analysis}\n\
         \n\
         Tabular data:\n\
         {table}",
        location = display_location(location),
    )
}

/// Prompt asking for a parent-friendly school-run rain briefing
#[must_use]
pub fn build_school_run_prompt(location: &str, table: &str, analysis: &str, legend: &str) -> String {
    format!(
        "Write a short school-run rain briefing for {location}:\n\
         - Start with today's drop-off and pickup rain risk.\n\
         - Then mention any later school days where rain is possible or likely.\n\
         - Ignore weekends, there is no school run.\n\
         - Keep it to a few sentences a parent can read at a glance.\n\
         - Use simple formatting (no special characters that could break HTML/Markdown parsing).\n\
         \n\
         Computed analysis:\n\
         {analysis}\n\
         \n\
         {legend}\n\
         \n\
         Tabular data:\n\
         {table}",
        location = display_location(location),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_location_uses_fallback() {
        assert_eq!(display_location("  "), FALLBACK_LOCATION);
        assert_eq!(display_location(" London Heathrow "), "London Heathrow");
    }

    #[test]
    fn wind_prompt_embeds_inputs() {
        let prompt = build_wind_prompt("London Heathrow", 15, "TABLE", "ANALYSIS");
        assert!(prompt.starts_with("Summarize the next 15 days wind forecast for London Heathrow"));
        assert!(prompt.contains("easterly winds"));
        assert!(prompt.contains("Computed analysis:\nANALYSIS"));
        assert!(prompt.ends_with("Tabular data:\nTABLE"));
    }

    #[test]
    fn school_run_prompt_embeds_inputs() {
        let prompt = build_school_run_prompt("", "TABLE", "ANALYSIS", "LEGEND");
        assert!(prompt.contains("for the target location"));
        assert!(prompt.contains("ANALYSIS"));
        assert!(prompt.contains("LEGEND"));
        assert!(prompt.ends_with("TABLE"));
    }
}
