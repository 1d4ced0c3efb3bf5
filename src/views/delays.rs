//! Public case delay lookup. Works without a session.

use crate::models::CaseDelay;
use crate::query::{QueryKey, QueryOptions};

use super::{Page, PageContext, Tone};

pub const EMPTY_INPUT: &str = "Please enter a case number";
pub const INVALID_INPUT: &str = "Invalid case number format";

/// Case id from what a litigant typed: `CASE-123` or `123`.
///
/// Takes the segment after the first `-` (the whole input if there is none) and
/// reads its leading integer.
pub fn parse_case_number(input: &str) -> Option<i64> {
    let segment = input
        .split('-')
        .nth(1)
        .filter(|s| !s.is_empty())
        .unwrap_or(input);
    leading_integer(segment)
}

fn leading_integer(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

pub fn severity_tone(severity: &str) -> Tone {
    match severity.to_lowercase().as_str() {
        "critical" => Tone::Red,
        "high" => Tone::Orange,
        "moderate" => Tone::Yellow,
        _ => Tone::Green,
    }
}

/// Elapsed share of the expected timeline, in percent.
pub fn progress_percent(actual_days: i64, expected_days: i64) -> f64 {
    if expected_days <= 0 {
        return 100.0;
    }
    actual_days as f64 / expected_days as f64 * 100.0
}

/// Width of the progress bar, capped at 100.
pub fn progress_width(actual_days: i64, expected_days: i64) -> f64 {
    progress_percent(actual_days, expected_days).min(100.0)
}

pub fn delay_bar_tone(delay_days: i64) -> Tone {
    if delay_days > 30 {
        Tone::Red
    } else if delay_days > 14 {
        Tone::Orange
    } else if delay_days > 7 {
        Tone::Yellow
    } else {
        Tone::Green
    }
}

pub struct DelayPage {
    pub input: String,
    pub searched: bool,
    pub delay: Option<CaseDelay>,
}

impl DelayPage {
    /// The portal before any search.
    pub fn blank() -> Self {
        Self {
            input: String::new(),
            searched: false,
            delay: None,
        }
    }

    pub async fn search(ctx: &PageContext, input: &str) -> Self {
        if input.trim().is_empty() {
            ctx.notify_error(EMPTY_INPUT);
            return Self::blank();
        }

        let mut page = Self {
            input: input.to_string(),
            searched: true,
            delay: None,
        };
        let case_id = match parse_case_number(input) {
            Some(id) => id,
            None => {
                ctx.notify_error(INVALID_INPUT);
                return page;
            }
        };

        let key = QueryKey::new("case-delays").with(case_id);
        let api = &ctx.api.cases;
        let result = ctx
            .queries
            .fetch(&key, QueryOptions::default(), || api.delays(case_id))
            .await;
        page.delay = result.data().cloned();
        page
    }
}

impl Page for DelayPage {
    fn render(&self) -> Vec<String> {
        let mut lines = vec!["Case Delay Transparency Portal".to_string()];

        if !self.searched {
            lines.push("How to Use This Portal".to_string());
            lines.push("  1. Enter your case number in the search box above".to_string());
            lines.push(
                "  2. View detailed information about your case status and any delays".to_string(),
            );
            lines.push(
                "  3. Check the projected next hearing date and reasons for any delays".to_string(),
            );
            lines.push("  4. Return to this portal anytime for updated information".to_string());
            return lines;
        }

        let delay = match &self.delay {
            Some(delay) => delay,
            None => {
                lines.push("Case Not Found".to_string());
                lines.push(format!(
                    "No case found with the number \"{}\". Please check the case number and try again.",
                    self.input
                ));
                return lines;
            }
        };

        let next_hearing = delay
            .next_hearing_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "Not scheduled".to_string());

        lines.push("Case Information".to_string());
        lines.push(format!("  Case Number: {}", delay.case_number));
        lines.push(format!("  Status: {}", delay.status));
        lines.push(format!("  Filed Date: {}", delay.filed_date.format("%Y-%m-%d")));
        lines.push(format!("  Next Hearing: {}", next_hearing));
        lines.push(format!("  Case Title: {}", delay.case_title));
        lines.push(String::new());
        lines.push("Delay Analysis".to_string());
        lines.push(format!(
            "  {} Delay [{}]",
            delay.severity,
            severity_tone(&delay.severity).as_str()
        ));
        lines.push(format!(
            "  This case has been delayed by {} days beyond the expected timeline.",
            delay.delay_days
        ));
        lines.push(format!(
            "  Expected Days: {}  Actual Days: {}  Adjournments: {}",
            delay.expected_days, delay.actual_days, delay.adjournment_count
        ));
        lines.push(format!(
            "  Progress: {}% (bar {:.0}% [{}])",
            progress_percent(delay.actual_days, delay.expected_days).round(),
            progress_width(delay.actual_days, delay.expected_days),
            delay_bar_tone(delay.delay_days).as_str(),
        ));

        if !delay.reasons.is_empty() {
            lines.push("  Reasons for Delay".to_string());
            for reason in &delay.reasons {
                lines.push(format!("    - {}", reason));
            }
        }

        lines.push(String::new());
        lines.push("What's Next?".to_string());
        match delay.next_hearing_date {
            Some(date) => lines.push(format!(
                "  Your next hearing is on {}",
                date.format("%A, %B %-d, %Y")
            )),
            None => lines.push(
                "  The court is working to schedule your next hearing. You will be notified once a date is set."
                    .to_string(),
            ),
        }
        lines
    }
}
