//! Hearing scheduling: pick an admitted case, see suggested slots, book one.

use chrono::NaiveDateTime;

use crate::errors::ClientError;
use crate::models::{
    Case, CaseQuery, CaseStatus, ConflictReport, Hearing, NewHearing, OptimizationReport,
    SchedulingRequest, SchedulingResponse, SuggestedSlot,
};
use crate::query::{QueryKey, QueryOptions, QueryResult};

use super::cases::urgency_tone;
use super::{Page, PageContext, ViewState, LOADING};

pub const NO_SLOTS_MESSAGE: &str = "No available slots found";

/// Queries a newly booked hearing makes stale.
pub const BOOKING_INVALIDATES: &[&str] = &[
    "available-slots",
    "pending-cases",
    "calendar-week",
    "upcoming-hearings",
    "dashboard-hearings",
    "optimization-report",
];

pub fn pending_cases_key(court_id: Option<i64>) -> QueryKey {
    QueryKey::new("pending-cases").with(court_id)
}

pub fn slots_key(case_id: Option<i64>) -> QueryKey {
    QueryKey::new("available-slots").with(case_id)
}

pub fn report_key(court_id: Option<i64>) -> QueryKey {
    QueryKey::new("optimization-report").with(court_id)
}

pub struct SchedulingPage {
    pub selected: Option<i64>,
    pub cases: QueryResult<Vec<Case>>,
    pub slots: QueryResult<SchedulingResponse>,
    pub report: QueryResult<OptimizationReport>,
}

impl SchedulingPage {
    pub async fn load(ctx: &PageContext, selected: Option<i64>) -> Self {
        let court_id = ctx.court_id();
        let api = &ctx.api;
        let case_query = CaseQuery {
            status: Some(CaseStatus::Admitted),
            court_id,
            ..CaseQuery::default()
        };
        let request = SchedulingRequest::for_case(selected.unwrap_or_default());

        let cases_key = pending_cases_key(court_id);
        let slots_key = slots_key(selected);
        let report_key = report_key(court_id);
        let cases = ctx
            .queries
            .fetch(&cases_key, QueryOptions::default(), || {
                api.cases.list(&case_query)
            });
        let slots = ctx.queries.fetch(
            &slots_key,
            QueryOptions::enabled(selected.is_some()),
            || api.scheduling.find_slots(&request),
        );
        let report = ctx
            .queries
            .fetch(&report_key, QueryOptions::default(), || {
                api.scheduling.optimization_report(court_id)
            });
        let (cases, slots, report) = futures::join!(cases, slots, report);

        Self {
            selected,
            cases,
            slots,
            report,
        }
    }

    /// Suggested slots for the selected case. A failed lookup shows as empty.
    pub fn slot_view(&self) -> ViewState<Vec<&SuggestedSlot>> {
        let items = self
            .slots
            .data()
            .map(|r| r.suggested_slots.iter().collect())
            .unwrap_or_default();
        ViewState::list(&self.slots, items)
    }
}

/// Book a hearing and mark every schedule view stale.
pub async fn schedule_hearing(
    ctx: &PageContext,
    hearing: NewHearing,
) -> Result<Hearing, ClientError> {
    let booked = ctx
        .queries
        .mutate(
            ctx.api.scheduling.schedule_hearing(&hearing),
            BOOKING_INVALIDATES,
        )
        .await?;
    ctx.notify_success("Hearing scheduled successfully");
    Ok(booked)
}

/// Judge and courtroom clashes for a proposed slot.
pub async fn check_conflicts(
    ctx: &PageContext,
    case_id: i64,
    proposed: NaiveDateTime,
    duration_hours: f64,
) -> QueryResult<ConflictReport> {
    let key = QueryKey::new("conflicts")
        .with(case_id)
        .with(proposed)
        .with(duration_hours);
    let api = &ctx.api.scheduling;
    ctx.queries
        .fetch(&key, QueryOptions::default(), || {
            api.conflicts(case_id, proposed, duration_hours)
        })
        .await
}

impl Page for SchedulingPage {
    fn render(&self) -> Vec<String> {
        let mut lines = vec![
            "Intelligent Scheduling".to_string(),
            String::new(),
            "Select Case to Schedule".to_string(),
        ];

        let cases = self.cases.data().map(Vec::as_slice).unwrap_or_default();
        if cases.is_empty() {
            lines.push("  No cases available for scheduling".to_string());
        }
        for case in cases {
            let marker = if self.selected == Some(case.id) { ">" } else { " " };
            lines.push(format!(
                "{} {}  {}  [{}:{}]",
                marker,
                case.case_number,
                case.title,
                case.urgency_level.label(),
                urgency_tone(case.urgency_level).as_str(),
            ));
        }

        if self.selected.is_some() {
            lines.push(String::new());
            lines.push("Available Time Slots".to_string());
            match self.slot_view() {
                ViewState::Idle | ViewState::Loading => lines.push(format!("  {}", LOADING)),
                ViewState::Empty => lines.push(format!("  {}", NO_SLOTS_MESSAGE)),
                ViewState::Populated(slots) => {
                    for slot in slots {
                        lines.push(format!(
                            "  {} at {}  {} - {}  Duration: {}h  Priority: {:.1}",
                            slot.datetime.format("%Y-%m-%d"),
                            slot.datetime.format("%H:%M"),
                            slot.judge_name,
                            slot.courtroom_name,
                            slot.estimated_duration,
                            slot.priority_score,
                        ));
                    }
                }
            }
        }

        let report = self.report.data().cloned().unwrap_or_default();
        lines.push(String::new());
        lines.push("Scheduling Metrics".to_string());
        lines.push(format!("  Total Cases: {}", report.total_cases));
        lines.push(format!("  Pending Cases: {}", report.pending_cases));
        lines.push(format!("  Average Delay: {:.0} days", report.average_delay_days));
        for suggestion in &report.optimization_suggestions {
            lines.push(format!("  - {}", suggestion));
        }
        lines
    }
}
