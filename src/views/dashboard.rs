//! Landing page: headline counts, recent cases and today's hearings.

use crate::models::{
    Case, CaseQuery, CaseStatus, Judge, JudgeQuery, UpcomingHearing, UpcomingHearings,
    UpcomingQuery,
};
use crate::query::{QueryKey, QueryOptions, QueryResult};

use super::cases::urgency_tone;
use super::{Page, PageContext};

const RECENT_LIMIT: usize = 5;
const CASE_LIMIT: u32 = 100;
const HEARING_DAYS: u32 = 7;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_cases: usize,
    pub pending_cases: usize,
    pub urgent_cases: usize,
    pub available_judges: usize,
    pub total_judges: usize,
    pub upcoming_hearings: usize,
}

pub fn stats(cases: &[Case], judges: &[Judge], hearings: &[UpcomingHearing]) -> DashboardStats {
    DashboardStats {
        total_cases: cases.len(),
        pending_cases: cases.iter().filter(|c| c.status.is_pending()).count(),
        urgent_cases: cases.iter().filter(|c| c.urgency_level.is_urgent()).count(),
        available_judges: judges.iter().filter(|j| j.is_available).count(),
        total_judges: judges.len(),
        upcoming_hearings: hearings.len(),
    }
}

pub fn recent_cases(cases: &[Case]) -> &[Case] {
    &cases[..cases.len().min(RECENT_LIMIT)]
}

pub fn todays_hearings(hearings: &[UpcomingHearing]) -> Vec<&UpcomingHearing> {
    hearings.iter().filter(|h| h.days_until == 0).collect()
}

fn progress_marker(status: CaseStatus) -> &'static str {
    match status {
        CaseStatus::Judgment => "decided",
        CaseStatus::Archived => "closed",
        _ => "pending",
    }
}

pub struct DashboardPage {
    pub user_name: String,
    pub cases: QueryResult<Vec<Case>>,
    pub judges: QueryResult<Vec<Judge>>,
    pub hearings: QueryResult<UpcomingHearings>,
}

impl DashboardPage {
    /// The three queries are independent and resolve concurrently.
    pub async fn load(ctx: &PageContext) -> Self {
        let court_id = ctx.court_id();

        let cases_key = QueryKey::new("dashboard-cases").with(CASE_LIMIT);
        let judges_key = QueryKey::new("dashboard-judges").with(court_id);
        let hearings_key = QueryKey::new("dashboard-hearings").with(HEARING_DAYS);

        let case_query = CaseQuery {
            limit: Some(CASE_LIMIT),
            ..CaseQuery::default()
        };
        let judge_query = JudgeQuery {
            court_id,
            ..JudgeQuery::default()
        };
        let hearing_query = UpcomingQuery {
            days_ahead: Some(HEARING_DAYS),
            ..UpcomingQuery::default()
        };
        let api = &ctx.api;

        let cases = ctx.queries.fetch(&cases_key, QueryOptions::default(), || {
            api.cases.list(&case_query)
        });
        let judges = ctx.queries.fetch(&judges_key, QueryOptions::default(), || {
            api.judges.list(&judge_query)
        });
        let hearings = ctx.queries.fetch(&hearings_key, QueryOptions::default(), || {
            api.calendar.upcoming_hearings(&hearing_query)
        });
        let (cases, judges, hearings) = futures::join!(cases, judges, hearings);

        Self {
            user_name: ctx
                .user
                .as_ref()
                .map(|u| u.full_name.clone())
                .unwrap_or_default(),
            cases,
            judges,
            hearings,
        }
    }

    fn hearing_list(&self) -> &[UpcomingHearing] {
        self.hearings
            .data()
            .map(|h| h.upcoming_hearings.as_slice())
            .unwrap_or_default()
    }

    pub fn stats(&self) -> DashboardStats {
        stats(
            self.cases.data().map(Vec::as_slice).unwrap_or_default(),
            self.judges.data().map(Vec::as_slice).unwrap_or_default(),
            self.hearing_list(),
        )
    }
}

impl Page for DashboardPage {
    fn render(&self) -> Vec<String> {
        let stats = self.stats();
        let mut lines = vec![
            "Dashboard".to_string(),
            format!(
                "Welcome back, {}. Here's what's happening in your court today.",
                self.user_name
            ),
            format!("Total Cases: {}", stats.total_cases),
            format!("Pending Cases: {}", stats.pending_cases),
            format!("Urgent Cases: {}", stats.urgent_cases),
            format!(
                "Available Judges: {}/{}",
                stats.available_judges, stats.total_judges
            ),
            format!("Upcoming Hearings: {}", stats.upcoming_hearings),
            String::new(),
            "Recent Cases".to_string(),
        ];

        let cases = self.cases.data().map(Vec::as_slice).unwrap_or_default();
        let recent = recent_cases(cases);
        if recent.is_empty() {
            lines.push("  No recent cases".to_string());
        }
        for case in recent {
            lines.push(format!(
                "  {} [{}:{}] {} ({})",
                case.case_number,
                case.urgency_level.label(),
                urgency_tone(case.urgency_level).as_str(),
                case.title,
                progress_marker(case.status),
            ));
        }

        lines.push(String::new());
        lines.push("Today's Hearings".to_string());
        let today = todays_hearings(self.hearing_list());
        if today.is_empty() {
            lines.push("  No hearings scheduled for today".to_string());
        }
        for hearing in today {
            lines.push(format!(
                "  {} {}  {} - {}  {} {}h",
                hearing.case_number,
                hearing.case_title,
                hearing.courtroom,
                hearing.judge,
                hearing.scheduled_date.format("%H:%M"),
                hearing.duration_hours,
            ));
        }
        lines
    }
}
