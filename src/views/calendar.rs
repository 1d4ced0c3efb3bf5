//! Court calendar: week grid plus the next week's hearings.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};

use crate::errors::ClientError;
use crate::models::{RescheduleOutcome, UpcomingHearings, UpcomingQuery, WeekView};
use crate::query::{QueryKey, QueryOptions, QueryResult};

use super::{Page, PageContext, LOADING};

const UPCOMING_DAYS: u32 = 7;
const UPCOMING_SHOWN: usize = 5;
const SLOTS_SHOWN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CalendarMode {
    Day,
    #[default]
    Week,
    Month,
}

impl CalendarMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "day" => Some(CalendarMode::Day),
            "week" => Some(CalendarMode::Week),
            "month" => Some(CalendarMode::Month),
            _ => None,
        }
    }
}

/// Monday of the week containing `date`. A Sunday belongs to the week that
/// started six days earlier.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// The reference date one week earlier (`forward = false`) or later.
pub fn shift_week(date: NaiveDate, forward: bool) -> NaiveDate {
    if forward {
        date + Duration::days(7)
    } else {
        date - Duration::days(7)
    }
}

pub fn week_key(week_start: NaiveDate, court_id: Option<i64>) -> QueryKey {
    QueryKey::new("calendar-week")
        .with(week_start.format("%Y-%m-%d").to_string())
        .with(court_id)
}

pub fn upcoming_key() -> QueryKey {
    QueryKey::new("upcoming-hearings").with(UPCOMING_DAYS)
}

pub struct CalendarPage {
    pub reference: NaiveDate,
    pub mode: CalendarMode,
    pub week: QueryResult<WeekView>,
    pub upcoming: QueryResult<UpcomingHearings>,
}

impl CalendarPage {
    pub async fn load(ctx: &PageContext, reference: NaiveDate, mode: CalendarMode) -> Self {
        let start = week_start(reference);
        let court_id = ctx.court_id();
        let api = &ctx.api.calendar;
        let upcoming_query = UpcomingQuery {
            days_ahead: Some(UPCOMING_DAYS),
            ..UpcomingQuery::default()
        };

        let week_key = week_key(start, court_id);
        let upcoming_key = upcoming_key();
        let week = ctx.queries.fetch(
            &week_key,
            QueryOptions::enabled(mode == CalendarMode::Week),
            || api.week_view(start, court_id),
        );
        let upcoming = ctx
            .queries
            .fetch(&upcoming_key, QueryOptions::default(), || {
                api.upcoming_hearings(&upcoming_query)
            });
        let (week, upcoming) = futures::join!(week, upcoming);

        Self {
            reference,
            mode,
            week,
            upcoming,
        }
    }
}

/// Move a hearing to a new slot. Calendar views go stale only if the backend
/// accepted the move.
pub async fn drag_drop_reschedule(
    ctx: &PageContext,
    hearing_id: i64,
    new_datetime: NaiveDateTime,
    new_courtroom_id: Option<i64>,
) -> Result<RescheduleOutcome, ClientError> {
    let outcome = ctx
        .api
        .calendar
        .drag_drop_reschedule(hearing_id, new_datetime, new_courtroom_id)
        .await?;

    if outcome.success {
        for resource in ["calendar-week", "upcoming-hearings", "dashboard-hearings"] {
            ctx.queries.invalidate_resource(resource);
        }
        ctx.notify_success("Hearing rescheduled");
    } else {
        ctx.notify_error(&outcome.message);
    }
    Ok(outcome)
}

impl Page for CalendarPage {
    fn render(&self) -> Vec<String> {
        let mut lines = vec![
            "Court Calendar".to_string(),
            self.reference.format("%B %Y").to_string(),
        ];

        if self.mode == CalendarMode::Week {
            if self.week.is_loading() {
                lines.push(LOADING.to_string());
            }
            if let Some(week) = self.week.data() {
                for (name, day) in week.days() {
                    lines.push(format!(
                        "{} - {}  {} hearings",
                        name,
                        day.date.format("%Y-%m-%d"),
                        day.total_hearings
                    ));
                    if !day.is_working_day {
                        lines.push("  Weekend - No hearings".to_string());
                        continue;
                    }
                    for slot in day.time_slots.iter().take(SLOTS_SHOWN) {
                        if slot.hearings.is_empty() {
                            continue;
                        }
                        lines.push(format!("  {}", slot.time.format("%H:%M")));
                        for hearing in &slot.hearings {
                            lines.push(format!(
                                "    {} - {}",
                                hearing.case_number, hearing.courtroom
                            ));
                        }
                    }
                }
            }
        }

        lines.push(String::new());
        lines.push(format!("Upcoming Hearings (Next {} Days)", UPCOMING_DAYS));
        let hearings = self
            .upcoming
            .data()
            .map(|u| u.upcoming_hearings.as_slice())
            .unwrap_or_default();
        if hearings.is_empty() {
            lines.push("  No upcoming hearings".to_string());
        }
        for hearing in hearings.iter().take(UPCOMING_SHOWN) {
            lines.push(format!(
                "  {} {}  {} - {}  {}",
                hearing.case_number,
                hearing.case_title,
                hearing.courtroom,
                hearing.judge,
                hearing.scheduled_date.format("%Y-%m-%d %H:%M"),
            ));
        }
        lines
    }
}
