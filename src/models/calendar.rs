//! Calendar payloads: week grid, upcoming hearings, drag-and-drop reschedule.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::UrgencyLevel;

/// Query parameters for `GET /calendar/week-view`.
#[derive(Debug, Clone, Serialize)]
pub struct WeekViewQuery {
    pub week_start: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub court_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SlotHearing {
    pub hearing_id: i64,
    pub case_number: String,
    #[serde(default)]
    pub case_title: String,
    pub courtroom: String,
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub judge: String,
}

/// One hour of a working day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeSlot {
    pub time: NaiveDateTime,
    #[serde(default)]
    pub hearings: Vec<SlotHearing>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DaySchedule {
    pub date: NaiveDate,
    pub is_working_day: bool,
    #[serde(default)]
    pub total_hearings: u32,
    #[serde(default)]
    pub time_slots: Vec<TimeSlot>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WeekSummary {
    #[serde(default)]
    pub total_hearings: u32,
    #[serde(default)]
    pub busiest_day: String,
}

/// Response of `GET /calendar/week-view`, keyed by weekday name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeekView {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    #[serde(default)]
    pub court_id: Option<i64>,
    #[serde(default)]
    pub schedule: BTreeMap<String, DaySchedule>,
    #[serde(default)]
    pub summary: WeekSummary,
}

impl WeekView {
    /// Days in calendar order (the map itself is ordered by name).
    pub fn days(&self) -> Vec<(&str, &DaySchedule)> {
        let mut days: Vec<(&str, &DaySchedule)> = self
            .schedule
            .iter()
            .map(|(name, day)| (name.as_str(), day))
            .collect();
        days.sort_by_key(|(_, day)| day.date);
        days
    }
}

/// Query parameters for `GET /calendar/upcoming-hearings`.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct UpcomingQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_ahead: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub judge_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub courtroom_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpcomingHearing {
    pub hearing_id: i64,
    pub case_number: String,
    #[serde(default)]
    pub case_title: String,
    pub scheduled_date: NaiveDateTime,
    #[serde(default)]
    pub duration_hours: f64,
    pub courtroom: String,
    pub judge: String,
    #[serde(default)]
    pub urgency: UrgencyLevel,
    pub days_until: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UpcomingHearings {
    #[serde(default)]
    pub upcoming_hearings: Vec<UpcomingHearing>,
    #[serde(default)]
    pub total_count: u32,
}

/// Request body for `POST /calendar/drag-drop-reschedule`.
#[derive(Debug, Clone, Serialize)]
pub struct DragDropReschedule {
    pub hearing_id: i64,
    pub new_datetime: NaiveDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_courtroom_id: Option<i64>,
}

/// Outcome of a drag-and-drop move; `success` is false when the slot conflicts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RescheduleOutcome {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub conflicts: Vec<serde_json::Value>,
    #[serde(default)]
    pub new_datetime: Option<NaiveDateTime>,
    #[serde(default)]
    pub courtroom_id: Option<i64>,
}

/// Query parameters for `GET /calendar/heatmap`.
#[derive(Debug, Clone, Serialize)]
pub struct HeatmapQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub court_id: Option<i64>,
}

/// One courtroom on one working day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarSlot {
    pub date: NaiveDateTime,
    pub courtroom_id: i64,
    #[serde(default)]
    pub judge_id: Option<i64>,
    #[serde(default)]
    pub case_id: Option<i64>,
    /// available, moderate, busy or overloaded
    pub status: String,
    pub capacity_percentage: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CalendarHeatmap {
    #[serde(default)]
    pub date_range: BTreeMap<String, NaiveDateTime>,
    #[serde(default)]
    pub slots: Vec<CalendarSlot>,
    /// Judge id (as a JSON object key) to workload percentage.
    #[serde(default)]
    pub workload_distribution: BTreeMap<String, f64>,
}

/// Query parameters for `GET /calendar/day-view`.
#[derive(Debug, Clone, Serialize)]
pub struct DayViewQuery {
    pub target_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub court_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DayHearing {
    pub hearing_id: i64,
    pub case_number: String,
    #[serde(default)]
    pub case_title: String,
    pub scheduled_time: NaiveDateTime,
    #[serde(default)]
    pub duration_hours: f64,
    #[serde(default)]
    pub judge_name: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub urgency_level: UrgencyLevel,
    #[serde(default)]
    pub case_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CourtroomDay {
    pub courtroom_name: String,
    #[serde(default)]
    pub hearings: Vec<DayHearing>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DaySummary {
    #[serde(default)]
    pub total_courtrooms: u32,
    #[serde(default)]
    pub active_courtrooms: u32,
    #[serde(default)]
    pub total_hours_scheduled: f64,
}

/// Response of `GET /calendar/day-view`, keyed by courtroom id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DayView {
    pub date: NaiveDate,
    #[serde(default)]
    pub court_id: Option<i64>,
    #[serde(default)]
    pub schedule: BTreeMap<String, CourtroomDay>,
    #[serde(default)]
    pub total_hearings: u32,
    #[serde(default)]
    pub summary: DaySummary,
}
