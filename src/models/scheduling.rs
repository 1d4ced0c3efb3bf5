//! Scheduling requests, slot suggestions, conflicts and hearings.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::Jurisdiction;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SchedulingConstraints {
    pub judge_expertise_required: Vec<Jurisdiction>,
    pub min_advance_days: u32,
    pub max_daily_hours: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_time_slots: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avoid_conflicts_with: Option<Vec<i64>>,
}

impl Default for SchedulingConstraints {
    fn default() -> Self {
        Self {
            judge_expertise_required: vec![Jurisdiction::Civil],
            min_advance_days: 7,
            max_daily_hours: 6.0,
            preferred_time_slots: None,
            avoid_conflicts_with: None,
        }
    }
}

/// Request body for `POST /scheduling/find-slots`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SchedulingRequest {
    pub case_id: i64,
    pub constraints: SchedulingConstraints,
    pub priority_weight: f64,
}

impl SchedulingRequest {
    pub fn for_case(case_id: i64) -> Self {
        Self {
            case_id,
            constraints: SchedulingConstraints::default(),
            priority_weight: 1.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SuggestedSlot {
    pub datetime: NaiveDateTime,
    pub judge_id: i64,
    pub judge_name: String,
    pub courtroom_id: i64,
    pub courtroom_name: String,
    pub estimated_duration: f64,
    pub priority_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SchedulingResponse {
    pub case_id: i64,
    #[serde(default)]
    pub suggested_slots: Vec<SuggestedSlot>,
    #[serde(default)]
    pub conflicts: Vec<serde_json::Value>,
    #[serde(default)]
    pub explanation: String,
}

/// Request body for `POST /scheduling/schedule-hearing`.
#[derive(Debug, Clone, Serialize)]
pub struct NewHearing {
    pub case_id: i64,
    pub courtroom_id: i64,
    pub scheduled_date: NaiveDateTime,
    pub scheduled_duration_hours: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Hearing {
    pub id: i64,
    pub case_id: i64,
    pub courtroom_id: i64,
    pub scheduled_date: NaiveDateTime,
    pub scheduled_duration_hours: f64,
    #[serde(default)]
    pub actual_duration_hours: Option<f64>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub adjournment_reason: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConflictQuery {
    pub proposed_date: NaiveDateTime,
    pub duration_hours: f64,
}

/// A judge or courtroom that is busy during a proposed slot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Conflict {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub judge_id: Option<i64>,
    #[serde(default)]
    pub judge_name: Option<String>,
    #[serde(default)]
    pub courtroom_id: Option<i64>,
    #[serde(default)]
    pub courtroom_name: Option<String>,
    #[serde(default)]
    pub conflicts: Vec<String>,
}

/// Response of `GET /scheduling/conflicts/{case_id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConflictReport {
    pub case_id: i64,
    pub proposed_datetime: NaiveDateTime,
    pub duration_hours: f64,
    #[serde(default)]
    pub conflicts: Vec<Conflict>,
    #[serde(default)]
    pub has_conflicts: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RescheduleRequest {
    pub new_date: NaiveDateTime,
    pub reason: String,
}

/// Response of `GET /scheduling/optimization-report`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OptimizationReport {
    #[serde(default)]
    pub court_id: Option<i64>,
    #[serde(default)]
    pub total_cases: u32,
    #[serde(default)]
    pub pending_cases: u32,
    #[serde(default)]
    pub average_delay_days: f64,
    #[serde(default)]
    pub optimization_suggestions: Vec<String>,
}
