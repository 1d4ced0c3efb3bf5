//! Judge model and workload analysis.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Jurisdiction;

/// Name fields of the user behind a judge record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JudgeProfile {
    #[serde(default)]
    pub full_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Judge {
    pub id: i64,
    #[serde(default)]
    pub user: Option<JudgeProfile>,
    #[serde(default)]
    pub specializations: Vec<Jurisdiction>,
    #[serde(default)]
    pub experience_years: i32,
    #[serde(default)]
    pub court_id: Option<i64>,
    #[serde(default)]
    pub disposal_rate: Option<f64>,
    #[serde(default)]
    pub current_workload: Option<i32>,
    #[serde(default)]
    pub performance_score: Option<f64>,
    #[serde(default)]
    pub is_available: bool,
}

impl Judge {
    pub fn full_name(&self) -> Option<&str> {
        self.user.as_ref().and_then(|u| u.full_name.as_deref())
    }

    /// Name shown in lists, falling back to the record id.
    pub fn display_name(&self) -> String {
        self.full_name()
            .map(str::to_string)
            .unwrap_or_else(|| format!("Judge {}", self.id))
    }
}

/// Query parameters for `GET /judges`.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct JudgeQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub court_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialization: Option<Jurisdiction>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AvailabilityChange {
    pub is_available: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Recusal {
    pub judge_id: i64,
    pub case_id: i64,
    pub reason: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WorkloadStats {
    #[serde(default)]
    pub average: f64,
    #[serde(default)]
    pub maximum: f64,
    #[serde(default)]
    pub minimum: f64,
    #[serde(default)]
    pub std_deviation: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OverloadedJudge {
    pub judge_id: i64,
    pub judge_name: String,
    pub current_workload: f64,
    pub excess: f64,
    pub severity: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UnderloadedJudge {
    pub judge_id: i64,
    pub judge_name: String,
    pub current_workload: f64,
    pub capacity: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RebalanceSuggestion {
    pub from_judge_id: i64,
    pub from_judge: String,
    pub to_judge_id: i64,
    pub to_judge: String,
    pub suggested_cases_count: u32,
    pub reason: String,
}

/// Response of `GET /judges/workload-analysis`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WorkloadAnalysis {
    pub total_judges: u32,
    #[serde(default)]
    pub available_judges: u32,
    #[serde(default)]
    pub workload_stats: WorkloadStats,
    #[serde(default)]
    pub overloaded_judges: Vec<OverloadedJudge>,
    #[serde(default)]
    pub underloaded_judges: Vec<UnderloadedJudge>,
    #[serde(default)]
    pub balance_score: Option<f64>,
    #[serde(default)]
    pub suggestions: Vec<RebalanceSuggestion>,
    #[serde(default)]
    pub needs_rebalancing: bool,
}

/// Request body for `POST /judges`.
#[derive(Debug, Clone, Serialize)]
pub struct NewJudge {
    pub user_id: i64,
    pub court_id: i64,
    pub specializations: Vec<Jurisdiction>,
    pub experience_years: i32,
}

/// Response of `GET /judges/{id}/workload`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JudgeWorkload {
    pub judge_id: i64,
    #[serde(default)]
    pub total_active_cases: u32,
    #[serde(default)]
    pub total_estimated_hours: f64,
    #[serde(default)]
    pub current_workload_percentage: Option<f64>,
    #[serde(default)]
    pub urgency_breakdown: BTreeMap<String, u32>,
    #[serde(default)]
    pub complexity_breakdown: BTreeMap<String, u32>,
    #[serde(default)]
    pub performance_score: Option<f64>,
    #[serde(default)]
    pub disposal_rate: Option<f64>,
}

/// Query parameters for `GET /judges/{id}/schedule`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScheduleWindow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JudgeSchedule {
    pub judge_id: i64,
    #[serde(default)]
    pub schedule: Vec<serde_json::Value>,
    #[serde(default)]
    pub availability: bool,
    #[serde(default)]
    pub message: String,
}
