//! Case model and its request shapes.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a case.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    Filed,
    Admitted,
    Listed,
    Hearing,
    Reserved,
    Judgment,
    Archived,
    #[serde(other)]
    Unknown,
}

impl CaseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaseStatus::Filed => "filed",
            CaseStatus::Admitted => "admitted",
            CaseStatus::Listed => "listed",
            CaseStatus::Hearing => "hearing",
            CaseStatus::Reserved => "reserved",
            CaseStatus::Judgment => "judgment",
            CaseStatus::Archived => "archived",
            CaseStatus::Unknown => "unknown",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "filed" => Some(CaseStatus::Filed),
            "admitted" => Some(CaseStatus::Admitted),
            "listed" => Some(CaseStatus::Listed),
            "hearing" => Some(CaseStatus::Hearing),
            "reserved" => Some(CaseStatus::Reserved),
            "judgment" => Some(CaseStatus::Judgment),
            "archived" => Some(CaseStatus::Archived),
            _ => None,
        }
    }

    /// Filed, admitted and listed cases are still waiting for a hearing.
    pub fn is_pending(&self) -> bool {
        matches!(
            self,
            CaseStatus::Filed | CaseStatus::Admitted | CaseStatus::Listed
        )
    }
}

/// Urgency class of a case.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyLevel {
    HabeasCorpus,
    Bail,
    Injunction,
    #[default]
    #[serde(other)]
    Regular,
}

impl UrgencyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            UrgencyLevel::HabeasCorpus => "habeas_corpus",
            UrgencyLevel::Bail => "bail",
            UrgencyLevel::Injunction => "injunction",
            UrgencyLevel::Regular => "regular",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "habeas_corpus" => Some(UrgencyLevel::HabeasCorpus),
            "bail" => Some(UrgencyLevel::Bail),
            "injunction" => Some(UrgencyLevel::Injunction),
            "regular" => Some(UrgencyLevel::Regular),
            _ => None,
        }
    }

    /// Display form, e.g. "habeas corpus".
    pub fn label(&self) -> String {
        self.as_str().replacen('_', " ", 1)
    }

    pub fn is_urgent(&self) -> bool {
        !matches!(self, UrgencyLevel::Regular)
    }
}

/// Area of law a court, judge or case belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Jurisdiction {
    Civil,
    Criminal,
    Family,
    Tax,
    Constitutional,
}

impl Jurisdiction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Jurisdiction::Civil => "civil",
            Jurisdiction::Criminal => "criminal",
            Jurisdiction::Family => "family",
            Jurisdiction::Tax => "tax",
            Jurisdiction::Constitutional => "constitutional",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "civil" => Some(Jurisdiction::Civil),
            "criminal" => Some(Jurisdiction::Criminal),
            "family" => Some(Jurisdiction::Family),
            "tax" => Some(Jurisdiction::Tax),
            "constitutional" => Some(Jurisdiction::Constitutional),
            _ => None,
        }
    }
}

/// A case as returned by the cases endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Case {
    pub id: i64,
    pub case_number: String,
    pub title: String,
    pub status: CaseStatus,
    #[serde(default)]
    pub urgency_level: UrgencyLevel,
    pub filing_date: NaiveDateTime,
    #[serde(default)]
    pub court_id: Option<i64>,
    #[serde(default)]
    pub jurisdiction: Option<Jurisdiction>,
    #[serde(default)]
    pub case_type: Option<String>,
    #[serde(default)]
    pub complexity_score: Option<i32>,
    #[serde(default)]
    pub public_interest_score: Option<i32>,
    #[serde(default)]
    pub estimated_duration_hours: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub connected_cases: Option<Vec<i64>>,
    #[serde(default)]
    pub assigned_judge_id: Option<i64>,
}

/// Request body for `POST /cases`.
#[derive(Debug, Clone, Serialize)]
pub struct NewCase {
    pub title: String,
    pub court_id: i64,
    pub jurisdiction: Jurisdiction,
    pub case_type: String,
    pub urgency_level: UrgencyLevel,
    pub complexity_score: i32,
    pub public_interest_score: i32,
    pub estimated_duration_hours: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub connected_cases: Vec<i64>,
}

/// Query parameters for `GET /cases`.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct CaseQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CaseStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urgency: Option<UrgencyLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub court_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Request body for `PUT /cases/{id}/status`.
#[derive(Debug, Clone, Serialize)]
pub struct StatusChange {
    pub new_status: CaseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// One entry of a case's status history, newest first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusHistoryEntry {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub old_status: Option<CaseStatus>,
    pub new_status: CaseStatus,
    #[serde(default)]
    pub notes: Option<String>,
    pub change_date: NaiveDateTime,
}

/// Delay report for one case.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CaseDelay {
    pub case_number: String,
    pub case_title: String,
    pub filed_date: NaiveDateTime,
    pub expected_days: i64,
    pub actual_days: i64,
    pub delay_days: i64,
    pub severity: String,
    pub status: String,
    #[serde(default)]
    pub next_hearing_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub adjournment_count: u32,
    #[serde(default)]
    pub reasons: Vec<String>,
}
