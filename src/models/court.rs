//! Court records, hierarchy and statistics.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Jurisdiction;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CourtLevel {
    SupremeCourt,
    HighCourt,
    DistrictCourt,
    #[serde(other)]
    Other,
}

impl CourtLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            CourtLevel::SupremeCourt => "supreme_court",
            CourtLevel::HighCourt => "high_court",
            CourtLevel::DistrictCourt => "district_court",
            CourtLevel::Other => "other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "supreme_court" => Some(CourtLevel::SupremeCourt),
            "high_court" => Some(CourtLevel::HighCourt),
            "district_court" => Some(CourtLevel::DistrictCourt),
            _ => None,
        }
    }

    /// Badge text, e.g. "HIGH COURT".
    pub fn label(&self) -> String {
        self.as_str().replacen('_', " ", 1).to_uppercase()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Court {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub level: Option<CourtLevel>,
    #[serde(default)]
    pub jurisdiction: Option<Jurisdiction>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub parent_court_id: Option<i64>,
    #[serde(default)]
    pub parent_court_name: Option<String>,
    #[serde(default)]
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CourtListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<CourtLevel>,
}

/// One node of the court tree; children are nested courts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HierarchyNode {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub level: Option<CourtLevel>,
    #[serde(default)]
    pub jurisdiction: Option<Jurisdiction>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub children: Vec<HierarchyNode>,
}

/// Response of `GET /courts/hierarchy`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CourtHierarchy {
    #[serde(default)]
    pub hierarchy: Vec<HierarchyNode>,
    #[serde(default)]
    pub total_courts: u32,
    #[serde(default)]
    pub levels: BTreeMap<String, u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CourtStat {
    pub court_id: i64,
    pub court_name: String,
    #[serde(default)]
    pub level: Option<CourtLevel>,
    pub cases_count: u32,
    pub judges_count: u32,
    pub utilization: f64,
}

/// Response of `GET /courts/statistics`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CourtStatistics {
    #[serde(default)]
    pub total_courts: u32,
    #[serde(default)]
    pub total_cases: u32,
    #[serde(default)]
    pub total_judges: u32,
    #[serde(default)]
    pub court_statistics: Vec<CourtStat>,
}
