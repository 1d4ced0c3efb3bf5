//! Prediction requests and responses.

use serde::{Deserialize, Serialize};

/// Request body for `POST /ml/analyze-case`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CaseAnalysisRequest {
    pub facts_text: String,
    pub decision_type: String,
    pub disposition: String,
    pub num_parties: u32,
    pub num_witnesses: u32,
    pub evidence_pages: u32,
    pub adjournments: u32,
    pub judge_speed: f64,
    pub lawyer_win_rate: f64,
    pub case_complexity: f64,
    pub top_judges: u32,
}

impl Default for CaseAnalysisRequest {
    fn default() -> Self {
        Self {
            facts_text: String::new(),
            decision_type: "majority opinion".to_string(),
            disposition: "affirmed".to_string(),
            num_parties: 2,
            num_witnesses: 0,
            evidence_pages: 0,
            adjournments: 0,
            judge_speed: 1.0,
            lawyer_win_rate: 0.5,
            case_complexity: 0.5,
            top_judges: 3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendedJudge {
    pub judge_id: i64,
    pub similarity_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CaseAnalysis {
    pub outcome_probability: f64,
    pub expected_duration_hours: f64,
    #[serde(default)]
    pub recommended_judges: Vec<RecommendedJudge>,
    #[serde(default)]
    pub analysis_summary: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DurationPredictionRequest {
    pub num_parties: u32,
    pub num_witnesses: u32,
    pub evidence_pages: u32,
    pub adjournments: u32,
    pub judge_speed: f64,
    pub lawyer_win_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DurationPrediction {
    pub predicted_duration_hours: f64,
    pub confidence_level: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OutcomePredictionRequest {
    pub facts_text: String,
    pub decision_type: String,
    pub disposition: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutcomePrediction {
    pub plaintiff_win_probability: f64,
    pub prediction_confidence: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct JudgeRecommendationRequest {
    pub case_complexity: f64,
    pub expected_duration: f64,
    pub plaintiff_win_prob: f64,
    pub top_judges: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JudgeRecommendation {
    #[serde(default)]
    pub recommended_judges: Vec<RecommendedJudge>,
    #[serde(default)]
    pub recommendation_basis: String,
}

/// Request body for `POST /ml/predict-settlement`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SettlementRequest {
    pub case_type: String,
    pub district: String,
    pub days_to_resolution: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SettlementPrediction {
    pub settlement_probability: f64,
    #[serde(default)]
    pub settlement_prediction: i32,
    #[serde(default)]
    pub recommend_mediation: bool,
    #[serde(default)]
    pub recommend_early_settlement: bool,
    #[serde(default)]
    pub confidence: String,
    #[serde(default)]
    pub reasoning: String,
    #[serde(default)]
    pub estimated_settlement_days: u32,
    #[serde(default)]
    pub action_items: Vec<String>,
    #[serde(default)]
    pub settlement_category: String,
}

/// Response of `GET /ml/ml-status`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MlStatus {
    pub status: String,
    #[serde(default)]
    pub models_loaded: bool,
    #[serde(default)]
    pub available_endpoints: Vec<String>,
    #[serde(default)]
    pub error: Option<String>,
}
