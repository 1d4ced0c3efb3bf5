//! Prediction endpoints.

use crate::errors::ClientError;
use crate::http::HttpClient;
use crate::models::{
    CaseAnalysis, CaseAnalysisRequest, DurationPrediction, DurationPredictionRequest,
    JudgeRecommendation, JudgeRecommendationRequest, MlStatus, OutcomePrediction,
    OutcomePredictionRequest, SettlementPrediction, SettlementRequest,
};

use super::NO_PARAMS;

#[derive(Clone)]
pub struct MlApi {
    http: HttpClient,
}

impl MlApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// POST /ml/analyze-case
    pub async fn analyze_case(
        &self,
        request: &CaseAnalysisRequest,
    ) -> Result<CaseAnalysis, ClientError> {
        self.http.post_json("/ml/analyze-case", request).await
    }

    /// POST /ml/predict-duration
    pub async fn predict_duration(
        &self,
        request: &DurationPredictionRequest,
    ) -> Result<DurationPrediction, ClientError> {
        self.http.post_json("/ml/predict-duration", request).await
    }

    /// POST /ml/predict-outcome
    pub async fn predict_outcome(
        &self,
        request: &OutcomePredictionRequest,
    ) -> Result<OutcomePrediction, ClientError> {
        self.http.post_json("/ml/predict-outcome", request).await
    }

    /// POST /ml/recommend-judges
    pub async fn recommend_judges(
        &self,
        request: &JudgeRecommendationRequest,
    ) -> Result<JudgeRecommendation, ClientError> {
        self.http.post_json("/ml/recommend-judges", request).await
    }

    /// POST /ml/predict-settlement
    pub async fn predict_settlement(
        &self,
        request: &SettlementRequest,
    ) -> Result<SettlementPrediction, ClientError> {
        self.http.post_json("/ml/predict-settlement", request).await
    }

    /// GET /ml/ml-status
    pub async fn status(&self) -> Result<MlStatus, ClientError> {
        self.http.get("/ml/ml-status", NO_PARAMS).await
    }
}
