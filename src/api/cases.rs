//! Case endpoints.

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::errors::ClientError;
use crate::http::HttpClient;
use crate::models::{
    Case, CaseDelay, CaseQuery, CaseStatus, MessageResponse, NewCase, StatusChange,
    StatusHistoryEntry,
};

use super::NO_PARAMS;

#[derive(Clone)]
pub struct CasesApi {
    http: HttpClient,
}

#[derive(Serialize)]
struct JudgeAssignment {
    judge_id: i64,
}

#[derive(Serialize)]
struct DelayedQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    threshold_days: Option<u32>,
}

impl CasesApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// GET /cases
    pub async fn list(&self, query: &CaseQuery) -> Result<Vec<Case>, ClientError> {
        self.http.get("/cases", query).await
    }

    /// GET /cases/{id}
    pub async fn get(&self, id: i64) -> Result<Case, ClientError> {
        self.http.get(&format!("/cases/{}", id), NO_PARAMS).await
    }

    /// POST /cases
    pub async fn create(&self, case: &NewCase) -> Result<Case, ClientError> {
        self.http.post_json("/cases", case).await
    }

    /// PUT /cases/{id}/status
    pub async fn update_status(
        &self,
        id: i64,
        status: CaseStatus,
        notes: Option<String>,
    ) -> Result<MessageResponse, ClientError> {
        let body = StatusChange {
            new_status: status,
            notes,
        };
        self.http
            .put_json(&format!("/cases/{}/status", id), &body)
            .await
    }

    /// GET /cases/{id}/history
    pub async fn history(&self, id: i64) -> Result<Vec<StatusHistoryEntry>, ClientError> {
        self.http
            .get(&format!("/cases/{}/history", id), NO_PARAMS)
            .await
    }

    /// GET /cases/search/{case_number}. The number is one encoded path segment.
    pub async fn search_by_number(&self, case_number: &str) -> Result<Case, ClientError> {
        let request = self
            .http
            .request_segments(Method::GET, &["cases", "search", case_number])?;
        self.http.send(request).await
    }

    /// POST /cases/calculate-complexity with the factors as query parameters and no
    /// body. The response shape is backend-defined and returned as is.
    pub async fn calculate_complexity<Q>(&self, factors: &Q) -> Result<Value, ClientError>
    where
        Q: Serialize + ?Sized,
    {
        self.http
            .post_query("/cases/calculate-complexity", factors)
            .await
    }

    /// PUT /cases/{id}/assign-judge
    pub async fn assign_judge(
        &self,
        case_id: i64,
        judge_id: i64,
    ) -> Result<MessageResponse, ClientError> {
        self.http
            .put_json(
                &format!("/cases/{}/assign-judge", case_id),
                &JudgeAssignment { judge_id },
            )
            .await
    }

    /// GET /cases/{id}/delays
    pub async fn delays(&self, id: i64) -> Result<CaseDelay, ClientError> {
        self.http
            .get(&format!("/cases/{}/delays", id), NO_PARAMS)
            .await
    }

    /// GET /cases/delayed
    pub async fn delayed(&self, threshold_days: Option<u32>) -> Result<Vec<CaseDelay>, ClientError> {
        self.http
            .get("/cases/delayed", &DelayedQuery { threshold_days })
            .await
    }
}
