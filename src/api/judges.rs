//! Judge endpoints.

use chrono::NaiveDate;
use serde::Serialize;

use crate::errors::ClientError;
use crate::http::HttpClient;
use crate::models::{
    AvailabilityChange, Judge, JudgeQuery, JudgeSchedule, JudgeWorkload, MessageResponse, NewJudge,
    Recusal, ScheduleWindow, WorkloadAnalysis,
};

use super::NO_PARAMS;

#[derive(Clone)]
pub struct JudgesApi {
    http: HttpClient,
}

#[derive(Serialize)]
struct CourtScope {
    #[serde(skip_serializing_if = "Option::is_none")]
    court_id: Option<i64>,
}

impl JudgesApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// GET /judges
    pub async fn list(&self, query: &JudgeQuery) -> Result<Vec<Judge>, ClientError> {
        self.http.get("/judges", query).await
    }

    /// GET /judges/{id}
    pub async fn get(&self, id: i64) -> Result<Judge, ClientError> {
        self.http.get(&format!("/judges/{}", id), NO_PARAMS).await
    }

    /// PUT /judges/{id}/availability
    pub async fn update_availability(
        &self,
        id: i64,
        is_available: bool,
    ) -> Result<MessageResponse, ClientError> {
        self.http
            .put_json(
                &format!("/judges/{}/availability", id),
                &AvailabilityChange { is_available },
            )
            .await
    }

    /// POST /judges/recusals
    pub async fn create_recusal(&self, recusal: &Recusal) -> Result<MessageResponse, ClientError> {
        self.http.post_json("/judges/recusals", recusal).await
    }

    /// GET /judges/workload-analysis
    pub async fn workload_analysis(
        &self,
        court_id: Option<i64>,
    ) -> Result<WorkloadAnalysis, ClientError> {
        self.http
            .get("/judges/workload-analysis", &CourtScope { court_id })
            .await
    }

    /// POST /judges
    pub async fn create(&self, judge: &NewJudge) -> Result<Judge, ClientError> {
        self.http.post_json("/judges", judge).await
    }

    /// GET /judges/{id}/workload
    pub async fn workload(&self, id: i64) -> Result<JudgeWorkload, ClientError> {
        self.http
            .get(&format!("/judges/{}/workload", id), NO_PARAMS)
            .await
    }

    /// GET /judges/{id}/schedule
    pub async fn schedule(
        &self,
        id: i64,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<JudgeSchedule, ClientError> {
        self.http
            .get(
                &format!("/judges/{}/schedule", id),
                &ScheduleWindow {
                    start_date,
                    end_date,
                },
            )
            .await
    }
}
