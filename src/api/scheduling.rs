//! Scheduling endpoints.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::errors::ClientError;
use crate::http::HttpClient;
use crate::models::{
    ConflictQuery, ConflictReport, Hearing, MessageResponse, NewHearing, OptimizationReport,
    RescheduleRequest, SchedulingRequest, SchedulingResponse,
};

#[derive(Clone)]
pub struct SchedulingApi {
    http: HttpClient,
}

#[derive(Serialize)]
struct CourtScope {
    #[serde(skip_serializing_if = "Option::is_none")]
    court_id: Option<i64>,
}

impl SchedulingApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// POST /scheduling/find-slots
    pub async fn find_slots(
        &self,
        request: &SchedulingRequest,
    ) -> Result<SchedulingResponse, ClientError> {
        self.http.post_json("/scheduling/find-slots", request).await
    }

    /// POST /scheduling/schedule-hearing
    pub async fn schedule_hearing(&self, hearing: &NewHearing) -> Result<Hearing, ClientError> {
        self.http
            .post_json("/scheduling/schedule-hearing", hearing)
            .await
    }

    /// GET /scheduling/conflicts/{case_id}
    pub async fn conflicts(
        &self,
        case_id: i64,
        proposed_date: NaiveDateTime,
        duration_hours: f64,
    ) -> Result<ConflictReport, ClientError> {
        self.http
            .get(
                &format!("/scheduling/conflicts/{}", case_id),
                &ConflictQuery {
                    proposed_date,
                    duration_hours,
                },
            )
            .await
    }

    /// POST /scheduling/reschedule/{hearing_id}
    pub async fn reschedule(
        &self,
        hearing_id: i64,
        new_date: NaiveDateTime,
        reason: &str,
    ) -> Result<MessageResponse, ClientError> {
        self.http
            .post_json(
                &format!("/scheduling/reschedule/{}", hearing_id),
                &RescheduleRequest {
                    new_date,
                    reason: reason.to_string(),
                },
            )
            .await
    }

    /// GET /scheduling/optimization-report
    pub async fn optimization_report(
        &self,
        court_id: Option<i64>,
    ) -> Result<OptimizationReport, ClientError> {
        self.http
            .get("/scheduling/optimization-report", &CourtScope { court_id })
            .await
    }
}
