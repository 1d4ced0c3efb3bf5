//! Calendar endpoints.

use chrono::{NaiveDate, NaiveDateTime};

use crate::errors::ClientError;
use crate::http::HttpClient;
use crate::models::{
    CalendarHeatmap, DayView, DayViewQuery, DragDropReschedule, HeatmapQuery, RescheduleOutcome,
    UpcomingHearings, UpcomingQuery, WeekView, WeekViewQuery,
};

#[derive(Clone)]
pub struct CalendarApi {
    http: HttpClient,
}

impl CalendarApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// GET /calendar/week-view
    pub async fn week_view(
        &self,
        week_start: NaiveDate,
        court_id: Option<i64>,
    ) -> Result<WeekView, ClientError> {
        self.http
            .get(
                "/calendar/week-view",
                &WeekViewQuery {
                    week_start,
                    court_id,
                },
            )
            .await
    }

    /// GET /calendar/upcoming-hearings
    pub async fn upcoming_hearings(
        &self,
        query: &UpcomingQuery,
    ) -> Result<UpcomingHearings, ClientError> {
        self.http.get("/calendar/upcoming-hearings", query).await
    }

    /// POST /calendar/drag-drop-reschedule
    pub async fn drag_drop_reschedule(
        &self,
        hearing_id: i64,
        new_datetime: NaiveDateTime,
        new_courtroom_id: Option<i64>,
    ) -> Result<RescheduleOutcome, ClientError> {
        self.http
            .post_json(
                "/calendar/drag-drop-reschedule",
                &DragDropReschedule {
                    hearing_id,
                    new_datetime,
                    new_courtroom_id,
                },
            )
            .await
    }

    /// GET /calendar/heatmap
    pub async fn heatmap(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
        court_id: Option<i64>,
    ) -> Result<CalendarHeatmap, ClientError> {
        self.http
            .get(
                "/calendar/heatmap",
                &HeatmapQuery {
                    start_date,
                    end_date,
                    court_id,
                },
            )
            .await
    }

    /// GET /calendar/day-view
    pub async fn day_view(
        &self,
        target_date: NaiveDate,
        court_id: Option<i64>,
    ) -> Result<DayView, ClientError> {
        self.http
            .get(
                "/calendar/day-view",
                &DayViewQuery {
                    target_date,
                    court_id,
                },
            )
            .await
    }
}
