//! Court endpoints.

use crate::errors::ClientError;
use crate::http::HttpClient;
use crate::models::{Court, CourtHierarchy, CourtLevel, CourtListQuery, CourtStatistics};

use super::NO_PARAMS;

#[derive(Clone)]
pub struct CourtsApi {
    http: HttpClient,
}

impl CourtsApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// GET /courts
    pub async fn list(&self, level: Option<CourtLevel>) -> Result<Vec<Court>, ClientError> {
        self.http.get("/courts", &CourtListQuery { level }).await
    }

    /// GET /courts/hierarchy
    pub async fn hierarchy(&self) -> Result<CourtHierarchy, ClientError> {
        self.http.get("/courts/hierarchy", NO_PARAMS).await
    }

    /// GET /courts/statistics
    pub async fn statistics(&self) -> Result<CourtStatistics, ClientError> {
        self.http.get("/courts/statistics", NO_PARAMS).await
    }
}
