//! Domain API facades.
//!
//! One facade per backend resource. Each method shapes exactly one request and
//! returns the adapter's result untouched; caching belongs to the query layer.

mod auth;
mod calendar;
mod cases;
mod courts;
mod documents;
mod judges;
mod ml;
mod scheduling;

pub use auth::*;
pub use calendar::*;
pub use cases::*;
pub use courts::*;
pub use documents::*;
pub use judges::*;
pub use ml::*;
pub use scheduling::*;

use crate::http::HttpClient;

/// Empty query string.
pub(crate) const NO_PARAMS: &[(&str, &str)] = &[];

/// All facades, sharing one adapter.
#[derive(Clone)]
pub struct Api {
    pub auth: AuthApi,
    pub cases: CasesApi,
    pub judges: JudgesApi,
    pub scheduling: SchedulingApi,
    pub calendar: CalendarApi,
    pub documents: DocumentsApi,
    pub ml: MlApi,
    pub courts: CourtsApi,
}

impl Api {
    pub fn new(http: HttpClient) -> Self {
        Self {
            auth: AuthApi::new(http.clone()),
            cases: CasesApi::new(http.clone()),
            judges: JudgesApi::new(http.clone()),
            scheduling: SchedulingApi::new(http.clone()),
            calendar: CalendarApi::new(http.clone()),
            documents: DocumentsApi::new(http.clone()),
            ml: MlApi::new(http.clone()),
            courts: CourtsApi::new(http),
        }
    }
}
