//! Routes and route guarding.

use std::fmt;
use std::sync::Mutex;

use crate::auth::AuthState;

/// Every page the dashboard can show.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Dashboard,
    Cases,
    /// `/cases/{id}`; the raw path segment, validated by the page.
    CaseDetail(String),
    Judges,
    Calendar,
    Scheduling,
    Documents,
    MlPredictions,
    Courts,
    /// Public delay lookup, reachable without a session.
    DelayJustification,
    NotFound(String),
}

impl Route {
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim().trim_end_matches('/');
        let segments: Vec<&str> = trimmed
            .trim_start_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        match segments.as_slice() {
            [] => Route::Dashboard,
            ["login"] => Route::Login,
            ["cases"] => Route::Cases,
            ["cases", id] => Route::CaseDetail((*id).to_string()),
            ["judges"] => Route::Judges,
            ["calendar"] => Route::Calendar,
            ["scheduling"] => Route::Scheduling,
            ["documents"] => Route::Documents,
            ["ml-predictions"] => Route::MlPredictions,
            ["courts"] => Route::Courts,
            ["delay-justification"] => Route::DelayJustification,
            _ => Route::NotFound(path.to_string()),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Dashboard => "/".to_string(),
            Route::Cases => "/cases".to_string(),
            Route::CaseDetail(id) => format!("/cases/{}", id),
            Route::Judges => "/judges".to_string(),
            Route::Calendar => "/calendar".to_string(),
            Route::Scheduling => "/scheduling".to_string(),
            Route::Documents => "/documents".to_string(),
            Route::MlPredictions => "/ml-predictions".to_string(),
            Route::Courts => "/courts".to_string(),
            Route::DelayJustification => "/delay-justification".to_string(),
            Route::NotFound(path) => path.clone(),
        }
    }

    /// Whether the route needs an authenticated session.
    pub fn is_protected(&self) -> bool {
        !matches!(
            self,
            Route::Login | Route::DelayJustification | Route::NotFound(_)
        )
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// What the router does with a route for the current auth state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    Render(Route),
    /// Session check still running.
    Placeholder,
    Redirect(Route),
}

/// Decide how to handle `route`. Reads the snapshot only; never changes it.
pub fn guard(route: &Route, state: &AuthState) -> RouteDecision {
    match route {
        Route::Login if state.is_authenticated() => RouteDecision::Redirect(Route::Dashboard),
        r if !r.is_protected() => RouteDecision::Render(r.clone()),
        r => match state {
            AuthState::Loading => RouteDecision::Placeholder,
            AuthState::Authenticated(_) => RouteDecision::Render(r.clone()),
            AuthState::Unauthenticated => RouteDecision::Redirect(Route::Login),
        },
    }
}

/// Target of forced navigation (the 401 path).
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Records every forced navigation.
#[derive(Debug, Default)]
pub struct NavigationLog {
    history: Mutex<Vec<Route>>,
}

impl NavigationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> Vec<Route> {
        self.lock().clone()
    }

    pub fn current(&self) -> Option<Route> {
        self.lock().last().cloned()
    }

    pub fn count(&self, route: &Route) -> usize {
        self.lock().iter().filter(|r| *r == route).count()
    }

    pub fn take(&self) -> Vec<Route> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Route>> {
        self.history
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Navigator for NavigationLog {
    fn navigate(&self, route: Route) {
        tracing::info!("navigating to {}", route);
        self.lock().push(route);
    }
}
