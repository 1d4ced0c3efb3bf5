//! Application shell.
//!
//! Wires configuration, token storage, the session, the HTTP adapter, the domain
//! facades and the query cache together, then routes page requests through the
//! guard.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::api::Api;
use crate::auth::{AuthContext, AuthState, SessionHandle};
use crate::config::Config;
use crate::errors::ClientError;
use crate::http::{Hooks, HttpClient};
use crate::models::{CaseAnalysisRequest, CourtLevel, User};
use crate::notify::NotificationLog;
use crate::query::QueryClient;
use crate::routes::{guard, NavigationLog, Navigator, Route, RouteDecision};
use crate::session::{FileTokenStore, TokenStore};
use crate::views::calendar::{CalendarMode, CalendarPage};
use crate::views::case_detail::CaseDetailPage;
use crate::views::cases::{CaseFilters, CasesPage};
use crate::views::courts::{CourtsPage, CourtsTab};
use crate::views::dashboard::DashboardPage;
use crate::views::delays::DelayPage;
use crate::views::documents::DocumentsPage;
use crate::views::judges::{JudgeFilters, JudgesPage};
use crate::views::ml::MlPage;
use crate::views::scheduling::SchedulingPage;
use crate::views::{MountScope, Page, PageContext};

/// Everything a page may be parameterised by. Unused fields are ignored.
#[derive(Debug, Clone)]
pub struct PageInput {
    pub case_filters: CaseFilters,
    pub judge_filters: JudgeFilters,
    /// Reference date for the calendar.
    pub date: NaiveDate,
    pub calendar_mode: CalendarMode,
    /// Case picked on the scheduling page.
    pub selected_case: Option<i64>,
    /// Document search text.
    pub search: String,
    pub courts_tab: CourtsTab,
    pub court_level: Option<CourtLevel>,
    /// Analysis form to submit; `None` only shows the page.
    pub analysis: Option<CaseAnalysisRequest>,
    /// Delay portal lookup; `None` shows the help text.
    pub case_number: Option<String>,
}

impl Default for PageInput {
    fn default() -> Self {
        Self {
            case_filters: CaseFilters::default(),
            judge_filters: JudgeFilters::default(),
            date: chrono::Local::now().date_naive(),
            calendar_mode: CalendarMode::default(),
            selected_case: None,
            search: String::new(),
            courts_tab: CourtsTab::default(),
            court_level: None,
            analysis: None,
            case_number: None,
        }
    }
}

/// Result of opening a route.
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    /// Session check still running.
    Placeholder,
    Redirect(Route),
    Page(Vec<String>),
}

pub struct Dashboard {
    tokens: Arc<dyn TokenStore>,
    notifications: Arc<NotificationLog>,
    navigation: Arc<NavigationLog>,
    api: Api,
    queries: QueryClient,
    auth: AuthContext,
}

impl Dashboard {
    /// Shell backed by the token file named in `config`.
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        let tokens = Arc::new(FileTokenStore::open(&config.token_path)?);
        Self::with_token_store(config, tokens)
    }

    pub fn with_token_store(
        config: &Config,
        tokens: Arc<dyn TokenStore>,
    ) -> Result<Self, ClientError> {
        let notifications = Arc::new(NotificationLog::new());
        let navigation = Arc::new(NavigationLog::new());
        let session = SessionHandle::new();

        let http = HttpClient::new(
            config,
            Hooks {
                tokens: tokens.clone(),
                notifier: notifications.clone(),
                navigator: navigation.clone(),
                session: session.clone(),
            },
        )?;
        let api = Api::new(http);
        let auth = AuthContext::new(session, api.auth.clone(), tokens.clone());

        tracing::debug!(api_url = %config.api_url, "dashboard initialized");

        Ok(Self {
            tokens,
            notifications,
            navigation,
            api,
            queries: QueryClient::from_config(config),
            auth,
        })
    }

    pub fn state(&self) -> AuthState {
        self.auth.state()
    }

    pub fn session(&self) -> &SessionHandle {
        self.auth.session()
    }

    pub fn api(&self) -> &Api {
        &self.api
    }

    pub fn queries(&self) -> &QueryClient {
        &self.queries
    }

    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    pub fn notifications(&self) -> &NotificationLog {
        &self.notifications
    }

    pub fn navigation(&self) -> &NavigationLog {
        &self.navigation
    }

    /// Resolve the stored session, if any.
    pub async fn mount(&self) -> AuthState {
        self.auth.mount().await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<User, ClientError> {
        let user = self.auth.login(email, password).await?;
        self.queries.clear();
        self.navigation.navigate(Route::Dashboard);
        Ok(user)
    }

    pub fn logout(&self) -> Result<(), ClientError> {
        self.queries.clear();
        self.auth.logout()
    }

    pub fn context(&self) -> PageContext {
        PageContext {
            api: self.api.clone(),
            queries: self.queries.clone(),
            notifier: self.notifications.clone(),
            user: self.state().user().cloned(),
        }
    }

    /// Guard `route`, then load and render it.
    pub async fn open(&self, route: &Route, input: &PageInput) -> Screen {
        let route = match guard(route, &self.state()) {
            RouteDecision::Placeholder => return Screen::Placeholder,
            RouteDecision::Redirect(target) => {
                self.navigation.navigate(target.clone());
                return Screen::Redirect(target);
            }
            RouteDecision::Render(route) => route,
        };

        let scope = MountScope::new();
        let lines = self.render(&route, input).await;

        // A 401 while loading ended the session; the adapter already redirected.
        if route.is_protected() && !self.state().is_authenticated() {
            scope.dispose();
        }
        match scope.apply(lines) {
            Some(lines) => Screen::Page(lines),
            None => Screen::Redirect(Route::Login),
        }
    }

    async fn render(&self, route: &Route, input: &PageInput) -> Vec<String> {
        let ctx = self.context();
        match route {
            Route::Login => vec!["Sign in".to_string(), "Email and password".to_string()],
            Route::Dashboard => DashboardPage::load(&ctx).await.render(),
            Route::Cases => CasesPage::load(&ctx, input.case_filters.clone())
                .await
                .render(),
            Route::CaseDetail(id) => CaseDetailPage::load(&ctx, id).await.render(),
            Route::Judges => JudgesPage::load(&ctx, input.judge_filters.clone())
                .await
                .render(),
            Route::Calendar => CalendarPage::load(&ctx, input.date, input.calendar_mode)
                .await
                .render(),
            Route::Scheduling => SchedulingPage::load(&ctx, input.selected_case)
                .await
                .render(),
            Route::Documents => DocumentsPage::load(&ctx, &input.search).await.render(),
            Route::MlPredictions => match &input.analysis {
                Some(request) => MlPage::analyze(&ctx, request.clone()).await.render(),
                None => MlPage::load(&ctx).await.render(),
            },
            Route::Courts => CourtsPage::load(&ctx, input.courts_tab, input.court_level)
                .await
                .render(),
            Route::DelayJustification => match &input.case_number {
                Some(number) => DelayPage::search(&ctx, number).await.render(),
                None => DelayPage::blank().render(),
            },
            Route::NotFound(path) => vec![format!("Page not found: {}", path)],
        }
    }
}
