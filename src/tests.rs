//! Integration tests against a mock case management backend.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Form, Multipart, Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use chrono::NaiveDate;
use dashmap::DashMap;
use serde_json::{json, Value};

use crate::config::Config;
use crate::models::{
    CaseAnalysisRequest, CaseStatus, DurationPredictionRequest, Jurisdiction, NewJudge, NewUser,
    Recusal, SettlementRequest, UserRole,
};
use crate::notify::{Level, SERVER_ERROR_MESSAGE};
use crate::routes::Route;
use crate::session::{MemoryTokenStore, TokenStore};
use crate::views::calendar::drag_drop_reschedule;
use crate::views::case_detail::change_status;
use crate::views::documents::upload;
use crate::views::ml::predict_settlement;
use crate::views::scheduling::NO_SLOTS_MESSAGE;
use crate::{Dashboard, PageInput, Screen};

const TOKEN: &str = "tok-1";

/// One multipart field as received: name, file name and content.
type UploadField = (String, Option<String>, Vec<u8>);

/// Mock backend state: per-path hit counts, recorded query strings and bodies.
#[derive(Clone, Default)]
struct Backend {
    hits: Arc<DashMap<String, usize>>,
    queries: Arc<Mutex<Vec<(String, HashMap<String, String>)>>>,
    bodies: Arc<Mutex<Vec<(String, Value)>>>,
    uploads: Arc<Mutex<Vec<UploadField>>>,
    documents: Arc<Mutex<Vec<Value>>>,
    revoked: Arc<AtomicBool>,
}

impl Backend {
    fn hit(&self, path: &str) {
        *self.hits.entry(path.to_string()).or_insert(0) += 1;
    }

    fn record(&self, path: &str, params: HashMap<String, String>) {
        self.hit(path);
        self.queries
            .lock()
            .unwrap()
            .push((path.to_string(), params));
    }

    fn record_body(&self, path: &str, body: Value) {
        self.hit(path);
        self.bodies.lock().unwrap().push((path.to_string(), body));
    }

    fn bodies(&self, path: &str) -> Vec<Value> {
        self.bodies
            .lock()
            .unwrap()
            .iter()
            .filter(|(p, _)| p == path)
            .map(|(_, b)| b.clone())
            .collect()
    }

    fn hits(&self, path: &str) -> usize {
        self.hits.get(path).map(|v| *v).unwrap_or(0)
    }

    fn params(&self, path: &str) -> Vec<HashMap<String, String>> {
        self.queries
            .lock()
            .unwrap()
            .iter()
            .filter(|(p, _)| p == path)
            .map(|(_, q)| q.clone())
            .collect()
    }

    fn authorize(&self, headers: &HeaderMap) -> Result<(), Response> {
        let bearer = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "));
        if bearer == Some(TOKEN) && !self.revoked.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err((
                StatusCode::UNAUTHORIZED,
                Json(json!({"detail": "Could not validate credentials"})),
            )
                .into_response())
        }
    }
}

fn user_json() -> Value {
    json!({
        "id": 1,
        "email": "judge@court.example",
        "full_name": "Asha Rao",
        "role": "presiding_judge",
        "court_id": 3,
        "is_active": true
    })
}

fn case_json(id: i64, status: &str) -> Value {
    json!({
        "id": id,
        "case_number": format!("CASE-2024-{:03}", id),
        "title": format!("Matter {}", id),
        "status": status,
        "urgency_level": "regular",
        "filing_date": "2024-01-10T09:00:00",
        "court_id": 3
    })
}

async fn token(
    State(backend): State<Backend>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    backend.hit("/auth/token");
    if form.get("password").map(String::as_str) == Some("secret") {
        Json(json!({"access_token": TOKEN, "token_type": "bearer"})).into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Incorrect email or password"})),
        )
            .into_response()
    }
}

async fn me(State(backend): State<Backend>, headers: HeaderMap) -> Response {
    backend.hit("/auth/me");
    if let Err(denied) = backend.authorize(&headers) {
        return denied;
    }
    Json(user_json()).into_response()
}

async fn list_cases(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    backend.record("/cases", params.clone());
    if let Err(denied) = backend.authorize(&headers) {
        return denied;
    }
    // Slow enough for concurrent callers to overlap.
    tokio::time::sleep(Duration::from_millis(50)).await;
    let status = params.get("status").cloned().unwrap_or_else(|| "filed".into());
    Json(json!([case_json(1, &status), case_json(2, &status)])).into_response()
}

async fn get_case(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    backend.hit(&format!("/cases/{}", id));
    if let Err(denied) = backend.authorize(&headers) {
        return denied;
    }
    Json(case_json(id, "filed")).into_response()
}

async fn case_history(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    backend.hit(&format!("/cases/{}/history", id));
    if let Err(denied) = backend.authorize(&headers) {
        return denied;
    }
    Json(json!([{
        "id": 1,
        "old_status": null,
        "new_status": "filed",
        "change_date": "2024-01-10T09:00:00"
    }]))
    .into_response()
}

async fn update_status(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(_body): Json<Value>,
) -> Response {
    backend.hit(&format!("/cases/{}/status", id));
    if let Err(denied) = backend.authorize(&headers) {
        return denied;
    }
    if id == 2 {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({"detail": "Insufficient permissions"})),
        )
            .into_response();
    }
    Json(json!({"message": "Status updated"})).into_response()
}

async fn case_delays(State(backend): State<Backend>, Path(id): Path<i64>) -> Response {
    backend.hit(&format!("/cases/{}/delays", id));
    if id != 123 {
        return (StatusCode::NOT_FOUND, Json(json!({"detail": "Case not found"}))).into_response();
    }
    Json(json!({
        "case_number": "CASE-123",
        "case_title": "State v. Example",
        "filed_date": "2023-03-01T00:00:00",
        "expected_days": 180,
        "actual_days": 300,
        "delay_days": 120,
        "severity": "Critical",
        "status": "hearing",
        "next_hearing_date": null,
        "adjournment_count": 4,
        "reasons": ["Witness unavailable"]
    }))
    .into_response()
}

async fn list_judges(State(backend): State<Backend>, headers: HeaderMap) -> Response {
    backend.hit("/judges");
    if let Err(denied) = backend.authorize(&headers) {
        return denied;
    }
    Json(json!([
        {"id": 7, "user": {"full_name": "Hon. Mehta"}, "specializations": ["civil"], "is_available": true}
    ]))
    .into_response()
}

async fn find_slots(State(backend): State<Backend>, headers: HeaderMap) -> Response {
    backend.hit("/scheduling/find-slots");
    if let Err(denied) = backend.authorize(&headers) {
        return denied;
    }
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"detail": "solver crashed"})),
    )
        .into_response()
}

async fn optimization_report(State(backend): State<Backend>, headers: HeaderMap) -> Response {
    backend.hit("/scheduling/optimization-report");
    if let Err(denied) = backend.authorize(&headers) {
        return denied;
    }
    Json(json!({
        "court_id": 3,
        "total_cases": 10,
        "pending_cases": 4,
        "average_delay_days": 12.4,
        "optimization_suggestions": []
    }))
    .into_response()
}

async fn week_view(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    backend.record("/calendar/week-view", params.clone());
    if let Err(denied) = backend.authorize(&headers) {
        return denied;
    }
    let start = params.get("week_start").cloned().unwrap_or_default();
    Json(json!({
        "week_start": start,
        "week_end": start,
        "schedule": {},
        "summary": {"total_hearings": 0, "busiest_day": ""}
    }))
    .into_response()
}

async fn upcoming(State(backend): State<Backend>, headers: HeaderMap) -> Response {
    backend.hit("/calendar/upcoming-hearings");
    if let Err(denied) = backend.authorize(&headers) {
        return denied;
    }
    Json(json!({"upcoming_hearings": [], "total_count": 0})).into_response()
}

async fn semantic_search(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    backend.record("/documents/search/semantic", params.clone());
    if let Err(denied) = backend.authorize(&headers) {
        return denied;
    }
    Json(json!({
        "query": params.get("query").cloned().unwrap_or_default(),
        "results": [],
        "total_results": 0
    }))
    .into_response()
}

async fn calculate_complexity(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    backend.record("/cases/calculate-complexity", params);
    if let Err(denied) = backend.authorize(&headers) {
        return denied;
    }
    Json(json!({"complexity_score": 6})).into_response()
}

async fn create_judge(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    backend.record_body("POST /judges", body.clone());
    if let Err(denied) = backend.authorize(&headers) {
        return denied;
    }
    Json(json!({
        "id": 8,
        "user_id": body["user_id"],
        "court_id": body["court_id"],
        "specializations": body["specializations"],
        "is_available": true
    }))
    .into_response()
}

async fn drag_drop(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    backend.record_body("/calendar/drag-drop-reschedule", body.clone());
    if let Err(denied) = backend.authorize(&headers) {
        return denied;
    }
    if body["hearing_id"] == json!(5) {
        Json(json!({
            "success": true,
            "message": "Hearing rescheduled successfully",
            "new_datetime": body["new_datetime"],
            "courtroom_id": 2
        }))
        .into_response()
    } else {
        Json(json!({
            "success": false,
            "message": "Courtroom occupied",
            "conflicts": [{"hearing_id": 9}]
        }))
        .into_response()
    }
}

async fn case_documents(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    backend.hit(&format!("/documents/case/{}", id));
    if let Err(denied) = backend.authorize(&headers) {
        return denied;
    }
    let documents: Vec<Value> = backend
        .documents
        .lock()
        .unwrap()
        .iter()
        .filter(|d| d["case_id"] == json!(id))
        .cloned()
        .collect();
    Json(Value::Array(documents)).into_response()
}

async fn upload_document(
    State(backend): State<Backend>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    backend.hit("/documents/upload");
    if let Err(denied) = backend.authorize(&headers) {
        return denied;
    }
    let mut text = HashMap::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content = field.bytes().await.unwrap().to_vec();
        if file_name.is_none() {
            text.insert(name.clone(), String::from_utf8_lossy(&content).into_owned());
        }
        backend.uploads.lock().unwrap().push((name, file_name, content));
    }

    let case_id: i64 = text["case_id"].parse().unwrap();
    let document = json!({
        "id": 11,
        "case_id": case_id,
        "title": text["title"],
        "document_type": text["document_type"],
        "is_public": text["is_public"] == "true",
        "file_hash": "9f2c",
        "version": 1
    });
    backend.documents.lock().unwrap().push(document.clone());
    Json(document).into_response()
}

async fn settlement(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    backend.record_body("/ml/predict-settlement", body);
    if let Err(denied) = backend.authorize(&headers) {
        return denied;
    }
    Json(json!({
        "settlement_probability": 0.72,
        "settlement_prediction": 1,
        "recommend_mediation": true,
        "recommend_early_settlement": false,
        "confidence": "high",
        "reasoning": "Comparable civil matters in the district settle early"
    }))
    .into_response()
}

/// Records any other call and answers with a bare acknowledgement.
async fn fallback(
    State(backend): State<Backend>,
    method: axum::http::Method,
    uri: axum::http::Uri,
) -> Response {
    backend.hit(&format!("{} {}", method, uri.path()));
    Json(json!({"message": "ok"})).into_response()
}

fn mock_router(backend: Backend) -> Router {
    Router::new()
        .route("/api/auth/token", post(token))
        .route("/api/auth/me", get(me))
        .route("/api/cases", get(list_cases))
        .route(
            "/api/cases/calculate-complexity",
            post(calculate_complexity),
        )
        .route("/api/cases/{id}", get(get_case))
        .route("/api/cases/{id}/history", get(case_history))
        .route("/api/cases/{id}/status", put(update_status))
        .route("/api/cases/{id}/delays", get(case_delays))
        .route("/api/judges", get(list_judges).post(create_judge))
        .route("/api/scheduling/find-slots", post(find_slots))
        .route(
            "/api/scheduling/optimization-report",
            get(optimization_report),
        )
        .route("/api/calendar/week-view", get(week_view))
        .route("/api/calendar/upcoming-hearings", get(upcoming))
        .route("/api/calendar/drag-drop-reschedule", post(drag_drop))
        .route("/api/documents/upload", post(upload_document))
        .route("/api/documents/case/{id}", get(case_documents))
        .route("/api/documents/search/semantic", get(semantic_search))
        .route("/api/ml/predict-settlement", post(settlement))
        .fallback(fallback)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(backend)
}

/// Test fixture for integration tests.
struct TestFixture {
    backend: Backend,
    tokens: Arc<MemoryTokenStore>,
    dashboard: Dashboard,
}

impl TestFixture {
    async fn new() -> Self {
        Self::start(0).await
    }

    /// Fixture whose queries retry retryable failures `retries` times.
    async fn start(retries: u32) -> Self {
        let backend = Backend::default();
        let app = mock_router(backend.clone());

        // Bind to random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get addr");

        // Spawn server
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Wait for server to start
        tokio::time::sleep(Duration::from_millis(100)).await;

        let config = Config {
            api_url: format!("http://{}/api", addr),
            log_level: "warn".to_string(),
            query_retries: retries,
            query_retry_delay: Duration::from_millis(10),
            ..Config::default()
        };
        let tokens = Arc::new(MemoryTokenStore::new());
        let dashboard =
            Dashboard::with_token_store(&config, tokens.clone()).expect("Failed to build dashboard");

        TestFixture {
            backend,
            tokens,
            dashboard,
        }
    }

    /// Fixture with a signed-in user and a clean notification log.
    async fn signed_in() -> Self {
        Self::sign_in(Self::new().await).await
    }

    async fn sign_in(fixture: Self) -> Self {
        fixture.dashboard.mount().await;
        fixture
            .dashboard
            .login("judge@court.example", "secret")
            .await
            .expect("login failed");
        fixture.dashboard.notifications().drain();
        fixture
    }

    fn lines(screen: Screen) -> Vec<String> {
        match screen {
            Screen::Page(lines) => lines,
            other => panic!("expected a page, got {:?}", other),
        }
    }
}

#[tokio::test]
async fn test_login_flow() {
    let fixture = TestFixture::new().await;
    let dashboard = &fixture.dashboard;

    assert!(!dashboard.mount().await.is_authenticated());
    assert_eq!(fixture.backend.hits("/auth/me"), 0);
    assert_eq!(
        dashboard.open(&Route::Cases, &PageInput::default()).await,
        Screen::Redirect(Route::Login)
    );

    let err = dashboard
        .login("judge@court.example", "wrong")
        .await
        .unwrap_err();
    assert_eq!(err.message(), "Incorrect email or password");
    assert!(fixture.tokens.token().is_none());
    assert_eq!(dashboard.navigation().count(&Route::Login), 1);

    let user = dashboard
        .login("judge@court.example", "secret")
        .await
        .unwrap();
    assert_eq!(user.full_name, "Asha Rao");
    assert_eq!(fixture.tokens.token().as_deref(), Some(TOKEN));
    assert_eq!(dashboard.navigation().current(), Some(Route::Dashboard));
    assert_eq!(
        dashboard.open(&Route::Login, &PageInput::default()).await,
        Screen::Redirect(Route::Dashboard)
    );

    dashboard.logout().unwrap();
    assert!(fixture.tokens.token().is_none());
    assert!(dashboard.queries().is_empty());
}

#[tokio::test]
async fn test_mount_restores_session() {
    let fixture = TestFixture::new().await;
    fixture.tokens.store(TOKEN).unwrap();

    let state = fixture.dashboard.mount().await;
    assert_eq!(state.user().map(|u| u.court_id), Some(Some(3)));
    assert_eq!(fixture.backend.hits("/auth/me"), 1);
}

#[tokio::test]
async fn test_status_filters_are_cached_separately() {
    let fixture = TestFixture::signed_in().await;
    let dashboard = &fixture.dashboard;

    let mut filed = PageInput::default();
    filed.case_filters.status = Some(CaseStatus::Filed);
    let mut admitted = PageInput::default();
    admitted.case_filters.status = Some(CaseStatus::Admitted);

    let lines = TestFixture::lines(dashboard.open(&Route::Cases, &filed).await);
    assert!(lines.iter().any(|l| l.contains("CASE-2024-001")));
    dashboard.open(&Route::Cases, &admitted).await;
    dashboard.open(&Route::Cases, &filed).await;

    assert_eq!(fixture.backend.hits("/cases"), 2);
    assert_eq!(dashboard.queries().len(), 2);

    let statuses: Vec<_> = fixture
        .backend
        .params("/cases")
        .into_iter()
        .map(|p| p.get("status").cloned())
        .collect();
    assert_eq!(
        statuses,
        vec![Some("filed".to_string()), Some("admitted".to_string())]
    );
}

#[tokio::test]
async fn test_concurrent_pages_share_one_request() {
    let fixture = TestFixture::signed_in().await;
    let dashboard = &fixture.dashboard;
    let input = PageInput::default();

    let (a, b) = tokio::join!(
        dashboard.open(&Route::Cases, &input),
        dashboard.open(&Route::Cases, &input)
    );

    assert_eq!(a, b);
    assert_eq!(fixture.backend.hits("/cases"), 1);
}

#[tokio::test]
async fn test_expired_session_redirects_once() {
    let fixture = TestFixture::signed_in().await;
    let dashboard = &fixture.dashboard;
    fixture.backend.revoked.store(true, Ordering::SeqCst);

    // Three dashboard queries fail with 401 at once.
    let screen = dashboard.open(&Route::Dashboard, &PageInput::default()).await;

    assert_eq!(screen, Screen::Redirect(Route::Login));
    assert!(fixture.tokens.token().is_none());
    assert!(!dashboard.state().is_authenticated());
    assert_eq!(dashboard.navigation().count(&Route::Login), 1);
    assert!(dashboard.notifications().is_empty());
}

#[tokio::test]
async fn test_slot_search_failure_shows_empty_state() {
    let fixture = TestFixture::signed_in().await;
    let input = PageInput {
        selected_case: Some(1),
        ..PageInput::default()
    };

    let lines = TestFixture::lines(fixture.dashboard.open(&Route::Scheduling, &input).await);

    assert!(lines.contains(&format!("  {}", NO_SLOTS_MESSAGE)));
    let notes = fixture.dashboard.notifications().drain();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].level, Level::Error);
    assert_eq!(notes[0].message, SERVER_ERROR_MESSAGE);
    assert_eq!(fixture.backend.hits("/scheduling/find-slots"), 1);
}

#[tokio::test]
async fn test_rejection_detail_is_verbatim() {
    let fixture = TestFixture::signed_in().await;
    let ctx = fixture.dashboard.context();

    let err = change_status(&ctx, 2, CaseStatus::Admitted, None)
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(403));
    assert_eq!(err.message(), "Insufficient permissions");
    let notes = fixture.dashboard.notifications().drain();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].message, "Insufficient permissions");
    assert!(fixture.dashboard.state().is_authenticated());
}

#[tokio::test]
async fn test_status_change_refetches_case() {
    let fixture = TestFixture::signed_in().await;
    let dashboard = &fixture.dashboard;
    let route = Route::CaseDetail("1".to_string());

    dashboard.open(&route, &PageInput::default()).await;
    dashboard.open(&route, &PageInput::default()).await;
    assert_eq!(fixture.backend.hits("/cases/1"), 1);

    change_status(&dashboard.context(), 1, CaseStatus::Admitted, None)
        .await
        .unwrap();
    assert_eq!(
        dashboard.notifications().drain()[0].message,
        "Case status updated"
    );

    dashboard.open(&route, &PageInput::default()).await;
    assert_eq!(fixture.backend.hits("/cases/1"), 2);
    assert_eq!(fixture.backend.hits("/cases/1/history"), 2);
    // A status change leaves the document list cached.
    assert_eq!(fixture.backend.hits("/documents/case/1"), 1);
}

#[tokio::test]
async fn test_invalid_case_id_makes_no_request() {
    let fixture = TestFixture::signed_in().await;
    let route = Route::CaseDetail("abc".to_string());

    let lines = TestFixture::lines(fixture.dashboard.open(&route, &PageInput::default()).await);

    assert!(lines.iter().any(|l| l == "Case not found"));
    assert!(fixture
        .backend
        .hits
        .iter()
        .all(|e| !e.key().starts_with("/cases/") && !e.key().starts_with("/documents/")));
}

#[tokio::test]
async fn test_short_document_query_is_idle() {
    let fixture = TestFixture::signed_in().await;
    let dashboard = &fixture.dashboard;

    let short = PageInput {
        search: "ab".to_string(),
        ..PageInput::default()
    };
    dashboard.open(&Route::Documents, &short).await;
    assert_eq!(fixture.backend.hits("/documents/search/semantic"), 0);

    let long = PageInput {
        search: "contract".to_string(),
        ..PageInput::default()
    };
    let lines = TestFixture::lines(dashboard.open(&Route::Documents, &long).await);
    assert!(lines.iter().any(|l| l == "No documents found"));
    assert_eq!(
        fixture.backend.params("/documents/search/semantic")[0].get("limit"),
        Some(&"20".to_string())
    );
}

#[tokio::test]
async fn test_calendar_requests_monday() {
    let fixture = TestFixture::signed_in().await;
    let input = PageInput {
        date: NaiveDate::from_ymd_opt(2024, 1, 17).unwrap(),
        ..PageInput::default()
    };

    fixture.dashboard.open(&Route::Calendar, &input).await;

    let params = fixture.backend.params("/calendar/week-view");
    assert_eq!(params.len(), 1);
    assert_eq!(params[0].get("week_start"), Some(&"2024-01-15".to_string()));
    assert_eq!(params[0].get("court_id"), Some(&"3".to_string()));
}

#[tokio::test]
async fn test_delay_portal_is_public() {
    let fixture = TestFixture::new().await;
    let dashboard = &fixture.dashboard;
    dashboard.mount().await;

    let input = PageInput {
        case_number: Some("CASE-123".to_string()),
        ..PageInput::default()
    };
    let lines = TestFixture::lines(dashboard.open(&Route::DelayJustification, &input).await);

    assert!(lines.iter().any(|l| l == "  Case Number: CASE-123"));
    assert!(lines.iter().any(|l| l == "  Next Hearing: Not scheduled"));
    assert!(dashboard.navigation().history().is_empty());

    let missing = PageInput {
        case_number: Some("CASE-9".to_string()),
        ..PageInput::default()
    };
    let lines = TestFixture::lines(dashboard.open(&Route::DelayJustification, &missing).await);
    assert!(lines.iter().any(|l| l == "Case Not Found"));
    assert_eq!(
        dashboard.notifications().drain()[0].message,
        "Case not found"
    );
}

#[tokio::test]
async fn test_empty_facts_never_reach_backend() {
    let fixture = TestFixture::signed_in().await;
    let input = PageInput {
        analysis: Some(CaseAnalysisRequest::default()),
        ..PageInput::default()
    };

    fixture.dashboard.open(&Route::MlPredictions, &input).await;

    let notes = fixture.dashboard.notifications().drain();
    assert!(notes
        .iter()
        .any(|n| n.message == crate::views::ml::FACTS_REQUIRED));
}

#[tokio::test]
async fn test_facades_hit_backend_paths() {
    let fixture = TestFixture::signed_in().await;
    let api = fixture.dashboard.api();
    let when = NaiveDate::from_ymd_opt(2024, 2, 5)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap();

    let _ = api
        .auth
        .register(&NewUser {
            email: "clerk@court.example".into(),
            full_name: "Clerk".into(),
            role: UserRole::Scheduler,
            court_id: Some(3),
            password: "pw".into(),
        })
        .await;
    let _ = api.cases.search_by_number("CASE-2024-001").await;
    let complexity = api
        .cases
        .calculate_complexity(&[("num_parties", "3"), ("evidence_pages", "120")])
        .await
        .unwrap();
    assert_eq!(complexity["complexity_score"], json!(6));
    let judge = api
        .judges
        .create(&NewJudge {
            user_id: 4,
            court_id: 3,
            specializations: vec![Jurisdiction::Civil],
            experience_years: 12,
        })
        .await
        .unwrap();
    assert_eq!(judge.id, 8);
    let _ = api.judges.workload(7).await;
    let _ = api
        .judges
        .schedule(7, Some(when.date()), None)
        .await;
    let _ = api
        .calendar
        .heatmap(when.date(), when.date() + chrono::Duration::days(6), Some(3))
        .await;
    let _ = api.calendar.day_view(when.date(), Some(3)).await;
    let body = api.documents.download(9).await.unwrap();
    assert_eq!(body, br#"{"message":"ok"}"#.to_vec());
    let _ = api.documents.verify(9).await;
    let _ = api.documents.extract_legal_entities(9).await;
    let _ = api.documents.citation_network(9, Some(3)).await;
    api.judges.update_availability(7, false).await.unwrap();
    api.judges
        .create_recusal(&Recusal {
            judge_id: 7,
            case_id: 1,
            reason: "Prior involvement".into(),
        })
        .await
        .unwrap();
    api.scheduling
        .reschedule(5, when, "Judge unavailable")
        .await
        .unwrap();
    let _ = api.scheduling.conflicts(1, when, 2.0).await;
    let _ = api.documents.case_documents(1, None).await;
    let _ = api
        .ml
        .predict_duration(&DurationPredictionRequest {
            num_parties: 2,
            num_witnesses: 1,
            evidence_pages: 40,
            adjournments: 0,
            judge_speed: 1.0,
            lawyer_win_rate: 0.5,
        })
        .await;
    let _ = api.courts.hierarchy().await;

    for call in [
        "POST /api/auth/register",
        "GET /api/cases/search/CASE-2024-001",
        "/cases/calculate-complexity",
        "POST /judges",
        "GET /api/judges/7/workload",
        "GET /api/judges/7/schedule",
        "GET /api/calendar/heatmap",
        "GET /api/calendar/day-view",
        "GET /api/documents/9/download",
        "POST /api/documents/9/verify",
        "GET /api/documents/legal-entities/extract",
        "GET /api/documents/citation-network/9",
        "PUT /api/judges/7/availability",
        "POST /api/judges/recusals",
        "POST /api/scheduling/reschedule/5",
        "GET /api/scheduling/conflicts/1",
        "/documents/case/1",
        "POST /api/ml/predict-duration",
        "GET /api/courts/hierarchy",
    ] {
        assert_eq!(fixture.backend.hits(call), 1, "{}", call);
    }
    assert_eq!(
        fixture.backend.params("/cases/calculate-complexity")[0].get("evidence_pages"),
        Some(&"120".to_string())
    );
    assert_eq!(
        fixture.backend.bodies("POST /judges")[0]["specializations"],
        json!(["civil"])
    );
    // Shape mismatches surface as errors without notifications.
    assert!(fixture.dashboard.notifications().is_empty());
}

#[tokio::test]
async fn test_retried_slot_search_notifies_each_attempt() {
    let fixture = TestFixture::sign_in(TestFixture::start(1).await).await;
    let input = PageInput {
        selected_case: Some(1),
        ..PageInput::default()
    };

    let lines = TestFixture::lines(fixture.dashboard.open(&Route::Scheduling, &input).await);

    assert!(lines.contains(&format!("  {}", NO_SLOTS_MESSAGE)));
    assert_eq!(fixture.backend.hits("/scheduling/find-slots"), 2);
    let notes = fixture.dashboard.notifications().drain();
    assert_eq!(notes.len(), 2);
    assert!(notes
        .iter()
        .all(|n| n.level == Level::Error && n.message == SERVER_ERROR_MESSAGE));
}

#[tokio::test]
async fn test_upload_sends_multipart_and_refreshes_documents() {
    let fixture = TestFixture::signed_in().await;
    let dashboard = &fixture.dashboard;
    let route = Route::CaseDetail("1".to_string());

    let lines = TestFixture::lines(dashboard.open(&route, &PageInput::default()).await);
    assert!(lines.contains(&"  No documents".to_string()));

    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("order.pdf");
    std::fs::write(&path, b"%PDF-1.4 interim order").unwrap();

    let document = upload(
        &dashboard.context(),
        1,
        "Interim order",
        "order",
        true,
        &path,
    )
    .await
    .unwrap();
    assert_eq!(document.id, 11);
    assert!(document.is_public);

    let uploads = fixture.backend.uploads.lock().unwrap().clone();
    let names: Vec<&str> = uploads.iter().map(|(n, _, _)| n.as_str()).collect();
    assert_eq!(
        names,
        vec!["case_id", "title", "document_type", "is_public", "file"]
    );
    let (_, file_name, content) = &uploads[4];
    assert_eq!(file_name.as_deref(), Some("order.pdf"));
    assert_eq!(content.as_slice(), b"%PDF-1.4 interim order");
    assert_eq!(uploads[3].2, b"true".to_vec());

    let notes = dashboard.notifications().drain();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].level, Level::Success);
    assert_eq!(notes[0].message, "Document uploaded");

    let lines = TestFixture::lines(dashboard.open(&route, &PageInput::default()).await);
    assert!(lines.contains(&"  Interim order (order)".to_string()));
    assert_eq!(fixture.backend.hits("/documents/case/1"), 2);
    assert_eq!(fixture.backend.hits("/cases/1"), 1);
}

#[tokio::test]
async fn test_rejected_drag_drop_keeps_calendar_cached() {
    let fixture = TestFixture::signed_in().await;
    let dashboard = &fixture.dashboard;
    let input = PageInput {
        date: NaiveDate::from_ymd_opt(2024, 1, 17).unwrap(),
        ..PageInput::default()
    };
    let target = NaiveDate::from_ymd_opt(2024, 1, 18)
        .unwrap()
        .and_hms_opt(11, 30, 0)
        .unwrap();

    dashboard.open(&Route::Calendar, &input).await;
    assert_eq!(fixture.backend.hits("/calendar/week-view"), 1);

    let outcome = drag_drop_reschedule(&dashboard.context(), 6, target, Some(2))
        .await
        .unwrap();
    assert!(!outcome.success);
    let notes = dashboard.notifications().drain();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].level, Level::Error);
    assert_eq!(notes[0].message, "Courtroom occupied");

    dashboard.open(&Route::Calendar, &input).await;
    assert_eq!(fixture.backend.hits("/calendar/week-view"), 1);

    let outcome = drag_drop_reschedule(&dashboard.context(), 5, target, Some(2))
        .await
        .unwrap();
    assert!(outcome.success);
    assert_eq!(outcome.new_datetime, Some(target));
    let notes = dashboard.notifications().drain();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].message, "Hearing rescheduled");

    dashboard.open(&Route::Calendar, &input).await;
    assert_eq!(fixture.backend.hits("/calendar/week-view"), 2);

    let bodies = fixture.backend.bodies("/calendar/drag-drop-reschedule");
    assert_eq!(bodies.len(), 2);
    assert_eq!(bodies[1]["new_courtroom_id"], json!(2));
    assert_eq!(bodies[1]["new_datetime"], json!("2024-01-18T11:30:00"));
}

#[tokio::test]
async fn test_settlement_prediction() {
    let fixture = TestFixture::signed_in().await;

    let prediction = predict_settlement(
        &fixture.dashboard.context(),
        &SettlementRequest {
            case_type: "civil".into(),
            district: "Pune".into(),
            days_to_resolution: 240,
        },
    )
    .await
    .unwrap();

    assert!((prediction.settlement_probability - 0.72).abs() < 1e-9);
    assert!(prediction.recommend_mediation);
    assert_eq!(prediction.confidence, "high");
    let bodies = fixture.backend.bodies("/ml/predict-settlement");
    assert_eq!(
        bodies,
        vec![json!({"case_type": "civil", "district": "Pune", "days_to_resolution": 240})]
    );
    assert!(fixture.dashboard.notifications().is_empty());
}
