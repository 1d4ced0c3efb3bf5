//! Single case with its status history.

use crate::errors::ClientError;
use crate::models::{Case, CaseStatus, Document, MessageResponse, StatusHistoryEntry};
use crate::query::{QueryKey, QueryOptions, QueryResult};

use super::cases::{status_tone, urgency_tone};
use super::{Page, PageContext, LOADING};

/// Queries a status change makes stale.
pub const STATUS_CHANGE_INVALIDATES: &[&str] =
    &["case", "case-history", "cases", "dashboard-cases"];

/// The route segment as a case id. Queries run only when this is `Some`.
pub fn parse_case_id(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

pub fn case_key(id: Option<i64>) -> QueryKey {
    QueryKey::new("case").with(id)
}

pub fn history_key(id: Option<i64>) -> QueryKey {
    QueryKey::new("case-history").with(id)
}

/// Uploads mark every `case-documents` key stale.
pub fn documents_key(id: Option<i64>) -> QueryKey {
    QueryKey::new("case-documents").with(id)
}

pub struct CaseDetailPage {
    pub id: Option<i64>,
    pub case: QueryResult<Case>,
    pub history: QueryResult<Vec<StatusHistoryEntry>>,
    pub documents: QueryResult<Vec<Document>>,
}

impl CaseDetailPage {
    pub async fn load(ctx: &PageContext, raw_id: &str) -> Self {
        let id = parse_case_id(raw_id);
        let options = QueryOptions::enabled(id.is_some());
        let case_id = id.unwrap_or_default();
        let api = &ctx.api.cases;

        let case_key = case_key(id);
        let history_key = history_key(id);
        let documents_key = documents_key(id);
        let case = ctx
            .queries
            .fetch(&case_key, options, || api.get(case_id));
        let history = ctx
            .queries
            .fetch(&history_key, options, || api.history(case_id));
        let documents = ctx.queries.fetch(&documents_key, options, || {
            ctx.api.documents.case_documents(case_id, None)
        });
        let (case, history, documents) = futures::join!(case, history, documents);

        Self {
            id,
            case,
            history,
            documents,
        }
    }
}

/// Move a case to a new status and mark its views stale.
pub async fn change_status(
    ctx: &PageContext,
    case_id: i64,
    status: CaseStatus,
    notes: Option<String>,
) -> Result<MessageResponse, ClientError> {
    let result = ctx
        .queries
        .mutate(
            ctx.api.cases.update_status(case_id, status, notes),
            STATUS_CHANGE_INVALIDATES,
        )
        .await;
    if result.is_ok() {
        ctx.notify_success("Case status updated");
    }
    result
}

pub async fn assign_judge(
    ctx: &PageContext,
    case_id: i64,
    judge_id: i64,
) -> Result<MessageResponse, ClientError> {
    ctx.queries
        .mutate(
            ctx.api.cases.assign_judge(case_id, judge_id),
            &["case", "cases", "judges", "dashboard-judges"],
        )
        .await
}

fn score(value: Option<i32>) -> String {
    value
        .map(|v| format!("{}/10", v))
        .unwrap_or_else(|| "-".to_string())
}

impl Page for CaseDetailPage {
    fn render(&self) -> Vec<String> {
        if self.case.is_loading() {
            return vec![LOADING.to_string()];
        }
        let case = match self.case.data() {
            Some(case) => case,
            None => return vec!["Case not found".to_string()],
        };

        let mut lines = vec![
            case.case_number.clone(),
            case.title.clone(),
            String::new(),
            "Case Information".to_string(),
            format!("  Case Number: {}", case.case_number),
            format!(
                "  Status: {} [{}]",
                case.status.as_str(),
                status_tone(case.status).as_str()
            ),
            format!(
                "  Jurisdiction: {}",
                case.jurisdiction.map(|j| j.as_str()).unwrap_or("-")
            ),
            format!("  Case Type: {}", case.case_type.as_deref().unwrap_or("-")),
            format!(
                "  Urgency Level: {} [{}]",
                case.urgency_level.label(),
                urgency_tone(case.urgency_level).as_str()
            ),
            format!("  Filing Date: {}", case.filing_date.format("%Y-%m-%d")),
            format!("  Complexity Score: {}", score(case.complexity_score)),
            format!("  Public Interest Score: {}", score(case.public_interest_score)),
            format!(
                "  Description: {}",
                case.description
                    .as_deref()
                    .filter(|d| !d.is_empty())
                    .unwrap_or("No description provided")
            ),
            String::new(),
            "Case History".to_string(),
        ];

        let history = self.history.data().map(Vec::as_slice).unwrap_or_default();
        if history.is_empty() {
            lines.push("  No history available".to_string());
        }
        for event in history {
            lines.push(format!(
                "  {} Status changed from {} to {}",
                event.change_date.format("%Y-%m-%d"),
                event.old_status.map(|s| s.as_str()).unwrap_or("N/A"),
                event.new_status.as_str(),
            ));
            if let Some(notes) = event.notes.as_deref().filter(|n| !n.is_empty()) {
                lines.push(format!("    {}", notes));
            }
        }

        lines.push(String::new());
        lines.push("Documents".to_string());
        let documents = self.documents.data().map(Vec::as_slice).unwrap_or_default();
        if documents.is_empty() {
            lines.push("  No documents".to_string());
        }
        for document in documents {
            lines.push(format!("  {} ({})", document.title, document.document_type));
        }

        if let Some(connected) = case.connected_cases.as_ref().filter(|c| !c.is_empty()) {
            lines.push(String::new());
            lines.push("Connected Cases".to_string());
            for id in connected {
                lines.push(format!("  Case #{}", id));
            }
        }
        lines
    }
}
