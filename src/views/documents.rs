//! Semantic document search and upload.

use std::path::Path;

use crate::errors::ClientError;
use crate::models::{
    Document, DocumentUpload, SearchHit, SemanticSearchQuery, SemanticSearchResponse,
};
use crate::query::{QueryKey, QueryOptions, QueryResult};

use super::{Page, PageContext, ViewState, LOADING};

const MIN_QUERY_CHARS: usize = 3;
const RESULT_LIMIT: u32 = 20;

pub const SEARCH_PROMPT: &str = "Enter at least 3 characters to search documents";

/// Search runs only once the query has at least three characters.
pub fn search_enabled(query: &str) -> bool {
    query.chars().count() >= MIN_QUERY_CHARS
}

pub fn search_key(query: &str) -> QueryKey {
    QueryKey::new("documents-search").with(query)
}

/// Relevance as a whole percentage.
pub fn relevance_percent(score: f64) -> String {
    format!("{:.0}%", score * 100.0)
}

pub struct DocumentsPage {
    pub query: String,
    pub result: QueryResult<SemanticSearchResponse>,
}

impl DocumentsPage {
    pub async fn load(ctx: &PageContext, query: &str) -> Self {
        let key = search_key(query);
        let params = SemanticSearchQuery {
            query: query.to_string(),
            case_id: None,
            document_type: None,
            limit: Some(RESULT_LIMIT),
        };
        let api = &ctx.api.documents;

        let result = ctx
            .queries
            .fetch(&key, QueryOptions::enabled(search_enabled(query)), || {
                api.semantic_search(&params)
            })
            .await;

        Self {
            query: query.to_string(),
            result,
        }
    }

    pub fn hits(&self) -> ViewState<Vec<&SearchHit>> {
        let items = self
            .result
            .data()
            .map(|r| r.results.iter().collect())
            .unwrap_or_default();
        ViewState::list(&self.result, items)
    }
}

/// Upload a file to a case and mark that case's document list stale.
pub async fn upload(
    ctx: &PageContext,
    case_id: i64,
    title: &str,
    document_type: &str,
    is_public: bool,
    path: &Path,
) -> Result<Document, ClientError> {
    let content = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());

    let upload = DocumentUpload {
        case_id,
        title: title.to_string(),
        document_type: document_type.to_string(),
        is_public,
        file_name,
        content,
    };
    let document = ctx
        .queries
        .mutate(
            ctx.api.documents.upload(upload),
            &["case-documents", "documents-search"],
        )
        .await?;
    ctx.notify_success("Document uploaded");
    Ok(document)
}

impl Page for DocumentsPage {
    fn render(&self) -> Vec<String> {
        let mut lines = vec!["Documents".to_string(), "Semantic Document Search".to_string()];

        match self.hits() {
            ViewState::Idle => {
                lines.push("Start searching".to_string());
                lines.push(SEARCH_PROMPT.to_string());
            }
            ViewState::Loading => lines.push(LOADING.to_string()),
            ViewState::Empty => {
                lines.push("No documents found".to_string());
                lines.push("Try different search terms or keywords".to_string());
            }
            ViewState::Populated(hits) => {
                for hit in hits {
                    lines.push(format!(
                        "{} [{}]  Case: {}",
                        hit.title, hit.document_type, hit.case_number
                    ));
                    if !hit.snippet.is_empty() {
                        lines.push(format!("  {}", hit.snippet));
                    }
                    let uploaded = hit
                        .upload_date
                        .map(|d| d.format("%Y-%m-%d").to_string())
                        .unwrap_or_default();
                    lines.push(format!(
                        "  Relevance: {}  {}",
                        relevance_percent(hit.relevance_score),
                        uploaded
                    ));
                }
            }
        }
        lines
    }
}
