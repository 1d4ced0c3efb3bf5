//! Documents and semantic search.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    pub id: i64,
    pub case_id: i64,
    pub title: String,
    pub document_type: String,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub file_hash: Option<String>,
    #[serde(default)]
    pub digital_signature: Option<String>,
    #[serde(default = "first_version")]
    pub version: u32,
    #[serde(default)]
    pub upload_date: Option<NaiveDateTime>,
}

fn first_version() -> u32 {
    1
}

/// Fields of a multipart upload. The file is sent as raw bytes.
#[derive(Debug, Clone)]
pub struct DocumentUpload {
    pub case_id: i64,
    pub title: String,
    pub document_type: String,
    pub is_public: bool,
    pub file_name: String,
    pub content: Vec<u8>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CaseDocumentsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_type: Option<String>,
}

/// Query parameters for `GET /documents/search/semantic`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SemanticSearchQuery {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchHit {
    pub document_id: i64,
    pub title: String,
    pub document_type: String,
    pub case_number: String,
    #[serde(default)]
    pub relevance_score: f64,
    #[serde(default)]
    pub snippet: String,
    #[serde(default)]
    pub upload_date: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SemanticSearchResponse {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub total_results: u32,
    #[serde(default)]
    pub results: Vec<SearchHit>,
}

/// Response of `POST /documents/{id}/verify`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentVerification {
    pub document_id: i64,
    pub hash_valid: bool,
    pub signature_valid: bool,
    pub is_authentic: bool,
    #[serde(default)]
    pub stored_hash: Option<String>,
    #[serde(default)]
    pub current_hash: Option<String>,
    #[serde(default)]
    pub upload_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub uploaded_by: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LegalEntities {
    #[serde(default)]
    pub acts: Vec<String>,
    #[serde(default)]
    pub sections: Vec<String>,
    #[serde(default)]
    pub precedents: Vec<String>,
    #[serde(default)]
    pub parties: Vec<String>,
    #[serde(default)]
    pub dates: Vec<String>,
    #[serde(default)]
    pub amounts: Vec<String>,
}

/// Response of `GET /documents/legal-entities/extract`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EntityExtraction {
    pub document_id: i64,
    #[serde(default)]
    pub document_title: String,
    #[serde(default)]
    pub extracted_entities: LegalEntities,
}

/// A node id is the document's numeric id or an opaque citation id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CitationNode {
    pub id: serde_json::Value,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CitationEdge {
    pub source: serde_json::Value,
    pub target: serde_json::Value,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CitationGraph {
    #[serde(default)]
    pub nodes: Vec<CitationNode>,
    #[serde(default)]
    pub edges: Vec<CitationEdge>,
}

/// Response of `GET /documents/citation-network/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CitationNetwork {
    pub document_id: i64,
    #[serde(default)]
    pub citation_network: CitationGraph,
    #[serde(default)]
    pub depth: u32,
}
