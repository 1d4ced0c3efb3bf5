//! Document endpoints.

use reqwest::multipart::{Form, Part};
use serde::Serialize;

use crate::errors::ClientError;
use crate::http::HttpClient;
use crate::models::{
    CaseDocumentsQuery, CitationNetwork, Document, DocumentUpload, DocumentVerification,
    EntityExtraction, SemanticSearchQuery, SemanticSearchResponse,
};

use super::NO_PARAMS;

#[derive(Clone)]
pub struct DocumentsApi {
    http: HttpClient,
}

#[derive(Serialize)]
struct DocumentRef {
    document_id: i64,
}

#[derive(Serialize)]
struct CitationDepth {
    #[serde(skip_serializing_if = "Option::is_none")]
    depth: Option<u32>,
}

impl DocumentsApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// POST /documents/upload - multipart form with the file as its last part.
    pub async fn upload(&self, upload: DocumentUpload) -> Result<Document, ClientError> {
        let file = Part::bytes(upload.content).file_name(upload.file_name);
        let form = Form::new()
            .text("case_id", upload.case_id.to_string())
            .text("title", upload.title)
            .text("document_type", upload.document_type)
            .text("is_public", upload.is_public.to_string())
            .part("file", file);

        self.http.post_multipart("/documents/upload", form).await
    }

    /// GET /documents/case/{case_id}
    pub async fn case_documents(
        &self,
        case_id: i64,
        document_type: Option<String>,
    ) -> Result<Vec<Document>, ClientError> {
        self.http
            .get(
                &format!("/documents/case/{}", case_id),
                &CaseDocumentsQuery { document_type },
            )
            .await
    }

    /// GET /documents/{id}
    pub async fn get(&self, id: i64) -> Result<Document, ClientError> {
        self.http
            .get(&format!("/documents/{}", id), NO_PARAMS)
            .await
    }

    /// GET /documents/search/semantic
    pub async fn semantic_search(
        &self,
        query: &SemanticSearchQuery,
    ) -> Result<SemanticSearchResponse, ClientError> {
        self.http.get("/documents/search/semantic", query).await
    }

    /// GET /documents/{id}/download - the stored file as raw bytes.
    pub async fn download(&self, id: i64) -> Result<Vec<u8>, ClientError> {
        self.http
            .get_bytes(&format!("/documents/{}/download", id))
            .await
    }

    /// POST /documents/{id}/verify
    pub async fn verify(&self, id: i64) -> Result<DocumentVerification, ClientError> {
        self.http
            .post_empty(&format!("/documents/{}/verify", id))
            .await
    }

    /// GET /documents/legal-entities/extract
    pub async fn extract_legal_entities(
        &self,
        document_id: i64,
    ) -> Result<EntityExtraction, ClientError> {
        self.http
            .get(
                "/documents/legal-entities/extract",
                &DocumentRef { document_id },
            )
            .await
    }

    /// GET /documents/citation-network/{id}; the backend defaults depth to 2.
    pub async fn citation_network(
        &self,
        id: i64,
        depth: Option<u32>,
    ) -> Result<CitationNetwork, ClientError> {
        self.http
            .get(
                &format!("/documents/citation-network/{}", id),
                &CitationDepth { depth },
            )
            .await
    }
}
