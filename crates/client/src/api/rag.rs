//! Thin client for the external RAG (retrieval-augmented generation)
//! search service.
//!
//! The RAG namespace lives under `/api/rag/...` regardless of whether the
//! configured base URL already carries `/api`; URL building collapses the
//! duplicate prefix.

use nexus_shop_core::ProductId;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::instrument;

use super::{ApiClient, ApiError};

/// One retrieved source backing a RAG answer.
#[derive(Debug, Clone, Deserialize)]
pub struct RagSource {
    pub id: String,
    pub title: String,
    pub content: String,
    pub score: f64,
    #[serde(default)]
    pub metadata: Option<Value>,
}

/// Answer returned by the semantic and hybrid query endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct RagAnswer {
    pub answer: String,
    #[serde(default)]
    pub sources: Vec<RagSource>,
}

/// Metadata filters for the hybrid query endpoint.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RagFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_min: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_max: Option<i32>,
}

impl RagFilters {
    fn is_empty(&self) -> bool {
        self.language.is_none() && self.year_min.is_none() && self.year_max.is_none()
    }
}

/// A visually similar image hit from the multimodal search endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SimilarImage {
    pub id: String,
    pub url: String,
    pub title: String,
    pub score: f64,
    #[serde(default)]
    pub product_id: Option<ProductId>,
}

impl ApiClient {
    /// Run a semantic query against the RAG service.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or response decoding fails.
    #[instrument(skip(self), fields(query = %query))]
    pub async fn rag_query(&self, query: &str, top_k: Option<u32>) -> Result<RagAnswer, ApiError> {
        let mut payload = json!({"query": query});
        if let Some(k) = top_k {
            payload["top_k"] = json!(k);
        }
        let body = self.post_json("/api/rag/query", &payload).await?;
        Ok(serde_json::from_value(body)?)
    }

    /// Run a hybrid query: semantic search combined with metadata filters.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or response decoding fails.
    #[instrument(skip(self, filters), fields(query = %query))]
    pub async fn rag_hybrid_query(
        &self,
        query: &str,
        filters: &RagFilters,
        top_k: Option<u32>,
    ) -> Result<RagAnswer, ApiError> {
        let mut payload = json!({"query": query});
        if !filters.is_empty() {
            payload["filters"] = serde_json::to_value(filters)?;
        }
        if let Some(k) = top_k {
            payload["top_k"] = json!(k);
        }
        let body = self.post_json("/api/rag/hybrid-query", &payload).await?;
        Ok(serde_json::from_value(body)?)
    }

    /// Search for visually similar product images by example image.
    ///
    /// The backend answers either `{results: [...]}` or a bare array; both
    /// are tolerated.
    ///
    /// # Errors
    ///
    /// Returns an error if the upload or response decoding fails.
    #[instrument(skip(self, bytes), fields(file_name = %file_name))]
    pub async fn rag_search_multimodal(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<Vec<SimilarImage>, ApiError> {
        let form = Form::new().part("file", Part::bytes(bytes).file_name(file_name.to_string()));
        let body = self.post_multipart("/api/rag/search/multimodal", form).await?;
        let hits = body.get("results").unwrap_or(&body).clone();
        Ok(serde_json::from_value(hits)?)
    }

    /// Ingest a document into the RAG index.
    ///
    /// # Errors
    ///
    /// Returns an error if the upload fails or the backend rejects it.
    #[instrument(skip(self, bytes, metadata), fields(file_name = %file_name))]
    pub async fn rag_ingest_document(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        metadata: Option<&Value>,
    ) -> Result<Value, ApiError> {
        self.rag_ingest("/api/rag/ingest/document", file_name, bytes, metadata)
            .await
    }

    /// Ingest an image into the RAG index.
    ///
    /// # Errors
    ///
    /// Returns an error if the upload fails or the backend rejects it.
    #[instrument(skip(self, bytes, metadata), fields(file_name = %file_name))]
    pub async fn rag_ingest_image(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        metadata: Option<&Value>,
    ) -> Result<Value, ApiError> {
        self.rag_ingest("/api/rag/ingest/image", file_name, bytes, metadata)
            .await
    }

    async fn rag_ingest(
        &self,
        path: &str,
        file_name: &str,
        bytes: Vec<u8>,
        metadata: Option<&Value>,
    ) -> Result<Value, ApiError> {
        let mut form =
            Form::new().part("file", Part::bytes(bytes).file_name(file_name.to_string()));
        if let Some(meta) = metadata {
            form = form.text("metadata", serde_json::to_string(meta)?);
        }
        self.post_multipart(path, form).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_rag_answer_decoding() {
        let body = json!({
            "answer": "Los teclados mecánicos destacan por su durabilidad.",
            "sources": [
                {"id": "doc-1", "title": "Guía", "content": "...", "score": 0.92},
                {"id": "doc-2", "title": "Reseñas", "content": "...", "score": 0.81,
                 "metadata": {"language": "es", "year": 2025}}
            ]
        });
        let answer: RagAnswer = serde_json::from_value(body).unwrap();
        assert_eq!(answer.sources.len(), 2);
        assert!(answer.sources[0].metadata.is_none());
        assert!(answer.sources[1].metadata.is_some());
    }

    #[test]
    fn test_rag_answer_without_sources() {
        let answer: RagAnswer = serde_json::from_value(json!({"answer": "ok"})).unwrap();
        assert!(answer.sources.is_empty());
    }

    #[test]
    fn test_filters_skip_unset() {
        let filters = RagFilters {
            language: Some("es".to_string()),
            ..RagFilters::default()
        };
        assert_eq!(
            serde_json::to_value(&filters).unwrap(),
            json!({"language": "es"})
        );
        assert!(RagFilters::default().is_empty());
    }

    #[test]
    fn test_similar_image_decoding_both_envelopes() {
        let hit = json!({"id": "img-1", "url": "/images/3", "title": "Teclado", "score": 0.9,
                         "product_id": 3});
        let hits: Vec<SimilarImage> = serde_json::from_value(json!([hit])).unwrap();
        assert_eq!(hits[0].product_id, Some(ProductId::new(3)));
    }
}
