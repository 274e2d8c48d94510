pub mod http;

use crate::models::SelectedFile;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Location of the backend serving the ingestion and generation endpoints.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GenerateRequest {
    pub text: String,
    pub session_id: String,
}

#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    pub generated_text: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("Parse error: {0}")]
    Parse(String),
}

/// External service that accepts and indexes an uploaded document.
#[async_trait]
pub trait IngestionClient: Send + Sync {
    async fn upload(&self, file: SelectedFile) -> Result<(), ApiError>;
}

/// External service that produces a grounded answer for a question.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, ApiError>;
}
