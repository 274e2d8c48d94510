use super::{
    ApiConfig, ApiError, GenerateRequest, GenerateResponse, GenerationClient, IngestionClient,
};
use crate::models::SelectedFile;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;

/// HTTP client for the ingestion and generation endpoints.
#[derive(Debug, Clone)]
pub struct HttpApi {
    config: ApiConfig,
    client: Client,
}

impl HttpApi {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }
}

#[async_trait]
impl IngestionClient for HttpApi {
    async fn upload(&self, file: SelectedFile) -> Result<(), ApiError> {
        let media_type = if file.media_type.is_empty() {
            "application/octet-stream".to_string()
        } else {
            file.media_type
        };
        let part = Part::bytes(file.contents)
            .file_name(file.name)
            .mime_str(&media_type)
            .map_err(|e| ApiError::Parse(e.to_string()))?;
        let form = Form::new().part("file", part);

        let resp = self
            .client
            .post(format!("{}/upload", self.config.base_url))
            .multipart(form)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let text = resp.text().await.unwrap_or_default();
            return Err(ApiError::Api {
                status,
                message: text,
            });
        }

        // The response schema is opaque; a well-formed JSON body is all we
        // require of a successful ingestion.
        resp.json::<serde_json::Value>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl GenerationClient for HttpApi {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, ApiError> {
        let resp = self
            .client
            .post(format!("{}/generate", self.config.base_url))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let text = resp.text().await.unwrap_or_default();
            return Err(ApiError::Api {
                status,
                message: text,
            });
        }

        resp.json::<GenerateResponse>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }
}
