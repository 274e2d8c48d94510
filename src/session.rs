use crate::api::http::HttpApi;
use crate::api::{ApiConfig, GenerateRequest, GenerationClient, IngestionClient};
use crate::conversation::ConversationLog;
use crate::models::{Document, Message, SelectedFile};
use crate::registry::DocumentRegistry;
use crate::uploader::UploadCoordinator;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;

/// Reply shown when the generation endpoint cannot be reached or returns a
/// malformed response.
const GENERATION_FALLBACK_TEXT: &str =
    "Sorry, I'm having trouble processing your request. Please try again.";

/// One client session: the attached documents, the conversation so far, and
/// at most one in-flight question.
///
/// Questions are serialized, never queued. `submit_query` is a silent no-op
/// while a previous question is still pending; uploads are an independent
/// subsystem and proceed concurrently with queries.
pub struct ChatSession {
    id: String,
    registry: Arc<Mutex<DocumentRegistry>>,
    log: Arc<Mutex<ConversationLog>>,
    uploader: UploadCoordinator,
    generation: Arc<dyn GenerationClient>,
    pending: AtomicBool,
}

impl ChatSession {
    pub fn new(
        ingestion: Arc<dyn IngestionClient>,
        generation: Arc<dyn GenerationClient>,
    ) -> Self {
        let registry = Arc::new(Mutex::new(DocumentRegistry::new()));
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            uploader: UploadCoordinator::new(Arc::clone(&registry), ingestion),
            registry,
            log: Arc::new(Mutex::new(ConversationLog::new())),
            generation,
            pending: AtomicBool::new(false),
        }
    }

    /// Session pointed at one HTTP backend for both ingestion and generation.
    pub fn with_config(config: ApiConfig) -> Self {
        let api = Arc::new(HttpApi::new(config));
        Self::new(api.clone(), api)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// True while a question is waiting on the generation endpoint.
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::SeqCst)
    }

    // ── Documents ──

    /// Attach files to the session and start uploading each one. See
    /// [`UploadCoordinator::submit`].
    pub fn attach_files(&self, files: Vec<SelectedFile>) -> (Vec<String>, Vec<JoinHandle<()>>) {
        self.uploader.submit(files)
    }

    /// Detach a document. Ignored if the id is unknown; an upload still in
    /// flight for it resolves into nothing.
    pub fn remove_document(&self, id: &str) {
        self.registry.lock().unwrap().remove(id);
    }

    pub fn documents(&self) -> Vec<Document> {
        self.registry.lock().unwrap().list()
    }

    pub fn document_count(&self) -> usize {
        self.registry.lock().unwrap().count()
    }

    // ── Conversation ──

    pub fn messages(&self) -> Vec<Message> {
        self.log.lock().unwrap().list()
    }

    /// Submit one question.
    ///
    /// Returns `None` without any side effect when the trimmed text is
    /// empty, no documents are attached, or another question is still
    /// pending. Otherwise appends the user message, issues exactly one
    /// generation request, and resolves into exactly one assistant message,
    /// which is returned. A failed request resolves into a fixed apology
    /// reply; the error is logged and never propagated.
    pub async fn submit_query(&self, text: &str) -> Option<Message> {
        if text.trim().is_empty() || self.registry.lock().unwrap().count() == 0 {
            return None;
        }
        if self
            .pending
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::debug!("query rejected: another question is pending");
            return None;
        }

        self.log.lock().unwrap().append_user(text);

        let request = GenerateRequest {
            text: text.to_string(),
            session_id: self.id.clone(),
        };
        let reply = match self.generation.generate(&request).await {
            Ok(resp) => {
                // The generation response does not carry citations yet;
                // credit the first uploaded document.
                let name = self
                    .registry
                    .lock()
                    .unwrap()
                    .first_uploaded_name()
                    .unwrap_or_else(|| "Unknown".to_string());
                self.log
                    .lock()
                    .unwrap()
                    .append_assistant(&resp.generated_text, vec![format!("Document: {}", name)])
            }
            Err(e) => {
                tracing::warn!(error = %e, "generation request failed");
                self.log
                    .lock()
                    .unwrap()
                    .append_assistant(GENERATION_FALLBACK_TEXT, Vec::new())
            }
        };

        self.pending.store(false, Ordering::SeqCst);
        Some(reply)
    }
}
