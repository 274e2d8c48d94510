//! Session core for a document-grounded Q&A chat client: attached documents
//! with per-document upload status, the conversation history, and one
//! in-flight question at a time against a remote generation service.

pub mod api;
pub mod conversation;
pub mod models;
pub mod registry;
pub mod session;
pub mod uploader;

pub use api::http::HttpApi;
pub use api::{ApiConfig, ApiError, GenerationClient, IngestionClient};
pub use models::{Document, DocumentStatus, Message, SelectedFile, Sender};
pub use session::ChatSession;
