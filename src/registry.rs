use crate::models::{Document, DocumentStatus, SelectedFile};

/// In-memory set of documents attached to the session, in insertion order.
///
/// The registry performs no I/O. Upload outcomes arrive keyed by document id
/// and may land in any order; an outcome for a document the user already
/// removed is dropped on the floor rather than resurrecting it.
#[derive(Debug, Default)]
pub struct DocumentRegistry {
    documents: Vec<Document>,
}

impl DocumentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one pending document per selected file, in selection order,
    /// and return the assigned ids. Files are never deduplicated; two
    /// selections of the same name are distinct documents.
    pub fn add(&mut self, files: &[SelectedFile]) -> Vec<String> {
        let mut ids = Vec::with_capacity(files.len());
        for file in files {
            let id = uuid::Uuid::new_v4().to_string();
            self.documents.push(Document {
                id: id.clone(),
                name: file.name.clone(),
                size_bytes: file.contents.len() as u64,
                media_type: file.media_type.clone(),
                status: DocumentStatus::Pending,
            });
            ids.push(id);
        }
        ids
    }

    /// Remove a document by id. Absent ids are ignored.
    pub fn remove(&mut self, id: &str) {
        self.documents.retain(|d| d.id != id);
    }

    pub fn mark_uploaded(&mut self, id: &str) {
        self.set_status(id, DocumentStatus::Uploaded);
    }

    pub fn mark_failed(&mut self, id: &str) {
        self.set_status(id, DocumentStatus::Failed);
    }

    fn set_status(&mut self, id: &str, status: DocumentStatus) {
        match self.documents.iter_mut().find(|d| d.id == id) {
            Some(doc) => doc.status = status,
            // Removed while the upload was outstanding.
            None => tracing::debug!(document_id = %id, "status update for removed document"),
        }
    }

    pub fn count(&self) -> usize {
        self.documents.len()
    }

    pub fn list(&self) -> Vec<Document> {
        self.documents.clone()
    }

    /// Name of the first document (insertion order) that finished uploading.
    pub fn first_uploaded_name(&self) -> Option<String> {
        self.documents
            .iter()
            .find(|d| d.status == DocumentStatus::Uploaded)
            .map(|d| d.name.clone())
    }
}
