use crate::api::IngestionClient;
use crate::models::SelectedFile;
use crate::registry::DocumentRegistry;
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;

/// Uploads each selected file to the ingestion endpoint and reconciles the
/// per-file outcome into the document registry.
///
/// Uploads are independent: a batch runs concurrently, completion order is
/// unconstrained, and one file failing or finishing late never blocks
/// another. There is no aggregate verdict; callers observe outcomes through
/// the registry's per-document status.
pub struct UploadCoordinator {
    registry: Arc<Mutex<DocumentRegistry>>,
    client: Arc<dyn IngestionClient>,
}

impl UploadCoordinator {
    pub fn new(registry: Arc<Mutex<DocumentRegistry>>, client: Arc<dyn IngestionClient>) -> Self {
        Self { registry, client }
    }

    /// Register the files as pending documents and start one upload task per
    /// file. Returns the new document ids along with the task handles;
    /// callers that treat uploads as fire-and-forget may drop the handles.
    /// Failed uploads are marked in the registry and never retried.
    pub fn submit(&self, files: Vec<SelectedFile>) -> (Vec<String>, Vec<JoinHandle<()>>) {
        let ids = self.registry.lock().unwrap().add(&files);

        let mut handles = Vec::with_capacity(files.len());
        for (id, file) in ids.iter().cloned().zip(files) {
            let registry = Arc::clone(&self.registry);
            let client = Arc::clone(&self.client);
            handles.push(tokio::spawn(async move {
                let name = file.name.clone();
                match client.upload(file).await {
                    Ok(()) => {
                        tracing::debug!(document_id = %id, name = %name, "upload finished");
                        registry.lock().unwrap().mark_uploaded(&id);
                    }
                    Err(e) => {
                        tracing::warn!(document_id = %id, name = %name, error = %e, "upload failed");
                        registry.lock().unwrap().mark_failed(&id);
                    }
                }
            }));
        }
        (ids, handles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::models::DocumentStatus;
    use async_trait::async_trait;
    use futures::future::join_all;
    use std::collections::HashSet;
    use tokio::sync::Notify;

    /// Fails uploads whose file name is in the deny set.
    struct MockIngestion {
        fail_names: HashSet<String>,
    }

    #[async_trait]
    impl IngestionClient for MockIngestion {
        async fn upload(&self, file: SelectedFile) -> Result<(), ApiError> {
            if self.fail_names.contains(&file.name) {
                Err(ApiError::Api {
                    status: 413,
                    message: "payload too large".into(),
                })
            } else {
                Ok(())
            }
        }
    }

    /// Blocks every upload until the test releases it.
    struct GatedIngestion {
        gate: Arc<Notify>,
    }

    #[async_trait]
    impl IngestionClient for GatedIngestion {
        async fn upload(&self, _file: SelectedFile) -> Result<(), ApiError> {
            self.gate.notified().await;
            Ok(())
        }
    }

    fn file(name: &str) -> SelectedFile {
        SelectedFile {
            name: name.into(),
            media_type: "application/pdf".into(),
            contents: b"%PDF-".to_vec(),
        }
    }

    #[tokio::test]
    async fn test_batch_outcomes_are_independent() {
        let registry = Arc::new(Mutex::new(DocumentRegistry::new()));
        let client = Arc::new(MockIngestion {
            fail_names: HashSet::from(["b.pdf".to_string()]),
        });
        let coordinator = UploadCoordinator::new(Arc::clone(&registry), client);

        let (_ids, handles) =
            coordinator.submit(vec![file("a.pdf"), file("b.pdf"), file("c.pdf")]);
        join_all(handles).await;

        let statuses: Vec<DocumentStatus> = registry
            .lock()
            .unwrap()
            .list()
            .into_iter()
            .map(|d| d.status)
            .collect();
        assert_eq!(
            statuses,
            vec![
                DocumentStatus::Uploaded,
                DocumentStatus::Failed,
                DocumentStatus::Uploaded
            ]
        );
    }

    #[tokio::test]
    async fn test_submit_registers_documents_as_pending() {
        let registry = Arc::new(Mutex::new(DocumentRegistry::new()));
        let gate = Arc::new(Notify::new());
        let client = Arc::new(GatedIngestion {
            gate: Arc::clone(&gate),
        });
        let coordinator = UploadCoordinator::new(Arc::clone(&registry), client);

        let (ids, handles) = coordinator.submit(vec![file("a.pdf")]);
        assert_eq!(ids.len(), 1);
        assert_eq!(
            registry.lock().unwrap().list()[0].status,
            DocumentStatus::Pending
        );

        gate.notify_one();
        join_all(handles).await;
        assert_eq!(
            registry.lock().unwrap().list()[0].status,
            DocumentStatus::Uploaded
        );
    }

    #[tokio::test]
    async fn test_resolution_after_removal_is_discarded() {
        let registry = Arc::new(Mutex::new(DocumentRegistry::new()));
        let gate = Arc::new(Notify::new());
        let client = Arc::new(GatedIngestion {
            gate: Arc::clone(&gate),
        });
        let coordinator = UploadCoordinator::new(Arc::clone(&registry), client);

        let (ids, handles) = coordinator.submit(vec![file("a.pdf")]);
        registry.lock().unwrap().remove(&ids[0]);

        gate.notify_one();
        join_all(handles).await;
        assert_eq!(registry.lock().unwrap().count(), 0);
    }
}
