use serde::{Deserialize, Serialize};
use std::path::Path;

/// File extensions the picker offers for selection. Informational only;
/// nothing in the session core rejects other types.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "txt", "md"];

/// A file captured at selection time, before any upload has started.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    pub media_type: String,
    pub contents: Vec<u8>,
}

impl SelectedFile {
    /// Read a file from disk, inferring the media type from its extension.
    pub fn from_path(path: &Path) -> Result<Self, std::io::Error> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();
        let contents = std::fs::read(path)?;
        Ok(Self {
            media_type: media_type_for(&name).to_string(),
            name,
            contents,
        })
    }

    pub fn is_accepted_type(&self) -> bool {
        extension(&self.name)
            .map(|ext| ACCEPTED_EXTENSIONS.contains(&ext.as_str()))
            .unwrap_or(false)
    }
}

fn extension(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}

fn media_type_for(name: &str) -> &'static str {
    match extension(name).as_deref() {
        Some("pdf") => "application/pdf",
        Some("doc") => "application/msword",
        Some("docx") => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        Some("txt") => "text/plain",
        Some("md" | "markdown") => "text/markdown",
        _ => "application/octet-stream",
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    Pending,
    Uploaded,
    Failed,
}

/// One document attached to the session.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Document {
    pub id: String,
    pub name: String,
    pub size_bytes: u64,
    pub media_type: String,
    pub status: DocumentStatus,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

/// One turn in the conversation. Assistant messages carry citation strings
/// in `sources`; user messages always have an empty list.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Message {
    pub id: String,
    pub text: String,
    pub sender: Sender,
    pub timestamp: String,
    pub sources: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_type_inference() {
        assert_eq!(media_type_for("report.PDF"), "application/pdf");
        assert_eq!(media_type_for("notes.md"), "text/markdown");
        assert_eq!(media_type_for("blob"), "application/octet-stream");
    }

    #[test]
    fn test_accepted_types() {
        let file = SelectedFile {
            name: "report.pdf".into(),
            media_type: "application/pdf".into(),
            contents: vec![],
        };
        assert!(file.is_accepted_type());

        let file = SelectedFile {
            name: "photo.png".into(),
            media_type: "image/png".into(),
            contents: vec![],
        };
        assert!(!file.is_accepted_type());
    }

    #[test]
    fn test_from_path_reads_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"hello").unwrap();

        let file = SelectedFile::from_path(&path).unwrap();
        assert_eq!(file.name, "notes.txt");
        assert_eq!(file.media_type, "text/plain");
        assert_eq!(file.contents, b"hello");
    }
}
