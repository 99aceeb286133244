//! PDF exports
//!
//! The backend renders the documents; here they are only saved as files.

use std::path::{Path, PathBuf};

use crate::ClientResult;

/// Binary document downloaded from a `…/pdf` endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfDocument {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl PdfDocument {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }

    /// `%PDF` magic present
    pub fn looks_like_pdf(&self) -> bool {
        self.bytes.starts_with(b"%PDF")
    }

    /// Write into `dir` under the document's file name, returning the path
    pub async fn save_to(&self, dir: &Path) -> ClientResult<PathBuf> {
        if !self.looks_like_pdf() {
            tracing::warn!(file = %self.filename, "Downloaded document has no PDF header");
        }
        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(&self.filename);
        tokio::fs::write(&path, &self.bytes).await?;
        tracing::info!(path = %path.display(), size = self.bytes.len(), "PDF saved");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_to_creates_directory() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let target = temp_dir.path().join("exports");
        let doc = PdfDocument::new("service-2024-06-01.pdf", b"%PDF-1.4 fake".to_vec());

        let path = doc.save_to(&target).await.unwrap();
        assert_eq!(path, target.join("service-2024-06-01.pdf"));
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.4 fake");
        assert!(doc.looks_like_pdf());
    }

    #[test]
    fn test_magic_check() {
        assert!(!PdfDocument::new("x.pdf", b"<html>".to_vec()).looks_like_pdf());
    }
}
