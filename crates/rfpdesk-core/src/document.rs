//! The input document submitted for assessment and drafting.
//!
//! A [`Document`] is immutable once built. Its bytes sit behind an `Arc` so
//! in-flight requests can hold the exact content they were issued for while
//! the user selects something else.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::CoreError;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Identity of one document selection.
///
/// Every selection gets a fresh id, even when the same file is chosen twice,
/// so results issued for an earlier selection can be told apart from the
/// current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(u64);

impl DocumentId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "doc#{}", self.0)
    }
}

/// A selected document: file name plus binary content.
#[derive(Clone, PartialEq, Eq)]
pub struct Document {
    name: String,
    content: Arc<[u8]>,
}

impl Document {
    pub fn new(name: impl Into<String>, content: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Read a document from disk, naming it after the file's base name.
    pub async fn from_path(path: &Path) -> Result<Self, CoreError> {
        if !tokio::fs::try_exists(path).await? {
            return Err(CoreError::DocumentNotFound(path.to_path_buf()));
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| CoreError::NoFileName(path.to_path_buf()))?;
        let bytes = tokio::fs::read(path).await?;
        info!(name = %name, size = bytes.len(), "loaded document");
        Ok(Self::new(name, bytes))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Size in bytes.
    pub fn size(&self) -> usize {
        self.content.len()
    }

    /// Size in megabytes, formatted to two decimals (e.g. `"1.20 MB"`).
    pub fn display_size(&self) -> String {
        format!("{:.2} MB", self.size() as f64 / BYTES_PER_MB)
    }

    /// MIME type inferred from the file extension.
    pub fn content_type(&self) -> &'static str {
        let ext = Path::new(&self.name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("pdf") => "application/pdf",
            Some("docx") => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            Some("doc") => "application/msword",
            Some("txt") => "text/plain",
            _ => "application/octet-stream",
        }
    }
}

// Content is elided: documents run to megabytes.
impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("name", &self.name)
            .field("size", &self.size())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_size_two_decimals() {
        let doc = Document::new("rfp.pdf", vec![0u8; 1_258_291]);
        assert_eq!(doc.display_size(), "1.20 MB");
        assert_eq!(doc.size(), 1_258_291);
    }

    #[test]
    fn content_type_by_extension() {
        let ct = |name: &str| Document::new(name, Vec::new()).content_type();
        assert_eq!(ct("rfp.pdf"), "application/pdf");
        assert_eq!(ct("RFP.PDF"), "application/pdf");
        assert_eq!(ct("notes.txt"), "text/plain");
        assert!(ct("brief.docx").contains("wordprocessingml"));
        assert_eq!(ct("archive"), "application/octet-stream");
    }

    #[test]
    fn document_ids_advance() {
        let first = DocumentId::new(1);
        assert_eq!(first.next(), DocumentId::new(2));
        assert_eq!(first.next().to_string(), "doc#2");
    }

    #[test]
    fn debug_elides_content() {
        let doc = Document::new("rfp.pdf", vec![7u8; 4]);
        let dbg = format!("{doc:?}");
        assert!(dbg.contains("rfp.pdf"));
        assert!(dbg.contains("size: 4"));
    }

    #[tokio::test]
    async fn from_path_reads_name_and_bytes() {
        let dir = std::env::temp_dir().join(format!("rfpdesk-doc-{}", std::process::id()));
        tokio::fs::create_dir_all(&dir).await.unwrap();
        let path = dir.join("tender.txt");
        tokio::fs::write(&path, b"scope of works").await.unwrap();

        let doc = Document::from_path(&path).await.unwrap();
        assert_eq!(doc.name(), "tender.txt");
        assert_eq!(doc.content(), b"scope of works");

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn from_path_missing_file() {
        let err = Document::from_path(Path::new("/nonexistent/rfpdesk/rfp.pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::DocumentNotFound(_)));
    }
}
