// src/documents/models.rs
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// Statement PDF; text comes from its text layer.
    Pdf,
    /// Statement text that was already extracted.
    Text,
}

impl DocumentKind {
    /// Classifies a path by extension, case-insensitively.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(DocumentKind::Pdf),
            "txt" => Some(DocumentKind::Text),
            _ => None,
        }
    }
}

/// A single monthly statement found in the source directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementDocument {
    pub path: PathBuf,
    pub file_name: String,
    pub kind: DocumentKind,
}

impl StatementDocument {
    /// Builds a document for `path` if it has a recognized statement extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let path = path.as_ref();
        let kind = DocumentKind::from_path(path)?;
        let file_name = path.file_name()?.to_string_lossy().into_owned();
        Some(Self {
            path: path.to_path_buf(),
            file_name,
            kind,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_extension() {
        assert_eq!(DocumentKind::from_path(Path::new("a/May.pdf")), Some(DocumentKind::Pdf));
        assert_eq!(DocumentKind::from_path(Path::new("a/May.PDF")), Some(DocumentKind::Pdf));
        assert_eq!(DocumentKind::from_path(Path::new("May.txt")), Some(DocumentKind::Text));
        assert_eq!(DocumentKind::from_path(Path::new("May.csv")), None);
        assert_eq!(DocumentKind::from_path(Path::new("README")), None);
    }

    #[test]
    fn test_document_file_name() {
        let doc = StatementDocument::from_path("/statements/2023-05.pdf").unwrap();
        assert_eq!(doc.file_name, "2023-05.pdf");
        assert_eq!(doc.kind, DocumentKind::Pdf);
    }
}
