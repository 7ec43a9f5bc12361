// src/documents/mod.rs
pub mod models;

use std::fs;
use std::path::Path;

use crate::utils::error::DocumentError;

pub use models::{DocumentKind, StatementDocument};

/// Lists statement documents in `dir`, sorted by file name.
///
/// Only regular files with a `.pdf` or `.txt` extension are returned.
/// An empty directory is not an error.
pub fn discover<P: AsRef<Path>>(dir: P) -> Result<Vec<StatementDocument>, DocumentError> {
    let dir = dir.as_ref();
    tracing::debug!("Scanning {} for statements", dir.display());

    let mut documents = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        if let Some(doc) = StatementDocument::from_path(entry.path()) {
            documents.push(doc);
        }
    }

    documents.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    tracing::info!("Found {} statement documents in {}", documents.len(), dir.display());
    Ok(documents)
}

/// Produces the full text of a statement.
pub trait TextExtractor {
    fn extract_text(&self, document: &StatementDocument) -> Result<String, DocumentError>;
}

/// Reads text straight from disk: PDF text layers through `pdf-extract`,
/// pre-extracted `.txt` statements verbatim.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileTextExtractor;

impl TextExtractor for FileTextExtractor {
    fn extract_text(&self, document: &StatementDocument) -> Result<String, DocumentError> {
        let text = match document.kind {
            DocumentKind::Text => fs::read_to_string(&document.path)?,
            DocumentKind::Pdf => {
                pdf_extract::extract_text(&document.path).map_err(|e| DocumentError::PdfExtract {
                    path: document.path.display().to_string(),
                    reason: e.to_string(),
                })?
            }
        };

        // Scanned pages have no text layer; that is empty input, not a failure.
        if text.trim().is_empty() {
            tracing::warn!("No extractable text in {}", document.file_name);
            return Ok(String::new());
        }

        tracing::debug!("Extracted {} bytes of text from {}", text.len(), document.file_name);
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn test_discover_sorts_and_filters() {
        let dir = tempdir().unwrap();
        for name in ["2023-06.pdf", "2023-05.PDF", "notes.md", "2023-04.txt"] {
            File::create(dir.path().join(name)).unwrap();
        }
        fs::create_dir(dir.path().join("archive.pdf")).unwrap();

        let docs = discover(dir.path()).unwrap();
        let names: Vec<&str> = docs.iter().map(|d| d.file_name.as_str()).collect();
        assert_eq!(names, vec!["2023-04.txt", "2023-05.PDF", "2023-06.pdf"]);
    }

    #[test]
    fn test_discover_empty_dir() {
        let dir = tempdir().unwrap();
        assert!(discover(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_discover_missing_dir_is_io_error() {
        let dir = tempdir().unwrap();
        let result = discover(dir.path().join("missing"));
        assert!(matches!(result, Err(DocumentError::Io(_))));
    }

    #[test]
    fn test_text_document_read_verbatim() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("2023-05.txt");
        fs::write(&path, "Purchase and Sale Summary\nrow\n").unwrap();

        let doc = StatementDocument::from_path(&path).unwrap();
        let text = FileTextExtractor.extract_text(&doc).unwrap();
        assert_eq!(text, "Purchase and Sale Summary\nrow\n");
    }

    #[test]
    fn test_blank_text_is_empty_not_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("blank.txt");
        fs::write(&path, "  \n\n ").unwrap();

        let doc = StatementDocument::from_path(&path).unwrap();
        assert_eq!(FileTextExtractor.extract_text(&doc).unwrap(), "");
    }
}
