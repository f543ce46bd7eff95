//! Document input handling
//!
//! Library operations accept either an already-open `lopdf::Document` or a
//! file path; `PdfSource` makes the two substitutable.

use std::path::{Path, PathBuf};

use lopdf::Document;

use crate::error::{Error, Result};

/// Input to a PDF operation: an open document or a path to load one from.
pub enum PdfSource {
    /// Path to a PDF file on disk
    Path(PathBuf),
    /// An already-open document
    Document(Document),
}

impl From<PathBuf> for PdfSource {
    fn from(path: PathBuf) -> Self {
        PdfSource::Path(path)
    }
}

impl From<&Path> for PdfSource {
    fn from(path: &Path) -> Self {
        PdfSource::Path(path.to_path_buf())
    }
}

impl From<Document> for PdfSource {
    fn from(doc: Document) -> Self {
        PdfSource::Document(doc)
    }
}

impl PdfSource {
    /// Resolve the source into an open document.
    ///
    /// Path sources are validated (existence, at least one page) on load;
    /// document sources are passed through unchanged.
    pub fn into_document(self) -> Result<Document> {
        match self {
            PdfSource::Document(doc) => Ok(doc),
            PdfSource::Path(path) => load_document(&path),
        }
    }
}

/// Load a PDF from disk, rejecting missing files and zero-page documents.
pub fn load_document(path: &Path) -> Result<Document> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }

    let doc = Document::load(path)?;

    if doc.get_pages().is_empty() {
        return Err(Error::EmptyPdf(path.to_path_buf()));
    }

    Ok(doc)
}

/// Count the number of pages in a PDF file.
pub fn count_pages(path: &Path) -> Result<usize> {
    let doc = load_document(path)?;
    Ok(doc.get_pages().len())
}
