// Document ingestion: turn an uploaded PDF or CSV into ingested player rows.
//
// CSV is the reliable path. PDF parsing is best-effort text extraction; when
// it finds nothing usable the caller should ask the user for a CSV export.

pub mod delimited;
pub mod pdf;

use std::path::Path;

use tracing::info;

use crate::player::IngestedPlayer;

pub use delimited::parse_csv;
pub use pdf::{parse_pdf, parse_pdf_text, PdfTextExtractor, TextExtractor};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("could not find a Blend table in the PDF ({reason}); export the list as CSV and upload that instead")]
    Parse { reason: String },

    #[error("CSV is missing a Blend column (expected one of: {expected})")]
    Schema { expected: String },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

// ---------------------------------------------------------------------------
// Format detection
// ---------------------------------------------------------------------------

/// The kind of ranking document being ingested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Csv,
}

impl DocumentKind {
    /// Detect the document kind from its magic bytes, then its extension.
    /// Anything that is not recognizably a PDF is treated as CSV.
    pub fn detect(path: Option<&Path>, bytes: &[u8]) -> Self {
        if bytes.starts_with(b"%PDF-") {
            return DocumentKind::Pdf;
        }
        let is_pdf_ext = path
            .and_then(|p| p.extension())
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));
        if is_pdf_ext {
            DocumentKind::Pdf
        } else {
            DocumentKind::Csv
        }
    }
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Parse a ranking document of the given kind.
pub fn ingest(kind: DocumentKind, bytes: &[u8]) -> Result<Vec<IngestedPlayer>, IngestError> {
    let players = match kind {
        DocumentKind::Csv => parse_csv(bytes)?,
        DocumentKind::Pdf => parse_pdf(&PdfTextExtractor, bytes)?,
    };
    info!("ingested {} players from {:?} document", players.len(), kind);
    Ok(players)
}

/// Read a document from disk, detect its kind and parse it.
pub fn ingest_file(path: &Path) -> Result<Vec<IngestedPlayer>, IngestError> {
    let bytes = std::fs::read(path).map_err(|e| IngestError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    ingest(DocumentKind::detect(Some(path), &bytes), &bytes)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
