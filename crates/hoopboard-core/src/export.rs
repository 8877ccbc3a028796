// CSV exports of the current view: remaining, drafted, or the full board.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::columns::BOARD_HEADERS;
use crate::player::PlayerRow;
use crate::view::DraftScope;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

/// Which rows of a view an export contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportScope {
    Remaining,
    Drafted,
    Full,
}

impl ExportScope {
    /// The drafted filter this export applies.
    pub fn draft_scope(self) -> DraftScope {
        match self {
            ExportScope::Remaining => DraftScope::Remaining,
            ExportScope::Drafted => DraftScope::Drafted,
            ExportScope::Full => DraftScope::All,
        }
    }

    pub fn includes(self, row: &PlayerRow) -> bool {
        self.draft_scope().matches(row.drafted)
    }

    pub fn label(self) -> &'static str {
        match self {
            ExportScope::Remaining => "remaining",
            ExportScope::Drafted => "drafted",
            ExportScope::Full => "full board",
        }
    }
}

/// Serialize the rows of `view` selected by `scope` to CSV bytes.
///
/// The header row is always written, even for an empty export.
pub fn export_csv(view: &[&PlayerRow], scope: ExportScope) -> Result<Vec<u8>, ExportError> {
    write_rows(view.iter().copied().filter(|r| scope.includes(r)))
}

/// Write board rows as CSV with the standard board headers.
pub(crate) fn write_rows<'a>(
    rows: impl Iterator<Item = &'a PlayerRow>,
) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(BOARD_HEADERS)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer
        .into_inner()
        .map_err(|e| ExportError::Csv(csv::Error::from(e.into_error())))
}

/// Write export bytes to `dir/file_name`, creating `dir` if needed.
pub fn write_export(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf, ExportError> {
    let io_err = |path: &Path, source| ExportError::Io {
        path: path.display().to_string(),
        source,
    };
    std::fs::create_dir_all(dir).map_err(|e| io_err(dir, e))?;
    let path = dir.join(file_name);
    std::fs::write(&path, bytes).map_err(|e| io_err(&path, e))?;
    info!("wrote {} bytes to {}", bytes.len(), path.display());
    Ok(path)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
