// Case-insensitive CSV header lookup shared by the document ingestor and the
// snapshot importer.

use csv::StringRecord;

/// Column headers written by snapshots and CSV exports, in order.
pub const BOARD_HEADERS: [&str; 6] = ["Player", "Team", "Pos", "Blend", "ADP Rank", "Drafted"];

/// Index of a CSV header row keyed by normalized (trimmed, lowercase) name.
#[derive(Debug, Clone)]
pub struct HeaderIndex {
    names: Vec<String>,
}

impl HeaderIndex {
    pub fn new(headers: &StringRecord) -> Self {
        HeaderIndex {
            names: headers.iter().map(normalize).collect(),
        }
    }

    /// Position of the first header matching any of `aliases`, in alias order.
    pub fn find(&self, aliases: &[&str]) -> Option<usize> {
        aliases.iter().find_map(|alias| {
            let wanted = normalize(alias);
            self.names.iter().position(|n| *n == wanted)
        })
    }
}

/// Trimmed cell value at `idx`, or "" when the column or cell is absent.
pub fn cell(record: &StringRecord, idx: Option<usize>) -> &str {
    idx.and_then(|i| record.get(i)).map(str::trim).unwrap_or("")
}

fn normalize(name: &str) -> String {
    name.trim().trim_start_matches('\u{feff}').to_lowercase()
}
