// Board snapshots: save the full board, drafted flags included, and load it
// back later. The format is the same CSV layout as the exports.

use std::path::Path;

use csv::{ReaderBuilder, Trim};
use tracing::info;

use crate::board::BoardState;
use crate::columns::{cell, HeaderIndex, BOARD_HEADERS};
use crate::export::{write_rows, ExportError};
use crate::player::PlayerRow;

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot format error: {0}")]
    Format(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to access snapshot {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

impl From<ExportError> for SnapshotError {
    fn from(e: ExportError) -> Self {
        match e {
            ExportError::Csv(e) => SnapshotError::Csv(e),
            ExportError::Io { path, source } => SnapshotError::Io { path, source },
        }
    }
}

/// Serialize the full board to CSV bytes.
pub fn export_snapshot(board: &BoardState) -> Result<Vec<u8>, SnapshotError> {
    Ok(write_rows(board.rows().iter())?)
}

/// Parse a snapshot into a new board.
///
/// Headers are matched case-insensitively and every board column is
/// required. Ranks must form exactly 1..=N.
pub fn import_snapshot(bytes: &[u8]) -> Result<BoardState, SnapshotError> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(bytes);
    let headers = HeaderIndex::new(reader.headers()?);

    let mut indices = [0usize; 6];
    let mut missing = Vec::new();
    for (slot, name) in indices.iter_mut().zip(BOARD_HEADERS) {
        match headers.find(&[name]) {
            Some(i) => *slot = i,
            None => missing.push(name),
        }
    }
    if !missing.is_empty() {
        return Err(SnapshotError::Format(format!(
            "missing required columns: {}",
            missing.join(", ")
        )));
    }
    let [player_idx, team_idx, pos_idx, blend_idx, rank_idx, drafted_idx] = indices;

    let mut rows = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let record = result?;
        let line = i + 2;
        let blend_raw = cell(&record, Some(blend_idx));
        let blend = blend_raw
            .parse::<f64>()
            .ok()
            .filter(|b| b.is_finite())
            .ok_or_else(|| {
                SnapshotError::Format(format!("line {line}: invalid Blend '{blend_raw}'"))
            })?;
        let rank_raw = cell(&record, Some(rank_idx));
        let adp_rank = rank_raw.parse::<u32>().map_err(|_| {
            SnapshotError::Format(format!("line {line}: invalid ADP Rank '{rank_raw}'"))
        })?;
        let drafted_raw = cell(&record, Some(drafted_idx));
        let drafted = parse_flag(drafted_raw).ok_or_else(|| {
            SnapshotError::Format(format!("line {line}: invalid Drafted '{drafted_raw}'"))
        })?;

        rows.push(PlayerRow {
            player: cell(&record, Some(player_idx)).to_string(),
            team: cell(&record, Some(team_idx)).to_string(),
            position: cell(&record, Some(pos_idx)).to_string(),
            blend,
            adp_rank,
            drafted,
        });
    }

    let board = BoardState::new(rows);
    let dense = board
        .rows()
        .iter()
        .enumerate()
        .all(|(i, r)| r.adp_rank as usize == i + 1);
    if !dense {
        return Err(SnapshotError::Format(format!(
            "ADP ranks must be exactly 1..={} with no duplicates",
            board.len()
        )));
    }
    Ok(board)
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => Some(true),
        "false" | "0" | "no" | "n" | "" => Some(false),
        _ => None,
    }
}

/// Write a snapshot of `board` to `path`.
pub fn save_snapshot(path: &Path, board: &BoardState) -> Result<(), SnapshotError> {
    let bytes = export_snapshot(board)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| SnapshotError::Io {
            path: parent.display().to_string(),
            source: e,
        })?;
    }
    std::fs::write(path, bytes).map_err(|e| SnapshotError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    info!(
        "saved snapshot of {} players ({} drafted) to {}",
        board.len(),
        board.drafted_count(),
        path.display()
    );
    Ok(())
}

/// Read a snapshot from `path`.
pub fn load_snapshot(path: &Path) -> Result<BoardState, SnapshotError> {
    let bytes = std::fs::read(path).map_err(|e| SnapshotError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let board = import_snapshot(&bytes)?;
    info!("loaded snapshot of {} players from {}", board.len(), path.display());
    Ok(board)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::IngestedPlayer;

    fn sample_board() -> BoardState {
        BoardState::from_ingested(
            vec![
                IngestedPlayer::new("Nikola Jokic", "DEN", "C", 1.4),
                IngestedPlayer::new("Luka Doncic", "LAL", "PG", 2.0 / 3.0),
                IngestedPlayer::new("Jones, Tre", "CHI", "PG", 140.25),
            ],
            None,
        )
    }

    #[test]
    fn round_trip_preserves_board() {
        let mut board = sample_board();
        board.toggle_drafted(2).unwrap();
        let bytes = export_snapshot(&board).unwrap();
        let restored = import_snapshot(&bytes).unwrap();
        assert_eq!(restored, board);
    }

    #[test]
    fn round_trip_empty_board() {
        let board = BoardState::default();
        let restored = import_snapshot(&export_snapshot(&board).unwrap()).unwrap();
        assert!(restored.is_empty());
    }

    #[test]
    fn missing_columns_is_format_error() {
        let err = import_snapshot(b"Player,Team,Pos,Blend\nA B,T,PG,1.0\n").unwrap_err();
        match err {
            SnapshotError::Format(msg) => {
                assert!(msg.contains("ADP Rank"));
                assert!(msg.contains("Drafted"));
            }
            other => panic!("expected Format error, got {other:?}"),
        }
    }

    #[test]
    fn headers_are_case_insensitive_and_reordered() {
        let csv = "drafted,adp rank,BLEND,pos,team,player\nyes,2,3.5,SG,BOS,B B\nno,1,1.5,PG,LAL,A A\n";
        let board = import_snapshot(csv.as_bytes()).unwrap();
        assert_eq!(board.rows()[0].player, "A A");
        assert!(!board.rows()[0].drafted);
        assert_eq!(board.rows()[1].player, "B B");
        assert!(board.rows()[1].drafted);
    }

    #[test]
    fn bad_values_are_format_errors() {
        let bad_blend = "Player,Team,Pos,Blend,ADP Rank,Drafted\nA B,T,PG,x,1,false\n";
        assert!(matches!(import_snapshot(bad_blend.as_bytes()), Err(SnapshotError::Format(_))));
        let bad_rank = "Player,Team,Pos,Blend,ADP Rank,Drafted\nA B,T,PG,1.0,first,false\n";
        assert!(matches!(import_snapshot(bad_rank.as_bytes()), Err(SnapshotError::Format(_))));
        let bad_flag = "Player,Team,Pos,Blend,ADP Rank,Drafted\nA B,T,PG,1.0,1,maybe\n";
        assert!(matches!(import_snapshot(bad_flag.as_bytes()), Err(SnapshotError::Format(_))));
    }

    #[test]
    fn rank_gaps_and_duplicates_are_format_errors() {
        let gap = "Player,Team,Pos,Blend,ADP Rank,Drafted\nA B,T,PG,1.0,1,false\nC D,T,PG,2.0,3,false\n";
        assert!(matches!(import_snapshot(gap.as_bytes()), Err(SnapshotError::Format(_))));
        let dup = "Player,Team,Pos,Blend,ADP Rank,Drafted\nA B,T,PG,1.0,1,false\nC D,T,PG,2.0,1,false\n";
        assert!(matches!(import_snapshot(dup.as_bytes()), Err(SnapshotError::Format(_))));
    }

    #[test]
    fn save_and_load_file() {
        let dir = std::env::temp_dir().join("hoopboard_snapshot_test");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("board.csv");
        let mut board = sample_board();
        board.toggle_drafted(1).unwrap();
        save_snapshot(&path, &board).unwrap();
        assert_eq!(load_snapshot(&path).unwrap(), board);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let result = load_snapshot(Path::new("/definitely/not/here/snapshot.csv"));
        assert!(matches!(result, Err(SnapshotError::Io { .. })));
    }
}
