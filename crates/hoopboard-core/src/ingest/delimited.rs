// CSV ranking documents.
//
// Headers are matched case-insensitively against a small alias table so that
// exports from the common ADP sites load without editing.

use csv::{ReaderBuilder, Trim};
use tracing::warn;

use super::IngestError;
use crate::columns::{cell, HeaderIndex};
use crate::player::IngestedPlayer;

pub const PLAYER_ALIASES: &[&str] = &["player", "name", "player_name"];
pub const BLEND_ALIASES: &[&str] = &["blend", "adp", "avg_draft_position", "avgdraftposition"];
pub const TEAM_ALIASES: &[&str] = &["team", "tm"];
pub const POSITION_ALIASES: &[&str] = &["pos", "position"];

/// Parse a CSV document with Player, Team, Pos and Blend columns.
///
/// Only the Blend column is mandatory. A missing player column falls back to
/// the first column; missing team or position columns yield empty strings.
/// Rows with an empty player or a non-numeric blend are skipped.
pub fn parse_csv(bytes: &[u8]) -> Result<Vec<IngestedPlayer>, IngestError> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(bytes);

    let headers = HeaderIndex::new(reader.headers()?);
    let blend_idx = headers.find(BLEND_ALIASES).ok_or_else(|| IngestError::Schema {
        expected: BLEND_ALIASES.join(", "),
    })?;
    let player_idx = headers.find(PLAYER_ALIASES).unwrap_or(0);
    let team_idx = headers.find(TEAM_ALIASES);
    let pos_idx = headers.find(POSITION_ALIASES);

    let mut players = Vec::new();
    for (line, result) in reader.records().enumerate() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                warn!("skipping malformed CSV row {}: {}", line + 2, e);
                continue;
            }
        };

        let player = cell(&record, Some(player_idx));
        if player.is_empty() {
            continue;
        }

        let blend_raw = cell(&record, Some(blend_idx));
        let blend = match blend_raw.parse::<f64>() {
            Ok(v) if v.is_finite() => v,
            _ => {
                warn!("skipping '{}': non-numeric Blend value '{}'", player, blend_raw);
                continue;
            }
        };

        players.push(IngestedPlayer {
            player: player.to_string(),
            team: cell(&record, team_idx).to_string(),
            position: cell(&record, pos_idx).to_string(),
            blend,
        });
    }

    Ok(players)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
