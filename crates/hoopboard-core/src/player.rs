// Player records: the raw ingested row and the ranked board row.

use serde::Serialize;

/// A player as read from a ranking document, before ADP ranks are assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct IngestedPlayer {
    pub player: String,
    pub team: String,
    pub position: String,
    /// Composite ranking score. Lower is better.
    pub blend: f64,
}

impl IngestedPlayer {
    pub fn new(player: &str, team: &str, position: &str, blend: f64) -> Self {
        IngestedPlayer {
            player: player.to_string(),
            team: team.to_string(),
            position: position.to_string(),
            blend,
        }
    }
}

/// A ranked row on the draft board.
///
/// `adp_rank` is dense over the board (1..=N) and doubles as the row's
/// identity. `drafted` is the only field that changes after ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerRow {
    #[serde(rename = "Player")]
    pub player: String,
    #[serde(rename = "Team")]
    pub team: String,
    #[serde(rename = "Pos")]
    pub position: String,
    #[serde(rename = "Blend")]
    pub blend: f64,
    #[serde(rename = "ADP Rank")]
    pub adp_rank: u32,
    #[serde(rename = "Drafted")]
    pub drafted: bool,
}

impl PlayerRow {
    /// Build a ranked row from an ingested player. New rows are undrafted.
    pub fn ranked(ingested: IngestedPlayer, adp_rank: u32) -> Self {
        PlayerRow {
            player: ingested.player,
            team: ingested.team,
            position: ingested.position,
            blend: ingested.blend,
            adp_rank,
            drafted: false,
        }
    }
}
