// ADP rank assignment: order players by Blend and number them 1..N.

use std::cmp::Ordering;

use tracing::debug;

use crate::player::{IngestedPlayer, PlayerRow};

/// Sort players by ascending blend and assign dense ADP ranks starting at 1.
///
/// The sort is stable, so players with equal blend keep their input order.
/// When `limit` is set, only the best `limit` players are kept.
pub fn assign_ranks(mut players: Vec<IngestedPlayer>, limit: Option<usize>) -> Vec<PlayerRow> {
    // Ingestion drops non-finite blends. Numeric comparison keeps 0 and -0 tied.
    players.sort_by(|a, b| a.blend.partial_cmp(&b.blend).unwrap_or(Ordering::Equal));

    if let Some(max) = limit {
        if players.len() > max {
            debug!("truncating board from {} to {} players", players.len(), max);
            players.truncate(max);
        }
    }

    players
        .into_iter()
        .enumerate()
        .map(|(i, p)| PlayerRow::ranked(p, i as u32 + 1))
        .collect()
}
