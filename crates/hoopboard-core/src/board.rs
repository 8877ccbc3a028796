// Board state: the ranked player table and each player's drafted flag.

use std::collections::BTreeSet;

use tracing::{debug, info};

use crate::player::{IngestedPlayer, PlayerRow};
use crate::rank::assign_ranks;
use crate::view::FilterCriteria;

/// Identity of a row on the board: its ADP rank.
pub type RowId = u32;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("no player with ADP rank {0} on the board")]
    UnknownRow(RowId),
}

/// The draft board for the current session.
///
/// Rows are kept in ADP rank order, so the row with rank `r` lives at index
/// `r - 1`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardState {
    rows: Vec<PlayerRow>,
}

impl BoardState {
    /// Build a board from rows that already carry dense ranks 1..=N.
    ///
    /// Rows are re-ordered by rank; callers are responsible for density
    /// (see `snapshot::import_snapshot`, which validates it).
    pub fn new(mut rows: Vec<PlayerRow>) -> Self {
        rows.sort_by_key(|r| r.adp_rank);
        BoardState { rows }
    }

    /// Rank freshly ingested players and build an undrafted board.
    pub fn from_ingested(players: Vec<IngestedPlayer>, limit: Option<usize>) -> Self {
        let rows = assign_ranks(players, limit);
        info!("built draft board with {} players", rows.len());
        BoardState { rows }
    }

    /// All rows in rank order.
    pub fn rows(&self) -> &[PlayerRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Look up a row by its ADP rank.
    pub fn row(&self, id: RowId) -> Option<&PlayerRow> {
        let idx = (id as usize).checked_sub(1)?;
        self.rows.get(idx).filter(|r| r.adp_rank == id)
    }

    fn row_mut(&mut self, id: RowId) -> Result<&mut PlayerRow, BoardError> {
        let idx = (id as usize).checked_sub(1).ok_or(BoardError::UnknownRow(id))?;
        self.rows
            .get_mut(idx)
            .filter(|r| r.adp_rank == id)
            .ok_or(BoardError::UnknownRow(id))
    }

    /// Flip a row's drafted flag and return the new value.
    pub fn toggle_drafted(&mut self, id: RowId) -> Result<bool, BoardError> {
        let drafted = !self.row_mut(id)?.drafted;
        self.set_drafted(id, drafted)?;
        Ok(drafted)
    }

    /// Set a row's drafted flag explicitly.
    pub fn set_drafted(&mut self, id: RowId, drafted: bool) -> Result<(), BoardError> {
        let row = self.row_mut(id)?;
        row.drafted = drafted;
        debug!("'{}' drafted = {}", row.player, drafted);
        Ok(())
    }

    /// Clear every drafted flag. Returns how many rows were cleared.
    pub fn reset_drafted(&mut self) -> usize {
        let mut cleared = 0;
        for row in self.rows.iter_mut().filter(|r| r.drafted) {
            row.drafted = false;
            cleared += 1;
        }
        info!("reset {} drafted players", cleared);
        cleared
    }

    /// Replace the whole board (new upload or snapshot reload).
    pub fn replace(&mut self, other: BoardState) {
        *self = other;
    }

    /// Rows matching every criterion, in rank order.
    pub fn get_view(&self, criteria: &FilterCriteria) -> Vec<&PlayerRow> {
        self.rows.iter().filter(|r| criteria.matches(r)).collect()
    }

    pub fn drafted_count(&self) -> usize {
        self.rows.iter().filter(|r| r.drafted).count()
    }

    /// Distinct non-empty team codes, sorted.
    pub fn teams(&self) -> Vec<String> {
        distinct(self.rows.iter().map(|r| r.team.as_str()))
    }

    /// Distinct non-empty position strings, sorted.
    pub fn positions(&self) -> Vec<String> {
        distinct(self.rows.iter().map(|r| r.position.as_str()))
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .filter(|v| !v.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::DraftScope;

    fn sample_board() -> BoardState {
        BoardState::from_ingested(
            vec![
                IngestedPlayer::new("A", "T1", "PG", 5.0),
                IngestedPlayer::new("B", "T2", "SG", 3.2),
                IngestedPlayer::new("C", "T3", "C", 3.2),
            ],
            None,
        )
    }

    #[test]
    fn from_ingested_ranks_rows() {
        let board = sample_board();
        let names: Vec<&str> = board.rows().iter().map(|r| r.player.as_str()).collect();
        assert_eq!(names, vec!["B", "C", "A"]);
        assert_eq!(board.row(1).unwrap().player, "B");
        assert_eq!(board.row(3).unwrap().player, "A");
        assert!(board.row(0).is_none());
        assert!(board.row(4).is_none());
    }

    #[test]
    fn toggle_flips_and_returns_new_value() {
        let mut board = sample_board();
        assert_eq!(board.toggle_drafted(1), Ok(true));
        assert!(board.row(1).unwrap().drafted);
        assert_eq!(board.drafted_count(), 1);
    }

    #[test]
    fn toggle_twice_restores_state() {
        let mut board = sample_board();
        let before = board.clone();
        board.toggle_drafted(2).unwrap();
        board.toggle_drafted(2).unwrap();
        assert_eq!(board, before);
    }

    #[test]
    fn toggle_unknown_row_fails() {
        let mut board = sample_board();
        assert_eq!(board.toggle_drafted(0), Err(BoardError::UnknownRow(0)));
        assert_eq!(board.toggle_drafted(9), Err(BoardError::UnknownRow(9)));
    }

    #[test]
    fn set_and_reset_drafted() {
        let mut board = sample_board();
        board.set_drafted(1, true).unwrap();
        board.set_drafted(3, true).unwrap();
        board.set_drafted(3, true).unwrap();
        assert_eq!(board.drafted_count(), 2);
        assert_eq!(board.reset_drafted(), 2);
        assert_eq!(board.drafted_count(), 0);
    }

    #[test]
    fn view_max_rank_bounds() {
        let board = sample_board();
        let all = FilterCriteria {
            max_rank: Some(board.len() as u32),
            ..Default::default()
        };
        assert_eq!(board.get_view(&all).len(), 3);
        let none = FilterCriteria {
            max_rank: Some(0),
            ..Default::default()
        };
        assert!(board.get_view(&none).is_empty());
    }

    #[test]
    fn view_preserves_rank_order() {
        let mut board = sample_board();
        board.toggle_drafted(2).unwrap();
        let remaining = FilterCriteria {
            scope: DraftScope::Remaining,
            ..Default::default()
        };
        let ranks: Vec<u32> = board.get_view(&remaining).iter().map(|r| r.adp_rank).collect();
        assert_eq!(ranks, vec![1, 3]);
    }

    #[test]
    fn teams_and_positions_are_distinct_and_sorted() {
        let board = BoardState::from_ingested(
            vec![
                IngestedPlayer::new("A A", "LAL", "PG", 1.0),
                IngestedPlayer::new("B B", "BOS", "C", 2.0),
                IngestedPlayer::new("C C", "LAL", "", 3.0),
            ],
            None,
        );
        assert_eq!(board.teams(), vec!["BOS", "LAL"]);
        assert_eq!(board.positions(), vec!["C", "PG"]);
    }

    #[test]
    fn replace_swaps_whole_board() {
        let mut board = sample_board();
        board.toggle_drafted(1).unwrap();
        board.replace(BoardState::default());
        assert!(board.is_empty());
        assert_eq!(board.drafted_count(), 0);
    }

    #[test]
    fn new_orders_rows_by_rank() {
        let mut rows = sample_board().rows().to_vec();
        rows.reverse();
        let board = BoardState::new(rows);
        assert_eq!(board, sample_board());
    }
}
