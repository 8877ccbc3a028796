// Filter criteria for deriving a view of the board.

use crate::player::PlayerRow;

/// Which rows a view shows by drafted status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DraftScope {
    #[default]
    All,
    Remaining,
    Drafted,
}

impl DraftScope {
    pub fn matches(self, drafted: bool) -> bool {
        match self {
            DraftScope::All => true,
            DraftScope::Remaining => !drafted,
            DraftScope::Drafted => drafted,
        }
    }
}

/// Filter applied to the board when rendering or exporting a view.
///
/// Every criterion that is set must match. Empty search text and `None`
/// fields match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    /// Case-insensitive substring matched against player and team.
    pub search_text: String,
    /// Exact team code (ASCII case-insensitive).
    pub team: Option<String>,
    /// Exact position string (ASCII case-insensitive).
    pub position: Option<String>,
    /// Inclusive upper bound on ADP rank.
    pub max_rank: Option<u32>,
    pub scope: DraftScope,
}

impl FilterCriteria {
    pub fn matches(&self, row: &PlayerRow) -> bool {
        if !self.scope.matches(row.drafted) {
            return false;
        }
        if let Some(max) = self.max_rank {
            if row.adp_rank > max {
                return false;
            }
        }
        if let Some(ref team) = self.team {
            if !row.team.eq_ignore_ascii_case(team) {
                return false;
            }
        }
        if let Some(ref pos) = self.position {
            if !row.position.eq_ignore_ascii_case(pos) {
                return false;
            }
        }
        let needle = self.search_text.trim().to_lowercase();
        if !needle.is_empty()
            && !row.player.to_lowercase().contains(&needle)
            && !row.team.to_lowercase().contains(&needle)
        {
            return false;
        }
        true
    }

    /// True when no criterion narrows the board.
    pub fn is_unfiltered(&self) -> bool {
        *self == FilterCriteria::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(player: &str, team: &str, position: &str, rank: u32, drafted: bool) -> PlayerRow {
        PlayerRow {
            player: player.to_string(),
            team: team.to_string(),
            position: position.to_string(),
            blend: rank as f64,
            adp_rank: rank,
            drafted,
        }
    }

    #[test]
    fn default_matches_everything() {
        let criteria = FilterCriteria::default();
        assert!(criteria.is_unfiltered());
        assert!(criteria.matches(&row("A B", "BOS", "PG", 1, false)));
        assert!(criteria.matches(&row("A B", "BOS", "PG", 1, true)));
    }

    #[test]
    fn search_matches_player_or_team_case_insensitively() {
        let criteria = FilterCriteria {
            search_text: "bOs".into(),
            ..Default::default()
        };
        assert!(criteria.matches(&row("Jayson Tatum", "BOS", "SF", 1, false)));
        assert!(criteria.matches(&row("Bosh Chris", "MIA", "PF", 2, false)));
        assert!(!criteria.matches(&row("Luka Doncic", "LAL", "PG", 3, false)));
    }

    #[test]
    fn team_and_position_are_exact() {
        let criteria = FilterCriteria {
            team: Some("den".into()),
            position: Some("C".into()),
            ..Default::default()
        };
        assert!(criteria.matches(&row("Nikola Jokic", "DEN", "C", 1, false)));
        assert!(!criteria.matches(&row("Jamal Murray", "DEN", "PG", 2, false)));
        assert!(!criteria.matches(&row("Rudy Gobert", "MIN", "C", 3, false)));
        assert!(!criteria.matches(&row("Somebody Else", "DEN", "PF/C", 4, false)));
    }

    #[test]
    fn max_rank_is_inclusive() {
        let criteria = FilterCriteria {
            max_rank: Some(2),
            ..Default::default()
        };
        assert!(criteria.matches(&row("A B", "", "", 2, false)));
        assert!(!criteria.matches(&row("C D", "", "", 3, false)));
    }

    #[test]
    fn scope_filters_by_drafted_flag() {
        let remaining = FilterCriteria {
            scope: DraftScope::Remaining,
            ..Default::default()
        };
        let drafted = FilterCriteria {
            scope: DraftScope::Drafted,
            ..Default::default()
        };
        let taken = row("A B", "", "", 1, true);
        assert!(!remaining.matches(&taken));
        assert!(drafted.matches(&taken));
    }
}
