// Screen layout: panel arrangement and sizing.
//
// Divides the terminal area into fixed zones for the draft board:
//
// +--------------------------------------------------+
// | Status Bar (1 row)                                |
// +--------------------------------------------------+
// | Filter Bar (3 rows)                               |
// +--------------------------------------------------+
// | Board Table (fill)                                |
// |                                                   |
// +--------------------------------------------------+
// | Message / Prompt (1 row)                          |
// +--------------------------------------------------+
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Resolved screen areas for each dashboard zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    /// Top row: source document, counts, tab indicator.
    pub status_bar: Rect,
    /// Active search, team, position, and max-rank filters.
    pub filter_bar: Rect,
    /// The ranked player table.
    pub board: Rect,
    /// Last command result, or the active text prompt.
    pub message_bar: Rect,
    /// Bottom row: keyboard shortcut hints.
    pub help_bar: Rect,
}

/// Build the dashboard layout from the available terminal area.
pub fn build_layout(area: Rect) -> AppLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Length(3), // filter bar
            Constraint::Min(5),    // board table
            Constraint::Length(1), // message bar
            Constraint::Length(1), // help bar
        ])
        .split(area);

    AppLayout {
        status_bar: vertical[0],
        filter_bar: vertical[1],
        board: vertical[2],
        message_bar: vertical[3],
        help_bar: vertical[4],
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    /// A reasonable terminal size for testing.
    fn test_area() -> Rect {
        Rect::new(0, 0, 120, 40)
    }

    fn all_rects(layout: &AppLayout) -> [(&'static str, Rect); 5] {
        [
            ("status_bar", layout.status_bar),
            ("filter_bar", layout.filter_bar),
            ("board", layout.board),
            ("message_bar", layout.message_bar),
            ("help_bar", layout.help_bar),
        ]
    }

    #[test]
    fn layout_all_rects_nonzero() {
        let layout = build_layout(test_area());
        for (name, rect) in &all_rects(&layout) {
            assert!(
                rect.width > 0 && rect.height > 0,
                "{} has zero area: {:?}",
                name,
                rect
            );
        }
    }

    #[test]
    fn layout_fixed_rows() {
        let layout = build_layout(test_area());
        assert_eq!(layout.status_bar.height, 1);
        assert_eq!(layout.filter_bar.height, 3);
        assert_eq!(layout.message_bar.height, 1);
        assert_eq!(layout.help_bar.height, 1);
    }

    #[test]
    fn layout_board_takes_remaining_rows() {
        let layout = build_layout(test_area());
        assert_eq!(layout.board.height, 40 - 1 - 3 - 1 - 1);
        assert_eq!(layout.board.width, 120);
    }

    #[test]
    fn layout_zones_stack_top_to_bottom() {
        let layout = build_layout(test_area());
        let rects = all_rects(&layout);
        for pair in rects.windows(2) {
            assert!(
                pair[0].1.y < pair[1].1.y,
                "{} should be above {}",
                pair[0].0,
                pair[1].0
            );
        }
    }

    #[test]
    fn layout_small_terminal_still_valid() {
        // Minimum viable terminal size
        let area = Rect::new(0, 0, 40, 11);
        let layout = build_layout(area);
        for (name, rect) in &all_rects(&layout) {
            assert!(
                rect.width > 0 && rect.height > 0,
                "Small terminal: {} has zero area",
                name
            );
            assert!(rect.y + rect.height <= area.height);
        }
    }
}
