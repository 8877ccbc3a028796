// Board table widget: the ranked players visible on the active tab.
//
// Columns: drafted mark, ADP rank, Player, Team, Pos, Blend.
// Drafted rows are dimmed and struck through; the selected row is
// highlighted.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};
use ratatui::Frame;

use hoopboard_core::PlayerRow;

use crate::tui::ViewState;

const EMPTY_BOARD_HINT: &str =
    "No board loaded. Press o to open a PDF or CSV ranking, or l to reload the saved snapshot.";
const NO_MATCHES_HINT: &str = "No players match the current filters. Esc clears them.";

/// Render the board table into the given area.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    rows: &[&PlayerRow],
    state: &ViewState,
    board_empty: bool,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(build_title(state, rows.len()));

    if rows.is_empty() {
        let hint = if board_empty { EMPTY_BOARD_HINT } else { NO_MATCHES_HINT };
        let paragraph = Paragraph::new(hint)
            .style(Style::default().fg(Color::Gray))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from(""),
        Cell::from("ADP"),
        Cell::from("Player"),
        Cell::from("Team"),
        Cell::from("Pos"),
        Cell::from("Blend"),
    ])
    .style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let table_rows: Vec<Row> = rows.iter().map(|r| build_row(r)).collect();

    let widths = [
        Constraint::Length(3),
        Constraint::Length(5),
        Constraint::Min(20),
        Constraint::Length(5),
        Constraint::Length(8),
        Constraint::Length(7),
    ];

    let table = Table::new(table_rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(">> ");

    let mut table_state = TableState::default();
    table_state.select(Some(state.selected.min(rows.len() - 1)));
    frame.render_stateful_widget(table, area, &mut table_state);
}

fn build_row(row: &PlayerRow) -> Row<'static> {
    let style = if row.drafted {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default()
    };

    Row::new(vec![
        Cell::from(drafted_mark(row.drafted)),
        Cell::from(row.adp_rank.to_string()),
        Cell::from(row.player.clone()),
        Cell::from(or_dash(&row.team)),
        Cell::from(or_dash(&row.position)),
        Cell::from(format_blend(row.blend)),
    ])
    .style(style)
}

pub fn drafted_mark(drafted: bool) -> &'static str {
    if drafted {
        "[x]"
    } else {
        "[ ]"
    }
}

/// Blend with at most two decimals, trailing zeros dropped ("3.2", "12", "2.67").
pub fn format_blend(blend: f64) -> String {
    let s = format!("{:.2}", blend);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    s.to_string()
}

fn or_dash(value: &str) -> String {
    if value.is_empty() {
        "--".to_string()
    } else {
        value.to_string()
    }
}

/// Title with the tab name and visible count.
fn build_title(state: &ViewState, count: usize) -> Line<'static> {
    Line::from(format!(" {} ({}) ", state.active_tab.label(), count))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
