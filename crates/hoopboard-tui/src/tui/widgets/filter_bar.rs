// Filter bar widget: the active search, team, position, and max-rank filters.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::tui::{InputMode, ViewState};

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let searching = state.input_mode == InputMode::Search;
    let search = if searching {
        format!("{}_", state.search_text)
    } else if state.search_text.is_empty() {
        "any".to_string()
    } else {
        format!("\"{}\"", state.search_text)
    };

    let mut spans = Vec::new();
    push_field(&mut spans, "/ Search", search, searching || !state.search_text.is_empty());
    push_field(
        &mut spans,
        "t Team",
        state.team_filter.clone().unwrap_or_else(|| "all".into()),
        state.team_filter.is_some(),
    );
    push_field(
        &mut spans,
        "p Pos",
        state.position_filter.clone().unwrap_or_else(|| "all".into()),
        state.position_filter.is_some(),
    );
    push_field(
        &mut spans,
        "m Max rank",
        state
            .max_rank
            .map(|n| n.to_string())
            .unwrap_or_else(|| "none".into()),
        state.max_rank.is_some(),
    );

    // The tab's drafted scope is not a filter the user can clear.
    let title = if state.export_criteria().is_unfiltered() {
        " Filters "
    } else {
        " Filters (Esc clears) "
    };
    let paragraph = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(paragraph, area);
}

fn push_field(spans: &mut Vec<Span<'static>>, label: &'static str, value: String, active: bool) {
    let value_style = if active {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    spans.push(Span::styled(format!(" {}: ", label), Style::default().fg(Color::White)));
    spans.push(Span::styled(value, value_style));
    spans.push(Span::raw("  "));
}
