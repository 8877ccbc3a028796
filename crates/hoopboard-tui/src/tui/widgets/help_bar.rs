// Bottom rows: the message line (command feedback or the active prompt) and
// the key hint bar.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::protocol::{StatusLevel, StatusMessage};
use crate::tui::{InputMode, ViewState};

/// Render the prompt for text-entry modes, otherwise the last status message.
pub fn render_message(
    frame: &mut Frame,
    area: Rect,
    state: &ViewState,
    status: Option<&StatusMessage>,
) {
    let line = match prompt_text(state) {
        Some(prompt) => Line::from(Span::styled(
            prompt,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        None => match status {
            Some(msg) => status_line(msg),
            None => Line::from(""),
        },
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn prompt_text(state: &ViewState) -> Option<String> {
    match state.input_mode {
        InputMode::MaxRank => Some(format!(" Max ADP rank (blank = none): {}_", state.input_buffer)),
        InputMode::OpenPath => Some(format!(" Open PDF/CSV: {}_", state.input_buffer)),
        _ => None,
    }
}

fn status_line(msg: &StatusMessage) -> Line<'static> {
    let color = match msg.level {
        StatusLevel::Info => Color::Green,
        StatusLevel::Error => Color::Red,
    };
    Line::from(vec![
        Span::styled(
            format!(" {} ", msg.at.format("%H:%M:%S")),
            Style::default().fg(Color::Gray),
        ),
        Span::styled(msg.text.clone(), Style::default().fg(color)),
    ])
}

/// Render the key hints for the current input mode.
pub fn render_hints(frame: &mut Frame, area: Rect, state: &ViewState) {
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        hint_text(state.input_mode),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

pub fn hint_text(mode: InputMode) -> &'static str {
    match mode {
        InputMode::Normal => {
            " q:Quit | 1-3:Tabs | j/k:Move | Space:Draft | /:Search | t:Team | p:Pos | m:Max | Esc:Clear | e/d/f:Export | s/l:Save/Load | o:Open | R:Reset"
        }
        InputMode::Search => " Type to search | Enter:Keep | Esc:Clear",
        InputMode::MaxRank | InputMode::OpenPath => " Enter:Apply | Esc:Cancel",
        InputMode::ConfirmReset | InputMode::ConfirmQuit => " y:Confirm | n/Esc:Cancel",
    }
}
