// TUI dashboard: layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState` holding everything that is purely presentational
// (active tab, selection, filter inputs, prompts). The board itself lives in
// `App`; each frame asks it for the current filtered view and re-renders at
// ~30 fps.

pub mod input;
pub mod layout;
pub mod widgets;

use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::{DefaultTerminal, Frame};
use tracing::debug;

use hoopboard_core::{DraftScope, FilterCriteria};

use crate::app::{App, Flow};
use crate::protocol::TabId;

use input::InputContext;
use layout::build_layout;

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// What the keyboard is currently feeding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing into the search box (applied live).
    Search,
    /// Typing a max-rank cutoff into `input_buffer`.
    MaxRank,
    /// Typing a document path into `input_buffer`.
    OpenPath,
    ConfirmReset,
    ConfirmQuit,
}

/// TUI-local state. Filter fields map one-to-one onto `FilterCriteria`.
#[derive(Debug, Default)]
pub struct ViewState {
    /// Which tab is active in the main panel.
    pub active_tab: TabId,
    /// Index of the highlighted row within the visible rows.
    pub selected: usize,
    pub search_text: String,
    pub team_filter: Option<String>,
    pub position_filter: Option<String>,
    pub max_rank: Option<u32>,
    pub input_mode: InputMode,
    /// Pending text for the max-rank and open-path prompts.
    pub input_buffer: String,
}

impl ViewState {
    /// Criteria for the rows shown on the active tab.
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            search_text: self.search_text.clone(),
            team: self.team_filter.clone(),
            position: self.position_filter.clone(),
            max_rank: self.max_rank,
            scope: self.active_tab.scope(),
        }
    }

    /// Criteria for exports: the filters without the tab's drafted scope.
    /// The export scope decides which drafted state is written.
    pub fn export_criteria(&self) -> FilterCriteria {
        FilterCriteria {
            scope: DraftScope::All,
            ..self.criteria()
        }
    }

    pub fn clear_filters(&mut self) {
        self.search_text.clear();
        self.team_filter = None;
        self.position_filter = None;
        self.max_rank = None;
        self.selected = 0;
    }

    /// Keep the selection inside the visible rows.
    pub fn clamp_selection(&mut self, visible: usize) {
        if visible == 0 {
            self.selected = 0;
        } else if self.selected >= visible {
            self.selected = visible - 1;
        }
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete dashboard frame.
pub fn render_frame(frame: &mut Frame, state: &ViewState, app: &App) {
    let area = frame.area();
    let layout = build_layout(area);
    let visible = app.board.get_view(&state.criteria());

    widgets::status_bar::render(frame, layout.status_bar, state, app);
    widgets::filter_bar::render(frame, layout.filter_bar, state);
    widgets::board_table::render(frame, layout.board, &visible, state, app.board.is_empty());
    widgets::help_bar::render_message(frame, layout.message_bar, state, app.status.as_ref());
    widgets::help_bar::render_hints(frame, layout.help_bar, state);

    match state.input_mode {
        InputMode::ConfirmReset => widgets::confirm::render(
            frame,
            area,
            " Reset? ",
            &format!("Clear all {} drafted flags?", app.board.drafted_count()),
        ),
        InputMode::ConfirmQuit => {
            widgets::confirm::render(frame, area, " Quit? ", "Really quit?")
        }
        _ => {}
    }
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop until the user quits.
///
/// This is the main entry point for the terminal UI. It:
/// 1. Initializes the terminal (enters raw mode, enables alternate screen).
/// 2. Installs a panic hook to restore the terminal on crash.
/// 3. Runs an async select loop: keyboard input and render ticks.
/// 4. Restores the terminal on exit, including error exits.
pub async fn run(app: &mut App) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = ratatui::restore();
        original_hook(panic_info);
    }));

    let result = event_loop(&mut terminal, app).await;

    ratatui::restore();
    result
}

async fn event_loop(terminal: &mut DefaultTerminal, app: &mut App) -> anyhow::Result<()> {
    let mut view_state = ViewState::default();
    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if dispatch_key(key_event, &mut view_state, app) == Flow::Quit {
                            break;
                        }
                    }
                    Some(Ok(_)) => {
                        // Mouse and resize events: the next tick redraws.
                    }
                    Some(Err(e)) => {
                        return Err(anyhow::Error::new(e).context("terminal input error"));
                    }
                    None => break,
                }
            }

            _ = render_tick.tick() => {
                terminal.draw(|frame| render_frame(frame, &view_state, app))?;
            }
        }
    }

    Ok(())
}

/// Route one key press through the input handler and into the app.
pub fn dispatch_key(
    key_event: crossterm::event::KeyEvent,
    view_state: &mut ViewState,
    app: &mut App,
) -> Flow {
    let command = {
        let visible = app.board.get_view(&view_state.criteria());
        let teams = app.board.teams();
        let positions = app.board.positions();
        let ctx = InputContext {
            visible: &visible,
            teams: &teams,
            positions: &positions,
        };
        input::handle_key(key_event, view_state, &ctx)
    };

    let flow = match command {
        Some(cmd) => {
            debug!("command: {:?}", cmd);
            app.handle_command(cmd)
        }
        None => Flow::Continue,
    };

    let visible = app.board.get_view(&view_state.criteria()).len();
    view_state.clamp_selection(visible);
    flow
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
    use hoopboard_core::config::Config;
    use hoopboard_core::{BoardState, IngestedPlayer};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn sample_app() -> App {
        let mut app = App::new(Config::default());
        app.board.replace(BoardState::from_ingested(
            vec![
                IngestedPlayer::new("Nikola Jokic", "DEN", "C", 1.4),
                IngestedPlayer::new("Luka Doncic", "LAL", "PG", 3.6),
                IngestedPlayer::new("Shai Gilgeous-Alexander", "OKC", "PG", 2.1),
            ],
            None,
        ));
        app
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn view_state_default_is_sensible() {
        let state = ViewState::default();
        assert_eq!(state.active_tab, TabId::Board);
        assert_eq!(state.selected, 0);
        assert_eq!(state.input_mode, InputMode::Normal);
        assert!(state.criteria().is_unfiltered());
    }

    #[test]
    fn criteria_follow_tab_but_export_criteria_do_not() {
        let mut state = ViewState::default();
        state.active_tab = TabId::Drafted;
        state.team_filter = Some("LAL".into());
        assert_eq!(state.criteria().scope, DraftScope::Drafted);
        let export = state.export_criteria();
        assert_eq!(export.scope, DraftScope::All);
        assert_eq!(export.team.as_deref(), Some("LAL"));
    }

    #[test]
    fn clamp_selection_bounds() {
        let mut state = ViewState::default();
        state.selected = 10;
        state.clamp_selection(3);
        assert_eq!(state.selected, 2);
        state.clamp_selection(0);
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn clear_filters_resets_everything() {
        let mut state = ViewState::default();
        state.search_text = "luka".into();
        state.team_filter = Some("LAL".into());
        state.position_filter = Some("PG".into());
        state.max_rank = Some(5);
        state.selected = 2;
        state.clear_filters();
        assert!(state.criteria().is_unfiltered());
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn dispatch_toggles_selected_row() {
        let mut app = sample_app();
        let mut state = ViewState::default();
        dispatch_key(key(KeyCode::Down), &mut state, &mut app);
        let flow = dispatch_key(key(KeyCode::Char(' ')), &mut state, &mut app);
        assert_eq!(flow, Flow::Continue);
        // Row 2 by Blend is Shai Gilgeous-Alexander.
        assert!(app.board.row(2).unwrap().drafted);
    }

    #[test]
    fn dispatch_clamps_selection_when_rows_leave_the_view() {
        let mut app = sample_app();
        let mut state = ViewState::default();
        state.active_tab = TabId::Remaining;
        state.selected = 2;
        dispatch_key(key(KeyCode::Enter), &mut state, &mut app);
        assert!(app.board.row(3).unwrap().drafted);
        assert_eq!(state.selected, 1);
    }

    #[test]
    fn dispatch_quit_after_confirmation() {
        let mut app = sample_app();
        let mut state = ViewState::default();
        assert_eq!(dispatch_key(key(KeyCode::Char('q')), &mut state, &mut app), Flow::Continue);
        assert_eq!(dispatch_key(key(KeyCode::Char('y')), &mut state, &mut app), Flow::Quit);
    }

    #[test]
    fn render_frame_shows_board() {
        let app = sample_app();
        let state = ViewState::default();
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal
            .draw(|frame| render_frame(frame, &state, &app))
            .unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("Nikola Jokic"));
        assert!(text.contains("Shai Gilgeous-Alexander"));
    }

    #[test]
    fn render_frame_with_confirm_overlay() {
        let app = sample_app();
        let mut state = ViewState::default();
        state.input_mode = InputMode::ConfirmQuit;
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal
            .draw(|frame| render_frame(frame, &state, &app))
            .unwrap();
        assert!(buffer_text(&terminal).contains("Really quit?"));
    }

    #[test]
    fn render_frame_on_tiny_terminal_does_not_panic() {
        let app = sample_app();
        let state = ViewState::default();
        let mut terminal = Terminal::new(TestBackend::new(20, 5)).unwrap();
        terminal
            .draw(|frame| render_frame(frame, &state, &app))
            .unwrap();
    }
}
