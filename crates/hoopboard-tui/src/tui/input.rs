// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into UserCommand messages for the app, or
// into local ViewState mutations (tab switching, selection, filter edits,
// prompts).

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use hoopboard_core::{ExportScope, PlayerRow};

use super::{InputMode, ViewState};
use crate::protocol::{TabId, UserCommand};

/// Rows moved by PageUp/PageDown.
const PAGE_SIZE: usize = 20;

/// Board data the handler needs to resolve selections and cycle filters.
pub struct InputContext<'a> {
    /// Rows currently shown on the active tab, in display order.
    pub visible: &'a [&'a PlayerRow],
    /// Distinct teams on the board, sorted.
    pub teams: &'a [String],
    /// Distinct positions on the board, sorted.
    pub positions: &'a [String],
}

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press needs the app (drafting,
/// file I/O, quitting). Returns `None` when it was handled locally.
pub fn handle_key(
    key_event: KeyEvent,
    view_state: &mut ViewState,
    ctx: &InputContext<'_>,
) -> Option<UserCommand> {
    // crossterm emits Press and Release on Windows; only act on Press.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    // Ctrl+C always quits immediately regardless of mode
    if key_event.modifiers.contains(KeyModifiers::CONTROL)
        && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    match view_state.input_mode {
        InputMode::Normal => handle_normal(key_event, view_state, ctx),
        InputMode::Search => handle_search(key_event, view_state),
        InputMode::MaxRank => handle_max_rank(key_event, view_state),
        InputMode::OpenPath => handle_open_path(key_event, view_state),
        InputMode::ConfirmReset => handle_confirm(key_event, view_state, UserCommand::ResetDrafted),
        InputMode::ConfirmQuit => handle_confirm(key_event, view_state, UserCommand::Quit),
    }
}

fn handle_normal(
    key_event: KeyEvent,
    view_state: &mut ViewState,
    ctx: &InputContext<'_>,
) -> Option<UserCommand> {
    match key_event.code {
        // Tab switching
        KeyCode::Char('1') => switch_tab(view_state, TabId::Board),
        KeyCode::Char('2') => switch_tab(view_state, TabId::Remaining),
        KeyCode::Char('3') => switch_tab(view_state, TabId::Drafted),

        // Selection
        KeyCode::Up | KeyCode::Char('k') => {
            move_up(view_state, 1);
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            move_down(view_state, 1, ctx.visible.len());
            None
        }
        KeyCode::PageUp => {
            move_up(view_state, PAGE_SIZE);
            None
        }
        KeyCode::PageDown => {
            move_down(view_state, PAGE_SIZE, ctx.visible.len());
            None
        }
        KeyCode::Home => {
            view_state.selected = 0;
            None
        }

        // Drafting
        KeyCode::Char(' ') | KeyCode::Enter => ctx
            .visible
            .get(view_state.selected)
            .map(|row| UserCommand::ToggleDrafted(row.adp_rank)),

        // Filters
        KeyCode::Char('/') => {
            view_state.input_mode = InputMode::Search;
            None
        }
        KeyCode::Char('t') => {
            view_state.team_filter = cycle_option(view_state.team_filter.as_deref(), ctx.teams);
            view_state.selected = 0;
            None
        }
        KeyCode::Char('p') => {
            view_state.position_filter =
                cycle_option(view_state.position_filter.as_deref(), ctx.positions);
            view_state.selected = 0;
            None
        }
        KeyCode::Char('m') => {
            view_state.input_buffer = view_state
                .max_rank
                .map(|n| n.to_string())
                .unwrap_or_default();
            view_state.input_mode = InputMode::MaxRank;
            None
        }
        KeyCode::Esc => {
            view_state.clear_filters();
            None
        }

        // Exports
        KeyCode::Char('e') => Some(export(view_state, ExportScope::Remaining)),
        KeyCode::Char('d') => Some(export(view_state, ExportScope::Drafted)),
        KeyCode::Char('f') => Some(export(view_state, ExportScope::Full)),

        // Snapshot and documents
        KeyCode::Char('s') => Some(UserCommand::SaveSnapshot),
        KeyCode::Char('l') => Some(UserCommand::LoadSnapshot),
        KeyCode::Char('o') => {
            view_state.input_buffer.clear();
            view_state.input_mode = InputMode::OpenPath;
            None
        }

        // Destructive actions ask first
        KeyCode::Char('R') => {
            view_state.input_mode = InputMode::ConfirmReset;
            None
        }
        KeyCode::Char('q') => {
            view_state.input_mode = InputMode::ConfirmQuit;
            None
        }

        _ => None,
    }
}

fn switch_tab(view_state: &mut ViewState, tab: TabId) -> Option<UserCommand> {
    if view_state.active_tab != tab {
        view_state.active_tab = tab;
        view_state.selected = 0;
    }
    None
}

fn export(view_state: &ViewState, scope: ExportScope) -> UserCommand {
    UserCommand::Export {
        scope,
        criteria: view_state.export_criteria(),
    }
}

/// Search mode: edits apply live. Enter keeps the text, Esc clears it.
fn handle_search(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Esc => {
            view_state.search_text.clear();
            view_state.input_mode = InputMode::Normal;
        }
        KeyCode::Enter => {
            view_state.input_mode = InputMode::Normal;
        }
        KeyCode::Backspace => {
            view_state.search_text.pop();
            view_state.selected = 0;
        }
        KeyCode::Char(c) => {
            view_state.search_text.push(c);
            view_state.selected = 0;
        }
        _ => {}
    }
    None
}

/// Max-rank prompt: digits only. An empty entry removes the cutoff.
fn handle_max_rank(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Esc => {
            view_state.input_buffer.clear();
            view_state.input_mode = InputMode::Normal;
        }
        KeyCode::Enter => {
            let entry = std::mem::take(&mut view_state.input_buffer);
            // Digits only, so parse fails only on overflow; keep the old value then.
            if entry.is_empty() {
                view_state.max_rank = None;
            } else if let Ok(n) = entry.parse::<u32>() {
                view_state.max_rank = Some(n);
            }
            view_state.selected = 0;
            view_state.input_mode = InputMode::Normal;
        }
        KeyCode::Backspace => {
            view_state.input_buffer.pop();
        }
        KeyCode::Char(c) if c.is_ascii_digit() => {
            view_state.input_buffer.push(c);
        }
        _ => {}
    }
    None
}

fn handle_open_path(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Esc => {
            view_state.input_buffer.clear();
            view_state.input_mode = InputMode::Normal;
            None
        }
        KeyCode::Enter => {
            let entry = std::mem::take(&mut view_state.input_buffer);
            view_state.input_mode = InputMode::Normal;
            let path = entry.trim();
            if path.is_empty() {
                None
            } else {
                view_state.selected = 0;
                Some(UserCommand::OpenDocument(PathBuf::from(path)))
            }
        }
        KeyCode::Backspace => {
            view_state.input_buffer.pop();
            None
        }
        KeyCode::Char(c) => {
            view_state.input_buffer.push(c);
            None
        }
        _ => None,
    }
}

/// Confirmation prompt: y confirms, n/Esc cancels, everything else is blocked.
fn handle_confirm(
    key_event: KeyEvent,
    view_state: &mut ViewState,
    on_confirm: UserCommand,
) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            view_state.input_mode = InputMode::Normal;
            Some(on_confirm)
        }
        KeyCode::Char('q') | KeyCode::Char('Q') if on_confirm == UserCommand::Quit => {
            Some(on_confirm)
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            view_state.input_mode = InputMode::Normal;
            None
        }
        _ => None,
    }
}

/// Advance an optional filter through `values`.
///
/// None -> first -> ... -> last -> None. A value no longer on the board
/// restarts the cycle.
fn cycle_option(current: Option<&str>, values: &[String]) -> Option<String> {
    let next = match current {
        None => 0,
        Some(cur) => match values.iter().position(|v| v == cur) {
            Some(i) => i + 1,
            None => 0,
        },
    };
    values.get(next).cloned()
}

fn move_up(view_state: &mut ViewState, lines: usize) {
    view_state.selected = view_state.selected.saturating_sub(lines);
}

fn move_down(view_state: &mut ViewState, lines: usize, visible: usize) {
    if visible == 0 {
        view_state.selected = 0;
    } else {
        view_state.selected = view_state.selected.saturating_add(lines).min(visible - 1);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
