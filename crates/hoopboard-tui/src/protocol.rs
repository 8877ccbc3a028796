// Message types between the terminal UI and the app orchestrator.

use std::path::PathBuf;

use chrono::{DateTime, Local};
use hoopboard_core::{DraftScope, ExportScope, FilterCriteria, RowId};

/// Tabs of the main panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TabId {
    /// Every player, drafted ones marked.
    #[default]
    Board,
    Remaining,
    Drafted,
}

impl TabId {
    pub const ALL: [TabId; 3] = [TabId::Board, TabId::Remaining, TabId::Drafted];

    pub fn scope(self) -> DraftScope {
        match self {
            TabId::Board => DraftScope::All,
            TabId::Remaining => DraftScope::Remaining,
            TabId::Drafted => DraftScope::Drafted,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TabId::Board => "Board",
            TabId::Remaining => "Remaining",
            TabId::Drafted => "Drafted",
        }
    }
}

/// Commands the TUI sends to the app. Each one is self-contained so the app
/// never needs to look at UI state.
#[derive(Debug, Clone, PartialEq)]
pub enum UserCommand {
    ToggleDrafted(RowId),
    Export {
        scope: ExportScope,
        criteria: FilterCriteria,
    },
    SaveSnapshot,
    LoadSnapshot,
    OpenDocument(PathBuf),
    ResetDrafted,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Error,
}

/// One-line feedback shown under the board after a command.
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
    pub at: DateTime<Local>,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        StatusMessage {
            text: text.into(),
            level: StatusLevel::Info,
            at: Local::now(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        StatusMessage {
            text: text.into(),
            level: StatusLevel::Error,
            at: Local::now(),
        }
    }
}
