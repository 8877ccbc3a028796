// Application state and command handling.
//
// The `App` owns the session's draft board. The TUI turns key presses into
// `UserCommand`s and hands them to `App::handle_command`, which mutates the
// board, performs file I/O, and records a status message for display. Errors
// never end the session; they become status messages.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{info, warn};

use hoopboard_core::config::Config;
use hoopboard_core::export::{export_csv, write_export, ExportScope};
use hoopboard_core::ingest::ingest_file;
use hoopboard_core::snapshot::{load_snapshot, save_snapshot};
use hoopboard_core::{BoardState, FilterCriteria};

use crate::protocol::{StatusMessage, UserCommand};

// ---------------------------------------------------------------------------
// Supporting types
// ---------------------------------------------------------------------------

/// Whether the event loop should keep running after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// The complete application state for one session.
pub struct App {
    pub config: Config,
    pub board: BoardState,
    /// The document or snapshot the board was loaded from.
    pub source: Option<PathBuf>,
    /// Feedback from the most recent command.
    pub status: Option<StatusMessage>,
}

impl App {
    pub fn new(config: Config) -> Self {
        App {
            config,
            board: BoardState::default(),
            source: None,
            status: None,
        }
    }

    /// Ingest a PDF or CSV ranking document and replace the board with it.
    /// Returns the number of ranked players.
    pub fn open_document(&mut self, path: &Path) -> anyhow::Result<usize> {
        let players = ingest_file(path)
            .with_context(|| format!("could not load {}", path.display()))?;
        let board = BoardState::from_ingested(players, self.config.board.limit());
        let count = board.len();
        self.board.replace(board);
        self.source = Some(path.to_path_buf());
        info!("opened {} with {} ranked players", path.display(), count);
        Ok(count)
    }

    /// Replace the board with a saved snapshot.
    pub fn restore_snapshot(&mut self, path: &Path) -> anyhow::Result<usize> {
        let board = load_snapshot(path)
            .with_context(|| format!("could not reload {}", path.display()))?;
        let count = board.len();
        self.board.replace(board);
        self.source = Some(path.to_path_buf());
        Ok(count)
    }

    /// Write the rows of the filtered view selected by `scope` to the
    /// configured export directory. Returns the written path.
    pub fn export(&self, scope: ExportScope, criteria: &FilterCriteria) -> anyhow::Result<PathBuf> {
        let view = self.board.get_view(criteria);
        let bytes = export_csv(&view, scope).context("failed to encode CSV")?;
        let file_name = match scope {
            ExportScope::Remaining => &self.config.export.remaining_file,
            ExportScope::Drafted => &self.config.export.drafted_file,
            ExportScope::Full => &self.config.export.full_file,
        };
        let path = write_export(&self.config.export.dir, file_name, &bytes)?;
        Ok(path)
    }

    /// Apply a user command. Outcomes are reported through `self.status`.
    pub fn handle_command(&mut self, cmd: UserCommand) -> Flow {
        match cmd {
            UserCommand::ToggleDrafted(id) => match self.board.toggle_drafted(id) {
                Ok(drafted) => {
                    if let Some(row) = self.board.row(id) {
                        let verb = if drafted { "Drafted" } else { "Undrafted" };
                        self.set_status(StatusMessage::info(format!(
                            "{} {} (#{})",
                            verb, row.player, row.adp_rank
                        )));
                    }
                }
                Err(e) => self.report_error(anyhow::Error::new(e)),
            },
            UserCommand::Export { scope, criteria } => {
                if self.board.is_empty() {
                    self.set_status(StatusMessage::error("Nothing to export yet"));
                    return Flow::Continue;
                }
                match self.export(scope, &criteria) {
                    Ok(path) => self.set_status(StatusMessage::info(format!(
                        "Exported {} to {}",
                        scope.label(),
                        path.display()
                    ))),
                    Err(e) => self.report_error(e),
                }
            }
            UserCommand::SaveSnapshot => {
                let path = self.config.snapshot.path.clone();
                match save_snapshot(&path, &self.board) {
                    Ok(()) => self.set_status(StatusMessage::info(format!(
                        "Saved {} players ({} drafted) to {}",
                        self.board.len(),
                        self.board.drafted_count(),
                        path.display()
                    ))),
                    Err(e) => self.report_error(anyhow::Error::new(e)),
                }
            }
            UserCommand::LoadSnapshot => {
                let path = self.config.snapshot.path.clone();
                match self.restore_snapshot(&path) {
                    Ok(count) => self.set_status(StatusMessage::info(format!(
                        "Reloaded {} players ({} drafted) from {}",
                        count,
                        self.board.drafted_count(),
                        path.display()
                    ))),
                    Err(e) => self.report_error(e),
                }
            }
            UserCommand::OpenDocument(path) => match self.open_document(&path) {
                Ok(count) => self.set_status(StatusMessage::info(format!(
                    "Ranked {} players by Blend from {}",
                    count,
                    path.display()
                ))),
                Err(e) => self.report_error(e),
            },
            UserCommand::ResetDrafted => {
                let cleared = self.board.reset_drafted();
                self.set_status(StatusMessage::info(format!(
                    "Cleared {} drafted players",
                    cleared
                )));
            }
            UserCommand::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    fn set_status(&mut self, status: StatusMessage) {
        self.status = Some(status);
    }

    fn report_error(&mut self, err: anyhow::Error) {
        warn!("{:#}", err);
        self.set_status(StatusMessage::error(format!("{:#}", err)));
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::StatusLevel;
    use std::fs;

    /// App whose export dir and snapshot path live in a fresh temp dir.
    fn test_app(name: &str) -> (App, PathBuf) {
        let dir = std::env::temp_dir().join(name);
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        let mut config = Config::default();
        config.export.dir = dir.join("exports");
        config.snapshot.path = dir.join("snapshot.csv");
        (App::new(config), dir)
    }

    fn write_doc(dir: &Path, name: &str, text: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, text).unwrap();
        path
    }

    const SAMPLE: &str = "Player,Team,Pos,Blend\nA A,T1,PG,5.0\nB B,T2,SG,3.2\nC C,T3,C,3.2\n";

    #[test]
    fn open_document_ranks_players() {
        let (mut app, dir) = test_app("hoopboard_app_open");
        let path = write_doc(&dir, "adp.csv", SAMPLE);
        let flow = app.handle_command(UserCommand::OpenDocument(path.clone()));
        assert_eq!(flow, Flow::Continue);
        assert_eq!(app.board.len(), 3);
        assert_eq!(app.board.rows()[0].player, "B B");
        assert_eq!(app.source, Some(path));
        assert_eq!(app.status.as_ref().unwrap().level, StatusLevel::Info);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn open_document_respects_max_players() {
        let (mut app, dir) = test_app("hoopboard_app_limit");
        app.config.board.max_players = 2;
        let path = write_doc(&dir, "adp.csv", SAMPLE);
        assert_eq!(app.open_document(&path).unwrap(), 2);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn schema_error_keeps_existing_board() {
        let (mut app, dir) = test_app("hoopboard_app_schema");
        let good = write_doc(&dir, "adp.csv", SAMPLE);
        app.open_document(&good).unwrap();
        let bad = write_doc(&dir, "bad.csv", "Player,Team\nA A,T1\n");
        app.handle_command(UserCommand::OpenDocument(bad));
        assert_eq!(app.board.len(), 3);
        let status = app.status.as_ref().unwrap();
        assert_eq!(status.level, StatusLevel::Error);
        assert!(status.text.contains("Blend"));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn toggle_reports_player() {
        let (mut app, dir) = test_app("hoopboard_app_toggle");
        app.open_document(&write_doc(&dir, "adp.csv", SAMPLE)).unwrap();
        app.handle_command(UserCommand::ToggleDrafted(1));
        assert!(app.board.row(1).unwrap().drafted);
        assert!(app.status.as_ref().unwrap().text.contains("Drafted B B"));
        app.handle_command(UserCommand::ToggleDrafted(1));
        assert!(!app.board.row(1).unwrap().drafted);
        app.handle_command(UserCommand::ToggleDrafted(42));
        assert_eq!(app.status.as_ref().unwrap().level, StatusLevel::Error);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn export_remaining_writes_configured_file() {
        let (mut app, dir) = test_app("hoopboard_app_export");
        app.open_document(&write_doc(&dir, "adp.csv", SAMPLE)).unwrap();
        app.handle_command(UserCommand::ToggleDrafted(1));
        app.handle_command(UserCommand::Export {
            scope: ExportScope::Remaining,
            criteria: FilterCriteria::default(),
        });
        let text = fs::read_to_string(dir.join("exports").join("remaining_players.csv")).unwrap();
        assert!(text.contains("C C"));
        assert!(text.contains("A A"));
        assert!(!text.contains("B B"));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn export_on_empty_board_is_rejected() {
        let (mut app, dir) = test_app("hoopboard_app_export_empty");
        app.handle_command(UserCommand::Export {
            scope: ExportScope::Full,
            criteria: FilterCriteria::default(),
        });
        assert_eq!(app.status.as_ref().unwrap().level, StatusLevel::Error);
        assert!(!dir.join("exports").exists());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn save_then_load_snapshot_restores_drafted() {
        let (mut app, dir) = test_app("hoopboard_app_snapshot");
        app.open_document(&write_doc(&dir, "adp.csv", SAMPLE)).unwrap();
        app.handle_command(UserCommand::ToggleDrafted(2));
        app.handle_command(UserCommand::SaveSnapshot);
        let saved = app.board.clone();

        app.handle_command(UserCommand::ResetDrafted);
        assert_eq!(app.board.drafted_count(), 0);

        app.handle_command(UserCommand::LoadSnapshot);
        assert_eq!(app.board, saved);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn load_missing_snapshot_reports_error() {
        let (mut app, dir) = test_app("hoopboard_app_snapshot_missing");
        app.handle_command(UserCommand::LoadSnapshot);
        assert_eq!(app.status.as_ref().unwrap().level, StatusLevel::Error);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn quit_stops_the_loop() {
        let (mut app, dir) = test_app("hoopboard_app_quit");
        assert_eq!(app.handle_command(UserCommand::Quit), Flow::Quit);
        let _ = fs::remove_dir_all(&dir);
    }
}
