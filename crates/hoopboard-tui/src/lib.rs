// Terminal front end for the draft board: command-line parsing, the app
// orchestrator, and the ratatui dashboard.

pub mod app;
pub mod cli;
pub mod protocol;
pub mod tui;
