// TUI widget modules for each dashboard zone.

pub mod board_table;
pub mod confirm;
pub mod filter_bar;
pub mod help_bar;
pub mod status_bar;
