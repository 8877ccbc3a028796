// Command-line interface.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::info;

use hoopboard_core::config::Config;
use hoopboard_core::ingest::ingest_file;
use hoopboard_core::{export_snapshot, BoardState};

/// Blend ADP draft board for fantasy basketball
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Ranking document to open at startup (PDF or CSV)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Board snapshot to restore at startup (overrides FILE)
    #[arg(long, value_name = "PATH")]
    pub snapshot: Option<PathBuf>,

    /// Directory holding config/hoopboard.toml (defaults to the working directory)
    #[arg(long, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Rank a document by Blend and print the board as CSV
    Rank(RankArgs),
}

/// Headless ingest + rank.
#[derive(Debug, Clone, Args)]
pub struct RankArgs {
    /// Ranking document (PDF or CSV)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Write the CSV here instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Keep only the best N players (0 = no limit; defaults to config)
    #[arg(short, long, value_name = "N")]
    pub limit: Option<usize>,
}

impl Cli {
    /// Base directory for config lookup.
    pub fn base_dir(&self) -> anyhow::Result<PathBuf> {
        match &self.config_dir {
            Some(dir) => Ok(dir.clone()),
            None => std::env::current_dir().context("failed to read working directory"),
        }
    }
}

impl RankArgs {
    /// Player limit for this run: the flag wins over the config value.
    pub fn effective_limit(&self, config: &Config) -> Option<usize> {
        match self.limit {
            Some(0) => None,
            Some(n) => Some(n),
            None => config.board.limit(),
        }
    }

    /// Rank the document and emit the full board CSV.
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let board = rank_document(&self.file, self.effective_limit(config))?;
        let bytes = export_snapshot(&board).context("failed to encode CSV")?;

        match &self.output {
            Some(path) => {
                std::fs::write(path, &bytes)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                info!("wrote {} ranked players to {}", board.len(), path.display());
                eprintln!("Ranked {} players -> {}", board.len(), path.display());
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(&bytes).context("failed to write to stdout")?;
                stdout.flush().context("failed to write to stdout")?;
            }
        }
        Ok(())
    }
}

fn rank_document(path: &Path, limit: Option<usize>) -> anyhow::Result<BoardState> {
    let players =
        ingest_file(path).with_context(|| format!("could not load {}", path.display()))?;
    Ok(BoardState::from_ingested(players, limit))
}
