// Library root: the draft board data model and its codecs. The terminal UI
// lives in `hoopboard-tui`; everything here is synchronous and UI-agnostic.

pub mod board;
pub mod columns;
pub mod config;
pub mod export;
pub mod ingest;
pub mod player;
pub mod rank;
pub mod snapshot;
pub mod view;

pub use board::{BoardError, BoardState, RowId};
pub use export::{export_csv, ExportError, ExportScope};
pub use ingest::{ingest, DocumentKind, IngestError};
pub use player::{IngestedPlayer, PlayerRow};
pub use rank::assign_ranks;
pub use snapshot::{export_snapshot, import_snapshot, SnapshotError};
pub use view::{DraftScope, FilterCriteria};
