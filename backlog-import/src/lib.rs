//! Bring external store libraries into the backlog database.
//!
//! This crate owns the sync pipeline: parsing store exports, reconciling them
//! against the stored library, and committing the resulting changes.

pub mod ignore;
pub mod progress;
pub mod reconcile;
pub mod sources;
pub mod sync;

pub use ignore::{IgnoreList, NoSkip, SkipFilter};
pub use progress::{LogProgress, SilentProgress, SyncProgress};
pub use reconcile::{ReconcileOptions, ReconcileResult, reconcile};
pub use sources::{Source, SourceError, load_source, parse_playstation, parse_steam};
pub use sync::{SyncError, SyncOptions, sync_records};
