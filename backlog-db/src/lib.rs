//! SQLite persistence layer for the game library.
//!
//! Provides schema creation, record writes, and the read queries the
//! reconciler and CLI need, backed by SQLite (via rusqlite with bundled
//! feature).

pub mod operations;
pub mod queries;
pub mod schema;

pub use operations::{
    OperationError, SyncLogEntry, apply_mutation, insert_record, insert_sync_log, set_notes,
    set_status, update_playtime,
};
pub use queries::{
    LibraryStats, PlatformStats, all_records, find_all_by_name, find_by_identifier, find_by_name,
    known_names, library_stats, list_sync_logs, load_snapshot, records_by_status,
    records_for_platform,
};
pub use rusqlite::Connection;
pub use schema::{SchemaError, open_database, open_memory};
