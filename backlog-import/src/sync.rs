//! Sync driver: reconcile a source's records against the database and commit
//! the result.

use backlog_core::{ExternalRecord, Mutation, PlatformGroup};
use backlog_db::{OperationError, SyncLogEntry, apply_mutation, insert_sync_log, load_snapshot};
use chrono::{DateTime, Utc};
use rusqlite::Connection;
use thiserror::Error;

use crate::ignore::{NoSkip, SkipFilter};
use crate::progress::SyncProgress;
use crate::reconcile::{ReconcileOptions, ReconcileResult, reconcile};

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Database error: {0}")]
    Db(#[from] OperationError),
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Options controlling a sync.
pub struct SyncOptions<'a> {
    /// Reconcile and report without writing anything.
    pub dry_run: bool,
    pub now: DateTime<Utc>,
    pub skip: &'a dyn SkipFilter,
}

impl Default for SyncOptions<'_> {
    fn default() -> Self {
        Self {
            dry_run: false,
            now: Utc::now(),
            skip: &NoSkip,
        }
    }
}

/// Reconcile `records` from one platform group and apply the result.
///
/// All mutations and the `sync_log` row are written in one transaction; if
/// any mutation fails the whole sync is rolled back. Dry runs only read.
pub fn sync_records(
    conn: &Connection,
    group: PlatformGroup,
    records: &[ExternalRecord],
    options: &SyncOptions<'_>,
    progress: &dyn SyncProgress,
) -> Result<ReconcileResult, SyncError> {
    progress.on_phase(&format!("Reconciling {} {} records", records.len(), group));

    let snapshot = load_snapshot(conn)?;
    let reconcile_options = ReconcileOptions::new(group)
        .with_now(options.now)
        .with_skip(options.skip);
    let result = reconcile(records, &snapshot, &reconcile_options);

    if options.dry_run {
        progress.on_complete(&format!(
            "Dry run: {} changes staged, nothing written",
            result.mutations.len()
        ));
        return Ok(result);
    }

    conn.execute_batch("BEGIN IMMEDIATE")?;
    match apply_result(conn, group, &result, options.now, progress) {
        Ok(()) => conn.execute_batch("COMMIT")?,
        Err(e) => {
            let _ = conn.execute_batch("ROLLBACK");
            return Err(e);
        }
    }

    progress.on_complete(&format!(
        "Sync complete: {} added, {} updated, {} removed, {} restored",
        result.added.len(),
        result.updated.len(),
        result.removed.len(),
        result.restored.len(),
    ));
    Ok(result)
}

fn apply_result(
    conn: &Connection,
    group: PlatformGroup,
    result: &ReconcileResult,
    now: DateTime<Utc>,
    progress: &dyn SyncProgress,
) -> Result<(), SyncError> {
    let total = result.mutations.len();
    for (i, mutation) in result.mutations.iter().enumerate() {
        apply_mutation(conn, mutation)?;
        progress.on_change(i + 1, total, &describe(mutation));
    }

    insert_sync_log(conn, &log_entry(group, result, now))?;
    Ok(())
}

fn describe(mutation: &Mutation) -> String {
    match mutation {
        Mutation::Insert(record) => format!("Added {} ({})", record.name, record.platform),
        Mutation::Update { target, .. } => format!("Updated {}", target.name),
        Mutation::WrapRemoved { target, .. } => format!("Removed {}", target.name),
        Mutation::Restore { target, .. } => format!("Restored {}", target.name),
    }
}

fn log_entry(group: PlatformGroup, result: &ReconcileResult, now: DateTime<Utc>) -> SyncLogEntry {
    // Restores that came with a playtime increase are already in `updated`.
    let plain_restores = result
        .mutations
        .iter()
        .filter(|m| matches!(m, Mutation::Restore { .. }))
        .count();
    SyncLogEntry {
        id: 0,
        source: group.short_name().to_string(),
        synced_at: now.to_rfc3339(),
        records_seen: result.seen as i64,
        records_added: result.added.len() as i64,
        records_updated: result.updated.len() as i64,
        records_removed: result.removed.len() as i64,
        records_restored: plain_restores as i64,
        records_skipped: (result.skipped + result.invalid + result.duplicates) as i64,
    }
}
