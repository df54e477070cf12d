//! Write operations on library records.

use backlog_core::{Mutation, PlayStatus, Record, RecordRef};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, params};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Game not found: '{name}' on {platform}")]
    NotFound { name: String, platform: String },
    #[error("Game already tracked: '{name}' on {platform}")]
    AlreadyExists { name: String, platform: String },
}

impl OperationError {
    fn not_found(target: &RecordRef) -> Self {
        Self::NotFound {
            name: target.name.clone(),
            platform: target.platform.to_string(),
        }
    }
}

/// A row for the `sync_log` table.
#[derive(Debug, Clone, Default)]
pub struct SyncLogEntry {
    pub id: i64,
    pub source: String,
    pub synced_at: String,
    pub records_seen: i64,
    pub records_added: i64,
    pub records_updated: i64,
    pub records_removed: i64,
    pub records_restored: i64,
    pub records_skipped: i64,
}

pub(crate) fn timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339()
}

fn status_text(status: Option<&PlayStatus>) -> Option<String> {
    status.map(|s| s.to_string())
}

// ── Record Operations ───────────────────────────────────────────────────────

/// Insert a new record. Returns the row ID.
pub fn insert_record(conn: &Connection, record: &Record) -> Result<i64, OperationError> {
    let added_at = record.added_at.or(record.last_updated).unwrap_or_else(Utc::now);
    let result = conn.execute(
        "INSERT INTO games (identifier, name, platform, platform_group, minutes_played,
                            play_status, notes, last_updated, added_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            record.identifier.map(|id| id as i64),
            record.name,
            record.platform.short_name(),
            record.platform.group().short_name(),
            record.minutes_played as i64,
            status_text(record.play_status.as_ref()),
            record.notes,
            record.last_updated.as_ref().map(timestamp),
            timestamp(&added_at),
        ],
    );

    match result {
        Ok(_) => Ok(conn.last_insert_rowid()),
        Err(rusqlite::Error::SqliteFailure(err, _))
            if err.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            Err(OperationError::AlreadyExists {
                name: record.name.clone(),
                platform: record.platform.to_string(),
            })
        }
        Err(e) => Err(e.into()),
    }
}

/// Raise a record's playtime and set its status.
///
/// Playtime never goes down: a lower value leaves the stored minutes as they
/// are.
pub fn update_playtime(
    conn: &Connection,
    target: &RecordRef,
    minutes_played: u64,
    status: Option<&PlayStatus>,
    last_updated: &DateTime<Utc>,
) -> Result<(), OperationError> {
    let changed = conn.execute(
        "UPDATE games SET minutes_played = MAX(minutes_played, ?3),
                          play_status = ?4,
                          last_updated = ?5
         WHERE platform_group = ?1 AND name = ?2",
        params![
            target.platform.group().short_name(),
            target.name,
            minutes_played as i64,
            status_text(status),
            timestamp(last_updated),
        ],
    )?;
    if changed == 0 {
        return Err(OperationError::not_found(target));
    }
    Ok(())
}

/// Set a record's play status (manual edits, removal marks, restores).
pub fn set_status(
    conn: &Connection,
    target: &RecordRef,
    status: Option<&PlayStatus>,
    last_updated: &DateTime<Utc>,
) -> Result<(), OperationError> {
    let changed = conn.execute(
        "UPDATE games SET play_status = ?3, last_updated = ?4
         WHERE platform_group = ?1 AND name = ?2",
        params![
            target.platform.group().short_name(),
            target.name,
            status_text(status),
            timestamp(last_updated),
        ],
    )?;
    if changed == 0 {
        return Err(OperationError::not_found(target));
    }
    Ok(())
}

/// Replace a record's notes.
pub fn set_notes(
    conn: &Connection,
    target: &RecordRef,
    notes: Option<&str>,
) -> Result<(), OperationError> {
    let changed = conn.execute(
        "UPDATE games SET notes = ?3 WHERE platform_group = ?1 AND name = ?2",
        params![target.platform.group().short_name(), target.name, notes],
    )?;
    if changed == 0 {
        return Err(OperationError::not_found(target));
    }
    Ok(())
}

/// Apply one reconciliation mutation.
pub fn apply_mutation(conn: &Connection, mutation: &Mutation) -> Result<(), OperationError> {
    match mutation {
        Mutation::Insert(record) => insert_record(conn, record).map(|_| ()),
        Mutation::Update {
            target,
            minutes_played,
            play_status,
            last_updated,
            ..
        } => update_playtime(conn, target, *minutes_played, play_status.as_ref(), last_updated),
        Mutation::WrapRemoved {
            target,
            play_status,
            last_updated,
        } => set_status(conn, target, Some(play_status), last_updated),
        Mutation::Restore {
            target,
            play_status,
            last_updated,
        } => set_status(conn, target, play_status.as_ref(), last_updated),
    }
}

// ── Sync Log ────────────────────────────────────────────────────────────────

/// Record a completed sync. Returns the row ID.
pub fn insert_sync_log(conn: &Connection, entry: &SyncLogEntry) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO sync_log (source, synced_at, records_seen, records_added, records_updated,
                               records_removed, records_restored, records_skipped)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            entry.source,
            entry.synced_at,
            entry.records_seen,
            entry.records_added,
            entry.records_updated,
            entry.records_removed,
            entry.records_restored,
            entry.records_skipped,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}
