//! Read queries for the library database.
//!
//! Provides exact lookups, listings, the reconciler snapshot, and analytics.

use std::collections::{BTreeMap, BTreeSet};

use backlog_core::{LibrarySnapshot, Platform, PlatformGroup, PlayStatus, Record};
use chrono::{DateTime, NaiveDateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{Connection, params};

use crate::operations::{OperationError, SyncLogEntry};

const RECORD_COLUMNS: &str =
    "identifier, name, platform, minutes_played, play_status, last_updated, notes, added_at";

// ── Record Lookups ──────────────────────────────────────────────────────────

/// Find a record by its source identifier.
pub fn find_by_identifier(
    conn: &Connection,
    identifier: u64,
) -> Result<Option<Record>, OperationError> {
    let sql = format!("SELECT {RECORD_COLUMNS} FROM games WHERE identifier = ?1");
    let mut stmt = conn.prepare(&sql)?;
    let result = stmt.query_row(params![identifier as i64], row_to_record);
    optional(result)
}

/// Find a record by exact name within a platform group.
pub fn find_by_name(
    conn: &Connection,
    group: PlatformGroup,
    name: &str,
) -> Result<Option<Record>, OperationError> {
    let sql = format!("SELECT {RECORD_COLUMNS} FROM games WHERE platform_group = ?1 AND name = ?2");
    let mut stmt = conn.prepare(&sql)?;
    let result = stmt.query_row(params![group.short_name(), name], row_to_record);
    optional(result)
}

/// All records with this exact name, on any platform.
pub fn find_all_by_name(conn: &Connection, name: &str) -> Result<Vec<Record>, OperationError> {
    let sql = format!("SELECT {RECORD_COLUMNS} FROM games WHERE name = ?1 ORDER BY platform");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![name], row_to_record)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Every record, ordered by name.
pub fn all_records(conn: &Connection) -> Result<Vec<Record>, OperationError> {
    let sql = format!("SELECT {RECORD_COLUMNS} FROM games ORDER BY name COLLATE NOCASE, platform");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], row_to_record)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Records whose status falls in the given analytics bucket (e.g. "Playing",
/// "Removed"). An empty bucket selects records with no status.
pub fn records_by_status(conn: &Connection, bucket: &str) -> Result<Vec<Record>, OperationError> {
    let records = all_records(conn)?;
    Ok(records
        .into_iter()
        .filter(|r| match &r.play_status {
            Some(status) => status.bucket().eq_ignore_ascii_case(bucket),
            None => bucket.is_empty(),
        })
        .collect())
}

/// Records on a single platform.
pub fn records_for_platform(
    conn: &Connection,
    platform: Platform,
) -> Result<Vec<Record>, OperationError> {
    let sql = format!(
        "SELECT {RECORD_COLUMNS} FROM games WHERE platform = ?1 ORDER BY name COLLATE NOCASE"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![platform.short_name()], row_to_record)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Every tracked name, across platforms.
pub fn known_names(conn: &Connection) -> Result<BTreeSet<String>, OperationError> {
    let mut stmt = conn.prepare("SELECT DISTINCT name FROM games")?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
    rows.collect::<Result<BTreeSet<_>, _>>().map_err(Into::into)
}

/// Load the whole library into an indexed in-memory snapshot.
pub fn load_snapshot(conn: &Connection) -> Result<LibrarySnapshot, OperationError> {
    Ok(LibrarySnapshot::from_records(all_records(conn)?))
}

// ── Analytics ───────────────────────────────────────────────────────────────

/// Per-platform totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformStats {
    pub platform: Platform,
    pub games: i64,
    pub minutes_played: i64,
}

/// Library summary for the `stats` command.
#[derive(Debug, Clone, Default)]
pub struct LibraryStats {
    pub total_games: i64,
    pub total_minutes: i64,
    /// Games with at least one minute of playtime.
    pub games_started: i64,
    /// Count per status bucket; unset statuses are keyed by an empty string.
    pub by_status: BTreeMap<String, i64>,
    pub by_platform: Vec<PlatformStats>,
    pub most_played: Vec<Record>,
}

impl LibraryStats {
    pub fn status_count(&self, bucket: &str) -> i64 {
        self.by_status.get(bucket).copied().unwrap_or(0)
    }

    /// Share of non-removed, non-ignored games that are finished, in percent.
    pub fn completion_percent(&self) -> f64 {
        let active = self.total_games - self.status_count("Removed") - self.status_count("Ignore");
        if active <= 0 {
            return 0.0;
        }
        self.status_count("Finished") as f64 * 100.0 / active as f64
    }
}

/// Compute library statistics, including the `top` most played games.
pub fn library_stats(conn: &Connection, top: usize) -> Result<LibraryStats, OperationError> {
    let mut stats = LibraryStats::default();

    let (total, minutes, started): (i64, i64, i64) = conn.query_row(
        "SELECT COUNT(*), COALESCE(SUM(minutes_played), 0),
                COALESCE(SUM(CASE WHEN minutes_played > 0 THEN 1 ELSE 0 END), 0)
         FROM games",
        [],
        |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
    )?;
    stats.total_games = total;
    stats.total_minutes = minutes;
    stats.games_started = started;

    let mut stmt =
        conn.prepare("SELECT play_status, COUNT(*) FROM games GROUP BY play_status")?;
    let rows = stmt.query_map([], |row| {
        Ok((row.get::<_, Option<String>>(0)?, row.get::<_, i64>(1)?))
    })?;
    for row in rows {
        let (text, count) = row?;
        let bucket = text
            .as_deref()
            .and_then(PlayStatus::parse_loose)
            .map(|s| s.bucket().to_string())
            .unwrap_or_default();
        *stats.by_status.entry(bucket).or_insert(0) += count;
    }

    let mut stmt = conn.prepare(
        "SELECT platform, COUNT(*), COALESCE(SUM(minutes_played), 0)
         FROM games GROUP BY platform ORDER BY platform",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(PlatformStats {
            platform: parse_platform(row.get::<_, String>(0)?, 0)?,
            games: row.get(1)?,
            minutes_played: row.get(2)?,
        })
    })?;
    stats.by_platform = rows.collect::<Result<Vec<_>, _>>()?;

    let sql = format!(
        "SELECT {RECORD_COLUMNS} FROM games WHERE minutes_played > 0
         ORDER BY minutes_played DESC, name LIMIT ?1"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![top as i64], row_to_record)?;
    stats.most_played = rows.collect::<Result<Vec<_>, _>>()?;

    Ok(stats)
}

// ── Sync Log ────────────────────────────────────────────────────────────────

/// Most recent syncs first.
pub fn list_sync_logs(conn: &Connection, limit: u32) -> Result<Vec<SyncLogEntry>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT id, source, synced_at, records_seen, records_added, records_updated,
                records_removed, records_restored, records_skipped
         FROM sync_log ORDER BY id DESC LIMIT ?1",
    )?;
    let rows = stmt.query_map(params![limit], |row| {
        Ok(SyncLogEntry {
            id: row.get(0)?,
            source: row.get(1)?,
            synced_at: row.get(2)?,
            records_seen: row.get(3)?,
            records_added: row.get(4)?,
            records_updated: row.get(5)?,
            records_removed: row.get(6)?,
            records_restored: row.get(7)?,
            records_skipped: row.get(8)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Row mapping ─────────────────────────────────────────────────────────────

fn optional(result: rusqlite::Result<Record>) -> Result<Option<Record>, OperationError> {
    match result {
        Ok(record) => Ok(Some(record)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn row_to_record(row: &rusqlite::Row) -> rusqlite::Result<Record> {
    let status: Option<String> = row.get(4)?;
    Ok(Record {
        identifier: row.get::<_, Option<i64>>(0)?.map(|id| id as u64),
        name: row.get(1)?,
        platform: parse_platform(row.get(2)?, 2)?,
        minutes_played: row.get::<_, i64>(3)?.max(0) as u64,
        play_status: status.as_deref().and_then(PlayStatus::parse_loose),
        last_updated: row.get::<_, Option<String>>(5)?.as_deref().and_then(parse_timestamp),
        notes: row.get(6)?,
        added_at: row.get::<_, Option<String>>(7)?.as_deref().and_then(parse_timestamp),
    })
}

fn parse_platform(text: String, column: usize) -> rusqlite::Result<Platform> {
    text.parse()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(e)))
}

/// Parse either an RFC 3339 timestamp or SQLite's `datetime('now')` format.
pub(crate) fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}
