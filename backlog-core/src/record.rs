//! Library record types and the store contract the reconciler reads through.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use crate::platform::{Platform, PlatformGroup};
use crate::status::PlayStatus;

// ── Stored records ──────────────────────────────────────────────────────────

/// One tracked game.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Stable catalog id from the source (e.g. a Steam app id), when known.
    pub identifier: Option<u64>,
    pub name: String,
    pub platform: Platform,
    pub minutes_played: u64,
    pub play_status: Option<PlayStatus>,
    pub last_updated: Option<DateTime<Utc>>,
    /// Free-form user notes. Reconciliation never writes this.
    pub notes: Option<String>,
    pub added_at: Option<DateTime<Utc>>,
}

impl Record {
    /// A fresh record with default field values.
    pub fn new(name: impl Into<String>, platform: Platform) -> Self {
        Self {
            identifier: None,
            name: name.into(),
            platform,
            minutes_played: 0,
            play_status: None,
            last_updated: None,
            notes: None,
            added_at: None,
        }
    }

    pub fn with_identifier(mut self, identifier: u64) -> Self {
        self.identifier = Some(identifier);
        self
    }

    pub fn with_minutes(mut self, minutes: u64) -> Self {
        self.minutes_played = minutes;
        self
    }

    pub fn with_status(mut self, status: PlayStatus) -> Self {
        self.play_status = Some(status);
        self
    }

    /// Reference used to address this record in mutations.
    pub fn to_ref(&self) -> RecordRef {
        RecordRef {
            name: self.name.clone(),
            platform: self.platform,
        }
    }
}

/// Addresses a stored record by its unique `(group, name)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordRef {
    pub name: String,
    pub platform: Platform,
}

/// Exact lookup key for [`RecordView::lookup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKey<'a> {
    Id(u64),
    Name(&'a str),
}

// ── Incoming records ────────────────────────────────────────────────────────

/// A game as reported by an external source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalRecord {
    pub name: Option<String>,
    pub identifier: Option<u64>,
    /// `None` when the source sent a value that is not a number.
    pub minutes_played: Option<u64>,
    pub platform: Platform,
}

impl ExternalRecord {
    pub fn new(name: impl Into<String>, platform: Platform) -> Self {
        Self {
            name: Some(name.into()),
            identifier: None,
            minutes_played: Some(0),
            platform,
        }
    }

    pub fn with_identifier(mut self, identifier: u64) -> Self {
        self.identifier = Some(identifier);
        self
    }

    pub fn with_minutes(mut self, minutes: Option<u64>) -> Self {
        self.minutes_played = minutes;
        self
    }

    /// Name to show in logs and reports, falling back to the identifier.
    pub fn label(&self) -> String {
        match (&self.name, self.identifier) {
            (Some(name), _) if !name.trim().is_empty() => name.clone(),
            (_, Some(id)) => format!("#{id}"),
            _ => "<unnamed>".to_string(),
        }
    }

    /// A record with neither a usable name nor an identifier cannot be matched
    /// or stored.
    pub fn is_identifiable(&self) -> bool {
        self.identifier.is_some() || self.name.as_deref().is_some_and(|n| !n.trim().is_empty())
    }
}

// ── Mutations ───────────────────────────────────────────────────────────────

/// A change the caller should apply to the store.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    /// Insert a new record.
    Insert(Record),
    /// Raise playtime and set the status decided alongside it.
    Update {
        target: RecordRef,
        minutes_played: u64,
        previous_minutes: u64,
        play_status: Option<PlayStatus>,
        last_updated: DateTime<Utc>,
    },
    /// Mark a record the source no longer reports.
    WrapRemoved {
        target: RecordRef,
        play_status: PlayStatus,
        last_updated: DateTime<Utc>,
    },
    /// A removed record came back; put its previous status back.
    Restore {
        target: RecordRef,
        play_status: Option<PlayStatus>,
        last_updated: DateTime<Utc>,
    },
}

impl Mutation {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Insert(_) => "insert",
            Self::Update { .. } => "update",
            Self::WrapRemoved { .. } => "remove",
            Self::Restore { .. } => "restore",
        }
    }

    /// Name of the game this mutation touches.
    pub fn name(&self) -> &str {
        match self {
            Self::Insert(record) => &record.name,
            Self::Update { target, .. }
            | Self::WrapRemoved { target, .. }
            | Self::Restore { target, .. } => &target.name,
        }
    }
}

// ── Store contract ──────────────────────────────────────────────────────────

/// Read-only view of the persisted library.
///
/// Implementations must honor the store invariants: identifiers are unique
/// store-wide, names are unique within a [`PlatformGroup`].
pub trait RecordView {
    /// Exact lookup. Identifier keys match across the whole store but only
    /// return a record of the requested group; name keys match within it.
    fn lookup(&self, key: RecordKey<'_>, group: PlatformGroup) -> Option<&Record>;

    /// True if any record, in any group, holds this identifier.
    fn identifier_in_use(&self, identifier: u64) -> bool;

    /// Names of every record in a group.
    fn all_keys_for_platform(&self, group: PlatformGroup) -> BTreeSet<String>;

    /// Every tracked name, across all platforms.
    fn known_names(&self) -> BTreeSet<String>;
}
