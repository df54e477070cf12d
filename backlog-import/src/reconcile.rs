//! Library reconciliation: compare a source's reported games against the
//! stored library and stage the changes needed to bring it up to date.
//!
//! Reconciliation never touches the store. It reads through a
//! [`RecordView`] and returns a list of [`Mutation`]s; committing them is the
//! sync driver's job (see [`crate::sync`]).
//!
//! Matching is exact only: a record matches by identifier, then by name
//! within the source's [`PlatformGroup`]. Fuzzy matching is left to
//! interactive flows so distinct games are never merged silently.

use std::collections::{BTreeSet, HashSet};

use backlog_core::util::describe_playtime_delta;
use backlog_core::{
    ExternalRecord, Mutation, PlatformGroup, PlayStatus, Record, RecordKey, RecordView, decide,
};
use chrono::{DateTime, Utc};

use crate::ignore::{NoSkip, SkipFilter};

/// Inputs that shape a reconciliation pass besides the records themselves.
pub struct ReconcileOptions<'a> {
    /// The source's platform category. Removal bookkeeping covers exactly
    /// the stored records of this group.
    pub group: PlatformGroup,
    /// Timestamp written into every staged mutation.
    pub now: DateTime<Utc>,
    pub skip: &'a dyn SkipFilter,
}

impl<'a> ReconcileOptions<'a> {
    pub fn new(group: PlatformGroup) -> Self {
        Self {
            group,
            now: Utc::now(),
            skip: &NoSkip,
        }
    }

    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    pub fn with_skip(mut self, skip: &'a dyn SkipFilter) -> Self {
        self.skip = skip;
        self
    }
}

/// Outcome of a reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconcileResult {
    /// Names of games staged for insertion.
    pub added: Vec<String>,
    /// `(name, playtime delta description)` for each playtime increase.
    pub updated: Vec<(String, String)>,
    /// Names newly marked as removed.
    pub removed: Vec<String>,
    /// Names of previously removed games the source reports again.
    pub restored: Vec<String>,
    /// Incoming records considered, including skipped and invalid ones.
    pub seen: usize,
    pub unchanged: usize,
    /// Records dropped by the skip filter.
    pub skipped: usize,
    /// Records with neither a name nor an identifier, or otherwise unusable.
    pub invalid: usize,
    /// Records that resolved to a game already handled in this batch.
    pub duplicates: usize,
    /// Changes to apply, in the order they were staged.
    pub mutations: Vec<Mutation>,
}

impl ReconcileResult {
    /// True when applying the result would not change the store.
    pub fn is_noop(&self) -> bool {
        self.mutations.is_empty()
    }
}

/// Reconcile one batch of source records against the stored library.
///
/// Records whose platform belongs to a different group than
/// `options.group` are counted as invalid.
pub fn reconcile<V>(
    incoming: &[ExternalRecord],
    store: &V,
    options: &ReconcileOptions<'_>,
) -> ReconcileResult
where
    V: RecordView + ?Sized,
{
    let group = options.group;
    let mut result = ReconcileResult {
        seen: incoming.len(),
        ..Default::default()
    };

    let mut unaccounted = store.all_keys_for_platform(group);
    // Stored names handled so far, and names/ids staged for insertion.
    let mut touched: HashSet<String> = HashSet::new();
    let mut staged_names: HashSet<String> = HashSet::new();
    let mut staged_ids: HashSet<u64> = HashSet::new();

    for record in incoming {
        if options.skip.should_skip(record) {
            log::debug!("Skipping ignored game: {}", record.label());
            result.skipped += 1;
            continue;
        }

        if !record.is_identifiable() {
            log::warn!("Skipping record with no name or identifier");
            result.invalid += 1;
            continue;
        }

        if record.platform.group() != group {
            log::warn!(
                "Skipping {}: platform {} is not part of {}",
                record.label(),
                record.platform,
                group
            );
            result.invalid += 1;
            continue;
        }

        match find_stored(store, record, group) {
            Some(stored) => {
                if !touched.insert(stored.name.clone()) {
                    log::debug!("Duplicate entry for {} in this batch", stored.name);
                    result.duplicates += 1;
                    continue;
                }
                unaccounted.remove(&stored.name);
                reconcile_existing(record, stored, options.now, &mut result);
            }
            None => {
                let Some(name) = clean_name(record) else {
                    log::warn!("Cannot add {} without a name", record.label());
                    result.invalid += 1;
                    continue;
                };
                let id_staged = record.identifier.is_some_and(|id| staged_ids.contains(&id));
                if id_staged || staged_names.contains(name) {
                    log::debug!("Duplicate entry for new game {} in this batch", name);
                    result.duplicates += 1;
                    continue;
                }
                let identifier = record.identifier.filter(|&id| {
                    let taken = store.identifier_in_use(id);
                    if taken {
                        log::warn!(
                            "Identifier {} for {} already belongs to a game on another platform, adding without it",
                            id,
                            name
                        );
                    }
                    !taken
                });
                staged_names.insert(name.to_string());
                if let Some(id) = identifier {
                    staged_ids.insert(id);
                }
                stage_insert(record, name, identifier, options.now, &mut result);
            }
        }
    }

    stage_removals(store, group, &unaccounted, options.now, &mut result);

    log::debug!(
        "Reconciled {} records for {}: {} added, {} updated, {} removed, {} restored",
        result.seen,
        group,
        result.added.len(),
        result.updated.len(),
        result.removed.len(),
        result.restored.len(),
    );
    result
}

fn clean_name(record: &ExternalRecord) -> Option<&str> {
    record.name.as_deref().map(str::trim).filter(|n| !n.is_empty())
}

fn find_stored<'s, V>(store: &'s V, record: &ExternalRecord, group: PlatformGroup) -> Option<&'s Record>
where
    V: RecordView + ?Sized,
{
    record
        .identifier
        .and_then(|id| store.lookup(RecordKey::Id(id), group))
        .or_else(|| clean_name(record).and_then(|name| store.lookup(RecordKey::Name(name), group)))
}

fn reconcile_existing(
    record: &ExternalRecord,
    stored: &Record,
    now: DateTime<Utc>,
    result: &mut ReconcileResult,
) {
    let was_removed = stored.play_status.as_ref().is_some_and(PlayStatus::is_removed);
    let current = stored
        .play_status
        .clone()
        .and_then(PlayStatus::unwrap_removed);

    let increased = record
        .minutes_played
        .filter(|&minutes| minutes > stored.minutes_played);

    if let Some(minutes) = increased {
        let play_status = decide(current.as_ref(), Some(minutes));
        result.updated.push((
            stored.name.clone(),
            describe_playtime_delta(stored.minutes_played, minutes),
        ));
        if was_removed {
            result.restored.push(stored.name.clone());
        }
        result.mutations.push(Mutation::Update {
            target: stored.to_ref(),
            minutes_played: minutes,
            previous_minutes: stored.minutes_played,
            play_status,
            last_updated: now,
        });
    } else if was_removed {
        result.restored.push(stored.name.clone());
        result.mutations.push(Mutation::Restore {
            target: stored.to_ref(),
            play_status: current,
            last_updated: now,
        });
    } else {
        if record.minutes_played.is_none() {
            log::debug!("Non-numeric playtime for {}, left unchanged", stored.name);
        }
        result.unchanged += 1;
    }
}

fn stage_insert(
    record: &ExternalRecord,
    name: &str,
    identifier: Option<u64>,
    now: DateTime<Utc>,
    result: &mut ReconcileResult,
) {
    if record.minutes_played.is_none() {
        log::debug!("Non-numeric playtime for new game {}, adding with none", name);
    }
    let new = Record {
        identifier,
        name: name.to_string(),
        platform: record.platform,
        minutes_played: record.minutes_played.unwrap_or(0),
        play_status: decide(None, record.minutes_played),
        last_updated: Some(now),
        notes: None,
        added_at: Some(now),
    };
    result.added.push(new.name.clone());
    result.mutations.push(Mutation::Insert(new));
}

fn stage_removals<V>(
    store: &V,
    group: PlatformGroup,
    unaccounted: &BTreeSet<String>,
    now: DateTime<Utc>,
    result: &mut ReconcileResult,
) where
    V: RecordView + ?Sized,
{
    for name in unaccounted {
        let Some(stored) = store.lookup(RecordKey::Name(name), group) else {
            continue;
        };
        if stored.play_status.as_ref().is_some_and(PlayStatus::is_removed) {
            continue;
        }
        result.removed.push(stored.name.clone());
        result.mutations.push(Mutation::WrapRemoved {
            target: stored.to_ref(),
            play_status: PlayStatus::wrap_removed(stored.play_status.clone()),
            last_updated: now,
        });
    }
}

#[cfg(test)]
#[path = "tests/reconcile_tests.rs"]
mod tests;
