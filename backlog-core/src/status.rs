//! Play status values and the automatic transition policy.
//!
//! Statuses are stored as their display text, so every variant round-trips
//! through [`PlayStatus::parse_loose`] and `Display`. Reconciliation only ever
//! moves a status through [`decide`]; everything else is a manual edit.

use std::fmt;

/// Prefix marking a game the source stopped reporting.
pub const REMOVED_PREFIX: &str = "Removed | ";

/// Playtime at which an unplayed game counts as played.
pub const PLAYED_THRESHOLD_MINUTES: u64 = 30;

/// Playtime at which a played game counts as in progress.
pub const PLAYING_THRESHOLD_MINUTES: u64 = 60;

/// Where a game sits in the backlog.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PlayStatus {
    Unplayed,
    Played,
    Playing,
    Finished,
    Waiting,
    Quit,
    MustPlay,
    Ignore,
    Demo,
    /// No longer reported by its source; keeps the status it had before.
    Removed(Option<Box<PlayStatus>>),
    /// Free text typed into the status column.
    Other(String),
}

impl PlayStatus {
    /// Parse a stored status string. Empty text means "unset" and yields `None`.
    ///
    /// Unknown labels are preserved as [`PlayStatus::Other`] rather than dropped.
    pub fn parse_loose(s: &str) -> Option<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return None;
        }

        if let Some(rest) = strip_removed_prefix(trimmed) {
            let inner = Self::parse_loose(rest).map(|inner| match inner {
                // Collapse accidental double wraps from hand edits.
                Self::Removed(nested) => nested,
                other => Some(Box::new(other)),
            });
            return Some(Self::Removed(inner.flatten()));
        }

        let status = match trimmed.to_lowercase().as_str() {
            "unplayed" => Self::Unplayed,
            "played" => Self::Played,
            "playing" => Self::Playing,
            "finished" => Self::Finished,
            "waiting" => Self::Waiting,
            "quit" => Self::Quit,
            "must play" | "mustplay" | "must_play" | "must-play" => Self::MustPlay,
            "ignore" => Self::Ignore,
            "demo" => Self::Demo,
            _ => Self::Other(trimmed.to_string()),
        };
        Some(status)
    }

    /// User-curated statuses that reconciliation never overwrites.
    pub fn is_locked(&self) -> bool {
        matches!(self, Self::Waiting | Self::Quit | Self::Finished | Self::Ignore)
    }

    pub fn is_removed(&self) -> bool {
        matches!(self, Self::Removed(_))
    }

    /// Wrap a status with the removed marker. Already-removed statuses are
    /// returned unchanged so repeated syncs never double-wrap.
    pub fn wrap_removed(current: Option<PlayStatus>) -> PlayStatus {
        match current {
            Some(removed @ Self::Removed(_)) => removed,
            other => Self::Removed(other.map(Box::new)),
        }
    }

    /// The status a removed game had before removal. Non-removed statuses
    /// pass through.
    pub fn unwrap_removed(self) -> Option<PlayStatus> {
        match self {
            Self::Removed(inner) => inner.map(|b| *b),
            other => Some(other),
        }
    }

    /// Short bucket name for analytics; all removed variants share one bucket.
    pub fn bucket(&self) -> &str {
        match self {
            Self::Unplayed => "Unplayed",
            Self::Played => "Played",
            Self::Playing => "Playing",
            Self::Finished => "Finished",
            Self::Waiting => "Waiting",
            Self::Quit => "Quit",
            Self::MustPlay => "Must Play",
            Self::Ignore => "Ignore",
            Self::Demo => "Demo",
            Self::Removed(_) => "Removed",
            Self::Other(text) => text,
        }
    }
}

fn strip_removed_prefix(s: &str) -> Option<&str> {
    let head = REMOVED_PREFIX.trim_end();
    if s.len() < head.len() || !s.is_char_boundary(head.len()) {
        return None;
    }
    let (start, rest) = s.split_at(head.len());
    start.eq_ignore_ascii_case(head).then_some(rest)
}

impl fmt::Display for PlayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Removed(Some(inner)) => write!(f, "{REMOVED_PREFIX}{inner}"),
            Self::Removed(None) => f.write_str(REMOVED_PREFIX),
            other => f.write_str(other.bucket()),
        }
    }
}

/// Decide the status a game should have after a playtime report.
///
/// `minutes_played` is `None` when the upstream value was not numeric; the
/// current status then passes through untouched (and stays unset if it was
/// unset). Locked statuses never change. Otherwise playtime alone decides,
/// except that `MustPlay` survives until the game reaches the played threshold.
pub fn decide(current: Option<&PlayStatus>, minutes_played: Option<u64>) -> Option<PlayStatus> {
    let Some(minutes) = minutes_played else {
        return current.cloned();
    };

    if let Some(status) = current {
        if status.is_locked() {
            return Some(status.clone());
        }
    }

    let next = if minutes >= PLAYING_THRESHOLD_MINUTES {
        PlayStatus::Playing
    } else if minutes >= PLAYED_THRESHOLD_MINUTES {
        PlayStatus::Played
    } else if current == Some(&PlayStatus::MustPlay) {
        PlayStatus::MustPlay
    } else {
        PlayStatus::Unplayed
    };
    Some(next)
}

#[cfg(test)]
#[path = "tests/status_tests.rs"]
mod tests;
