//! Resolve a free-text game name against the library's name index.
//!
//! This is the boundary between fuzzy logic and user interaction: the result
//! says whether the caller can proceed or has to ask which game was meant.

use std::collections::BTreeSet;

use crate::matcher::{DEFAULT_LIMIT, StreamingMatcher, match_names};

/// Outcome of resolving a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The query is present verbatim.
    Exact(String),
    /// Exactly one close candidate.
    Unique(String),
    /// Several close candidates, best first; the caller must pick one.
    Ambiguous(Vec<String>),
    NoMatch,
}

impl Resolution {
    /// The resolved name when no disambiguation is needed.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Exact(name) | Self::Unique(name) => Some(name),
            Self::Ambiguous(_) | Self::NoMatch => None,
        }
    }
}

/// Resolve `query` against `known_names` with the default candidate limit.
pub fn resolve(query: &str, known_names: &BTreeSet<String>) -> Resolution {
    resolve_with_limit(query, known_names, DEFAULT_LIMIT)
}

/// Resolve `query`, considering at most `limit` fuzzy candidates.
pub fn resolve_with_limit(query: &str, known_names: &BTreeSet<String>, limit: usize) -> Resolution {
    if known_names.contains(query) {
        return Resolution::Exact(query.to_string());
    }

    let mut candidates = match_names(query, known_names, None, limit);
    log::debug!("'{}' fuzzy candidates: {:?}", query, candidates);

    match candidates.len() {
        0 => Resolution::NoMatch,
        1 => Resolution::Unique(candidates.remove(0)),
        _ => Resolution::Ambiguous(candidates),
    }
}

/// The `keep` nearest names regardless of tolerance, for "did you mean"
/// hints after a [`Resolution::NoMatch`].
pub fn suggest<'a, I>(query: &str, names: I, keep: usize) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut matcher = StreamingMatcher::new(query, keep);
    for name in names {
        matcher.push(name);
    }
    matcher.current()
}
