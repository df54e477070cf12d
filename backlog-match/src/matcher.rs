//! Best-candidate selection by edit distance.
//!
//! Two modes share the same metric: [`match_names`] scans a whole candidate
//! pool at once, while [`StreamingMatcher`] keeps a bounded best-of-n set
//! across repeated calls so candidates can be fed in as they arrive.

use std::collections::BinaryHeap;

use crate::distance::distance;

/// Number of candidates returned when the caller does not say otherwise.
pub const DEFAULT_LIMIT: usize = 5;

/// A scored candidate. Ordered by distance, then by encounter order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct MatchCandidate {
    pub distance: usize,
    seq: usize,
    pub name: String,
}

/// Default tolerance: half the query length in characters, rounded.
pub fn default_max_distance(query: &str) -> usize {
    (query.chars().count() as f64 * 0.5).round() as usize
}

/// Candidates strictly closer than `max_distance`, best first.
///
/// `max_distance` of `None` or `Some(0)` falls back to
/// [`default_max_distance`]; exact matches are expected to be handled by a
/// direct lookup before this runs, so a zero tolerance would reject
/// everything useful. Ties keep the order the candidates were given in.
pub fn ranked_matches<I, S>(
    query: &str,
    candidates: I,
    max_distance: Option<usize>,
    limit: usize,
) -> Vec<MatchCandidate>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let threshold = match max_distance {
        Some(d) if d >= 1 => d,
        _ => default_max_distance(query),
    };

    let mut hits: Vec<MatchCandidate> = candidates
        .into_iter()
        .enumerate()
        .filter_map(|(seq, candidate)| {
            let name = candidate.as_ref();
            let d = distance(query, name);
            (d < threshold).then(|| MatchCandidate {
                distance: d,
                seq,
                name: name.to_string(),
            })
        })
        .collect();

    // Stable: equal distances stay in encounter order.
    hits.sort_by_key(|c| c.distance);
    hits.truncate(limit);
    hits
}

/// Names of the closest candidates, best first. See [`ranked_matches`].
pub fn match_names<I, S>(
    query: &str,
    candidates: I,
    max_distance: Option<usize>,
    limit: usize,
) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    ranked_matches(query, candidates, max_distance, limit)
        .into_iter()
        .map(|c| c.name)
        .collect()
}

/// Incremental best-`keep` matcher against a fixed base string.
///
/// State accumulates across calls and is never reset. Not thread-safe; the
/// owner drives it from one place.
#[derive(Debug, Clone)]
pub struct StreamingMatcher {
    base: String,
    keep: usize,
    seen: usize,
    /// Max-heap: the worst kept candidate sits on top and is evicted first.
    best: BinaryHeap<MatchCandidate>,
}

impl StreamingMatcher {
    pub fn new(base: impl Into<String>, keep: usize) -> Self {
        Self {
            base: base.into(),
            keep,
            seen: 0,
            best: BinaryHeap::with_capacity(keep.saturating_add(1)),
        }
    }

    /// Score one more candidate and return the current best names.
    pub fn update(&mut self, candidate: &str) -> Vec<String> {
        self.push(candidate);
        self.current()
    }

    /// Score one more candidate without building a result.
    pub fn push(&mut self, candidate: &str) {
        let entry = MatchCandidate {
            distance: distance(&self.base, candidate),
            seq: self.seen,
            name: candidate.to_string(),
        };
        self.seen += 1;
        self.best.push(entry);
        if self.best.len() > self.keep {
            self.best.pop();
        }
    }

    /// Current best candidates, closest first.
    pub fn ranked(&self) -> Vec<&MatchCandidate> {
        let mut kept: Vec<&MatchCandidate> = self.best.iter().collect();
        kept.sort();
        kept
    }

    /// Current best names, closest first.
    pub fn current(&self) -> Vec<String> {
        self.ranked().into_iter().map(|c| c.name.clone()).collect()
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// How many candidates have been scored so far.
    pub fn seen(&self) -> usize {
        self.seen
    }
}

/// Closure form of [`StreamingMatcher`]: each call scores one candidate and
/// returns the best `keep` names seen so far.
pub fn create_matcher(base: &str, keep: usize) -> impl FnMut(&str) -> Vec<String> + use<> {
    let mut matcher = StreamingMatcher::new(base, keep);
    move |candidate: &str| matcher.update(candidate)
}

#[cfg(test)]
#[path = "tests/matcher_tests.rs"]
mod tests;
