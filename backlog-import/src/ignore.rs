//! Skip filters applied before reconciliation.

use std::collections::BTreeSet;

use backlog_core::ExternalRecord;

/// Decides whether an incoming record is left out of a sync entirely.
pub trait SkipFilter {
    fn should_skip(&self, record: &ExternalRecord) -> bool;
}

/// Filter that keeps everything.
pub struct NoSkip;

impl SkipFilter for NoSkip {
    fn should_skip(&self, _record: &ExternalRecord) -> bool {
        false
    }
}

impl<F> SkipFilter for F
where
    F: Fn(&ExternalRecord) -> bool,
{
    fn should_skip(&self, record: &ExternalRecord) -> bool {
        self(record)
    }
}

/// Names and identifiers the user never wants tracked (tools, servers,
/// test apps). Name comparison ignores case and surrounding whitespace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreList {
    names: BTreeSet<String>,
    identifiers: BTreeSet<u64>,
}

impl IgnoreList {
    pub fn new<I, S>(names: I, identifiers: impl IntoIterator<Item = u64>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            names: names.into_iter().map(|n| normalize(n.as_ref())).collect(),
            identifiers: identifiers.into_iter().collect(),
        }
    }

    pub fn add_name(&mut self, name: &str) -> bool {
        self.names.insert(normalize(name))
    }

    pub fn add_identifier(&mut self, identifier: u64) -> bool {
        self.identifiers.insert(identifier)
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.names.contains(&normalize(name))
    }

    pub fn contains_identifier(&self, identifier: u64) -> bool {
        self.identifiers.contains(&identifier)
    }

    pub fn len(&self) -> usize {
        self.names.len() + self.identifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty() && self.identifiers.is_empty()
    }
}

impl SkipFilter for IgnoreList {
    fn should_skip(&self, record: &ExternalRecord) -> bool {
        record
            .identifier
            .is_some_and(|id| self.contains_identifier(id))
            || record.name.as_deref().is_some_and(|n| self.contains_name(n))
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use backlog_core::Platform;

    #[test]
    fn matches_name_case_insensitively() {
        let list = IgnoreList::new(["Spacewar"], []);
        assert!(list.should_skip(&ExternalRecord::new("  SPACEWAR ", Platform::Steam)));
        assert!(!list.should_skip(&ExternalRecord::new("Spacewar 2", Platform::Steam)));
    }

    #[test]
    fn matches_identifier() {
        let list = IgnoreList::new(Vec::<String>::new(), [480]);
        let record = ExternalRecord::new("Anything", Platform::Steam).with_identifier(480);
        assert!(list.should_skip(&record));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn add_reports_new_entries() {
        let mut list = IgnoreList::default();
        assert!(list.is_empty());
        assert!(list.add_name("Proton"));
        assert!(!list.add_name("proton"));
        assert!(list.add_identifier(1));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn closures_are_filters() {
        let filter = |r: &ExternalRecord| r.minutes_played.is_none();
        let record = ExternalRecord::new("Broken", Platform::Steam).with_minutes(None);
        assert!(filter.should_skip(&record));
        assert!(!NoSkip.should_skip(&record));
    }
}
