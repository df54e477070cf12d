//! User settings: `~/.config/backlog/settings.toml`.
//!
//! ```toml
//! [library]
//! db_path = "/path/to/library.db"
//!
//! [ignore]
//! names = ["Spacewar"]
//! identifiers = [480]
//!
//! [matching]
//! limit = 5
//! ```

use std::io;
use std::path::{Path, PathBuf};

use backlog_import::IgnoreList;
use serde::Deserialize;

use crate::CliError;

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    pub library: LibrarySettings,
    pub ignore: IgnoreSettings,
    pub matching: MatchingSettings,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub(crate) struct LibrarySettings {
    pub db_path: Option<PathBuf>,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub(crate) struct IgnoreSettings {
    pub names: Vec<String>,
    pub identifiers: Vec<u64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub(crate) struct MatchingSettings {
    /// Maximum fuzzy candidates offered when a name is ambiguous.
    pub limit: usize,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            limit: backlog_match::DEFAULT_LIMIT,
        }
    }
}

impl Settings {
    pub(crate) fn ignore_list(&self) -> IgnoreList {
        IgnoreList::new(&self.ignore.names, self.ignore.identifiers.iter().copied())
    }

    /// Fuzzy candidate limit, never below one.
    pub(crate) fn match_limit(&self) -> usize {
        self.matching.limit.max(1)
    }
}

/// Canonical path to the settings file.
pub(crate) fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("backlog").join("settings.toml")
}

/// Default database location when neither the CLI nor settings name one.
pub(crate) fn default_db_path() -> PathBuf {
    let data = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    data.join("backlog").join("library.db")
}

/// Load settings, treating a missing file as all defaults.
pub(crate) fn load_settings() -> Result<Settings, CliError> {
    load_settings_from(&settings_path())
}

pub(crate) fn load_settings_from(path: &Path) -> Result<Settings, CliError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Settings::default()),
        Err(e) => return Err(e.into()),
    };
    toml::from_str(&contents)
        .map_err(|e| CliError::config(format!("Invalid settings in {}: {}", path.display(), e)))
}

/// Resolve the database path using a priority chain:
///
/// 1. CLI override (if `Some`)
/// 2. Saved `library.db_path` in `settings.toml`
/// 3. `<data dir>/backlog/library.db`
pub(crate) fn resolve_db_path(cli_override: Option<PathBuf>, settings: &Settings) -> PathBuf {
    if let Some(p) = cli_override {
        return p;
    }
    if let Some(p) = settings.library.db_path.as_ref().filter(|p| !p.as_os_str().is_empty()) {
        return p.clone();
    }
    default_db_path()
}

/// Something to keep out of syncs: a numeric store id or a game name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum IgnoreEntry {
    Identifier(u64),
    Name(String),
}

impl IgnoreEntry {
    /// Parse a `config ignore` argument. Entries are names unless
    /// `identifier` is set, so games like "1942" can be ignored by name.
    pub(crate) fn parse(entry: &str, identifier: bool) -> Result<Self, CliError> {
        let trimmed = entry.trim();
        if trimmed.is_empty() {
            return Err(CliError::invalid_input("ignore entry must not be empty"));
        }
        if !identifier {
            return Ok(Self::Name(trimmed.to_string()));
        }
        trimmed
            .parse::<u64>()
            .map(Self::Identifier)
            .map_err(|_| CliError::invalid_input(format!("'{}' is not a numeric store id", trimmed)))
    }
}

/// Add an entry to the `[ignore]` table. Returns `false` if it was already
/// there.
///
/// Uses `toml::Value` for a surgical update so unrelated keys are preserved.
pub(crate) fn add_ignore_entry(path: &Path, entry: &IgnoreEntry) -> io::Result<bool> {
    let mut doc = read_document(path);

    let table = doc
        .as_table_mut()
        .ok_or_else(|| io::Error::other("settings.toml root is not a table"))?;
    let ignore = table
        .entry("ignore")
        .or_insert_with(|| toml::Value::Table(Default::default()))
        .as_table_mut()
        .ok_or_else(|| io::Error::other("[ignore] is not a table"))?;

    let (key, value) = match entry {
        IgnoreEntry::Identifier(id) => ("identifiers", toml::Value::Integer(*id as i64)),
        IgnoreEntry::Name(name) => ("names", toml::Value::String(name.clone())),
    };
    let list = ignore
        .entry(key)
        .or_insert_with(|| toml::Value::Array(Vec::new()))
        .as_array_mut()
        .ok_or_else(|| io::Error::other(format!("ignore.{key} is not an array")))?;

    let present = list.iter().any(|existing| match (existing, &value) {
        (toml::Value::String(a), toml::Value::String(b)) => a.eq_ignore_ascii_case(b),
        (a, b) => a == b,
    });
    if present {
        return Ok(false);
    }
    list.push(value);

    write_document(path, &doc)?;
    Ok(true)
}

/// The settings file as pretty-printed TOML, for display.
pub(crate) fn load_settings_string(path: &Path) -> Option<String> {
    let contents = std::fs::read_to_string(path).ok()?;
    let doc: toml::Value = contents.parse().ok()?;
    toml::to_string_pretty(&doc).ok()
}

fn read_document(path: &Path) -> toml::Value {
    std::fs::read_to_string(path)
        .ok()
        .and_then(|contents| contents.parse().ok())
        .unwrap_or_else(|| toml::Value::Table(Default::default()))
}

fn write_document(path: &Path, doc: &toml::Value) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let serialized = toml::to_string_pretty(doc).map_err(io::Error::other)?;
    let tmp = path.with_extension("toml.tmp");
    std::fs::write(&tmp, &serialized)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
