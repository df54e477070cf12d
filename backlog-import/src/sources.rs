//! Parsers for library exports from external stores.
//!
//! A parser fails only when the document as a whole cannot be used. Entries
//! with missing or odd fields are passed through as-is so the reconciler can
//! count them as invalid.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use backlog_core::{ExternalRecord, Platform, PlatformGroup};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unexpected document: {0}")]
    UnexpectedShape(String),
    #[error("Unknown source: {0}")]
    UnknownSource(String),
}

/// A store a library export can come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    Steam,
    PlayStation,
}

impl Source {
    pub fn short_name(&self) -> &'static str {
        match self {
            Self::Steam => "steam",
            Self::PlayStation => "playstation",
        }
    }

    /// The platform group whose stored games this source is authoritative for.
    pub fn group(&self) -> PlatformGroup {
        match self {
            Self::Steam => PlatformGroup::Steam,
            Self::PlayStation => PlatformGroup::PlayStation,
        }
    }

    pub fn parse(&self, json: &str) -> Result<Vec<ExternalRecord>, SourceError> {
        match self {
            Self::Steam => parse_steam(json),
            Self::PlayStation => parse_playstation(json),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

impl FromStr for Source {
    type Err = SourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "steam" => Ok(Self::Steam),
            "playstation" | "psn" | "ps" => Ok(Self::PlayStation),
            _ => Err(SourceError::UnknownSource(s.to_string())),
        }
    }
}

/// Read and parse an export file.
pub fn load_source(source: Source, path: &Path) -> Result<Vec<ExternalRecord>, SourceError> {
    let contents = std::fs::read_to_string(path).map_err(|e| SourceError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let records = source.parse(&contents)?;
    log::debug!(
        "Read {} {} records from {}",
        records.len(),
        source,
        path.display()
    );
    Ok(records)
}

// ── Steam ───────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct SteamDocument {
    response: SteamResponse,
}

#[derive(Deserialize)]
struct SteamResponse {
    games: Option<Vec<SteamGame>>,
}

#[derive(Deserialize)]
struct SteamGame {
    appid: Option<Value>,
    name: Option<Value>,
    playtime_forever: Option<Value>,
}

/// Parse a Steam owned-games response
/// (`{"response":{"games":[{"appid","name","playtime_forever"}]}}`).
///
/// A response without a `games` list (private profiles return `{}`) is an
/// error, since syncing it would mark every Steam game as removed.
pub fn parse_steam(json: &str) -> Result<Vec<ExternalRecord>, SourceError> {
    let doc: SteamDocument = serde_json::from_str(json)?;
    let games = doc.response.games.ok_or_else(|| {
        SourceError::UnexpectedShape("Steam response has no games list".to_string())
    })?;

    Ok(games
        .into_iter()
        .map(|game| ExternalRecord {
            name: game.name.as_ref().and_then(text),
            identifier: game.appid.as_ref().and_then(number),
            minutes_played: game.playtime_forever.as_ref().map_or(Some(0), number),
            platform: Platform::Steam,
        })
        .collect())
}

// ── PlayStation ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(untagged)]
enum PlayStationDocument {
    List(Vec<PlayStationEntry>),
    Wrapped { data: Vec<PlayStationEntry> },
}

#[derive(Deserialize)]
struct PlayStationEntry {
    name: Option<Value>,
    platform: Option<Value>,
    product_id: Option<Value>,
    playtime_minutes: Option<Value>,
}

/// Parse a PlayStation purchase export: an array of
/// `{"name","platform","product_id"?,"playtime_minutes"?}` objects, bare or
/// wrapped in `{"data":[...]}`.
///
/// The export does not track play, so absent playtime reads as 0 minutes.
/// Only numeric product ids are kept as identifiers.
pub fn parse_playstation(json: &str) -> Result<Vec<ExternalRecord>, SourceError> {
    let doc: PlayStationDocument = serde_json::from_str(json)?;
    let entries = match doc {
        PlayStationDocument::List(entries) | PlayStationDocument::Wrapped { data: entries } => {
            entries
        }
    };

    Ok(entries
        .into_iter()
        .map(|entry| ExternalRecord {
            name: entry.name.as_ref().and_then(text),
            identifier: entry.product_id.as_ref().and_then(number),
            minutes_played: entry.playtime_minutes.as_ref().map_or(Some(0), number),
            platform: playstation_platform(entry.platform.as_ref().and_then(text).as_deref()),
        })
        .collect())
}

/// Map an export platform label to a console. Anything that does not name
/// the PS5 is treated as PS4, the export's oldest supported generation.
fn playstation_platform(label: Option<&str>) -> Platform {
    let Some(label) = label else {
        return Platform::Ps4;
    };
    match label.parse::<Platform>() {
        Ok(Platform::Ps5) => Platform::Ps5,
        _ => {
            let lower = label.to_lowercase();
            if lower.contains("ps5") || lower.contains("playstation 5") {
                Platform::Ps5
            } else {
                Platform::Ps4
            }
        }
    }
}

// ── Field coercion ──────────────────────────────────────────────────────────

fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Non-negative whole number, from a JSON number or a numeric string.
fn number(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
