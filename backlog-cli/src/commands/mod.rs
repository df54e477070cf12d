pub(crate) mod config;
pub(crate) mod export;
pub(crate) mod list;
pub(crate) mod lookup;
pub(crate) mod note;
pub(crate) mod pick;
pub(crate) mod set_status;
pub(crate) mod stats;
pub(crate) mod sync;

use std::path::Path;

use backlog_core::{Platform, PlayStatus, Record};
use backlog_db::Connection;
use backlog_match::{Resolution, resolve_with_limit, suggest};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;
use crate::prompt;

/// Open (or create) the library database.
pub(crate) fn open_library(db_path: &Path) -> Result<Connection, CliError> {
    log::debug!("Using library database {}", db_path.display());
    backlog_db::open_database(db_path).map_err(|e| {
        CliError::database(format!("Failed to open {}: {}", db_path.display(), e))
    })
}

/// Turn a typed name into one stored game name.
///
/// Exact and unique fuzzy matches resolve directly; ambiguous ones go
/// through a numbered prompt. Unknown names fail with "did you mean" hints.
pub(crate) fn resolve_name(conn: &Connection, query: &str, limit: usize) -> Result<String, CliError> {
    let names = backlog_db::known_names(conn)
        .map_err(|e| CliError::database(format!("Failed to read game names: {}", e)))?;

    match resolve_with_limit(query, &names, limit) {
        Resolution::Exact(name) => Ok(name),
        Resolution::Unique(name) => {
            log::info!(
                "Using {} for '{}'",
                name.if_supports_color(Stdout, |t| t.bold()),
                query
            );
            Ok(name)
        }
        Resolution::Ambiguous(candidates) => {
            let question = format!("'{}' matches several games:", query);
            match prompt::choose(&question, &candidates)? {
                Some(i) => Ok(candidates[i].clone()),
                None => Err(CliError::other("Cancelled")),
            }
        }
        Resolution::NoMatch => {
            let hints = suggest(query, names.iter().map(String::as_str), 3);
            if !hints.is_empty() {
                log::info!("Closest names: {}", hints.join(", "));
            }
            Err(CliError::not_found(query))
        }
    }
}

/// Resolve a name to a single stored record, asking which platform to use
/// when the game is tracked on several.
pub(crate) fn resolve_record(
    conn: &Connection,
    query: &str,
    platform: Option<Platform>,
    limit: usize,
) -> Result<Record, CliError> {
    let name = resolve_name(conn, query, limit)?;
    let mut records = backlog_db::find_all_by_name(conn, &name)
        .map_err(|e| CliError::database(format!("Failed to look up '{}': {}", name, e)))?;
    if let Some(platform) = platform {
        records.retain(|r| r.platform == platform);
    }

    match records.len() {
        0 => Err(CliError::not_found(match platform {
            Some(p) => format!("{} on {}", name, p),
            None => name,
        })),
        1 => Ok(records.remove(0)),
        _ => {
            let labels: Vec<String> = records
                .iter()
                .map(|r| format!("{} ({})", r.name, r.platform))
                .collect();
            match prompt::choose("Which platform?", &labels)? {
                Some(i) => Ok(records.swap_remove(i)),
                None => Err(CliError::other("Cancelled")),
            }
        }
    }
}

/// Colored status label; unset statuses show as a dash.
pub(crate) fn format_status(status: Option<&PlayStatus>) -> String {
    let Some(status) = status else {
        return "-".if_supports_color(Stdout, |t| t.dimmed()).to_string();
    };
    let text = status.to_string();
    match status {
        PlayStatus::Playing => text.if_supports_color(Stdout, |t| t.green()).to_string(),
        PlayStatus::Finished => text.if_supports_color(Stdout, |t| t.cyan()).to_string(),
        PlayStatus::MustPlay => text.if_supports_color(Stdout, |t| t.magenta()).to_string(),
        PlayStatus::Quit | PlayStatus::Ignore => {
            text.if_supports_color(Stdout, |t| t.dimmed()).to_string()
        }
        PlayStatus::Removed(_) => text.if_supports_color(Stdout, |t| t.red()).to_string(),
        _ => text,
    }
}

/// Truncate a string to a maximum width in characters, appending "..." if
/// needed.
pub(crate) fn truncate_str(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else if max > 3 {
        let head: String = s.chars().take(max - 3).collect();
        format!("{}...", head)
    } else {
        s.chars().take(max).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_short_strings_unchanged() {
        assert_eq!(truncate_str("Hades", 10), "Hades");
    }

    #[test]
    fn truncate_long_strings() {
        assert_eq!(truncate_str("Hollow Knight: Silksong", 10), "Hollow ...");
        assert_eq!(truncate_str("Hollow", 2), "Ho");
    }

    #[test]
    fn truncate_counts_chars_not_bytes() {
        assert_eq!(truncate_str("ポケモン バイオレット", 6), "ポケモ...");
    }
}
