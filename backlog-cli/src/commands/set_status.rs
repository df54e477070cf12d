use backlog_core::{Platform, PlayStatus};
use backlog_db::Connection;
use chrono::Utc;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

use super::{format_status, resolve_record};

/// Parse a status typed on the command line. "none" clears the status.
pub(crate) fn parse_status_arg(text: &str) -> Result<Option<PlayStatus>, CliError> {
    if text.trim().eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    match PlayStatus::parse_loose(text) {
        Some(PlayStatus::Other(other)) => Err(CliError::invalid_input(format!(
            "unknown status '{}' (expected Unplayed, Played, Playing, Finished, Waiting, Quit, \"Must Play\", Ignore, Demo or none)",
            other
        ))),
        Some(status) => Ok(Some(status)),
        None => Err(CliError::invalid_input("status must not be empty")),
    }
}

/// Run `set-status <name> <status>`. This is the only path that writes
/// locked statuses such as Finished or Quit.
pub(crate) fn run_set_status(
    conn: &Connection,
    query: &str,
    status: &str,
    platform: Option<Platform>,
    limit: usize,
) -> Result<(), CliError> {
    let status = parse_status_arg(status)?;
    let record = resolve_record(conn, query, platform, limit)?;

    if record.play_status == status {
        log::info!(
            "{} ({}) is already {}",
            record.name,
            record.platform,
            format_status(status.as_ref())
        );
        return Ok(());
    }

    backlog_db::set_status(conn, &record.to_ref(), status.as_ref(), &Utc::now())
        .map_err(|e| CliError::database(format!("Failed to update '{}': {}", record.name, e)))?;

    log::info!(
        "{} ({}): {} -> {}",
        record.name.if_supports_color(Stdout, |t| t.bold()),
        record.platform,
        format_status(record.play_status.as_ref()),
        format_status(status.as_ref()),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_statuses() {
        assert_eq!(parse_status_arg("finished").unwrap(), Some(PlayStatus::Finished));
        assert_eq!(parse_status_arg("Must Play").unwrap(), Some(PlayStatus::MustPlay));
        assert_eq!(parse_status_arg("NONE").unwrap(), None);
    }

    #[test]
    fn rejects_unknown_and_empty() {
        assert!(matches!(parse_status_arg("beaten"), Err(CliError::InvalidInput(_))));
        assert!(parse_status_arg("  ").is_err());
    }

    #[test]
    fn removed_marker_is_accepted() {
        assert_eq!(
            parse_status_arg("Removed | Played").unwrap(),
            Some(PlayStatus::wrap_removed(Some(PlayStatus::Played)))
        );
    }
}
