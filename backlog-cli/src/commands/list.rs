use backlog_core::util::format_hours;
use backlog_core::{Platform, PlayStatus, Record};
use backlog_db::Connection;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

use super::{format_status, truncate_str};

const NAME_WIDTH: usize = 44;

/// Map a `--status` argument to a status bucket. "none" selects games
/// without a status.
fn status_bucket(arg: &str) -> String {
    if arg.trim().eq_ignore_ascii_case("none") {
        return String::new();
    }
    PlayStatus::parse_loose(arg)
        .map(|s| s.bucket().to_string())
        .unwrap_or_default()
}

fn load_records(
    conn: &Connection,
    status: Option<&str>,
    platform: Option<Platform>,
) -> Result<Vec<Record>, CliError> {
    let records = match status {
        Some(arg) => backlog_db::records_by_status(conn, &status_bucket(arg)),
        None => match platform {
            Some(p) => backlog_db::records_for_platform(conn, p),
            None => backlog_db::all_records(conn),
        },
    }
    .map_err(|e| CliError::database(format!("Failed to list games: {}", e)))?;

    Ok(records
        .into_iter()
        .filter(|r| platform.is_none_or(|p| r.platform == p))
        .collect())
}

/// Run `list [--status S] [--platform P]`.
pub(crate) fn run_list(
    conn: &Connection,
    status: Option<&str>,
    platform: Option<Platform>,
) -> Result<(), CliError> {
    let records = load_records(conn, status, platform)?;

    if records.is_empty() {
        log::info!("No games match.");
        return Ok(());
    }

    log::info!(
        "{}",
        format!(
            "{:<width$} {:<8} {:>9}  {}",
            "Name",
            "Platform",
            "Played",
            "Status",
            width = NAME_WIDTH
        )
        .if_supports_color(Stdout, |t| t.bold()),
    );
    for record in &records {
        log::info!(
            "{:<width$} {:<8} {:>9}  {}",
            truncate_str(&record.name, NAME_WIDTH),
            record.platform.display_name(),
            format_hours(record.minutes_played),
            format_status(record.play_status.as_ref()),
            width = NAME_WIDTH
        );
    }
    crate::log_blank();
    log::info!("{} games", records.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_arguments_map_to_buckets() {
        assert_eq!(status_bucket("playing"), "Playing");
        assert_eq!(status_bucket("must play"), "Must Play");
        assert_eq!(status_bucket("removed"), "Removed");
        assert_eq!(status_bucket("None"), "");
    }

    #[test]
    fn filters_combine() {
        let conn = backlog_db::open_memory().unwrap();
        for record in [
            Record::new("Hades", Platform::Steam).with_status(PlayStatus::Playing),
            Record::new("Hades", Platform::Switch).with_status(PlayStatus::Playing),
            Record::new("Celeste", Platform::Switch).with_status(PlayStatus::Unplayed),
        ] {
            backlog_db::insert_record(&conn, &record).unwrap();
        }

        assert_eq!(load_records(&conn, None, None).unwrap().len(), 3);
        assert_eq!(load_records(&conn, Some("playing"), None).unwrap().len(), 2);
        let switch_playing = load_records(&conn, Some("playing"), Some(Platform::Switch)).unwrap();
        assert_eq!(switch_playing.len(), 1);
        assert_eq!(switch_playing[0].platform, Platform::Switch);
        assert_eq!(load_records(&conn, None, Some(Platform::Switch)).unwrap().len(), 2);
    }
}
