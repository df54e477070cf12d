use std::cmp::Reverse;

use backlog_core::util::format_hours;
use backlog_core::{PlayStatus, Record};
use backlog_db::Connection;
use chrono::Utc;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;
use crate::prompt;

/// Rank candidates for what to play next: Must Play first, then games in
/// progress (most recently touched first), then unplayed games with the
/// least playtime.
pub(crate) fn suggestions(records: Vec<Record>, count: usize) -> Vec<Record> {
    let tier = |status: Option<&PlayStatus>| match status {
        Some(PlayStatus::MustPlay) => Some(0),
        Some(PlayStatus::Playing) => Some(1),
        Some(PlayStatus::Unplayed) => Some(2),
        _ => None,
    };

    let mut ranked: Vec<(usize, Record)> = records
        .into_iter()
        .filter_map(|r| tier(r.play_status.as_ref()).map(|t| (t, r)))
        .collect();
    ranked.sort_by(|(ta, a), (tb, b)| {
        ta.cmp(tb).then_with(|| match *ta {
            1 => Reverse(a.last_updated).cmp(&Reverse(b.last_updated)),
            _ => a.minutes_played.cmp(&b.minutes_played),
        })
        .then_with(|| a.name.cmp(&b.name))
    });
    ranked.into_iter().take(count).map(|(_, r)| r).collect()
}

/// Run `pick [--count N]`.
pub(crate) fn run_pick(conn: &Connection, count: usize) -> Result<(), CliError> {
    let records = backlog_db::all_records(conn)
        .map_err(|e| CliError::database(format!("Failed to read library: {}", e)))?;
    let picks = suggestions(records, count.max(1));

    if picks.is_empty() {
        log::info!("Nothing left to play. Sync a library or mark something Must Play.");
        return Ok(());
    }

    let labels: Vec<String> = picks
        .iter()
        .map(|r| {
            format!(
                "{} ({}) - {}, {}",
                r.name,
                r.platform,
                r.play_status.as_ref().map(|s| s.to_string()).unwrap_or_default(),
                format_hours(r.minutes_played)
            )
        })
        .collect();

    let Some(choice) = prompt::choose("What to play next?", &labels)? else {
        log::info!("No changes made.");
        return Ok(());
    };
    let chosen = &picks[choice];

    if chosen.play_status == Some(PlayStatus::Playing) {
        log::info!("Keep going with {}!", chosen.name.if_supports_color(Stdout, |t| t.bold()));
        return Ok(());
    }

    backlog_db::set_status(conn, &chosen.to_ref(), Some(&PlayStatus::Playing), &Utc::now())
        .map_err(|e| CliError::database(format!("Failed to update '{}': {}", chosen.name, e)))?;
    log::info!(
        "{} ({}) is now {}",
        chosen.name.if_supports_color(Stdout, |t| t.bold()),
        chosen.platform,
        "Playing".if_supports_color(Stdout, |t| t.green()),
    );
    Ok(())
}
