use backlog_core::Record;
use backlog_core::util::format_hours;
use backlog_db::Connection;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

use super::{format_status, resolve_name};

/// Run `lookup <name>`: resolve the name and show every copy of the game.
pub(crate) fn run_lookup(conn: &Connection, query: &str, limit: usize) -> Result<(), CliError> {
    let name = resolve_name(conn, query, limit)?;
    let records = backlog_db::find_all_by_name(conn, &name)
        .map_err(|e| CliError::database(format!("Failed to look up '{}': {}", name, e)))?;

    log::info!("{}", name.if_supports_color(Stdout, |t| t.bold()));
    for record in &records {
        print_record(record);
    }
    Ok(())
}

fn print_record(record: &Record) {
    log::info!(
        "  {} {}",
        record.platform.if_supports_color(Stdout, |t| t.cyan()),
        format_status(record.play_status.as_ref()),
    );
    log::info!("    Played:   {}", format_hours(record.minutes_played));
    if let Some(id) = record.identifier {
        log::info!("    Store id: {}", id);
    }
    if let Some(added) = record.added_at {
        log::info!("    Added:    {}", added.format("%Y-%m-%d"));
    }
    if let Some(updated) = record.last_updated {
        log::info!("    Updated:  {}", updated.format("%Y-%m-%d %H:%M"));
    }
    if let Some(notes) = record.notes.as_deref().filter(|n| !n.is_empty()) {
        log::info!("    Notes:    {}", notes);
    }
}
