use backlog_core::Platform;
use backlog_db::Connection;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

use super::resolve_record;

/// Blank note text clears the note.
pub(crate) fn note_text(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|t| !t.is_empty())
}

/// Run `note <name> [text]`.
pub(crate) fn run_note(
    conn: &Connection,
    query: &str,
    text: Option<&str>,
    platform: Option<Platform>,
    limit: usize,
) -> Result<(), CliError> {
    let record = resolve_record(conn, query, platform, limit)?;
    let text = note_text(text);

    backlog_db::set_notes(conn, &record.to_ref(), text)
        .map_err(|e| CliError::database(format!("Failed to update '{}': {}", record.name, e)))?;

    let label = record.name.if_supports_color(Stdout, |t| t.bold());
    match text {
        Some(text) => log::info!("{} ({}): {}", label, record.platform, text),
        None if record.notes.is_some() => log::info!("Cleared note on {} ({})", label, record.platform),
        None => log::info!("{} ({}) has no note", label, record.platform),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use backlog_core::Record;

    #[test]
    fn blank_text_clears() {
        assert_eq!(note_text(Some("  boss rush next ")), Some("boss rush next"));
        assert_eq!(note_text(Some("   ")), None);
        assert_eq!(note_text(None), None);
    }

    #[test]
    fn writes_and_clears_note() {
        let conn = backlog_db::open_memory().unwrap();
        backlog_db::insert_record(&conn, &Record::new("Hades", Platform::Steam)).unwrap();

        run_note(&conn, "Hades", Some("stuck on Hydra"), None, 5).unwrap();
        let hades = backlog_db::find_by_name(&conn, Platform::Steam.group(), "Hades")
            .unwrap()
            .unwrap();
        assert_eq!(hades.notes.as_deref(), Some("stuck on Hydra"));

        run_note(&conn, "Hades", None, None, 5).unwrap();
        let hades = backlog_db::find_by_name(&conn, Platform::Steam.group(), "Hades")
            .unwrap()
            .unwrap();
        assert_eq!(hades.notes, None);
    }
}
