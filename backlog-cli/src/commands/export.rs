use std::io::Write;
use std::path::Path;

use backlog_core::Record;
use backlog_core::util::minutes_to_hours;
use backlog_db::Connection;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

const HEADER: [&str; 9] = [
    "Name",
    "Platform",
    "Identifier",
    "Minutes Played",
    "Hours Played",
    "Status",
    "Last Updated",
    "Added",
    "Notes",
];

/// Write records as CSV, one row per game.
pub(crate) fn write_csv<W: Write>(writer: W, records: &[Record]) -> Result<(), csv::Error> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(HEADER)?;
    for record in records {
        out.write_record([
            record.name.clone(),
            record.platform.display_name().to_string(),
            record.identifier.map(|id| id.to_string()).unwrap_or_default(),
            record.minutes_played.to_string(),
            format!("{:.1}", minutes_to_hours(record.minutes_played)),
            record.play_status.as_ref().map(|s| s.to_string()).unwrap_or_default(),
            record.last_updated.map(|t| t.to_rfc3339()).unwrap_or_default(),
            record.added_at.map(|t| t.to_rfc3339()).unwrap_or_default(),
            record.notes.clone().unwrap_or_default(),
        ])?;
    }
    out.flush()?;
    Ok(())
}

/// Run `export <file.csv>`.
pub(crate) fn run_export(conn: &Connection, path: &Path) -> Result<(), CliError> {
    let records = backlog_db::all_records(conn)
        .map_err(|e| CliError::database(format!("Failed to read library: {}", e)))?;

    let file = std::fs::File::create(path)?;
    write_csv(file, &records)
        .map_err(|e| CliError::other(format!("Failed to write {}: {}", path.display(), e)))?;

    log::info!(
        "Exported {} games to {}",
        records.len(),
        path.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use backlog_core::{Platform, PlayStatus};

    #[test]
    fn csv_rows_and_quoting() {
        let mut with_notes = Record::new("Hollow Knight: Silksong", Platform::Switch)
            .with_minutes(90)
            .with_status(PlayStatus::wrap_removed(Some(PlayStatus::Playing)));
        with_notes.notes = Some("boss, \"Lace\"".to_string());
        let records = vec![
            Record::new("Hades", Platform::Steam)
                .with_identifier(1145360)
                .with_status(PlayStatus::MustPlay),
            with_notes,
        ];

        let mut buf = Vec::new();
        write_csv(&mut buf, &records).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Name,Platform,Identifier"));
        assert_eq!(lines[1], "Hades,Steam,1145360,0,0.0,Must Play,,,");
        assert!(lines[2].contains("Removed | Playing"));
        assert!(lines[2].contains("1.5"));
        assert!(lines[2].ends_with("\"boss, \"\"Lace\"\"\""));
    }
}
