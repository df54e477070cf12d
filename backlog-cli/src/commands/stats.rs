use backlog_core::util::format_hours;
use backlog_db::Connection;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

use super::truncate_str;

pub(crate) fn run_stats(conn: &Connection, top: usize) -> Result<(), CliError> {
    let stats = backlog_db::library_stats(conn, top)
        .map_err(|e| CliError::database(format!("Failed to query library stats: {}", e)))?;

    log::info!("{}", "Library Statistics".if_supports_color(Stdout, |t| t.bold()));
    crate::log_blank();
    log::info!("  Games:          {:>8}", stats.total_games);
    log::info!("  Started:        {:>8}", stats.games_started);
    log::info!(
        "  Time played:    {:>8}",
        format_hours(stats.total_minutes.max(0) as u64)
    );
    log::info!("  Completion:     {:>7.1}%", stats.completion_percent());

    if !stats.by_status.is_empty() {
        crate::log_blank();
        log::info!("{}", "By status".if_supports_color(Stdout, |t| t.bold()));
        for (bucket, count) in &stats.by_status {
            let label = if bucket.is_empty() { "(none)" } else { bucket.as_str() };
            log::info!("  {:<15} {:>8}", label, count);
        }
    }

    if !stats.by_platform.is_empty() {
        crate::log_blank();
        log::info!("{}", "By platform".if_supports_color(Stdout, |t| t.bold()));
        for platform in &stats.by_platform {
            log::info!(
                "  {:<15} {:>8} {:>10}",
                platform.platform.display_name(),
                platform.games,
                format_hours(platform.minutes_played.max(0) as u64),
            );
        }
    }

    if !stats.most_played.is_empty() {
        crate::log_blank();
        log::info!("{}", "Most played".if_supports_color(Stdout, |t| t.bold()));
        for (i, record) in stats.most_played.iter().enumerate() {
            log::info!(
                "  {:>2}. {:<40} {:<8} {:>9}",
                i + 1,
                truncate_str(&record.name, 40),
                record.platform.display_name(),
                format_hours(record.minutes_played),
            );
        }
    }

    if let Ok(logs) = backlog_db::list_sync_logs(conn, 1) {
        if let Some(last) = logs.first() {
            crate::log_blank();
            log::info!(
                "  Last sync: {} from {} ({} seen)",
                last.synced_at,
                last.source,
                last.records_seen
            );
        }
    }

    Ok(())
}
