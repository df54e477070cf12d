use std::io::IsTerminal;
use std::path::Path;

use backlog_import::{
    LogProgress, ReconcileResult, SilentProgress, Source, SyncOptions, SyncProgress, load_source,
    sync_records,
};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;
use crate::settings::Settings;

use super::open_library;

/// Progress bar over the mutations a sync applies.
struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    fn new() -> Self {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::with_template("  {bar:30.cyan/blue} {pos}/{len} {msg}")
                .expect("static pattern")
                .progress_chars("=> "),
        );
        Self { bar }
    }
}

impl SyncProgress for BarProgress {
    fn on_phase(&self, message: &str) {
        log::debug!("{}", message);
    }

    fn on_change(&self, current: usize, total: usize, description: &str) {
        self.bar.set_length(total as u64);
        self.bar.set_position(current as u64);
        self.bar.set_message(description.to_string());
        log::debug!("[{}/{}] {}", current, total, description);
    }

    fn on_complete(&self, message: &str) {
        self.bar.finish_and_clear();
        log::debug!("{}", message);
    }
}

/// Pick a progress reporter: nothing when quiet, a bar on a terminal, and
/// periodic log lines when output is piped or redirected.
fn progress_for(quiet: bool, interactive: bool) -> Box<dyn SyncProgress> {
    match (quiet, interactive) {
        (true, _) => Box::new(SilentProgress),
        (false, true) => Box::new(BarProgress::new()),
        (false, false) => Box::new(LogProgress),
    }
}

/// Run `sync steam|playstation <file>`.
pub(crate) fn run_sync(
    source: Source,
    file: &Path,
    dry_run: bool,
    db_path: &Path,
    settings: &Settings,
    quiet: bool,
) -> Result<(), CliError> {
    let records = load_source(source, file).map_err(|e| CliError::import(e.to_string()))?;
    log::info!(
        "{} {} games from {}",
        "Read".if_supports_color(Stdout, |t| t.bold()),
        records.len(),
        file.display()
    );

    let conn = open_library(db_path)?;
    let ignore = settings.ignore_list();
    let options = SyncOptions {
        dry_run,
        skip: &ignore,
        ..Default::default()
    };
    let progress = progress_for(quiet, std::io::stdout().is_terminal());

    let result = sync_records(&conn, source.group(), &records, &options, progress.as_ref())
        .map_err(|e| CliError::database(format!("Sync failed: {}", e)))?;

    print_summary(&result, dry_run);
    Ok(())
}

fn print_summary(result: &ReconcileResult, dry_run: bool) {
    crate::log_blank();
    for name in &result.added {
        log::info!("  {} {}", "+".if_supports_color(Stdout, |t| t.green()), name);
    }
    for (name, delta) in &result.updated {
        log::info!(
            "  {} {} {}",
            "~".if_supports_color(Stdout, |t| t.cyan()),
            name,
            delta.if_supports_color(Stdout, |t| t.dimmed())
        );
    }
    for name in &result.restored {
        log::info!("  {} {} (back in library)", "^".if_supports_color(Stdout, |t| t.blue()), name);
    }
    for name in &result.removed {
        log::info!("  {} {}", "-".if_supports_color(Stdout, |t| t.red()), name);
    }
    if !result.is_noop() {
        crate::log_blank();
    }

    if dry_run {
        log::info!(
            "{}",
            "Dry run: no changes made.".if_supports_color(Stdout, |t| t.yellow()),
        );
    } else {
        log::info!("{}", "Sync complete".if_supports_color(Stdout, |t| t.bold()));
    }
    log::info!("  Seen:           {:>6}", result.seen);
    log::info!("  Added:          {:>6}", result.added.len());
    log::info!("  Updated:        {:>6}", result.updated.len());
    log::info!("  Removed:        {:>6}", result.removed.len());
    log::info!("  Restored:       {:>6}", result.restored.len());
    log::info!("  Unchanged:      {:>6}", result.unchanged);
    if result.skipped > 0 {
        log::info!("  Ignored:        {:>6}", result.skipped);
    }
    if result.duplicates > 0 {
        log::info!("  Duplicates:     {:>6}", result.duplicates);
    }
    if result.invalid > 0 {
        log::warn!("{} records could not be used (see --verbose)", result.invalid);
    }
}
