use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;
use crate::settings::{self, IgnoreEntry, Settings};

/// Show the settings file, the database that will be used, and ignore list
/// size.
pub(crate) fn run_config_show(path: &Path, settings: &Settings, db_path: &Path) {
    log::info!("{}", "Backlog Configuration".if_supports_color(Stdout, |t| t.bold()));
    crate::log_blank();

    if path.exists() {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found, using defaults)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    log::info!(
        "  Database:      {}",
        db_path.display().if_supports_color(Stdout, |t| t.cyan())
    );
    log::info!("  Match limit:   {}", settings.match_limit());
    log::info!(
        "  Ignored:       {} names, {} identifiers",
        settings.ignore.names.len(),
        settings.ignore.identifiers.len()
    );

    if let Some(contents) = settings::load_settings_string(path) {
        crate::log_blank();
        for line in contents.lines() {
            log::info!("  {}", line.if_supports_color(Stdout, |t| t.dimmed()));
        }
    }
}

pub(crate) fn run_config_path(path: &Path) {
    log::info!("{}", path.display());
}

/// Add a name or store id to the sync ignore list.
pub(crate) fn run_config_ignore(path: &Path, entry: &str, identifier: bool) -> Result<(), CliError> {
    let entry = IgnoreEntry::parse(entry, identifier)?;

    let added = settings::add_ignore_entry(path, &entry)
        .map_err(|e| CliError::config(format!("Failed to update {}: {}", path.display(), e)))?;

    let label = match &entry {
        IgnoreEntry::Identifier(id) => format!("identifier {}", id),
        IgnoreEntry::Name(name) => format!("'{}'", name),
    };
    if added {
        log::info!(
            "{} {} to the ignore list",
            "Added".if_supports_color(Stdout, |t| t.green()),
            label
        );
    } else {
        log::info!("{} is already ignored", label);
    }
    Ok(())
}
