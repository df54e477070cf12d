//! backlog CLI
//!
//! Command-line interface for tracking a game library across stores and
//! deciding what to play next.

mod cli_types;
mod commands;
mod error;
mod logger;
mod prompt;
mod settings;

use clap::Parser;

use backlog_import::Source;

use cli_types::{Cli, Commands, ConfigAction, SyncSource};
pub(crate) use error::CliError;

/// Emit an empty line through the logger.
pub(crate) fn log_blank() {
    log::info!("");
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logger::init(cli.quiet, cli.verbose, cli.logfile.as_deref()) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(cli) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let settings_path = settings::settings_path();
    let settings = settings::load_settings()?;
    let db_path = settings::resolve_db_path(cli.db, &settings);
    let limit = settings.match_limit();

    match cli.command {
        Commands::Sync { source } => {
            let (source, args) = match source {
                SyncSource::Steam(args) => (Source::Steam, args),
                SyncSource::Playstation(args) => (Source::PlayStation, args),
            };
            commands::sync::run_sync(
                source,
                &args.file,
                args.dry_run,
                &db_path,
                &settings,
                cli.quiet,
            )
        }
        Commands::Lookup { name } => {
            let conn = commands::open_library(&db_path)?;
            commands::lookup::run_lookup(&conn, &name, limit)
        }
        Commands::SetStatus {
            name,
            status,
            platform,
        } => {
            let conn = commands::open_library(&db_path)?;
            commands::set_status::run_set_status(&conn, &name, &status, platform, limit)
        }
        Commands::Note {
            name,
            text,
            platform,
        } => {
            let conn = commands::open_library(&db_path)?;
            commands::note::run_note(&conn, &name, text.as_deref(), platform, limit)
        }
        Commands::List { status, platform } => {
            let conn = commands::open_library(&db_path)?;
            commands::list::run_list(&conn, status.as_deref(), platform)
        }
        Commands::Stats { top } => {
            let conn = commands::open_library(&db_path)?;
            commands::stats::run_stats(&conn, top)
        }
        Commands::Pick { count } => {
            let conn = commands::open_library(&db_path)?;
            commands::pick::run_pick(&conn, count)
        }
        Commands::Export { file } => {
            let conn = commands::open_library(&db_path)?;
            commands::export::run_export(&conn, &file)
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                commands::config::run_config_show(&settings_path, &settings, &db_path);
                Ok(())
            }
            ConfigAction::Path => {
                commands::config::run_config_path(&settings_path);
                Ok(())
            }
            ConfigAction::Ignore { entry, id } => {
                commands::config::run_config_ignore(&settings_path, &entry, id)
            }
        },
    }
}
