//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use backlog_core::Platform;

#[derive(Parser)]
#[command(name = "backlog")]
#[command(about = "Track your game library and what to play next", long_about = None)]
pub(crate) struct Cli {
    /// Library database (defaults to the saved setting, then the data directory)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments shared by every sync source.
#[derive(Args, Clone)]
pub(crate) struct SyncArgs {
    /// Exported library file (JSON)
    pub file: PathBuf,

    /// Show what would change without writing to the database
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Import a store's library export and reconcile it with the database
    Sync {
        #[command(subcommand)]
        source: SyncSource,
    },

    /// Find a game by name (typos are fine)
    Lookup {
        /// Game name
        name: String,
    },

    /// Set a game's play status by hand
    SetStatus {
        /// Game name
        name: String,

        /// New status (e.g. Playing, Finished, Quit, "Must Play")
        status: String,

        /// Limit to one platform when the name exists on several
        #[arg(short, long)]
        platform: Option<Platform>,
    },

    /// List games in the library
    List {
        /// Only games with this status (use "none" for games without one)
        #[arg(short, long)]
        status: Option<String>,

        /// Only games on this platform
        #[arg(short, long)]
        platform: Option<Platform>,
    },

    /// Attach a note to a game (omit the text to clear it)
    Note {
        /// Game name
        name: String,

        /// Note text
        text: Option<String>,

        /// Limit to one platform when the name exists on several
        #[arg(short, long)]
        platform: Option<Platform>,
    },

    /// Show library statistics
    Stats {
        /// Number of most-played games to show
        #[arg(long, default_value_t = 5)]
        top: usize,
    },

    /// Suggest what to play next and mark the choice as Playing
    Pick {
        /// Number of suggestions
        #[arg(short, long, default_value_t = 5)]
        count: usize,
    },

    /// Export the library to a CSV file
    Export {
        /// Output file
        file: PathBuf,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum SyncSource {
    /// Steam owned-games response (GetOwnedGames JSON)
    Steam(SyncArgs),

    /// PlayStation purchase history export
    Playstation(SyncArgs),
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show the current settings
    Show,

    /// Print the settings file location
    Path,

    /// Add a game name (or, with --id, a store id) to the sync ignore list
    Ignore {
        /// Game name, or store id with --id
        entry: String,

        /// Treat the entry as a numeric store id
        #[arg(long)]
        id: bool,
    },
}
