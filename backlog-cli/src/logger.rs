//! Logger setup: all user-facing output goes through the `log` macros.
//!
//! Info-level messages print bare, so `log::info!` doubles as the CLI's
//! stdout. Warnings and errors get a colored prefix. `--verbose` adds
//! timestamps and debug output; `--quiet` keeps only warnings and errors.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use env_logger::{Builder, Target};
use log::{Level, LevelFilter};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

/// Writes to stdout and mirrors everything, minus ANSI codes, to a file.
struct TeeWriter {
    file: File,
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stdout().write_all(buf)?;
        self.file.write_all(&strip_ansi_escapes::strip(buf))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()?;
        self.file.flush()
    }
}

fn level_filter(quiet: bool, verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    }
}

/// Install the global logger. Call once, before any command runs.
pub(crate) fn init(quiet: bool, verbose: bool, logfile: Option<&Path>) -> Result<(), CliError> {
    let mut builder = Builder::new();
    builder.filter_level(level_filter(quiet, verbose));

    builder.format(move |buf, record| {
        let prefix = match record.level() {
            Level::Error => Some(format!(
                "{} ",
                "error:".if_supports_color(Stdout, |t| t.red())
            )),
            Level::Warn => Some(format!(
                "{} ",
                "warning:".if_supports_color(Stdout, |t| t.yellow())
            )),
            _ => None,
        };
        let prefix = prefix.unwrap_or_default();

        if verbose {
            writeln!(
                buf,
                "{} {:<5} {}{}",
                chrono::Local::now()
                    .format("%H:%M:%S%.3f")
                    .if_supports_color(Stdout, |t| t.dimmed()),
                record.level(),
                prefix,
                record.args()
            )
        } else {
            writeln!(buf, "{}{}", prefix, record.args())
        }
    });

    match logfile {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                CliError::config(format!("Cannot open log file {}: {}", path.display(), e))
            })?;
            builder.target(Target::Pipe(Box::new(TeeWriter { file })));
        }
        None => {
            builder.target(Target::Stdout);
        }
    }

    builder
        .try_init()
        .map_err(|e| CliError::other(format!("Logger already initialized: {}", e)))
}
