//! CLI interface for gravseq.
//!
//! Each subcommand is non-interactive: arguments in, files and text out.
//!
//! - `gravseq plan <block.toml>` — plan an observing block and write it.
//! - `gravseq predict <companion>` — where a companion is at a given time.
//! - `gravseq list` — companions the orbit catalog knows.
//! - `gravseq send <file> <host>` — copy a written plan to the workstation.
//!
//! Times are an MJD, `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM:SS` (UTC) or RFC 3339.
//! Without `--time`, now is used.

mod format;
mod orbit;
mod plan;
mod send;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use jiff::Timestamp;

use crate::{config::Settings, epoch};

/// gravseq — plan companion observing sequences.
#[derive(Debug, Parser)]
#[command(name = "gravseq", version, after_long_help = WORKFLOW_HELP)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

const WORKFLOW_HELP: &str = r#"Workflow: observing a companion
  1. gravseq list
     → companions with a known orbit
  2. gravseq predict hr8799e --time 2019-09-10T03:00:00
  3. gravseq plan hr8799.toml --time 2019-09-10T03:00:00
     → prints the templates and writes OBs/HR8799.json
  4. gravseq send OBs/HR8799.json wgv"#;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Plan an observing block and write its templates.
    ///
    /// Prints the templates to stdout and the time estimate to stderr.
    Plan {
        /// Observing block file (TOML, with [observation] and [sequence] tables).
        block: PathBuf,

        /// Observation time.
        #[arg(short, long)]
        time: Option<String>,

        /// Directory to write the plan into (default from settings: `OBs`).
        #[arg(long)]
        out: Option<PathBuf>,

        /// Orbit catalog directory.
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Copy the written plan to this host.
        #[arg(long)]
        send: Option<String>,
    },

    /// Predict where a companion is relative to its star.
    ///
    /// Lists the supported companions when none is given.
    Predict {
        /// Companion name, no spaces (e.g. `hr8799e`).
        companion: Option<String>,

        /// Observation time.
        #[arg(short, long)]
        time: Option<String>,

        /// Orbit catalog directory.
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// List the companions the catalog supports.
    List {
        /// Orbit catalog directory.
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Copy a written plan to the instrument workstation.
    Send {
        /// Plan file.
        file: PathBuf,

        /// Destination host, as scp understands it.
        host: String,
    },
}

/// Run the CLI, returning an error message on failure.
pub fn run(settings: &Settings) -> Result<(), String> {
    let cli = Cli::parse();

    match cli.command {
        Command::Plan {
            block,
            time,
            out,
            catalog,
            send,
        } => plan::cmd_plan(
            settings,
            &plan::PlanArgs {
                block,
                time,
                out,
                catalog,
                send,
            },
        ),
        Command::Predict {
            companion,
            time,
            catalog,
        } => match companion {
            Some(companion) => {
                orbit::cmd_predict(settings, &companion, time.as_deref(), catalog.as_deref())
            }
            None => {
                println!("No companion given. Supported companions:");
                orbit::cmd_list(settings, catalog.as_deref())
            }
        },
        Command::List { catalog } => orbit::cmd_list(settings, catalog.as_deref()),
        Command::Send { file, host } => send::cmd_send(settings, &file, &host),
    }
}

/// The observation time: parsed from `--time`, or now.
fn resolve_time(raw: Option<&str>) -> Result<Timestamp, String> {
    match raw {
        Some(raw) => epoch::parse(raw).map_err(|e| e.to_string()),
        None => Ok(Timestamp::now()),
    }
}
