//! LogChecker - driver duty-status timeline tool
//!
//! Main entry point for the command-line application.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use chrono::NaiveDate;
use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use logchecker_domain::Config;
use logchecker_infra::config;
use logchecker_lib::utils::logging::init_tracing;
use logchecker_lib::{
    edit_timeline, list_drivers, merge_by_position, show_timeline, AppContext, EditOp, EditRequest,
    ShowRequest,
};
use serde::Serialize;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "logchecker", version, about = "Review and correct driver duty-status logs")]
struct Cli {
    /// Config file (JSON or TOML); otherwise environment, then probed files.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Grid UTC offset such as +05:45, overriding configuration.
    #[arg(long, global = true, allow_hyphen_values = true)]
    offset: Option<String>,
    /// Print JSON instead of text.
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List known drivers.
    Drivers,
    /// Show a driver's duty grid.
    Show {
        #[arg(long)]
        driver: String,
        #[arg(long)]
        start: Option<NaiveDate>,
        #[arg(long)]
        end: Option<NaiveDate>,
    },
    /// Edit a driver's duty grid and save the changes.
    Edit {
        #[arg(long)]
        driver: String,
        #[arg(long)]
        start: Option<NaiveDate>,
        #[arg(long)]
        end: Option<NaiveDate>,
        /// Toggle one slot, as DATE:INDEX (slot 0 is 00:00, 95 is 23:45).
        #[arg(long = "toggle", value_name = "DATE:INDEX")]
        toggles: Vec<EditOp>,
        /// Paint a slot range with the state of its first slot, as
        /// DATE:FROM-TO.
        #[arg(long = "paint", value_name = "DATE:FROM-TO")]
        paints: Vec<EditOp>,
        /// Compute the change events without submitting them.
        #[arg(long)]
        dry_run: bool,
    },
}

fn load_config(cli: &Cli) -> (Config, Option<String>) {
    let loaded = match &cli.config {
        Some(path) => config::load_from_file(Some(path.clone())),
        None => config::load(),
    };
    let (mut config, fallback_reason) = match loaded {
        Ok(config) => (config, None),
        Err(err) => (Config::default(), Some(err.to_string())),
    };
    if let Some(offset) = &cli.offset {
        config.grid.utc_offset = Some(offset.clone());
    }
    (config, fallback_reason)
}

/// `--toggle` and `--paint` values in the order they were typed.
fn ordered_edits(edit: Option<&ArgMatches>, toggles: Vec<EditOp>, paints: Vec<EditOp>) -> Vec<EditOp> {
    let positions = |id: &str| -> Vec<usize> {
        edit.and_then(|m| m.indices_of(id)).map(Iterator::collect).unwrap_or_default()
    };
    merge_by_position(
        positions("toggles").into_iter().zip(toggles),
        positions("paints").into_iter().zip(paints),
    )
}

fn emit<T: Serialize + std::fmt::Display>(value: &T, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{value}");
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let dotenv = dotenvy::dotenv();
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let (config, fallback_reason) = load_config(&cli);
    init_tracing(&config.logging.filter);

    match dotenv {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(e) => tracing::debug!(error = %e, "no .env file loaded"),
    }
    if let Some(reason) = fallback_reason {
        if let Some(path) = &cli.config {
            anyhow::bail!("failed to load {}: {reason}", path.display());
        }
        warn!(reason = %reason, "using default configuration");
    }

    let ctx = AppContext::new(config).context("failed to initialise application context")?;

    match cli.command {
        Command::Drivers => {
            let drivers = list_drivers(&ctx).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&drivers)?);
            } else {
                for driver in drivers {
                    let status = if driver.is_active { "" } else { "  (inactive)" };
                    println!(
                        "{:>5}  {:<24} {}{}",
                        driver.id, driver.name, driver.license_number, status
                    );
                }
            }
        }
        Command::Show { driver, start, end } => {
            let range = ctx.resolve_range(start, end)?;
            let report = show_timeline(&ctx, ShowRequest { driver, range }).await?;
            emit(&report, cli.json)?;
        }
        Command::Edit { driver, start, end, toggles, paints, dry_run } => {
            let range = ctx.resolve_range(start, end)?;
            let edits = ordered_edits(matches.subcommand_matches("edit"), toggles, paints);
            let report = edit_timeline(&ctx, EditRequest { driver, range, edits, dry_run }).await?;
            emit(&report, cli.json)?;
        }
    }

    Ok(())
}
