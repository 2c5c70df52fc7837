//! recat CLI: run a category rearrangement plan against a forum dump.
//!
//! ```text
//! recat [--store forum.json] [--dry-run | --check] [-v | -q] [--json] PLAN
//! ```
//!
//! Logs go to stderr, the summary to stdout. Exits 0 on success and 1 on
//! any failure, including a plan that fails to parse.

mod commands;
mod format;

use std::process;
use std::sync::Arc;

use anyhow::Context;
use tracing::Level;

use recat_executor::{Plan, Rearrangement};
use recat_storage::MemoryForum;

use commands::build_cli;
use format::{format_error, format_summary, OutputMode, Summary};

fn main() {
    let matches = build_cli().get_matches();

    init_logging(&matches);

    let mode = if matches.get_flag("json") {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    match run(&matches) {
        Ok(summary) => println!("{}", format_summary(&summary, mode)),
        Err(e) => {
            eprintln!("{}", format_error(&e, mode));
            process::exit(1);
        }
    }
}

fn init_logging(matches: &clap::ArgMatches) {
    let level = if matches.get_flag("verbose") {
        Level::DEBUG
    } else if matches.get_flag("quiet") {
        Level::WARN
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(matches: &clap::ArgMatches) -> anyhow::Result<Summary> {
    let plan_path = matches
        .get_one::<String>("plan")
        .context("missing PLAN argument")?;
    let plan = Plan::load(plan_path).with_context(|| format!("loading plan {}", plan_path))?;

    if matches.get_flag("check") {
        return Ok(Summary::checked(&plan));
    }

    let store = matches
        .get_one::<String>("store")
        .context("missing --store value")?;
    let forum =
        Arc::new(MemoryForum::open(store).with_context(|| format!("opening forum {}", store))?);

    let operations = plan.len();
    let report = Rearrangement::run(forum.clone(), plan).context("rearrangement failed")?;

    let saved = !matches.get_flag("dry-run");
    if saved {
        forum
            .save(store)
            .with_context(|| format!("saving forum {}", store))?;
    } else {
        tracing::info!(target: "recat::store", path = %store, "Dry run, dump left untouched");
    }

    Ok(Summary::Finished {
        operations,
        report,
        saved,
    })
}
