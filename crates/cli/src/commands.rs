//! Clap command definition.

use clap::{Arg, ArgAction, Command};

/// Default forum dump path
pub const DEFAULT_STORE: &str = "forum.json";

/// Build the CLI command.
pub fn build_cli() -> Command {
    Command::new("recat")
        .about("Run a category rearrangement plan against a forum dump")
        .arg(
            Arg::new("plan")
                .help("YAML rearrangement plan")
                .value_name("PLAN")
                .required(true),
        )
        .arg(
            Arg::new("store")
                .long("store")
                .help("Forum dump to rearrange (default: forum.json)")
                .value_name("DUMP")
                .default_value(DEFAULT_STORE),
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .help("Run the plan but do not write the dump back")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("check")
                .long("check")
                .help("Only parse and validate the plan")
                .action(ArgAction::SetTrue)
                .conflicts_with("dry-run"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("JSON summary output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Debug logging")
                .action(ArgAction::SetTrue)
                .conflicts_with("quiet"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Only warnings and errors")
                .action(ArgAction::SetTrue),
        )
}
