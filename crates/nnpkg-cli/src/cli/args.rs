//! Shared argument builders for CLI commands.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Graph document (positional). `-` reads stdin.
pub fn graph_path_arg() -> Arg {
    Arg::new("graph_path")
        .value_name("GRAPH")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Graph document in JSON, or - for stdin")
}

/// Data type limits (--limits).
pub fn limits_arg() -> Arg {
    Arg::new("limits_path")
        .long("limits")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Data type limits in JSON (baseline table if omitted)")
}

/// Working directory for the package (-o/--out).
pub fn out_arg() -> Arg {
    Arg::new("out_dir")
        .short('o')
        .long("out")
        .value_name("DIR")
        .default_value(".")
        .value_parser(value_parser!(PathBuf))
        .help("Directory the package is created in")
}

/// Weight file to inspect (positional).
pub fn weights_path_arg() -> Arg {
    Arg::new("weights_path")
        .value_name("FILE")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Weight file, usually Data/weights/weights.bin")
}

/// Print blob contents as hex (--bytes).
pub fn bytes_arg() -> Arg {
    Arg::new("bytes")
        .long("bytes")
        .action(ArgAction::SetTrue)
        .help("Also print the first bytes of each blob")
}

/// Log verbosity (-v, repeatable).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .long("verbose")
        .action(ArgAction::Count)
        .global(true)
        .help("Increase log verbosity (-v info, -vv debug, -vvv trace)")
}
