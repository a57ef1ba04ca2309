//! Dispatch logic: extract params from ArgMatches and convert to command args.

use std::path::PathBuf;

use clap::ArgMatches;

use crate::commands::compile::CompileArgs;
use crate::commands::dump::DumpArgs;
use crate::commands::weights::WeightsArgs;

/// Number of `-v` flags given anywhere on the command line.
pub fn verbosity(m: &ArgMatches) -> u8 {
    let sub = m.subcommand().map_or(0, |(_, sm)| sm.get_count("verbose"));
    m.get_count("verbose").max(sub)
}

pub struct CompileParams {
    pub graph_path: PathBuf,
    pub limits_path: Option<PathBuf>,
    pub out_dir: PathBuf,
}

impl CompileParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            graph_path: required_path(m, "graph_path"),
            limits_path: m.get_one::<PathBuf>("limits_path").cloned(),
            out_dir: m
                .get_one::<PathBuf>("out_dir")
                .cloned()
                .unwrap_or_else(|| PathBuf::from(".")),
        }
    }
}

impl From<CompileParams> for CompileArgs {
    fn from(p: CompileParams) -> Self {
        Self {
            graph_path: p.graph_path,
            limits_path: p.limits_path,
            out_dir: p.out_dir,
        }
    }
}

pub struct DumpParams {
    pub graph_path: PathBuf,
    pub limits_path: Option<PathBuf>,
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            graph_path: required_path(m, "graph_path"),
            limits_path: m.get_one::<PathBuf>("limits_path").cloned(),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        Self {
            graph_path: p.graph_path,
            limits_path: p.limits_path,
        }
    }
}

pub struct WeightsParams {
    pub weights_path: PathBuf,
    pub bytes: bool,
}

impl WeightsParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            weights_path: required_path(m, "weights_path"),
            bytes: m.get_flag("bytes"),
        }
    }
}

impl From<WeightsParams> for WeightsArgs {
    fn from(p: WeightsParams) -> Self {
        Self {
            weights_path: p.weights_path,
            bytes: p.bytes,
        }
    }
}

// Positionals marked required; clap rejects the command line before we get here.
fn required_path(m: &ArgMatches, id: &str) -> PathBuf {
    m.get_one::<PathBuf>(id).cloned().unwrap_or_default()
}
