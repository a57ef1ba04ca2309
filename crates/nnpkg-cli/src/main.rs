#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod cli;
mod commands;
mod logging;

use cli::{CompileParams, DumpParams, WeightsParams, build_cli, verbosity};

fn main() {
    let matches = build_cli().get_matches();
    logging::init(verbosity(&matches));

    match matches.subcommand() {
        Some(("compile", m)) => {
            let params = CompileParams::from_matches(m);
            commands::compile::run(params.into());
        }
        Some(("dump", m)) => {
            let params = DumpParams::from_matches(m);
            commands::dump::run(params.into());
        }
        Some(("weights", m)) => {
            let params = WeightsParams::from_matches(m);
            commands::weights::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}
