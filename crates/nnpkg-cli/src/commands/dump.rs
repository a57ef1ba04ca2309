use std::path::PathBuf;

use nnpkg_compiler::GraphCompiler;
use nnpkg_format::dump::dump_model;

use super::graph_loader::{load_graph, load_limits};

pub struct DumpArgs {
    pub graph_path: PathBuf,
    pub limits_path: Option<PathBuf>,
}

pub fn run(args: DumpArgs) {
    let doc = match load_graph(&args.graph_path) {
        Ok(doc) => doc,
        Err(msg) => {
            eprintln!("error: {}", msg);
            std::process::exit(1);
        }
    };
    let limits = match load_limits(args.limits_path.as_deref()) {
        Ok(limits) => limits,
        Err(msg) => {
            eprintln!("error: {}", msg);
            std::process::exit(1);
        }
    };

    match GraphCompiler::new(&doc.graph, &limits, &doc.constants).build() {
        Ok(plan) => print!("{}", dump_model(&plan.model)),
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}
