use std::path::PathBuf;

use nnpkg_compiler::GraphCompiler;

use super::graph_loader::{load_graph, load_limits};

pub struct CompileArgs {
    pub graph_path: PathBuf,
    pub limits_path: Option<PathBuf>,
    pub out_dir: PathBuf,
}

pub fn run(args: CompileArgs) {
    let doc = match load_graph(&args.graph_path) {
        Ok(doc) => doc,
        Err(msg) => fail(&msg),
    };
    let limits = match load_limits(args.limits_path.as_deref()) {
        Ok(limits) => limits,
        Err(msg) => fail(&msg),
    };

    tracing::info!(
        operands = doc.graph.operands.len(),
        operations = doc.graph.operations.len(),
        constants = doc.constants.len(),
        "compiling graph"
    );
    let compiler = GraphCompiler::new(&doc.graph, &limits, &doc.constants);
    match compiler.compile(&args.out_dir) {
        Ok(package) => println!("{}", package.package_dir().display()),
        Err(e) => fail(&e.to_string()),
    }
}

fn fail(msg: &str) -> ! {
    eprintln!("error: {}", msg);
    std::process::exit(1);
}
