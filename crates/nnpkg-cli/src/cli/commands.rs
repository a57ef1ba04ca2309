//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("nnpkg")
        .about("Compile neural-network graphs into model packages")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(verbose_arg())
        .subcommand(compile_command())
        .subcommand(dump_command())
        .subcommand(weights_command())
}

/// Lower a graph and write the package.
pub fn compile_command() -> Command {
    Command::new("compile")
        .about("Compile a graph into an .mlpackage directory")
        .override_usage(
            "\
  nnpkg compile <GRAPH> [--limits FILE] [-o DIR]
  nnpkg compile - < graph.json",
        )
        .after_help(
            r#"EXAMPLES:
  nnpkg compile graph.json                    # package in the current dir
  nnpkg compile graph.json -o /tmp/models     # package under /tmp/models
  nnpkg compile graph.json --limits gpu.json  # custom data type limits
  NNPKG_LOG=debug nnpkg compile graph.json    # lowering diagnostics"#,
        )
        .arg(graph_path_arg())
        .arg(limits_arg())
        .arg(out_arg())
}

/// Lower a graph and print the program.
pub fn dump_command() -> Command {
    Command::new("dump")
        .about("Print the lowered program without writing anything")
        .override_usage("  nnpkg dump <GRAPH> [--limits FILE]")
        .after_help(
            r#"EXAMPLES:
  nnpkg dump graph.json
  nnpkg dump graph.json --limits gpu.json"#,
        )
        .arg(graph_path_arg())
        .arg(limits_arg())
}

/// List the records of a weight file.
pub fn weights_command() -> Command {
    Command::new("weights")
        .about("List the records of a weight file")
        .override_usage("  nnpkg weights <FILE> [--bytes]")
        .after_help(
            r#"EXAMPLES:
  nnpkg weights model.mlpackage/Data/weights/weights.bin
  nnpkg weights weights.bin --bytes"#,
        )
        .arg(weights_path_arg())
        .arg(bytes_arg())
}
