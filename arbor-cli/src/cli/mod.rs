//! Command-line interface orchestration for arbor.
//!
//! The `run` command reads a distance table and a metadata table, builds the
//! pruned transmission forest and writes `mst.dot` plus one edge list per
//! component into the output directory.

mod commands;

pub use commands::{
    Cli, CliError, Command, DEFAULT_DISTANCES, DEFAULT_METADATA, DEFAULT_OUT_DIR,
    ExecutionSummary, RunCommand, render_summary, run_cli,
};
