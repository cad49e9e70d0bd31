//! Small helpers shared across CLI tests.
//!
//! The tests write small distance and metadata tables into a temporary
//! directory and run the command against them.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use super::super::commands::run_command;
use super::super::{CliError, RunCommand};

pub(super) const TRIANGLE: &str = "ID1,ID2,Distance\nA,B,0.0001\nB,C,0.0002\nA,C,0.0005\n";

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

pub(super) fn create_file(dir: &TempDir, name: &str, contents: &str) -> io::Result<PathBuf> {
    let path = dir.path().join(name);
    let mut file = File::create(&path)?;
    file.write_all(contents.as_bytes())?;
    Ok(path)
}

/// Metadata table with `count` rows for each listed cluster.
pub(super) fn metadata(cases: &[(&str, usize)]) -> String {
    let mut table = String::from("label,date,region,lineage,host\n");
    let mut sequence = 0;
    for (cluster, count) in cases {
        for _ in 0..*count {
            sequence += 1;
            table.push_str(&format!("seq{sequence}|{cluster}|2020,2020-01-01,r,l,h\n"));
        }
    }
    table
}

/// `run` options with default flags over files in `dir`.
pub(super) fn command(dir: &TempDir, distances: &Path, metadata: &Path) -> RunCommand {
    RunCommand {
        distances: distances.to_path_buf(),
        metadata: metadata.to_path_buf(),
        out_dir: dir.path().join("mst"),
        degree_threshold: 15,
        no_prune: false,
        width_divisor: 10.0,
        length_unit: 0.0001,
        allow_disconnected: false,
        strict_references: false,
        label_delimiter: '|',
        label_segment: 1,
    }
}

pub(super) fn run_command_expecting_error(cmd: &RunCommand, panic_msg: &str) -> CliError {
    match run_command(cmd) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}

pub(super) fn read(path: &Path) -> String {
    match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => panic!("failed to read {}: {err}", path.display()),
    }
}
