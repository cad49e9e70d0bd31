//! Command implementations and argument parsing for the arbor CLI.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use arbor_core::{
    Arbor, ArborBuilder, ArborError, DegreeThreshold, DisconnectedPolicy, DistanceGraph,
    RenderScale, RunSummary, TransmissionForest, UnknownReferencePolicy, write_edge_list,
};
use arbor_providers_tables::{DistanceTable, LabelFormat, MetadataTable, TableError};
use clap::{Args, Parser, Subcommand};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

/// Default location of the pairwise distance table.
pub const DEFAULT_DISTANCES: &str = "data/clusters.tn93.csv";
/// Default location of the case metadata table.
pub const DEFAULT_METADATA: &str = "data/clusters.info.csv";
/// Default output directory.
pub const DEFAULT_OUT_DIR: &str = "mst";

const DOT_FILE: &str = "mst.dot";

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "arbor",
    about = "Build pruned minimum spanning transmission trees from cluster distances."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Build the transmission forest and write its dot and edge-list files.
    Run(RunCommand),
}

/// Options accepted by the `run` command.
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Distance table with an `id1,id2,distance` layout.
    #[arg(long, default_value = DEFAULT_DISTANCES)]
    pub distances: PathBuf,

    /// Five-column metadata table whose label field embeds the cluster id.
    #[arg(long, default_value = DEFAULT_METADATA)]
    pub metadata: PathBuf,

    /// Directory receiving `mst.dot` and the component edge lists.
    #[arg(long = "out-dir", default_value = DEFAULT_OUT_DIR)]
    pub out_dir: PathBuf,

    /// Children whose spanning-tree degree exceeds this lose their incoming edge.
    #[arg(
        long = "degree-threshold",
        default_value_t = DegreeThreshold::DEFAULT_MAX_DEGREE,
        value_parser = clap::value_parser!(usize),
    )]
    pub degree_threshold: usize,

    /// Keep every traversal edge regardless of degree.
    #[arg(long = "no-prune", conflicts_with = "degree_threshold")]
    pub no_prune: bool,

    /// Divisor applied to `sqrt(cases)` for node widths.
    #[arg(long = "width-divisor", default_value_t = RenderScale::DEFAULT_WIDTH_DIVISOR)]
    pub width_divisor: f64,

    /// Distance rendered as one unit of edge length.
    #[arg(long = "length-unit", default_value_t = RenderScale::DEFAULT_LENGTH_UNIT)]
    pub length_unit: f64,

    /// Root every connected piece separately instead of failing.
    #[arg(long = "allow-disconnected")]
    pub allow_disconnected: bool,

    /// Fail on metadata rows naming clusters absent from the distance table.
    #[arg(long = "strict-references")]
    pub strict_references: bool,

    /// Separator between segments of the metadata label.
    #[arg(long = "label-delimiter", default_value_t = '|')]
    pub label_delimiter: char,

    /// 0-based label segment holding the cluster id.
    #[arg(long = "label-segment", default_value_t = 1)]
    pub label_segment: usize,
}

impl RunCommand {
    fn threshold(&self) -> DegreeThreshold {
        if self.no_prune {
            DegreeThreshold::Unbounded
        } else {
            DegreeThreshold::Max(self.degree_threshold)
        }
    }

    fn label_format(&self) -> LabelFormat {
        LabelFormat {
            delimiter: self.label_delimiter,
            segment: self.label_segment,
            ..LabelFormat::default()
        }
    }

    fn arbor(&self) -> Result<Arbor, ArborError> {
        let disconnected = if self.allow_disconnected {
            DisconnectedPolicy::PerComponent
        } else {
            DisconnectedPolicy::Reject
        };
        let references = if self.strict_references {
            UnknownReferencePolicy::Reject
        } else {
            UnknownReferencePolicy::Skip
        };
        ArborBuilder::new()
            .with_degree_threshold(self.threshold())
            .with_width_divisor(self.width_divisor)
            .with_length_unit(self.length_unit)
            .with_disconnected_policy(disconnected)
            .with_unknown_reference_policy(references)
            .build()
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Creating or writing an output file failed.
    #[error("failed to write `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// An input table could not be read.
    #[error("failed to read `{path}`: {source}")]
    Table {
        /// Table that failed.
        path: PathBuf,
        /// Reader failure.
        #[source]
        source: TableError,
    },
    /// Core pipeline failed.
    #[error(transparent)]
    Core(#[from] ArborError),
}

/// Outcome of a `run` command.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// Run statistics.
    pub run: RunSummary,
    /// Path of the written dot file.
    pub dot: PathBuf,
    /// Paths of the written component edge lists, in component order.
    pub edge_lists: Vec<PathBuf>,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when reading, computing or writing fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use clap::Parser;
/// # use arbor_cli::cli::{Cli, run_cli};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let dir = tempfile::tempdir()?;
/// let distances = dir.path().join("d.csv");
/// let metadata = dir.path().join("m.csv");
/// std::fs::write(&distances, "id1,id2,d\nA,B,0.01\n")?;
/// std::fs::write(&metadata, "label,a,b,c,d\ns|A|x,1,2,3,4\n")?;
/// let out_dir = dir.path().join("out");
/// let cli = Cli::try_parse_from([
///     "arbor".to_owned(),
///     "run".to_owned(),
///     format!("--distances={}", distances.display()),
///     format!("--metadata={}", metadata.display()),
///     format!("--out-dir={}", out_dir.display()),
/// ])?;
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.edge_lists.len(), 1);
/// # Ok(())
/// # }
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Run(run) => {
            Span::current().record("command", field::display("run"));
            run_command(&run)
        }
    }
}

#[instrument(
    name = "cli.execute",
    err,
    skip(command),
    fields(
        distances = %command.distances.display(),
        metadata = %command.metadata.display(),
        out_dir = %command.out_dir.display(),
    ),
)]
pub(super) fn run_command(command: &RunCommand) -> Result<ExecutionSummary, CliError> {
    let arbor = command.arbor()?;

    let graph = DistanceTable::try_from_path(&command.distances)
        .map_err(|source| table_error(&command.distances, source))?
        .into_graph()
        .map_err(ArborError::from)?;
    let records = MetadataTable::try_from_path(&command.metadata, command.label_format())
        .map_err(|source| table_error(&command.metadata, source))?
        .into_records();

    let forest = arbor.run(&graph, records)?;
    let summary = write_outputs(&command.out_dir, &graph, &forest)?;
    info!(
        components = summary.edge_lists.len(),
        out_dir = %command.out_dir.display(),
        "outputs written"
    );
    Ok(summary)
}

fn table_error(path: &Path, source: TableError) -> CliError {
    CliError::Table {
        path: path.to_path_buf(),
        source,
    }
}

pub(super) fn write_outputs(
    out_dir: &Path,
    graph: &DistanceGraph,
    forest: &TransmissionForest,
) -> Result<ExecutionSummary, CliError> {
    fs::create_dir_all(out_dir).map_err(|source| CliError::Io {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let dot = out_dir.join(DOT_FILE);
    write_file(&dot, |writer| forest.write_dot(writer, graph))?;

    let mut edge_lists = Vec::with_capacity(forest.components().len());
    for (index, component) in forest.components().iter().enumerate() {
        let path = out_dir.join(edge_list_name(index));
        write_file(&path, |writer| write_edge_list(writer, graph, component))?;
        edge_lists.push(path);
    }

    Ok(ExecutionSummary {
        run: forest.summary(graph),
        dot,
        edge_lists,
    })
}

pub(super) fn edge_list_name(index: usize) -> String {
    format!("component-{index}.edgelist.csv")
}

fn write_file(
    path: &Path,
    render: impl FnOnce(&mut BufWriter<File>) -> io::Result<()>,
) -> Result<(), CliError> {
    let wrap = |source: io::Error| CliError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = BufWriter::new(File::create(path).map_err(wrap)?);
    render(&mut writer).map_err(wrap)?;
    writer.flush().map_err(wrap)
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    let run = &summary.run;
    let roots: Vec<&str> = run.roots.iter().map(|root| root.as_str()).collect();
    writeln!(writer, "clusters: {}", run.nodes)?;
    writeln!(
        writer,
        "spanning edges: {} (total weight {})",
        run.mst_edges, run.mst_weight
    )?;
    writeln!(writer, "trees: {} (roots: {})", run.trees, roots.join(", "))?;
    writeln!(
        writer,
        "edges: {} kept, {} pruned",
        run.surviving_edges, run.pruned_edges
    )?;
    writeln!(
        writer,
        "cases: {} counted, {} detached, {} rows skipped",
        run.counted_cases, run.detached_cases, run.skipped_rows
    )?;
    writeln!(writer, "components: {}", run.components.len())?;
    for component in &run.components {
        writeln!(
            writer,
            "{}\t{} clusters\t{} edges\t{} cases",
            component.index, component.nodes, component.edges, component.cases
        )?;
    }
    writeln!(writer, "dot: {}", summary.dot.display())?;
    Ok(())
}
