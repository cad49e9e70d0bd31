//! Text projections of a transmission forest.
//!
//! Two artefacts are produced: a Graphviz `digraph` with node widths derived
//! from case counts and edge lengths derived from distances, and one
//! `parent,child,dist` edge list per component, written with [`csv`].
//!
//! Floats use Rust's shortest round-trip formatting, so whole values keep a
//! decimal point (`1.0`, `20000.0`). Values below `1e-4` switch to exponent
//! form without zero padding: `1e-5`, not `1e-05`. Graphviz reads both.
//! Cluster ids are double-quoted in the dot output with embedded `"`
//! escaped as `\"`.

use std::io::{self, Write};

use crate::{
    cases::CaseCounts,
    components::Component,
    graph::DistanceGraph,
    id::{ClusterId, NodeIndex},
    prune::PrunedForest,
};

/// Header row of every component edge list.
pub const EDGE_LIST_HEADER: [&str; 3] = ["parent", "child", "dist"];

/// Scale factors applied when rendering.
///
/// # Examples
/// ```
/// use arbor_core::RenderScale;
///
/// let scale = RenderScale::default();
/// assert_eq!(scale.node_width(100), 1.0);
/// assert_eq!(scale.edge_length(0.0002), 2.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderScale {
    width_divisor: f64,
    length_unit: f64,
}

impl RenderScale {
    /// Divisor applied to `sqrt(cases)` in the reference configuration.
    pub const DEFAULT_WIDTH_DIVISOR: f64 = 10.0;
    /// Distance mapped to one rendering length unit in the reference configuration.
    pub const DEFAULT_LENGTH_UNIT: f64 = 0.0001;

    pub(crate) const fn new(width_divisor: f64, length_unit: f64) -> Self {
        Self {
            width_divisor,
            length_unit,
        }
    }

    /// Divisor applied to the square root of a case count.
    #[must_use]
    #[rustfmt::skip]
    pub fn width_divisor(&self) -> f64 { self.width_divisor }

    /// Distance that renders as one length unit.
    #[must_use]
    #[rustfmt::skip]
    pub fn length_unit(&self) -> f64 { self.length_unit }

    /// Node width for a cluster with `cases` cases: `sqrt(cases) / divisor`.
    #[must_use]
    pub fn node_width(&self, cases: usize) -> f64 {
        (cases as f64).sqrt() / self.width_divisor
    }

    /// Edge length for `distance`: `distance / unit`.
    #[must_use]
    pub fn edge_length(&self, distance: f64) -> f64 {
        distance / self.length_unit
    }
}

impl Default for RenderScale {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WIDTH_DIVISOR, Self::DEFAULT_LENGTH_UNIT)
    }
}

/// Dot string body for `id`: only `"` needs escaping inside a quoted id.
fn dot_id(id: &ClusterId) -> String {
    id.as_str().replace('"', "\\\"")
}

fn name(graph: &DistanceGraph, node: NodeIndex) -> io::Result<&ClusterId> {
    graph.node(node).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("node index {node} is not part of the distance graph"),
        )
    })
}

/// Writes the Graphviz description of `forest`.
///
/// Every cluster with at least one case gets a `width` declaration; every
/// surviving edge gets a `len` declaration.
///
/// # Errors
/// Returns [`io::Error`] when writing fails or when `forest` references a
/// node outside `graph`.
///
/// # Examples
/// ```
/// use arbor_core::{
///     CaseCounts, CaseRecord, DegreeThreshold, DistanceGraph, DistanceRow, RenderScale,
///     SpanningTree, UnknownReferencePolicy, kruskal, prune, rooted_traversal, write_dot,
/// };
///
/// let graph = DistanceGraph::from_rows([DistanceRow::new("A", "B", 0.0002)])?;
/// let counts = CaseCounts::tally(
///     &graph,
///     (0..100).map(|line| CaseRecord::new(line + 2, "A")),
///     UnknownReferencePolicy::Skip,
/// )?;
/// let tree = SpanningTree::from_forest(&kruskal(&graph)?);
/// let forest = prune(&tree, &rooted_traversal(&tree, 0), DegreeThreshold::default());
///
/// let mut out = Vec::new();
/// write_dot(&mut out, &graph, &counts, &forest, &RenderScale::default())?;
/// assert_eq!(
///     String::from_utf8(out)?,
///     "digraph {\nrankdir=LR;\n  \"A\" [width=1.0];\n  \"A\"->\"B\" [len=2.0];\n}\n"
/// );
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn write_dot(
    mut writer: impl Write,
    graph: &DistanceGraph,
    counts: &CaseCounts,
    forest: &PrunedForest,
    scale: &RenderScale,
) -> io::Result<()> {
    writeln!(writer, "digraph {{")?;
    writeln!(writer, "rankdir=LR;")?;
    for (node, cases) in counts.counted() {
        let id = dot_id(name(graph, node)?);
        writeln!(writer, "  \"{id}\" [width={:?}];", scale.node_width(cases))?;
    }
    for edge in forest.edges() {
        let parent = dot_id(name(graph, edge.parent)?);
        let child = dot_id(name(graph, edge.child)?);
        writeln!(
            writer,
            "  \"{parent}\"->\"{child}\" [len={:?}];",
            scale.edge_length(edge.distance)
        )?;
    }
    writeln!(writer, "}}")
}

/// Writes the `parent,child,dist` edge list of one component.
///
/// Distances are the unscaled spanning-tree weights. Ids containing a comma
/// or quote are quoted by the CSV writer.
///
/// # Errors
/// Returns [`io::Error`] when writing fails or when `component` references a
/// node outside `graph`.
pub fn write_edge_list(
    writer: impl Write,
    graph: &DistanceGraph,
    component: &Component,
) -> io::Result<()> {
    let mut out = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);
    out.write_record(EDGE_LIST_HEADER)?;
    for edge in component.edges() {
        let parent = name(graph, edge.parent)?;
        let child = name(graph, edge.child)?;
        let distance = format!("{:?}", edge.distance);
        out.write_record([parent.as_str(), child.as_str(), distance.as_str()])?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    use crate::cases::{CaseRecord, UnknownReferencePolicy};
    use crate::components::weakly_connected_components;
    use crate::graph::DistanceRow;
    use crate::mst::kruskal;
    use crate::prune::{DegreeThreshold, DirectedEdge, prune};
    use crate::traversal::rooted_traversal;
    use crate::tree::SpanningTree;

    #[rstest]
    #[case(0, 0.0)]
    #[case(1, 0.1)]
    #[case(100, 1.0)]
    #[case(400, 2.0)]
    fn node_width_is_sqrt_over_divisor(#[case] cases: usize, #[case] expected: f64) {
        let width = RenderScale::default().node_width(cases);
        assert!((width - expected).abs() < 1e-12, "{width} != {expected}");
    }

    #[rstest]
    #[case(0.0002, 2.0)]
    #[case(0.0, 0.0)]
    #[case(0.015, 150.0)]
    fn edge_length_scales_by_unit(#[case] distance: f64, #[case] expected: f64) {
        let length = RenderScale::default().edge_length(distance);
        assert!((length - expected).abs() < 1e-9, "{length} != {expected}");
    }

    fn triangle() -> (DistanceGraph, CaseCounts, PrunedForest) {
        let graph = DistanceGraph::from_rows([
            DistanceRow::new("A", "B", 1.0),
            DistanceRow::new("B", "C", 2.0),
            DistanceRow::new("A", "C", 5.0),
        ])
        .expect("triangle is valid");
        let mut records: Vec<CaseRecord> =
            (0..4).map(|line| CaseRecord::new(line + 2, "A")).collect();
        records.push(CaseRecord::new(6, "C"));
        let counts = CaseCounts::tally(&graph, records, UnknownReferencePolicy::Skip)
            .expect("tally succeeds");
        let tree = SpanningTree::from_forest(&kruskal(&graph).expect("MST must succeed"));
        let forest = prune(&tree, &rooted_traversal(&tree, 0), DegreeThreshold::default());
        (graph, counts, forest)
    }

    #[test]
    fn dot_lists_counted_nodes_then_edges() {
        let (graph, counts, forest) = triangle();
        let scale = RenderScale::new(10.0, 1.0);
        let mut out = Vec::new();
        write_dot(&mut out, &graph, &counts, &forest, &scale).expect("write succeeds");
        let text = String::from_utf8(out).expect("dot output is UTF-8");
        assert_eq!(
            text,
            "digraph {\n\
             rankdir=LR;\n  \
             \"A\" [width=0.2];\n  \
             \"C\" [width=0.1];\n  \
             \"A\"->\"B\" [len=1.0];\n  \
             \"B\"->\"C\" [len=2.0];\n\
             }\n"
        );
    }

    #[test]
    fn edge_list_keeps_unscaled_distances() {
        let (graph, _, forest) = triangle();
        let components = weakly_connected_components(&forest, graph.node_count());
        let mut out = Vec::new();
        write_edge_list(&mut out, &graph, &components[0]).expect("write succeeds");
        assert_eq!(
            String::from_utf8(out).expect("edge list is UTF-8"),
            "parent,child,dist\nA,B,1.0\nB,C,2.0\n"
        );
    }

    #[test]
    fn quotes_in_ids_are_escaped_in_dot() {
        let graph = DistanceGraph::from_rows([DistanceRow::new("say \"hi\"", "plain", 0.0001)])
            .expect("row is valid");
        let counts = CaseCounts::tally(
            &graph,
            [CaseRecord::new(2, "say \"hi\"")],
            UnknownReferencePolicy::Skip,
        )
        .expect("tally succeeds");
        let tree = SpanningTree::from_forest(&kruskal(&graph).expect("MST must succeed"));
        let forest = prune(&tree, &rooted_traversal(&tree, 0), DegreeThreshold::default());
        let mut out = Vec::new();
        write_dot(&mut out, &graph, &counts, &forest, &RenderScale::default())
            .expect("write succeeds");
        assert_eq!(
            String::from_utf8(out).expect("dot output is UTF-8"),
            "digraph {\n\
             rankdir=LR;\n  \
             \"say \\\"hi\\\"\" [width=0.1];\n  \
             \"say \\\"hi\\\"\"->\"plain\" [len=1.0];\n\
             }\n"
        );
    }

    #[test]
    fn small_distances_use_unpadded_exponents() {
        let graph = DistanceGraph::from_rows([
            DistanceRow::new("A", "B", 0.00001),
            DistanceRow::new("B", "C", 0.0001),
        ])
        .expect("rows are valid");
        let tree = SpanningTree::from_forest(&kruskal(&graph).expect("MST must succeed"));
        let forest = prune(&tree, &rooted_traversal(&tree, 0), DegreeThreshold::default());
        let components = weakly_connected_components(&forest, graph.node_count());
        let mut out = Vec::new();
        write_edge_list(&mut out, &graph, &components[0]).expect("write succeeds");
        assert_eq!(
            String::from_utf8(out).expect("edge list is UTF-8"),
            "parent,child,dist\nA,B,1e-5\nB,C,0.0001\n"
        );
    }

    #[test]
    fn edge_list_quotes_ids_with_commas() {
        let graph = DistanceGraph::from_rows([DistanceRow::new("A,1", "B", 0.5)])
            .expect("row is valid");
        let tree = SpanningTree::from_forest(&kruskal(&graph).expect("MST must succeed"));
        let forest = prune(&tree, &rooted_traversal(&tree, 0), DegreeThreshold::default());
        let components = weakly_connected_components(&forest, graph.node_count());
        let mut out = Vec::new();
        write_edge_list(&mut out, &graph, &components[0]).expect("write succeeds");
        assert_eq!(
            String::from_utf8(out).expect("edge list is UTF-8"),
            "parent,child,dist\n\"A,1\",B,0.5\n"
        );
    }

    #[test]
    fn unknown_nodes_are_reported() {
        let graph = DistanceGraph::new();
        let forest: PrunedForest = [DirectedEdge {
            parent: 0,
            child: 1,
            distance: 0.1,
        }]
        .into_iter()
        .collect();
        let err = write_dot(
            Vec::new(),
            &graph,
            &CaseCounts::default(),
            &forest,
            &RenderScale::default(),
        )
        .expect_err("unknown nodes must fail");
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
