//! Arbor core library.
//!
//! Builds minimum spanning transmission trees over pairwise cluster
//! distances, prunes high-degree hubs and splits the result into components.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod arbor;
mod builder;
mod cases;
mod components;
mod error;
mod graph;
mod id;
mod mst;
mod prune;
mod render;
mod result;
mod summary;
mod traversal;
mod tree;
mod union_find;

pub use crate::{
    arbor::Arbor,
    builder::{ArborBuilder, DisconnectedPolicy},
    cases::{CaseCounts, CaseRecord, UnknownReferencePolicy},
    components::{Component, weakly_connected_components},
    error::{ArborError, ArborErrorCode, GraphError, GraphErrorCode, Result},
    graph::{DistanceGraph, DistanceRow, GraphEdge},
    id::{ClusterId, NodeIndex},
    mst::{MinimumSpanningForest, MstEdge, MstError, MstErrorCode, kruskal},
    prune::{DegreeThreshold, DirectedEdge, PrunedForest, prune},
    render::{EDGE_LIST_HEADER, RenderScale, write_dot, write_edge_list},
    result::TransmissionForest,
    summary::{ComponentSummary, RunSummary},
    traversal::{Visit, rooted_traversal},
    tree::{Neighbour, SpanningTree},
};
