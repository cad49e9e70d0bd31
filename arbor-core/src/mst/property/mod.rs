//! Property-based tests for the Kruskal MST implementation.
//!
//! Verifies the spanning forest against a brute-force oracle that enumerates
//! every edge subset of small graphs, and validates structural invariants
//! (acyclicity, connectivity, edge count) across weight distributions.

mod oracle;
mod strategies;
mod structural;
