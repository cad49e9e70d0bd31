//! Benchmark support crate for arbor.
//!
//! Provides seeded synthetic distance tables and metadata used by the
//! Criterion benchmarks for the spanning-tree and full pipeline stages.

pub mod params;
pub mod source;
