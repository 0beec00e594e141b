//! Deterministic JSON serialization for exported bundles.
//!
//! Keeps exported files diff-friendly by:
//! - Sorting object keys alphabetically (via `BTreeMap` in source types)
//! - Using 2-space indentation
//! - Adding trailing newline

mod json;

pub use json::*;
