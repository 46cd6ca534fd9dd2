//! TSDB Nodes - Query AST node model and traversal engine for a lightweight
//! time-series database implemented in Rust
//!
//! This crate provides the query node catalog, node construction with
//! validation, and the generic walk/rewrite machinery that analysis and
//! planning passes are built on.

pub mod ast;
pub mod core;
pub mod traverse;
pub mod visitor;
