//! Engine module - The copy-and-rewrite engine
//!
//! Provides:
//! - resolver: relative path fragments to absolute paths
//! - rewrite: project name substitution in names and contents
//! - copier: tree traversal and per-file streaming copy

pub mod copier;
pub mod resolver;
pub mod rewrite;
