//! Core module - Contains the fundamental data structures and utilities
//!
//! This module provides:
//! - Copy configuration (exclusions, path rewrite opt-outs)
//! - Error types
//! - Copy report model and rendering
//! - Path normalization utilities
//! - Byte-string utilities

pub mod config;
pub mod error;
pub mod model;
pub mod paths;
pub mod render;
pub mod util;
