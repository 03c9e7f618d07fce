//! Result reporting
//!
//! Text output goes to stdout; JSON and CSV reports are written to the paths
//! the output configuration names.

pub mod csv;
pub mod json;
pub mod text;
