//! Compilation of parsed traces into replay programs.
//!
//! This module transforms trace events into:
//! - An ordered list of statements (invoke / advance time)
//! - The fixed scaffolding of the Foundry test contract

pub mod scaffold;
pub mod sequence;

// Re-export main types and functions
pub use scaffold::{footer_lines, header_lines};
pub use sequence::{compile, CompiledProgram, Statement, Step};
