//! Trace parsing.
//!
//! This module handles:
//! - Classifying raw trace lines
//! - Tokenizing and parsing call and wait lines
//! - Normalizing struct-shaped tuple arguments
//! - Summarizing parsed traces

pub mod classify;
pub mod lexer;
pub mod line;
pub mod schema;
pub mod summary;
pub mod trace;
pub mod tuple;

// Re-export main types
pub use classify::{classify, LineKind};
pub use line::{parse_call, parse_wait};
pub use schema::{
    Argument, ArgumentToken, CallEvent, ParsedTrace, RawLine, Scalar, SourcedEvent, TraceEvent,
};
pub use summary::{summarize, TraceSummary};
pub use trace::parse_trace;
pub use tuple::{normalize_arguments, normalize_tuple, wraps_struct};
