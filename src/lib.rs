//! Echidna Replay
//!
//! Compiles Echidna call sequences into Foundry test contracts that replay
//! the failing sequence call by call, with the same time advances.
//!
//! This crate provides the core implementation for the
//! `echidna-replay` CLI tool.
//!
//! ## Getting Started
//!
//! ```bash
//! echidna-replay convert -i reproducer.txt -o test/Sequence.sol
//! echidna-replay inspect -i reproducer.txt
//! ```
//!
//! As a library:
//!
//! ```ignore
//! use echidna_replay::{compiler::compile, parser::parse_trace, utils::ReplayConfig};
//!
//! let config = ReplayConfig::default();
//! let trace = parse_trace(input, &config)?;
//! let source = compile(trace.events(), &config).render();
//! ```

pub mod commands;
pub mod compiler;
pub mod output;
pub mod parser;
pub mod utils;
