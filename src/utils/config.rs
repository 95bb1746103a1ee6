//! Configuration and constants for the CLI.
//!
//! All scaffolding strings and replay policies live in [`ReplayConfig`] and
//! are passed explicitly to the parser, compiler and emitter.

use super::error::ConfigError;
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Line prefix Echidna prints in front of every call
pub const DEFAULT_CALL_PREFIX: &str = "PropertiesMain.";

/// Marker of a standalone time advance
pub const DEFAULT_WAIT_MARKER: &str = "*wait*";

// Annotation labels, matched word by word on the token stream
pub const TIME_DELAY_LABEL: &[&str] = &["Time", "delay"];
pub const BLOCK_DELAY_LABEL: &[&str] = &["Block", "delay"];
pub const CALLER_LABEL: &[&str] = &["from"];

/// Unit words that may follow a delay quantity
pub const DELAY_UNITS: &[&str] = &["seconds", "second", "blocks"];

/// Deepest parenthesis nesting accepted inside a call (call parens + tuple)
pub const MAX_NESTING_DEPTH: usize = 2;

/// Everything that shapes the generated test contract
///
/// Every field has a default, so a TOML file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplayConfig {
    /// Prefix identifying call lines, stripped from the function name
    pub call_prefix: String,

    /// Marker identifying standalone wait lines
    pub wait_marker: String,

    /// Contract type under test
    pub target_contract: String,

    /// Variable the calls are made on
    pub receiver: String,

    /// Struct constructor wrapped around tuple literals
    pub struct_wrapper: String,

    /// Cheatcode used to advance time
    pub advance_function: String,

    /// SPDX license of the generated file
    pub license: String,

    /// Solidity version requirement
    pub pragma: String,

    /// Import paths, in order
    pub imports: Vec<String>,

    /// Name of the generated test contract
    pub contract_name: String,

    /// Base contract of the generated test contract
    pub base_contract: String,

    /// Name of the generated test function
    pub test_function: String,

    /// Emit `vm.prank(caller)` in front of calls that have a caller
    pub prank_callers: bool,

    /// Emit `vm.roll(block.number + N)` for block delays
    pub roll_blocks: bool,

    /// Fail on wait lines without a time delay instead of dropping them
    pub strict_waits: bool,

    /// Wrap a flat argument list with the struct signature as one struct
    pub wrap_flat_tuples: bool,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            call_prefix: DEFAULT_CALL_PREFIX.to_string(),
            wait_marker: DEFAULT_WAIT_MARKER.to_string(),
            target_contract: "PropertiesMain".to_string(),
            receiver: "propertiesMain".to_string(),
            struct_wrapper: "PropertiesBase.LocalVars_UPTL".to_string(),
            advance_function: "skip".to_string(),
            license: "MIT".to_string(),
            pragma: "^0.8.13".to_string(),
            imports: vec![
                "../PropertiesMain.sol".to_string(),
                "../PropertiesBase.sol".to_string(),
                "forge-std/Test.sol".to_string(),
            ],
            contract_name: "FoundryTestSequence".to_string(),
            base_contract: "Test".to_string(),
            test_function: "testCallSequence".to_string(),
            prank_callers: false,
            roll_blocks: false,
            strict_waits: true,
            wrap_flat_tuples: true,
        }
    }
}

impl ReplayConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from a TOML file
    ///
    /// Missing keys fall back to their defaults.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!("Loading replay config from: {}", path.display());

        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn with_prank_callers(mut self, prank: bool) -> Self {
        self.prank_callers = prank;
        self
    }

    pub fn with_roll_blocks(mut self, roll: bool) -> Self {
        self.roll_blocks = roll;
        self
    }

    pub fn with_strict_waits(mut self, strict: bool) -> Self {
        self.strict_waits = strict;
        self
    }
}
