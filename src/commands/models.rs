use crate::utils::config::ReplayConfig;
use std::path::PathBuf;

/// Input path meaning "read the trace from stdin"
pub const STDIN_PATH: &str = "-";

/// Arguments for the convert command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ConvertArgs {
    /// Trace file, or `-` for stdin
    pub input: PathBuf,

    /// Output path for the Solidity test contract
    pub output: PathBuf,

    /// Scaffolding names and replay policies
    pub config: ReplayConfig,

    /// Print trace summary to stdout
    pub print_summary: bool,
}

impl Default for ConvertArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::from(STDIN_PATH),
            output: PathBuf::from("echidnaToFoundry.sol"),
            config: ReplayConfig::default(),
            print_summary: false,
        }
    }
}

/// Arguments for the inspect command
#[derive(Debug, Clone)]
pub struct InspectArgs {
    /// Trace file, or `-` for stdin
    pub input: PathBuf,

    pub config: ReplayConfig,

    /// Optional path for a JSON dump of the parsed events
    pub json_output: Option<PathBuf>,
}

impl Default for InspectArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::from(STDIN_PATH),
            config: ReplayConfig::default(),
            json_output: None,
        }
    }
}
