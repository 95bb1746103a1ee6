use super::models::{InspectArgs, STDIN_PATH};
use crate::output::write_trace_json;
use crate::parser::{parse_trace, summarize, TraceSummary};
use crate::utils::config::ReplayConfig;
use anyhow::{Context, Result};
use log::debug;
use std::io::Read;
use std::path::Path;

/// Read a trace from a file, or from stdin when the path is `-`
pub fn read_trace(path: &Path) -> Result<String> {
    if path.as_os_str() == STDIN_PATH {
        debug!("Reading trace from stdin");
        let mut input = String::new();
        std::io::stdin()
            .read_to_string(&mut input)
            .context("Failed to read trace from stdin")?;
        return Ok(input);
    }

    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read trace file {}", path.display()))
}

/// Load the replay config, falling back to defaults without a file
pub fn load_config(path: Option<&Path>) -> Result<ReplayConfig> {
    match path {
        Some(path) => ReplayConfig::from_toml_file(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(ReplayConfig::default()),
    }
}

/// Parse a trace and print what it contains
pub fn execute_inspect(args: &InspectArgs) -> Result<TraceSummary> {
    let input = read_trace(&args.input)?;
    let trace = parse_trace(&input, &args.config)
        .with_context(|| format!("Failed to parse trace {}", args.input.display()))?;
    let summary = summarize(&trace, &args.config);

    println!("Trace: {}", args.input.display());
    print!("{}", summary.report());

    if let Some(json_path) = &args.json_output {
        write_trace_json(&trace, json_path).context("Failed to write parsed trace JSON")?;
        println!("\n✓ Parsed events written to: {}", json_path.display());
    }

    Ok(summary)
}

/// Print a replay config as TOML
pub fn display_config(config: &ReplayConfig) -> Result<()> {
    let raw = config
        .to_toml_string()
        .context("Failed to serialize config")?;
    print!("{}", raw);
    Ok(())
}

/// Display version information
pub fn display_version() {
    println!("Echidna Replay v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Compiles Echidna call sequences into replayable Foundry tests.");
}
