//! Convert command implementation.
//!
//! The convert command:
//! 1. Reads the trace
//! 2. Parses it into events
//! 3. Compiles the events into a replay program
//! 4. Writes the test contract

use super::models::ConvertArgs;
use super::utils::read_trace;
use crate::compiler::compile;
use crate::output::emit;
use crate::parser::{parse_trace, summarize, TraceSummary};
use anyhow::{Context, Result};
use log::{debug, info};
use std::time::Instant;

/// Execute the convert command
///
/// **Public** - main entry point called from main.rs
///
/// # Arguments
/// * `args` - Convert command arguments
///
/// # Returns
/// Summary of the converted trace
///
/// # Errors
/// * Unreadable input
/// * Malformed call lines (and wait lines under the strict policy)
/// * File write errors
///
/// # Example
/// ```ignore
/// let args = ConvertArgs {
///     input: PathBuf::from("echidna/reproducer.txt"),
///     output: PathBuf::from("test/Sequence.sol"),
///     ..Default::default()
/// };
///
/// execute_convert(&args)?;
/// ```
pub fn execute_convert(args: &ConvertArgs) -> Result<TraceSummary> {
    let start_time = Instant::now();

    info!("Converting trace: {}", args.input.display());

    // Step 1: Read trace
    info!("Step 1/4: Reading trace...");
    let input = read_trace(&args.input)?;

    // Step 2: Parse trace
    info!("Step 2/4: Parsing trace...");
    let trace = parse_trace(&input, &args.config)
        .with_context(|| format!("Failed to parse trace {}", args.input.display()))?;

    let summary = summarize(&trace, &args.config);
    info!("Trace: {}", summary.summary());

    // Step 3: Compile
    info!("Step 3/4: Compiling call sequence...");
    let program = compile(trace.events(), &args.config);

    debug!(
        "Compiled {} statements ({} invocations)",
        program.statements.len(),
        program.invocation_count()
    );

    // Step 4: Write output
    info!("Step 4/4: Writing test contract...");
    emit(&program, &args.output).context("Failed to write test contract")?;

    info!("✓ Test contract written to: {}", args.output.display());

    if args.print_summary {
        println!("\n{}", "=".repeat(60));
        println!("TRACE SUMMARY");
        println!("{}", "=".repeat(60));
        print!("{}", summary.report());
        println!("{}", "=".repeat(60));
    }

    let elapsed = start_time.elapsed();
    info!("Conversion completed in {:.2}s", elapsed.as_secs_f64());

    Ok(summary)
}

/// Validate convert arguments
///
/// **Public** - can be called before execute_convert for early validation
pub fn validate_args(args: &ConvertArgs) -> Result<()> {
    if args.input.as_os_str().is_empty() {
        anyhow::bail!("Input path cannot be empty");
    }

    if args.output.as_os_str().is_empty() {
        anyhow::bail!("Output path cannot be empty");
    }

    if args.input == args.output {
        anyhow::bail!("Output path would overwrite the input trace");
    }

    let config = &args.config;
    if config.call_prefix.trim().is_empty() {
        anyhow::bail!("Call prefix cannot be empty");
    }

    if config.wait_marker.trim().is_empty() {
        anyhow::bail!("Wait marker cannot be empty");
    }

    if config.call_prefix.starts_with(&config.wait_marker)
        || config.wait_marker.starts_with(&config.call_prefix)
    {
        anyhow::bail!("Call prefix and wait marker must be distinguishable");
    }

    for (name, value) in [
        ("receiver", &config.receiver),
        ("advance_function", &config.advance_function),
        ("contract_name", &config.contract_name),
        ("test_function", &config.test_function),
    ] {
        if value.trim().is_empty() {
            anyhow::bail!("Config value '{}' cannot be empty", name);
        }
    }

    Ok(())
}
