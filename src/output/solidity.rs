//! Solidity test contract writer.

use super::write_atomic;
use crate::compiler::CompiledProgram;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::path::Path;

/// Write a compiled program to a `.sol` file
///
/// **Public** - main entry point for program output
///
/// # Arguments
/// * `program` - Program from [`compile`](crate::compiler::compile)
/// * `output_path` - Destination, overwritten unconditionally
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::InvalidPath` - Path is empty, a directory, or its parent cannot be created
///
/// # Example
/// ```ignore
/// let program = compile(trace.events(), &config);
/// emit(&program, "test/echidnaToFoundry.sol")?;
/// ```
pub fn emit(program: &CompiledProgram, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing test contract to: {}", output_path.display());

    if output_path.extension().is_some_and(|ext| ext != "sol") {
        debug!(
            "Warning: File does not have .sol extension: {}",
            output_path.display()
        );
    }

    let source = program.render();
    write_atomic(output_path, source.as_bytes())?;

    info!(
        "Test contract written successfully ({} statements, {} bytes)",
        program.statements.len(),
        source.len()
    );

    Ok(())
}
