//! JSON trace output writer.
//!
//! Dumps parsed events with their line numbers, for inspection or for
//! feeding other tooling.

use super::write_atomic;
use crate::parser::schema::ParsedTrace;
use crate::utils::error::OutputError;
use log::info;
use std::path::Path;

/// Write a parsed trace to a JSON file
///
/// **Public** - used by the `inspect` command
///
/// # Errors
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_trace_json(
    trace: &ParsedTrace,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing parsed trace to: {}", output_path.display());

    let mut json = serde_json::to_vec_pretty(trace)?;
    json.push(b'\n');
    write_atomic(output_path, &json)?;

    info!("Parsed trace written successfully ({} bytes)", json.len());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_trace;
    use crate::utils::config::ReplayConfig;
    use tempfile::NamedTempFile;

    #[test]
    fn test_write_trace_json() {
        let trace = parse_trace(
            "PropertiesMain.f((7, false)) from: 0x2\n*wait* Time delay: 3 seconds\n",
            &ReplayConfig::default(),
        )
        .unwrap();
        let temp_file = NamedTempFile::new().unwrap();

        write_trace_json(&trace, temp_file.path()).unwrap();

        let raw = std::fs::read_to_string(temp_file.path()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let events = json["events"].as_array().unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0]["type"], "call");
        assert_eq!(events[0]["line"], 1);
        assert_eq!(events[0]["function_name"], "f");
        assert_eq!(events[0]["caller"], "0x2");
        assert_eq!(events[0]["arguments"][0]["token"]["kind"], "tuple");
        assert_eq!(events[1]["type"], "wait");
        assert_eq!(events[1]["delay_seconds"], 3);
    }
}
