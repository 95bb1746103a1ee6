//! Whole-trace parser.
//!
//! Walks the trace line by line, classifies each line and hands calls and
//! waits to their parsers. Event order is input order.

use super::classify::{classify, LineKind};
use super::line::{parse_call, parse_wait};
use super::schema::{ParsedTrace, RawLine, SourcedEvent};
use crate::utils::config::ReplayConfig;
use crate::utils::error::ParseError;
use log::{debug, warn};

/// Parse a complete trace
///
/// **Public** - main entry point for parsing
///
/// # Arguments
/// * `input` - Trace text as printed by the fuzzer
/// * `config` - Markers and the wait policy
///
/// # Returns
/// Events in input order together with line bookkeeping
///
/// # Errors
/// * `ParseError::MalformedCall` - always fatal, a partial program is unsafe to replay
/// * `ParseError::MalformedWait` - fatal when `config.strict_waits` is set,
///   otherwise the wait is dropped with a warning
pub fn parse_trace(input: &str, config: &ReplayConfig) -> Result<ParsedTrace, ParseError> {
    let mut trace = ParsedTrace::default();

    for (index, text) in input.lines().enumerate() {
        let line = RawLine::new(index + 1, text);

        let event = match classify(&line, config) {
            LineKind::Blank => {
                trace.blank_lines += 1;
                continue;
            }
            LineKind::Unrecognized => {
                debug!("Skipping unrecognized line {}: {}", line.number, line.stripped());
                trace.skipped_lines += 1;
                continue;
            }
            LineKind::CallLine => parse_call(&line, config)?,
            LineKind::WaitLine => match parse_wait(&line, config) {
                Ok(event) => event,
                Err(e) if !config.strict_waits => {
                    warn!("Dropping wait event: {}", e);
                    trace.dropped_waits += 1;
                    continue;
                }
                Err(e) => return Err(e),
            },
        };

        trace.events.push(SourcedEvent {
            line: line.number,
            event,
        });
    }

    debug!(
        "Parsed {} events ({} blank, {} skipped, {} dropped waits)",
        trace.events.len(),
        trace.blank_lines,
        trace.skipped_lines,
        trace.dropped_waits
    );

    Ok(trace)
}
