//! Summary statistics over a parsed trace.

use super::schema::{ParsedTrace, TraceEvent};
use super::tuple::wraps_struct;
use crate::utils::config::ReplayConfig;
use std::collections::BTreeMap;

/// Counts and totals for a parsed trace
///
/// **Public** - printed by `inspect` and `convert --summary`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraceSummary {
    pub call_count: usize,
    pub wait_count: usize,

    /// Calls with a struct constructor wrapped around some of their arguments
    pub struct_calls: usize,

    /// Seconds advanced over the whole sequence
    pub total_delay_seconds: u64,

    /// Blocks advanced over the whole sequence
    pub total_block_delay: u64,

    /// Calls per function, sorted by name
    pub functions: BTreeMap<String, usize>,

    /// Calls per sender, sorted by address
    pub callers: BTreeMap<String, usize>,

    pub skipped_lines: usize,
    pub dropped_waits: usize,
}

impl TraceSummary {
    /// One-line description for logs
    pub fn summary(&self) -> String {
        format!(
            "{} calls, {} waits, {} s total delay, {} distinct functions",
            self.call_count,
            self.wait_count,
            self.total_delay_seconds,
            self.functions.len()
        )
    }

    /// Multi-line report for the terminal
    pub fn report(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("Calls:         {}\n", self.call_count));
        out.push_str(&format!("Waits:         {}\n", self.wait_count));
        out.push_str(&format!("Struct calls:  {}\n", self.struct_calls));
        out.push_str(&format!("Time advanced: {} s\n", self.total_delay_seconds));
        out.push_str(&format!("Blocks:        {}\n", self.total_block_delay));
        if self.skipped_lines > 0 {
            out.push_str(&format!("Skipped lines: {}\n", self.skipped_lines));
        }
        if self.dropped_waits > 0 {
            out.push_str(&format!("Dropped waits: {}\n", self.dropped_waits));
        }

        out.push_str("\nFunctions:\n");
        for (name, count) in &self.functions {
            out.push_str(&format!("  {:>5}  {}\n", count, name));
        }

        if !self.callers.is_empty() {
            out.push_str("\nCallers:\n");
            for (caller, count) in &self.callers {
                out.push_str(&format!("  {:>5}  {}\n", count, caller));
            }
        }

        out
    }
}

/// Summarize a parsed trace
///
/// `config` decides whether flat struct-shaped argument lists count as
/// struct calls, as it does for compilation.
pub fn summarize(trace: &ParsedTrace, config: &ReplayConfig) -> TraceSummary {
    let mut summary = TraceSummary {
        skipped_lines: trace.skipped_lines,
        dropped_waits: trace.dropped_waits,
        ..Default::default()
    };

    for event in trace.events() {
        summary.total_delay_seconds = summary
            .total_delay_seconds
            .saturating_add(event.delay_seconds().unwrap_or(0));
        summary.total_block_delay = summary
            .total_block_delay
            .saturating_add(event.block_delay().unwrap_or(0));

        match event {
            TraceEvent::Wait { .. } => summary.wait_count += 1,
            TraceEvent::Call(call) => {
                summary.call_count += 1;
                if wraps_struct(call, config.wrap_flat_tuples) {
                    summary.struct_calls += 1;
                }
                *summary
                    .functions
                    .entry(call.function_name.clone())
                    .or_insert(0) += 1;
                if let Some(caller) = &call.caller {
                    *summary.callers.entry(caller.clone()).or_insert(0) += 1;
                }
            }
        }
    }

    summary
}
