//! Line classification.
//!
//! Decides what a raw trace line is before any parsing happens. Lines that
//! are neither calls nor waits are tolerated: fuzzer output is routinely
//! mixed with other log text.

use super::schema::RawLine;
use crate::utils::config::ReplayConfig;

/// What a trace line contains
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Blank,
    WaitLine,
    CallLine,
    Unrecognized,
}

/// Classify a line by its leading marker, ignoring indentation
pub fn classify(line: &RawLine<'_>, config: &ReplayConfig) -> LineKind {
    let stripped = line.stripped();

    if stripped.is_empty() {
        LineKind::Blank
    } else if stripped.starts_with(config.wait_marker.as_str()) {
        LineKind::WaitLine
    } else if stripped.starts_with(config.call_prefix.as_str()) {
        LineKind::CallLine
    } else {
        LineKind::Unrecognized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind(text: &str) -> LineKind {
        classify(&RawLine::new(1, text), &ReplayConfig::default())
    }

    #[test]
    fn test_blank_lines() {
        assert_eq!(kind(""), LineKind::Blank);
        assert_eq!(kind("   \t  "), LineKind::Blank);
        assert_eq!(kind("\r"), LineKind::Blank);
    }

    #[test]
    fn test_wait_and_call() {
        assert_eq!(kind("    *wait* Time delay: 5"), LineKind::WaitLine);
        assert_eq!(kind("\tPropertiesMain.foo()"), LineKind::CallLine);
    }

    #[test]
    fn test_noise_is_unrecognized() {
        assert_eq!(kind("Call sequence:"), LineKind::Unrecognized);
        assert_eq!(kind("propertiesMain.foo()"), LineKind::Unrecognized);
        assert_eq!(kind("Traces: wait"), LineKind::Unrecognized);
    }

    #[test]
    fn test_custom_prefix() {
        let config = ReplayConfig {
            call_prefix: "Harness.".to_string(),
            ..Default::default()
        };
        assert_eq!(
            classify(&RawLine::new(1, "Harness.deposit(1)"), &config),
            LineKind::CallLine
        );
        assert_eq!(
            classify(&RawLine::new(1, "PropertiesMain.deposit(1)"), &config),
            LineKind::Unrecognized
        );
    }
}
