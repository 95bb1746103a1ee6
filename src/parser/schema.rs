//! Typed records produced by the trace parser.
//!
//! Events are immutable values: they are built once per line and only read
//! afterwards by the compiler and the summary.

use serde::{Deserialize, Serialize};

/// One input line together with its 1-based position in the trace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawLine<'a> {
    pub number: usize,
    pub text: &'a str,
}

impl<'a> RawLine<'a> {
    pub fn new(number: usize, text: &'a str) -> Self {
        Self { number, text }
    }

    /// Line content without leading indentation or trailing whitespace
    pub fn stripped(&self) -> &'a str {
        self.text.trim_start_matches([' ', '\t']).trim_end()
    }
}

/// A single literal inside an argument list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Scalar {
    /// Decimal integer, kept as text since fuzzed values overflow `u128`
    Int(String),
    Bool(bool),
    /// Anything else (addresses, byte strings, ...)
    Raw(String),
}

impl Scalar {
    /// Classify a bare word from the token stream
    pub fn from_word(word: &str) -> Self {
        match word {
            "true" => Self::Bool(true),
            "false" => Self::Bool(false),
            w if !w.is_empty() && w.bytes().all(|b| b.is_ascii_digit()) => Self::Int(w.to_string()),
            w => Self::Raw(w.to_string()),
        }
    }

    pub fn is_int(&self) -> bool {
        matches!(self, Self::Int(_))
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Bool(_))
    }
}

/// A positional argument of a call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ArgumentToken {
    Scalar(Scalar),
    Tuple(Vec<Scalar>),
}

impl ArgumentToken {
    /// True for the fixed-shape struct literal: integers then one trailing bool
    pub fn is_struct_shaped(&self) -> bool {
        match self {
            Self::Tuple(items) => is_struct_signature(items),
            Self::Scalar(_) => false,
        }
    }
}

/// Struct signature over a flat list of scalars
pub fn is_struct_signature(items: &[Scalar]) -> bool {
    match items.split_last() {
        Some((last, numbers)) => {
            last.is_bool() && !numbers.is_empty() && numbers.iter().all(Scalar::is_int)
        }
        None => false,
    }
}

/// An argument and its byte range inside [`CallEvent::arguments_text`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Argument {
    pub token: ArgumentToken,
    pub start: usize,
    pub end: usize,
}

/// A parsed call line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallEvent {
    /// Function name without the call prefix
    pub function_name: String,

    pub arguments: Vec<Argument>,

    /// Verbatim text between the call's outer parentheses
    pub arguments_text: String,

    /// Sender address, if the trace printed one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caller: Option<String>,

    /// Seconds to advance after the call
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay_seconds: Option<u64>,

    /// Blocks to advance after the call
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_delay: Option<u64>,
}

/// One entry of a trace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TraceEvent {
    Wait {
        delay_seconds: u64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        block_delay: Option<u64>,
    },
    Call(CallEvent),
}

impl TraceEvent {
    pub fn is_call(&self) -> bool {
        matches!(self, Self::Call(_))
    }

    /// Seconds this event advances the clock by
    pub fn delay_seconds(&self) -> Option<u64> {
        match self {
            Self::Wait { delay_seconds, .. } => Some(*delay_seconds),
            Self::Call(call) => call.delay_seconds,
        }
    }

    /// Blocks this event advances the chain by
    pub fn block_delay(&self) -> Option<u64> {
        match self {
            Self::Wait { block_delay, .. } => *block_delay,
            Self::Call(call) => call.block_delay,
        }
    }
}

/// An event and the line it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcedEvent {
    pub line: usize,
    #[serde(flatten)]
    pub event: TraceEvent,
}

/// Result of parsing a whole trace
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedTrace {
    /// Events in input order
    pub events: Vec<SourcedEvent>,

    /// Empty or whitespace-only lines
    pub blank_lines: usize,

    /// Lines that were neither calls nor waits
    pub skipped_lines: usize,

    /// Wait lines dropped under the lenient wait policy
    pub dropped_waits: usize,
}

impl ParsedTrace {
    /// Events in input order, without their positions
    pub fn events(&self) -> impl Iterator<Item = &TraceEvent> {
        self.events.iter().map(|sourced| &sourced.event)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
