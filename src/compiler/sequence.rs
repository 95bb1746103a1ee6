//! Compile trace events into an ordered replay program.
//!
//! Each event becomes exactly one statement. A call's delay is part of the
//! call's own statement, right after the invocation, so timing can never be
//! separated from the call that caused it.

use super::scaffold::{footer_lines, header_lines};
use crate::parser::schema::TraceEvent;
use crate::parser::tuple::normalize_arguments;
use crate::utils::config::ReplayConfig;
use log::debug;
use std::fmt;

/// Indentation of statements inside the test function
const STATEMENT_INDENT: &str = "        ";

/// A single replay action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Set `msg.sender` for the next call
    Prank { caller: String },

    /// Call a function on the contract under test
    Invoke {
        receiver: String,
        function: String,
        arguments: String,
    },

    /// Advance `block.timestamp`
    AdvanceTime { function: String, seconds: u64 },

    /// Advance `block.number`
    RollBlocks { blocks: u64 },
}

impl Step {
    pub fn is_invoke(&self) -> bool {
        matches!(self, Self::Invoke { .. })
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Prank { caller } => write!(f, "vm.prank({});", caller),
            Self::Invoke {
                receiver,
                function,
                arguments,
            } => write!(f, "{}.{}({});", receiver, function, arguments),
            Self::AdvanceTime { function, seconds } => write!(f, "{}({});", function, seconds),
            Self::RollBlocks { blocks } => write!(f, "vm.roll(block.number + {});", blocks),
        }
    }
}

/// Steps compiled from one trace event, rendered on one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub steps: Vec<Step>,
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", step)?;
        }
        Ok(())
    }
}

/// Complete replay program: header, one statement per event, footer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledProgram {
    pub header: Vec<String>,
    pub statements: Vec<Statement>,
    pub footer: Vec<String>,
}

impl CompiledProgram {
    /// Number of invocation steps across all statements
    pub fn invocation_count(&self) -> usize {
        self.statements
            .iter()
            .flat_map(|s| &s.steps)
            .filter(|step| step.is_invoke())
            .count()
    }

    /// Render the program as source text
    ///
    /// Output depends only on the program, so rendering is deterministic.
    pub fn render(&self) -> String {
        let body = self
            .statements
            .iter()
            .map(|statement| format!("{}{}", STATEMENT_INDENT, statement));

        self.header
            .iter()
            .cloned()
            .chain(body)
            .chain(self.footer.iter().cloned())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Compile events into a program
///
/// **Public** - main entry point for compilation
///
/// # Arguments
/// * `events` - Events in input order
/// * `config` - Names, cheatcodes and optional replay features
///
/// # Returns
/// Program whose statements follow the event order exactly
pub fn compile<'a, I>(events: I, config: &ReplayConfig) -> CompiledProgram
where
    I: IntoIterator<Item = &'a TraceEvent>,
{
    let statements: Vec<Statement> = events
        .into_iter()
        .map(|event| compile_event(event, config))
        .collect();

    debug!("Compiled {} statements", statements.len());

    CompiledProgram {
        header: header_lines(config),
        statements,
        footer: footer_lines(),
    }
}

fn compile_event(event: &TraceEvent, config: &ReplayConfig) -> Statement {
    let mut steps = Vec::new();

    match event {
        TraceEvent::Wait {
            delay_seconds,
            block_delay,
        } => {
            steps.push(advance_time(*delay_seconds, config));
            push_roll(&mut steps, *block_delay, config);
        }
        TraceEvent::Call(call) => {
            if config.prank_callers {
                if let Some(caller) = &call.caller {
                    steps.push(Step::Prank {
                        caller: caller.clone(),
                    });
                }
            }

            steps.push(Step::Invoke {
                receiver: config.receiver.clone(),
                function: call.function_name.clone(),
                arguments: normalize_arguments(
                    call,
                    &config.struct_wrapper,
                    config.wrap_flat_tuples,
                ),
            });

            if let Some(delay) = call.delay_seconds {
                steps.push(advance_time(delay, config));
            }
            push_roll(&mut steps, call.block_delay, config);
        }
    }

    Statement { steps }
}

fn advance_time(seconds: u64, config: &ReplayConfig) -> Step {
    Step::AdvanceTime {
        function: config.advance_function.clone(),
        seconds,
    }
}

fn push_roll(steps: &mut Vec<Step>, block_delay: Option<u64>, config: &ReplayConfig) {
    if !config.roll_blocks {
        return;
    }
    if let Some(blocks) = block_delay {
        steps.push(Step::RollBlocks { blocks });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_trace;
    use pretty_assertions::assert_eq;

    fn body(input: &str, config: &ReplayConfig) -> Vec<String> {
        let trace = parse_trace(input, config).unwrap();
        compile(trace.events(), config)
            .statements
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_delay_is_attached_to_call() {
        let config = ReplayConfig::default();
        let trace = parse_trace("PropertiesMain.f(1) Time delay: 500 seconds", &config).unwrap();
        let program = compile(trace.events(), &config);

        assert_eq!(program.statements.len(), 1);
        assert_eq!(
            program.statements[0].steps,
            vec![
                Step::Invoke {
                    receiver: "propertiesMain".to_string(),
                    function: "f".to_string(),
                    arguments: "1".to_string(),
                },
                Step::AdvanceTime {
                    function: "skip".to_string(),
                    seconds: 500,
                },
            ]
        );
    }

    #[test]
    fn test_call_without_delay() {
        let lines = body("PropertiesMain.f(1) from: 0x1", &ReplayConfig::default());
        assert_eq!(lines, vec!["propertiesMain.f(1);"]);
    }

    #[test]
    fn test_end_to_end_statements() {
        let lines = body(
            "PropertiesMain.foo(1,2,true) from: 0xABC Time delay: 10\n*wait* Time delay: 5\n",
            &ReplayConfig::default(),
        );
        assert_eq!(
            lines,
            vec![
                "propertiesMain.foo(PropertiesBase.LocalVars_UPTL(1,2,true)); skip(10);",
                "skip(5);",
            ]
        );
    }

    #[test]
    fn test_prank_and_roll() {
        let config = ReplayConfig::default()
            .with_prank_callers(true)
            .with_roll_blocks(true);
        let lines = body(
            "PropertiesMain.f() from: 0x0000000000000000000000000000000000010000 Time delay: 3 seconds Block delay: 7
*wait* Time delay: 2 seconds Block delay: 1
PropertiesMain.g()",
            &config,
        );
        assert_eq!(
            lines,
            vec![
                "vm.prank(0x0000000000000000000000000000000000010000); propertiesMain.f(); skip(3); vm.roll(block.number + 7);",
                "skip(2); vm.roll(block.number + 1);",
                "propertiesMain.g();",
            ]
        );
    }

    #[test]
    fn test_order_is_preserved() {
        let input: String = (0..20)
            .map(|i| format!("PropertiesMain.f{}()\n", i))
            .collect();
        let config = ReplayConfig::default();
        let trace = parse_trace(&input, &config).unwrap();
        let program = compile(trace.events(), &config);

        assert_eq!(program.invocation_count(), 20);
        for (i, statement) in program.statements.iter().enumerate() {
            assert_eq!(statement.to_string(), format!("propertiesMain.f{}();", i));
        }
    }

    #[test]
    fn test_empty_program_renders_scaffolding_only() {
        let config = ReplayConfig::default();
        let program = compile(&Vec::<TraceEvent>::new(), &config);
        let rendered = program.render();

        let mut expected = header_lines(&config);
        expected.extend(footer_lines());
        assert_eq!(rendered, expected.join("\n"));
        assert!(rendered.ends_with("    }\n}\n"));
    }
}
