//! Echidna Replay CLI
//!
//! Turns an Echidna call sequence into a Foundry test contract.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use echidna_replay::commands::{
    display_config, display_version, execute_convert, execute_inspect, load_config,
    validate_args, ConvertArgs, InspectArgs,
};
use echidna_replay::utils::ReplayConfig;

/// Echidna Replay - compile fuzzer call sequences into Foundry tests
#[derive(Parser, Debug)]
#[command(name = "echidna-replay")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Options shared by commands that parse a trace
#[derive(Args, Debug)]
struct TraceOptions {
    /// Trace file (`-` reads stdin)
    #[arg(short, long, default_value = "-")]
    input: PathBuf,

    /// TOML file overriding scaffolding names and policies
    #[arg(short, long, env = "ECHIDNA_REPLAY_CONFIG")]
    config: Option<PathBuf>,

    /// Drop wait lines without a time delay instead of failing
    #[arg(long)]
    lenient_waits: bool,
}

impl TraceOptions {
    fn load_config(&self) -> Result<ReplayConfig> {
        let config = load_config(self.config.as_deref())?;
        let strict = config.strict_waits && !self.lenient_waits;
        Ok(config.with_strict_waits(strict))
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert a trace into a Foundry test contract
    Convert {
        #[command(flatten)]
        trace: TraceOptions,

        /// Output path for the test contract
        #[arg(short, long, default_value = "echidnaToFoundry.sol")]
        output: PathBuf,

        /// Replay each call from its recorded sender with vm.prank
        #[arg(long)]
        prank: bool,

        /// Replay block delays with vm.roll
        #[arg(long)]
        roll_blocks: bool,

        /// Print trace summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Parse a trace and report its contents
    Inspect {
        #[command(flatten)]
        trace: TraceOptions,

        /// Also write the parsed events as JSON
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Print the default configuration as TOML
    Config,

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Convert {
            trace,
            output,
            prank,
            roll_blocks,
            summary,
        } => {
            let config = trace.load_config()?;
            let config = ReplayConfig {
                prank_callers: config.prank_callers || prank,
                roll_blocks: config.roll_blocks || roll_blocks,
                ..config
            };

            let args = ConvertArgs {
                input: trace.input,
                output,
                config,
                print_summary: summary,
            };

            // Validate args first
            validate_args(&args)?;

            execute_convert(&args)?;
        }

        Commands::Inspect { trace, json } => {
            let args = InspectArgs {
                config: trace.load_config()?,
                input: trace.input,
                json_output: json,
            };

            execute_inspect(&args)?;
        }

        Commands::Config => {
            display_config(&ReplayConfig::default())?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
