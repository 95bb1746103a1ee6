//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod convert;
pub mod models;
pub mod utils;

// Re-export main command functions
pub use convert::{execute_convert, validate_args};
pub use models::{ConvertArgs, InspectArgs, STDIN_PATH};
pub use utils::{display_config, display_version, execute_inspect, load_config, read_trace};
