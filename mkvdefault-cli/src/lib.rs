// mkvdefault-cli/src/lib.rs
//
// Library portion of the mkvdefault CLI application.
// Contains argument definitions and command logic.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod progress;
pub mod terminal;

// Re-export items needed by the binary or integration tests
pub use cli::{ApplyArgs, Cli, Commands, Verbosity};
pub use commands::apply::run_apply;
pub use commands::languages::run_languages;
pub use error::{CliErrorContext, CliResult};
