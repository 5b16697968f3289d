// mkvdefault-cli/src/main.rs
//
// Entry point for the `mkvdefault` binary.
//
// Responsibilities:
// - Parsing arguments (clap exits with status 2 on usage errors).
// - Deciding on color and installing the logger.
// - Dispatching to the selected command.
// - Reporting fatal errors and mapping them to exit status 1.

use clap::Parser;
use mkvdefault_cli::error::suggestion_for;
use mkvdefault_cli::{Cli, Commands, logging, run_apply, run_languages, terminal};
use std::process;

fn main() {
    let cli = Cli::parse();

    let use_color = terminal::init_color();
    if let Err(e) = logging::init_logging(cli.verbosity, cli.log_file.as_deref(), use_color) {
        terminal::print_error("Logging setup failed", &e.to_string(), None);
        process::exit(1);
    }

    let result = match cli.command {
        Commands::Apply(args) => run_apply(args),
        Commands::Languages => run_languages(),
    };

    if let Err(e) = result {
        terminal::print_error("mkvdefault failed", &e.to_string(), suggestion_for(&e));
        process::exit(1);
    }
}
