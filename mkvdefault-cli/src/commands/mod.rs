//! Command implementations for the CLI.
//!
//! Each submodule contains the implementation of a specific command.

/// Module containing the implementation of the `apply` command.
/// Flags the desired default tracks across a file or library.
pub mod apply;

/// Module containing the implementation of the `languages` command.
pub mod languages;
