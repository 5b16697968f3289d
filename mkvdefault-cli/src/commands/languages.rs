//! Implementation of the 'languages' subcommand.
//!
//! Prints every accepted language code with its display name, in columns
//! fitted to the terminal.

use crate::error::CliResult;
use crate::terminal;

use mkvdefault_core::languages;

/// Entries as printed: `code: Name`, sorted by code, plus `off`.
pub fn language_entries() -> Vec<String> {
    languages::all()
        .map(|(code, name)| format!("{code}: {name}"))
        .chain(std::iter::once(format!(
            "{}: No default subtitle (subtitles only)",
            languages::OFF
        )))
        .collect()
}

pub fn run_languages() -> CliResult<()> {
    terminal::print_section("Language codes");
    terminal::print_columns(&language_entries());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_include_common_codes_and_off() {
        let entries = language_entries();
        assert!(entries.iter().any(|e| e == "eng: English"));
        assert!(entries.iter().any(|e| e.starts_with("jpn: ")));
        assert!(entries.last().is_some_and(|e| e.starts_with("off: ")));
    }
}
