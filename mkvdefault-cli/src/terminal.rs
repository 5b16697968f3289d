// ============================================================================
// mkvdefault-cli/src/terminal.rs
// ============================================================================
//
// TERMINAL OUTPUT: UI Components and Styling
//
// Consistent terminal output for the CLI: section headers, status lines,
// warnings and errors, the run summary and the language code table.
//
// Run results go to stdout so they survive `-v off`; diagnostics go to
// stderr. Colors are used only when stdout supports them and NO_COLOR is
// unset.

// ---- External crate imports ----
use console::Term;
use mkvdefault_core::AggregateSummary;
use owo_colors::OwoColorize;
use unicode_width::UnicodeWidthStr;

// ---- Standard library imports ----
use std::sync::atomic::{AtomicBool, Ordering};

// ============================================================================
// COLOR CONTROL
// ============================================================================

static USE_COLOR: AtomicBool = AtomicBool::new(false);

/// Decides once whether output should be colored.
pub fn init_color() -> bool {
    let enabled = std::env::var_os("NO_COLOR").is_none()
        && supports_color::on(supports_color::Stream::Stdout).is_some();
    USE_COLOR.store(enabled, Ordering::Relaxed);
    enabled
}

pub fn should_use_color() -> bool {
    USE_COLOR.load(Ordering::Relaxed)
}

// ============================================================================
// UI COMPONENTS
// ============================================================================

/// Print a section header for major workflow phases
pub fn print_section(title: &str) {
    println!();
    if should_use_color() {
        println!("===== {} =====", title.to_uppercase().cyan());
    } else {
        println!("===== {} =====", title.to_uppercase());
    }
}

const STATUS_LABEL_WIDTH: usize = 15;

/// Label plus the padding that aligns values in a status block.
fn status_label(label: &str) -> String {
    let padding = STATUS_LABEL_WIDTH.saturating_sub(label.width()).max(1);
    format!("{}:{}", label, " ".repeat(padding))
}

/// Print a status line (key-value pair)
pub fn print_status(label: &str, value: &str) {
    if should_use_color() {
        println!("  {} {}", status_label(label), value.bold());
    } else {
        println!("  {} {}", status_label(label), value);
    }
}

/// Print a warning message
pub fn print_warning(message: &str) {
    if should_use_color() {
        println!("  ⚠ {}", message.yellow());
    } else {
        println!("  ⚠ {message}");
    }
}

/// Print a fatal error to stderr
pub fn print_error(title: &str, message: &str, suggestion: Option<&str>) {
    if should_use_color() {
        eprintln!("✗ {}", title.red().bold());
    } else {
        eprintln!("✗ {title}");
    }
    eprintln!("  Message:  {message}");
    if let Some(suggestion_text) = suggestion {
        eprintln!("  Suggestion: {suggestion_text}");
    }
}

/// Print the end-of-run tally.
pub fn print_summary(summary: &AggregateSummary) {
    print_section("Summary");
    println!();
    print!("{summary}");
}

/// Print the total runtime line.
pub fn print_runtime(runtime: &str) {
    println!();
    if should_use_color() {
        println!("[*] Total Runtime: {} [*]", runtime.bold());
    } else {
        println!("[*] Total Runtime: {runtime} [*]");
    }
}

// ============================================================================
// LANGUAGE TABLE
// ============================================================================

/// Lays `entries` out in as many columns as `width` allows, row by row.
pub fn format_columns(entries: &[String], width: usize) -> Vec<String> {
    let cell = entries.iter().map(|e| e.width()).max().unwrap_or(0) + 2;
    let columns = (width / cell.max(1)).max(1);

    entries
        .chunks(columns)
        .map(|row| {
            let mut line = String::new();
            for entry in row {
                line.push_str(entry);
                line.push_str(&" ".repeat(cell - entry.width()));
            }
            line.trim_end().to_string()
        })
        .collect()
}

/// Print `entries` in columns fitted to the terminal width.
pub fn print_columns(entries: &[String]) {
    let width = usize::from(Term::stdout().size().1);
    for line in format_columns(entries, width) {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries() -> Vec<String> {
        ["eng: English", "jpn: Japanese", "fre: French"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn columns_fill_the_width() {
        // widest entry is 13 chars, so each cell is 15
        let lines = format_columns(&entries(), 40);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "eng: English   jpn: Japanese");
        assert_eq!(lines[1], "fre: French");
    }

    #[test]
    fn narrow_terminals_get_one_column() {
        assert_eq!(format_columns(&entries(), 5).len(), 3);
        assert!(format_columns(&[], 80).is_empty());
    }

    #[test]
    fn status_labels_align_values() {
        assert_eq!(status_label("Audio"), format!("Audio:{}", " ".repeat(10)));
        assert_eq!(status_label("Jobs").len(), status_label("Subtitle").len());
        // overlong labels still get one space
        assert_eq!(status_label("A very long label"), "A very long label: ");
    }
}
