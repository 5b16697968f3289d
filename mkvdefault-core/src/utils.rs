//! Utility functions for formatting.
//!
//! Counts and elapsed time as shown in the end-of-run summary.

use std::time::Duration;

/// Formats a count with thousands separators (e.g., 12345 -> "12,345").
#[must_use]
pub fn format_count(count: usize) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Formats an elapsed run time, omitting leading zero units
/// (e.g., 3723.5s -> "1 hr(s) 2 min(s) 3.5 sec(s)").
#[must_use]
pub fn format_runtime(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    let days = total / 86_400;
    let hours = (total % 86_400) / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = (total % 60) as f64 + f64::from(elapsed.subsec_millis()) / 1000.0;

    let mut parts = Vec::new();
    if days > 0 {
        parts.push(format!("{days} day(s)"));
    }
    if days > 0 || hours > 0 {
        parts.push(format!("{hours} hr(s)"));
    }
    if days > 0 || hours > 0 || minutes > 0 {
        parts.push(format!("{minutes} min(s)"));
    }

    let secs = format!("{seconds:.2}");
    let secs = secs.trim_end_matches('0').trim_end_matches('.');
    parts.push(format!("{secs} sec(s)"));

    parts.join(" ")
}
