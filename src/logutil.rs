//! Keeping user-typed text on one log line.

use std::fmt::Write;

/// Longest preview of user input written to the log.
const MAX_PREVIEW: usize = 120;

/// Escape backslashes and control characters and cap the length, so a
/// pasted amount like `"3s\n6d"` logs as `3s\n6d` rather than two lines.
pub fn escape_log(s: &str) -> String {
    let mut out = String::with_capacity(s.len().min(MAX_PREVIEW) + 4);
    for (i, ch) in s.chars().enumerate() {
        if i == MAX_PREVIEW {
            out.push('…');
            break;
        }
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\x{:02X}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}
