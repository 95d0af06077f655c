//! Shared utility functions.

/// Render adapter text for a single log line.
///
/// Control characters are escaped (`\r` becomes `\\r`) so that replies with
/// embedded line endings stay on one line, and the result is cut to at most
/// `max_chars` characters with a trailing `…` when something was dropped.
pub fn preview(text: &str, max_chars: usize) -> String {
    let mut out = String::with_capacity(text.len().min(max_chars) + 4);
    let mut shown = 0;
    for c in text.chars() {
        if shown == max_chars {
            out.push('…');
            return out;
        }
        match c {
            '\r' => out.push_str("\\r"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\x{:02x}", c as u32)),
            c => out.push(c),
        }
        shown += 1;
    }
    out
}
