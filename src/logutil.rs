//! Keep user-supplied text and nickname batches on one log line.

const MAX_PREVIEW: usize = 120;
const MAX_LISTED: usize = 8;

/// Escape control characters (`\n`, `\r`, `\t`, others as `\xNN`) and
/// backslashes, and cut the result at [`MAX_PREVIEW`] characters with `…`.
pub fn escape_log(s: &str) -> String {
    let mut out = String::with_capacity(s.len().min(MAX_PREVIEW) + 4);
    for (count, ch) in s.chars().enumerate() {
        if count >= MAX_PREVIEW {
            out.push('…');
            break;
        }
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                use std::fmt::Write;
                let _ = write!(&mut out, "\\x{:02X}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}

/// Render nicknames as `[a, b, c]` for a log line, escaping each entry.
/// Only the first [`MAX_LISTED`] are shown; the rest become `+N more`.
pub fn nick_list<S: AsRef<str>>(nicks: &[S]) -> String {
    let shown: Vec<String> = nicks
        .iter()
        .take(MAX_LISTED)
        .map(|n| escape_log(n.as_ref()))
        .collect();
    let mut out = format!("[{}", shown.join(", "));
    if nicks.len() > MAX_LISTED {
        out.push_str(&format!(", +{} more", nicks.len() - MAX_LISTED));
    }
    out.push(']');
    out
}
