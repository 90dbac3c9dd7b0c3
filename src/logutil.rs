//! Keep log lines single-line and short.
//!
//! Sharing tokens and history blobs can be kilobytes long, and message text may
//! carry newlines. [`preview`] is what gets interpolated into log lines instead.

use std::fmt::Write;

/// Characters kept before a long value is cut.
pub const PREVIEW_CHARS: usize = 64;

/// Escape control characters and cut anything longer than [`PREVIEW_CHARS`],
/// noting the full length.
pub fn preview(s: &str) -> String {
    let total = s.chars().count();
    let mut out = String::with_capacity(s.len().min(PREVIEW_CHARS * 2) + 16);
    for ch in s.chars().take(PREVIEW_CHARS) {
        match ch {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\0' => out.push_str("\\0"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{{{:x}}}", c as u32);
            }
            c => out.push(c),
        }
    }
    if total > PREVIEW_CHARS {
        let _ = write!(out, "…({} chars)", total);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_control_characters() {
        assert_eq!(preview("a\nb\tc\u{7}"), "a\\nb\\tc\\u{7}");
    }

    #[test]
    fn long_tokens_are_cut_with_length() {
        let token = "x".repeat(200);
        let shown = preview(&token);
        assert!(shown.starts_with(&"x".repeat(PREVIEW_CHARS)));
        assert!(shown.ends_with("…(200 chars)"));
    }

    #[test]
    fn short_text_is_unchanged() {
        assert_eq!(preview("Nice placement! 👍"), "Nice placement! 👍");
    }
}
