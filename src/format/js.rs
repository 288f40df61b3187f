// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

/// Quote text as a single-quoted JavaScript string literal that is safe to
/// place inside an inline `<script>` block.
///
/// Angle brackets are split out of the literal (`'<'+'/script>'`), so the
/// result never contains a closing script tag.
///
/// ```
/// use the_hacker_console::format::to_js_literal;
///
/// assert_eq!(to_js_literal("it's"), r"'it\'s'");
/// assert_eq!(to_js_literal("</b>"), "'<'+'/b'+'>'");
/// ```
pub fn to_js_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('\'');
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '"' => out.push_str("\\\""),
            '\0' => out.push_str("\\0"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '>' => out.push_str("'+'>"),
            '<' => out.push_str("<'+'"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}
