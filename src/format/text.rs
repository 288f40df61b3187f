// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Text helpers for putting log output into a page.

/// Escape `&`, `<`, `>` and double quotes for HTML.
pub fn html_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    out
}

/// Replace tabs with spaces up to the next tab stop, line by line.
pub fn expand_tabs(text: &str, tab_size: usize) -> String {
    let tab_size = tab_size.max(1);
    let mut out = String::with_capacity(text.len());
    let mut column = 0;

    for c in text.chars() {
        match c {
            '\t' => {
                let fill = tab_size - column % tab_size;
                out.extend(std::iter::repeat(' ').take(fill));
                column += fill;
            }
            '\n' | '\r' => {
                out.push(c);
                column = 0;
            }
            c => {
                out.push(c);
                column += 1;
            }
        }
    }
    out
}

/// Preformatted text as HTML that survives any surrounding markup: escaped,
/// tabs expanded, every space non-breaking and every line break a `<br />`.
pub fn to_pre(text: &str, tab_size: usize) -> String {
    let text = expand_tabs(&html_escape(text), tab_size).replace(' ', "&nbsp;");

    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' if chars.peek() == Some(&'\n') => {
                chars.next();
                out.push_str("<br />\r\n");
            }
            '\n' if chars.peek() == Some(&'\r') => {
                chars.next();
                out.push_str("<br />\n\r");
            }
            '\r' | '\n' => {
                out.push_str("<br />");
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<a href="x">&</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;"
        );
        assert_eq!(html_escape("it's"), "it's");
    }

    #[test]
    fn test_expand_tabs_to_next_stop() {
        assert_eq!(expand_tabs("\tx", 4), "    x");
        assert_eq!(expand_tabs("ab\tx", 4), "ab  x");
        assert_eq!(expand_tabs("abcd\tx", 4), "abcd    x");
        assert_eq!(expand_tabs("a\t\tx", 4), "a       x");
        assert_eq!(expand_tabs("a\n\tb", 8), "a\n        b");
        assert_eq!(expand_tabs("\t", 0), " ");
    }

    #[test]
    fn test_to_pre() {
        assert_eq!(to_pre("a b", 4), "a&nbsp;b");
        assert_eq!(to_pre("x\n<y>", 4), "x<br />\n&lt;y&gt;");
        assert_eq!(to_pre("\tz", 2), "&nbsp;&nbsp;z");
        assert_eq!(to_pre("1\r\n2", 4), "1<br />\r\n2");
    }

    #[test]
    fn test_to_pre_counts_columns_after_escaping() {
        // "&lt;" occupies four columns by the time tabs are expanded
        assert_eq!(to_pre("<\tx", 8), "&lt;&nbsp;&nbsp;&nbsp;&nbsp;x");
    }
}
