// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use regex::Regex;
use std::fmt::Write;
use std::sync::OnceLock;

use super::RenderSettings;
use crate::format::{html_escape, to_js_literal, to_pre};
use crate::log::{LogSnapshot, Origin};
use crate::observability::messages::{page::PageAttached, StructuredLog};

/// Tags closed at the end of a page without a closing body tag, in this order.
const UNTERMINATED_TAGS: [&str; 3] = ["script", "xmp", "pre"];

const BANNER: &str = "\n<!-- ##################### -->\n\
                      <!-- ### HackerConsole ### -->\n\
                      <!-- ##################### -->\n";

/// Delay before the queued entries are replayed into the widget.
const REPLAY_DELAY_MS: u32 = 200;

fn body_close_tag() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)</body[^>]*>").expect("body close pattern is valid"))
}

/// Title shown above an entry: its label, or where it was logged from.
pub fn entry_title(origin: &Origin, document_root: Option<&str>) -> String {
    match origin {
        Origin::Labeled { text } => text.clone(),
        Origin::Attributed {
            file,
            line,
            function,
        } => {
            let file = file
                .as_deref()
                .map(|f| strip_document_root(&f.replace('\\', "/"), document_root))
                .unwrap_or_default();
            let line = line.map(|l| l.to_string()).unwrap_or_default();

            let mut title = format!("at {} line {}", file, line);
            if let Some(function) = function.as_deref().filter(|f| !f.is_empty()) {
                title.push_str(", ");
                title.push_str(function);
            }
            title
        }
    }
}

fn strip_document_root(file: &str, document_root: Option<&str>) -> String {
    let root = match document_root.map(|r| r.replace('\\', "/")) {
        Some(root) if !root.is_empty() => root,
        _ => return file.to_string(),
    };

    match file.get(..root.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(&root) => format!("~{}", &file[root.len()..]),
        _ => file.to_string(),
    }
}

/// Entry body as HTML, wrapped in the entry color when it has one.
pub fn entry_body(message: &str, color: Option<&str>, tab_size: usize) -> String {
    let text = to_pre(message, tab_size);
    match color.filter(|c| !c.is_empty()) {
        Some(color) => format!("<div style=\"color:{}\">{}</div>", html_escape(color), text),
        None => text,
    }
}

/// The `<script>` block that creates the widget and replays every entry.
pub fn render_script(snapshot: &LogSnapshot, settings: &RenderSettings) -> String {
    let mut code = String::from(
        "window.hackerConsole = window.hackerConsole || \
         (window.HackerConsoleWidget && new window.HackerConsoleWidget());\n\
         if (window.hackerConsole) setTimeout(function() {\n  \
         var c = window.hackerConsole;\n",
    );

    for (group, entries) in snapshot.groups() {
        let group = to_js_literal(group);
        for entry in entries {
            let body = entry_body(entry.message(), entry.color(), settings.tab_size);
            let title = entry_title(entry.origin(), settings.document_root.as_deref());
            let _ = writeln!(
                code,
                "  c.out({}, {}, {});",
                to_js_literal(&body),
                to_js_literal(&title),
                group
            );
        }
    }
    let _ = write!(code, "}}, {});", REPLAY_DELAY_MS);

    format!(
        "<script type=\"text/javascript\">//<![CDATA[\n{}\n{}\n//]]></script>\n",
        settings.script_source(),
        code
    )
}

/// Insert the console into a page.
///
/// The block goes right before the first closing body tag. Without one it is
/// appended at the end, after closing any `script`, `xmp` or `pre` element
/// the page left open. Nothing else in the page changes.
pub fn attach_to_page(page: &str, snapshot: &LogSnapshot, settings: &RenderSettings) -> String {
    let insert_at = body_close_tag().find(page).map(|m| m.start());

    let mut block = String::new();
    let mut closed_tags = 0;
    if insert_at.is_none() {
        let lower = page.to_ascii_lowercase();
        for tag in UNTERMINATED_TAGS {
            let opened = lower.matches(&format!("<{}", tag)).count();
            let closed = lower.matches(&format!("</{}", tag)).count();
            if opened > closed {
                let _ = write!(block, "</{}>", tag);
                closed_tags += 1;
            }
        }
    }
    block.push_str(BANNER);
    block.push_str(&render_script(snapshot, settings));

    PageAttached {
        entry_count: snapshot.len(),
        group_count: snapshot.group_count(),
        closed_tags,
        body_tag_found: insert_at.is_some(),
    }
    .log();

    let at = insert_at.unwrap_or(page.len());
    let mut out = String::with_capacity(page.len() + block.len());
    out.push_str(&page[..at]);
    out.push_str(&block);
    out.push_str(&page[at..]);
    out
}
