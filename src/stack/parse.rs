// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Parsing of `std::backtrace::Backtrace` text into call-site frames.
//!
//! The captured text lists, for each frame, the function that is running and
//! the location inside it:
//!
//! ```text
//!    4: my_app::handler
//!              at ./src/main.rs:21:5
//! ```
//!
//! [`normalize`] shifts locations by one frame so every [`StackFrame`] names
//! the function being called together with the place it was called from.

use regex::Regex;
use std::sync::OnceLock;

use crate::log::StackFrame;

/// A frame as printed: the running function and the location inside it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawFrame {
    pub symbol: Option<String>,
    pub file: Option<String>,
    pub line: Option<u32>,
}

fn frame_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*\d+:\s+(.+?)\s*$").expect("frame line pattern is valid")
    })
}

fn location_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s+at\s+(.+?):(\d+)(?::\d+)?\s*$").expect("location line pattern is valid")
    })
}

fn symbol_hash() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"::h[0-9a-f]{16}$").expect("symbol hash pattern is valid"))
}

pub fn parse_backtrace(text: &str) -> Vec<RawFrame> {
    let mut frames: Vec<RawFrame> = Vec::new();

    for line in text.lines() {
        if let Some(caps) = frame_line().captures(line) {
            let symbol = caps[1].trim();
            frames.push(RawFrame {
                symbol: (!symbol.is_empty() && symbol != "<unknown>").then(|| symbol.to_string()),
                ..Default::default()
            });
        } else if let Some(caps) = location_line().captures(line) {
            // only the first location belongs to the frame
            if let Some(frame) = frames.last_mut().filter(|f| f.file.is_none()) {
                frame.file = Some(caps[1].to_string());
                frame.line = caps[2].parse().ok();
            }
        }
    }

    frames
}

/// Split a demangled symbol into its receiver/module path and function name.
///
/// `<A as B>::method` splits into `<A as B>` and `method`; `::` inside angle
/// brackets never splits.
pub fn split_symbol(symbol: &str) -> (Option<String>, String) {
    let stripped = symbol_hash().replace(symbol, "");
    let symbol: &str = &stripped;
    let bytes = symbol.as_bytes();

    let mut depth = 0i32;
    let mut split_at = None;
    for i in 0..bytes.len() {
        match bytes[i] {
            b'<' => depth += 1,
            b'>' if i == 0 || bytes[i - 1] != b'-' => depth -= 1,
            b':' if depth == 0 && i > 0 && bytes[i - 1] == b':' => split_at = Some(i - 1),
            _ => {}
        }
    }

    match split_at {
        Some(idx) => (
            Some(symbol[..idx].to_string()),
            symbol[idx + 2..].to_string(),
        ),
        None => (None, symbol.to_string()),
    }
}

/// Convert running-function frames into call-site frames.
///
/// Frame `i` keeps its own function and takes the location recorded in frame
/// `i + 1`, the caller. The outermost frame has no call site.
pub fn normalize(raw: &[RawFrame]) -> Vec<StackFrame> {
    raw.iter()
        .enumerate()
        .map(|(i, frame)| {
            let (class, function) = match &frame.symbol {
                Some(symbol) => {
                    let (class, function) = split_symbol(symbol);
                    (class, Some(function))
                }
                None => (None, None),
            };
            let caller = raw.get(i + 1);

            StackFrame {
                file: caller.and_then(|c| c.file.clone()),
                line: caller.and_then(|c| c.line),
                function,
                class,
                ..Default::default()
            }
        })
        .collect()
}
