// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt::Write;

use super::Value;
use crate::config::consts::{MAX_FORMAT_DEPTH, RECURSION_MARKER};

const INDENT: &str = "    ";
const SKIPPED_KEY: &str = "GLOBALS";

/// Render a value as an indented tree.
///
/// ```
/// use the_hacker_console::format::{format_value, Value};
///
/// let value = Value::List(vec![Value::from(1), Value::Null]);
/// assert_eq!(format_value(&value), "Array[2]\n    [0] => 1\n    [1] => NULL");
/// ```
pub fn format_value(value: &Value) -> String {
    let mut buf = String::new();
    write_value(&mut buf, value, 0);
    buf.replace('\0', " ")
}

/// The text stored for a logged value: scalars get a trailing newline, every
/// other shape is stored as formatted.
pub fn log_text(value: &Value) -> String {
    match value {
        Value::Scalar(text) => format!("{}\n", text),
        other => format_value(other),
    }
}

fn write_value(buf: &mut String, value: &Value, level: usize) {
    if level >= MAX_FORMAT_DEPTH {
        buf.push_str(RECURSION_MARKER);
        return;
    }

    match value {
        Value::Null => buf.push_str("NULL"),
        Value::Bool(true) => buf.push_str("TRUE"),
        Value::Bool(false) => buf.push_str("FALSE"),
        Value::Scalar(text) => push_scalar(buf, text),
        Value::List(items) => {
            let _ = write!(buf, "Array[{}]", items.len());
            for (i, item) in items.iter().enumerate() {
                write_child(buf, &i.to_string(), item, level);
            }
        }
        Value::Map(fields) => {
            let _ = write!(buf, "Array[{}]", fields.len());
            write_fields(buf, fields, level);
        }
        Value::Record(fields) => {
            buf.push_str("Object");
            write_fields(buf, fields, level);
        }
    }
}

fn write_fields(buf: &mut String, fields: &[(String, Value)], level: usize) {
    for (key, value) in fields {
        if key == SKIPPED_KEY {
            continue;
        }
        write_child(buf, key, value, level);
    }
}

fn write_child(buf: &mut String, key: &str, value: &Value, level: usize) {
    buf.push('\n');
    for _ in 0..=level {
        buf.push_str(INDENT);
    }
    let _ = write!(buf, "[{}] => ", key);
    write_value(buf, value, level + 1);
}

/// Line breaks inside a scalar print as a literal `\n`.
fn push_scalar(buf: &mut String, text: &str) {
    let mut rest = text;
    while let Some(idx) = rest.find('\n') {
        let line = &rest[..idx];
        buf.push_str(line.strip_suffix('\r').unwrap_or(line));
        buf.push_str("\\n");
        rest = &rest[idx + 1..];
    }
    buf.push_str(rest);
}
