// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Value formatting and the escaping helpers used when rendering a page.

mod formatter;
mod js;
mod text;
mod value;

pub use formatter::{format_value, log_text};
pub use js::to_js_literal;
pub use text::{expand_tabs, html_escape, to_pre};
pub use value::Value;
