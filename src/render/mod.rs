// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Turns a log snapshot into markup and a script injected into an HTML page.

mod page;
mod settings;

pub use page::{attach_to_page, entry_body, entry_title, render_script};
pub use settings::{load_script, RenderSettings, EMBEDDED_SCRIPT};
