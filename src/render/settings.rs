// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fs;
use std::path::Path;

use crate::config::consts::{DEFAULT_HEIGHT, DEFAULT_TAB_SIZE};
use crate::config::ConsoleConfig;
use crate::errors::{ConsoleError, ConsoleResult};
use crate::observability::messages::{page::ScriptLoaded, StructuredLog};

/// Client widget shipped with the crate.
pub const EMBEDDED_SCRIPT: &str = include_str!("../../assets/console.js");

/// Everything the renderer needs besides the log itself.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    pub height: u32,
    pub tab_size: usize,
    /// Prefix replaced with `~` in entry titles. Empty or absent disables it.
    pub document_root: Option<String>,
    /// Widget source, still containing the `{HEIGHT}` placeholder.
    pub script: String,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            height: DEFAULT_HEIGHT,
            tab_size: DEFAULT_TAB_SIZE,
            document_root: None,
            script: EMBEDDED_SCRIPT.to_string(),
        }
    }
}

impl RenderSettings {
    /// Build settings from a config, loading the widget from `script_path`
    /// when one is set.
    pub fn from_config(config: &ConsoleConfig) -> ConsoleResult<Self> {
        let script = match &config.script_path {
            Some(path) => load_script(path)?,
            None => EMBEDDED_SCRIPT.to_string(),
        };

        Ok(Self {
            height: config.height,
            tab_size: config.tab_size,
            document_root: config.document_root.clone(),
            script,
        })
    }

    pub fn with_document_root(mut self, root: impl Into<String>) -> Self {
        self.document_root = Some(root.into());
        self
    }

    /// The widget source with the console height filled in.
    pub fn script_source(&self) -> String {
        self.script.replace("{HEIGHT}", &self.height.to_string())
    }
}

/// Read a replacement client widget from disk.
pub fn load_script(path: &Path) -> ConsoleResult<String> {
    let script = fs::read_to_string(path).map_err(|source| ConsoleError::ScriptAsset {
        path: path.to_path_buf(),
        source,
    })?;

    ScriptLoaded {
        path,
        bytes: script.len(),
    }
    .log();

    Ok(script)
}
