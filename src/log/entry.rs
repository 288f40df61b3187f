// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::DEFAULT_GROUP;

/// Where a log entry came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    /// Resolved from the call stack. Every field is absent when stack
    /// introspection was unavailable.
    Attributed {
        file: Option<String>,
        line: Option<u32>,
        function: Option<String>,
    },
    /// Supplied by the caller; no stack resolution took place.
    Labeled { text: String },
}

impl Origin {
    pub fn unknown() -> Self {
        Origin::Attributed {
            file: None,
            line: None,
            function: None,
        }
    }

    pub fn labeled(text: impl Into<String>) -> Self {
        Origin::Labeled { text: text.into() }
    }

    pub fn is_unknown(&self) -> bool {
        *self == Origin::unknown()
    }
}

/// A single debug message, immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    message: String,
    group: String,
    color: Option<String>,
    origin: Origin,
}

impl LogEntry {
    pub fn new(
        message: impl Into<String>,
        group: impl Into<String>,
        color: Option<String>,
        origin: Origin,
    ) -> Self {
        Self {
            message: message.into(),
            group: group.into(),
            color,
            origin,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    pub fn origin(&self) -> &Origin {
        &self.origin
    }
}

/// Optional arguments of a log call.
///
/// ```
/// use the_hacker_console::log::LogOptions;
///
/// let options = LogOptions::default().group("sql").color("#c00");
/// assert_eq!(options.group_name(), "sql");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogOptions {
    pub group: Option<String>,
    pub color: Option<String>,
    pub label: Option<String>,
}

impl LogOptions {
    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// A fixed title for the entry; skips caller resolution entirely.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn group_name(&self) -> &str {
        self.group.as_deref().unwrap_or(DEFAULT_GROUP)
    }
}
