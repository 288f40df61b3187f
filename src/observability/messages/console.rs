// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for log capture and caller attribution.
//!
//! This module contains message types for logging events related to:
//! * Entries appended to a console
//! * Stack capture falling back to empty attribution
//! * Skip patterns that failed to compile at console construction

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Entry appended to the console's message log.
///
/// # Log Level
/// `trace!` - Fires once per debug message
///
/// # Example
/// ```
/// use the_hacker_console::observability::messages::console::EntryLogged;
///
/// let msg = EntryLogged {
///     group: "sql",
///     attributed: true,
///     message_len: 42,
/// };
///
/// tracing::trace!("{}", msg);
/// ```
pub struct EntryLogged<'a> {
    pub group: &'a str,
    pub attributed: bool,
    pub message_len: usize,
}

impl Display for EntryLogged<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Console entry logged: group='{}', attributed={}, {} bytes",
            self.group, self.attributed, self.message_len
        )
    }
}

impl StructuredLog for EntryLogged<'_> {
    fn log(&self) {
        tracing::trace!(
            group = self.group,
            attributed = self.attributed,
            message_len = self.message_len,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::TRACE,
            "span_name",
            name = name,
            group = self.group,
        )
    }
}

/// Stack introspection was unavailable; the entry gets an empty origin.
///
/// # Log Level
/// `debug!` - Diagnostic detail
pub struct CallerUnresolved<'a> {
    pub group: &'a str,
}

impl Display for CallerUnresolved<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Stack capture unavailable, logging to group '{}' without caller attribution",
            self.group
        )
    }
}

impl StructuredLog for CallerUnresolved<'_> {
    fn log(&self) {
        tracing::debug!(group = self.group, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::DEBUG,
            "span_name",
            name = name,
            group = self.group,
        )
    }
}

/// A configured skip pattern did not compile and was ignored.
///
/// # Log Level
/// `warn!` - Attribution still works, but wrapper frames will not be elided
pub struct SkipPatternRejected<'a> {
    pub pattern: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for SkipPatternRejected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Ignoring invalid skip pattern '{}': {}",
            self.pattern, self.error
        )
    }
}

impl StructuredLog for SkipPatternRejected<'_> {
    fn log(&self) {
        tracing::warn!(
            pattern = self.pattern,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::WARN,
            "span_name",
            name = name,
            pattern = self.pattern,
        )
    }
}
