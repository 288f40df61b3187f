// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for page patching and the response middleware.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use std::path::Path;
use tracing::Span;

/// Console block injected into a page.
///
/// # Log Level
/// `debug!` - Once per rendered page
///
/// # Example
/// ```
/// use the_hacker_console::observability::messages::page::PageAttached;
///
/// let msg = PageAttached {
///     entry_count: 12,
///     group_count: 2,
///     closed_tags: 1,
///     body_tag_found: false,
/// };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct PageAttached {
    pub entry_count: usize,
    pub group_count: usize,
    pub closed_tags: usize,
    pub body_tag_found: bool,
}

impl Display for PageAttached {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Console attached: {} entries in {} groups, body_tag_found={}, closed_tags={}",
            self.entry_count, self.group_count, self.body_tag_found, self.closed_tags
        )
    }
}

impl StructuredLog for PageAttached {
    fn log(&self) {
        tracing::debug!(
            entry_count = self.entry_count,
            group_count = self.group_count,
            closed_tags = self.closed_tags,
            body_tag_found = self.body_tag_found,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::DEBUG,
            "span_name",
            name = name,
            entry_count = self.entry_count,
        )
    }
}

/// Response left untouched by the middleware.
///
/// # Log Level
/// `trace!` - Most non-HTML responses hit this
pub struct ResponsePassedThrough<'a> {
    pub reason: &'a str,
    pub content_type: Option<&'a str>,
}

impl Display for ResponsePassedThrough<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Response passed through without console ({}), content_type={}",
            self.reason,
            self.content_type.unwrap_or("<none>")
        )
    }
}

impl StructuredLog for ResponsePassedThrough<'_> {
    fn log(&self) {
        tracing::trace!(
            reason = self.reason,
            content_type = self.content_type,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::TRACE,
            "span_name",
            name = name,
            reason = self.reason,
        )
    }
}

/// The response body stream failed while being buffered.
///
/// # Log Level
/// `warn!` - The bytes read so far are replayed to the client without a console
pub struct ResponseBodyUnreadable<'a> {
    pub error: &'a dyn std::error::Error,
}

impl Display for ResponseBodyUnreadable<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Failed to buffer HTML response body: {}", self.error)
    }
}

impl StructuredLog for ResponseBodyUnreadable<'_> {
    fn log(&self) {
        tracing::warn!(error = %self.error, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(tracing::Level::WARN, "span_name", name = name)
    }
}

/// Client widget script loaded from disk.
///
/// # Log Level
/// `info!` - Important operational event
pub struct ScriptLoaded<'a> {
    pub path: &'a Path,
    pub bytes: usize,
}

impl Display for ScriptLoaded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Console script loaded from '{}': {} bytes",
            self.path.display(),
            self.bytes
        )
    }
}

impl StructuredLog for ScriptLoaded<'_> {
    fn log(&self) {
        tracing::info!(
            path = %self.path.display(),
            bytes = self.bytes,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::INFO,
            "span_name",
            name = name,
            path = %self.path.display(),
        )
    }
}
