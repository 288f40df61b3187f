// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Each message type implements `Display` for the human-readable line and
//! [`StructuredLog`] to emit it at its level with structured fields.
//!
//! # Organization
//!
//! * `config` - configuration loading
//! * `console` - log capture and caller attribution
//! * `page` - page patching and the response middleware

use std::fmt::Display;
use tracing::Span;

pub mod config;
pub mod console;
pub mod page;

/// A message that knows its own log level and structured fields.
pub trait StructuredLog: Display {
    /// Emit the message as a `tracing` event.
    fn log(&self);

    /// Open a span carrying the message's fields.
    fn span(&self, name: &str) -> Span;
}
