// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! This module provides centralized message types for the crate's own
//! diagnostic logging. These are `tracing` events about the console itself
//! (config loaded, page patched, response skipped), not the debug messages
//! application code hands to a [`crate::console::Console`].
//!
//! Message types follow a struct-based pattern with a `Display`
//! implementation so log text is never assembled from magic strings at the
//! call site.
//!
//! # Architecture
//!
//! Messages are organized by subsystem:
//! * `messages::config` - configuration loading
//! * `messages::console` - log capture and caller attribution
//! * `messages::page` - page patching and the response middleware
//!
//! # Usage
//!
//! ```rust
//! use the_hacker_console::observability::messages::page::PageAttached;
//!
//! let msg = PageAttached {
//!     entry_count: 3,
//!     group_count: 1,
//!     closed_tags: 0,
//!     body_tag_found: true,
//! };
//!
//! tracing::info!("{}", msg);
//! ```

pub mod messages;
