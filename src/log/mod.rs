// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message capture and caller attribution.
//!
//! [`MessageLog`] stores entries grouped by name; [`CallerResolver`] turns a
//! captured [`StackFrame`] sequence into the [`Origin`] of a log call.

mod entry;
mod frame;
mod message_log;
mod resolver;

pub use entry::{LogEntry, LogOptions, Origin};
pub use frame::StackFrame;
pub use message_log::{LogSnapshot, MessageLog};
pub use resolver::{compile_skip_pattern, resolve, CallerResolver, Resolution, ResolveMode};
