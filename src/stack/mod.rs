// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Stack sources for caller attribution.
//!
//! * [`BacktraceSource`] - captures the live stack with `std::backtrace`
//! * [`StaticSource`] - replays a fixed stack (tests, embedding hosts that
//!   track their own frames)
//! * [`NoStackSource`] - introspection unavailable; attribution stays empty
//!
//! Attribution from [`BacktraceSource`] needs debug info: in a build without
//! it every frame lacks a location and entries end up without a file.

mod parse;

pub use parse::{normalize, parse_backtrace, split_symbol, RawFrame};

use std::any::type_name;
use std::backtrace::{Backtrace, BacktraceStatus};

use crate::log::StackFrame;
use crate::traits::StackSource;

/// Captures the current thread's stack.
#[derive(Debug, Clone, Copy, Default)]
pub struct BacktraceSource;

impl StackSource for BacktraceSource {
    #[inline(never)]
    fn capture(&self) -> Option<Vec<StackFrame>> {
        let backtrace = Backtrace::force_capture();
        if backtrace.status() != BacktraceStatus::Captured {
            return None;
        }

        let raw = parse_backtrace(&backtrace.to_string());

        // Drop the capture machinery so the first frame is our caller.
        let marker = type_name::<BacktraceSource>();
        let start = raw
            .iter()
            .rposition(|f| f.symbol.as_deref().is_some_and(|s| s.contains(marker)))
            .map_or(0, |i| i + 1);

        let frames = normalize(&raw[start..]);
        if frames.is_empty() {
            None
        } else {
            Some(frames)
        }
    }

    fn name(&self) -> &'static str {
        "backtrace"
    }
}

/// Replays the same stack on every capture.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    frames: Vec<StackFrame>,
}

impl StaticSource {
    pub fn new(frames: Vec<StackFrame>) -> Self {
        Self { frames }
    }
}

impl StackSource for StaticSource {
    fn capture(&self) -> Option<Vec<StackFrame>> {
        Some(self.frames.clone())
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoStackSource;

impl StackSource for NoStackSource {
    fn capture(&self) -> Option<Vec<StackFrame>> {
        None
    }

    fn name(&self) -> &'static str {
        "none"
    }
}
