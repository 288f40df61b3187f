// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Caller resolution over a captured call stack.
//!
//! The walk goes from the innermost frame outward:
//!
//! 1. A frame with no call site of its own was reached through an
//!    invoke-with-receiver shim. It is merged with the next frame (the one
//!    that performed the invocation) and that frame is consumed.
//! 2. The first surviving frame is the resolver's own and is always dropped.
//! 3. A frame whose *enclosing* function (named by the next frame) fully
//!    matches the skip pattern is dropped, so wrapper chains of any depth
//!    disappear.
//! 4. In [`ResolveMode::Caller`] the first survivor is the answer; in
//!    [`ResolveMode::Trace`] every survivor is returned.

use regex::{Regex, RegexBuilder};
use std::any::type_name;

use super::{MessageLog, Origin, StackFrame};
use crate::console::Console;
use crate::observability::messages::console::SkipPatternRejected;
use crate::observability::messages::StructuredLog;
use crate::web::ConsoleHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveMode {
    /// Stop at the first frame that survives filtering.
    Caller,
    /// Collect every surviving frame, innermost first.
    Trace,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Caller(Origin),
    Trace(Vec<StackFrame>),
}

/// Compile a skip pattern the way the resolver matches it: anchored at both
/// ends, case-insensitive, `.` matching newlines.
///
/// The pattern must also compile on its own, so text such as `a)|(?:b` cannot
/// close the anchoring group early.
pub fn compile_skip_pattern(pattern: &str) -> Result<Regex, regex::Error> {
    Regex::new(pattern)?;
    RegexBuilder::new(&format!("^(?:{})$", pattern))
        .case_insensitive(true)
        .dot_matches_new_line(true)
        .build()
}

pub fn resolve(stack: &[StackFrame], skip: Option<&Regex>, mode: ResolveMode) -> Resolution {
    let mut survivors = Vec::new();
    let mut frames_seen = 0usize;
    let mut consumed = false;

    for (i, current) in stack.iter().enumerate() {
        if consumed {
            consumed = false;
            continue;
        }

        let next = stack.get(i + 1);

        let frame = match next {
            Some(invoker) if current.is_indirect_invocation() => {
                consumed = true;
                current.merged_with(invoker)
            }
            _ => current.clone(),
        };

        frames_seen += 1;
        if frames_seen < 2 {
            continue;
        }

        // The enclosing name comes from the original next frame, even if the
        // merge above just consumed it.
        if let (Some(skip), Some(next)) = (skip, next) {
            if skip.is_match(&next.qualified_name()) {
                continue;
            }
        }

        match mode {
            ResolveMode::Caller => return Resolution::Caller(frame.into_origin()),
            ResolveMode::Trace => survivors.push(frame),
        }
    }

    match mode {
        ResolveMode::Caller => Resolution::Caller(Origin::unknown()),
        ResolveMode::Trace => Resolution::Trace(survivors),
    }
}

/// Methods of the logging entry points. Every call into the console passes
/// through some of these before the stack is captured.
fn internal_frames_pattern() -> String {
    [
        type_name::<MessageLog>(),
        type_name::<Console>(),
        type_name::<ConsoleHandle>(),
    ]
    .iter()
    .map(|name| format!("{}::.*", regex::escape(name)))
    .collect::<Vec<_>>()
    .join("|")
}

/// Caller resolution with a fixed skip pattern.
#[derive(Debug, Clone, Default)]
pub struct CallerResolver {
    skip: Option<Regex>,
}

impl CallerResolver {
    pub fn new(skip: Option<Regex>) -> Self {
        Self { skip }
    }

    pub fn with_pattern(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self::new(Some(compile_skip_pattern(pattern)?)))
    }

    /// Resolver used by consoles: elides frames inside this crate's logging
    /// entry points plus whatever `pattern` matches. An invalid `pattern` is
    /// reported and ignored.
    pub fn for_console(pattern: Option<&str>) -> Self {
        let internal = internal_frames_pattern();

        if let Some(pattern) = pattern {
            let combined = compile_skip_pattern(pattern)
                .and_then(|_| compile_skip_pattern(&format!("{}|(?:{})", internal, pattern)));
            match combined {
                Ok(regex) => return Self::new(Some(regex)),
                Err(error) => SkipPatternRejected {
                    pattern,
                    error: &error,
                }
                .log(),
            }
        }

        Self::new(compile_skip_pattern(&internal).ok())
    }

    pub fn skip_pattern(&self) -> Option<&Regex> {
        self.skip.as_ref()
    }

    pub fn resolve(&self, stack: &[StackFrame], mode: ResolveMode) -> Resolution {
        resolve(stack, self.skip.as_ref(), mode)
    }

    /// The origin of the logging call.
    pub fn caller(&self, stack: &[StackFrame]) -> Origin {
        match self.resolve(stack, ResolveMode::Caller) {
            Resolution::Caller(origin) => origin,
            Resolution::Trace(_) => Origin::unknown(),
        }
    }

    /// The filtered stack, innermost first, without the resolver's own frame.
    pub fn trace(&self, stack: &[StackFrame]) -> Vec<StackFrame> {
        match self.resolve(stack, ResolveMode::Trace) {
            Resolution::Trace(frames) => frames,
            Resolution::Caller(_) => Vec::new(),
        }
    }
}
