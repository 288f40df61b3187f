// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The per-request console.
//!
//! A [`Console`] is created for one request (or one page render), collects
//! messages while the request runs and is attached to the page once at the
//! end. There is no global instance; whoever owns the request owns the
//! console.
//!
//! ```
//! use the_hacker_console::console::Console;
//! use the_hacker_console::format::Value;
//!
//! let mut console = Console::new();
//! console.log("starting");
//! console.log_to("sql", "select * from users");
//! console.log_labeled("config", Value::record([("debug", true)]));
//!
//! let page = console.attach_to_page("<html><body>hi</body></html>");
//! assert!(page.contains("HackerConsole"));
//! assert!(page.ends_with("</body></html>"));
//! ```


use std::sync::Arc;

use crate::config::consts::DEFAULT_SKIP_PATTERN;
use crate::config::ConsoleConfig;
use crate::errors::ConsoleResult;
use crate::format::Value;
use crate::log::{compile_skip_pattern, CallerResolver, LogOptions, LogSnapshot, MessageLog, StackFrame};
use crate::render::{self, RenderSettings};
use crate::stack::BacktraceSource;
use crate::traits::StackSource;

#[derive(Debug)]
pub struct Console {
    log: MessageLog,
    settings: Arc<RenderSettings>,
}

impl Console {
    /// A console with default settings that attributes entries from the live
    /// call stack.
    pub fn new() -> Self {
        Self::with_parts(
            Arc::new(RenderSettings::default()),
            CallerResolver::for_console(Some(DEFAULT_SKIP_PATTERN)),
            Arc::new(BacktraceSource),
        )
    }

    /// Build a console from configuration. Fails when the widget script
    /// cannot be loaded or the skip pattern does not compile.
    pub fn from_config(config: &ConsoleConfig) -> ConsoleResult<Self> {
        if let Some(pattern) = &config.skip_pattern {
            compile_skip_pattern(pattern)?;
        }

        Ok(Self::with_parts(
            Arc::new(RenderSettings::from_config(config)?),
            CallerResolver::for_console(config.skip_pattern.as_deref()),
            Arc::new(BacktraceSource),
        ))
    }

    pub fn with_parts(
        settings: Arc<RenderSettings>,
        resolver: CallerResolver,
        source: Arc<dyn StackSource>,
    ) -> Self {
        Self {
            log: MessageLog::new(resolver, source),
            settings,
        }
    }

    /// Log to the default group, attributed to the caller.
    #[inline(never)]
    pub fn log(&mut self, message: impl Into<Value>) {
        self.log_with(message, LogOptions::default());
    }

    #[inline(never)]
    pub fn log_to(&mut self, group: &str, message: impl Into<Value>) {
        self.log_with(message, LogOptions::default().group(group));
    }

    /// Log with a fixed title instead of the caller's location.
    #[inline(never)]
    pub fn log_labeled(&mut self, label: &str, message: impl Into<Value>) {
        self.log_with(message, LogOptions::default().label(label));
    }

    #[inline(never)]
    pub fn log_with(&mut self, message: impl Into<Value>, options: LogOptions) {
        self.log.log(message, options);
    }

    /// The filtered call stack of the caller, innermost first.
    #[inline(never)]
    pub fn trace(&self) -> Vec<StackFrame> {
        self.log.trace()
    }

    pub fn snapshot(&self) -> LogSnapshot {
        self.log.snapshot()
    }

    pub fn len(&self) -> usize {
        self.log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    pub fn attach_to_page(&self, page: &str) -> String {
        render::attach_to_page(page, self.log.entries(), &self.settings)
    }

    pub fn message_log(&self) -> &MessageLog {
        &self.log
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}
