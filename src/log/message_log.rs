// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use indexmap::IndexMap;
use std::sync::Arc;

use super::{CallerResolver, LogEntry, LogOptions, Origin, StackFrame};
use crate::config::consts::{DEFAULT_GROUP, DEFAULT_SKIP_PATTERN};
use crate::format::{log_text, Value};
use crate::observability::messages::console::{CallerUnresolved, EntryLogged};
use crate::observability::messages::StructuredLog;
use crate::stack::BacktraceSource;
use crate::traits::StackSource;

/// Logged entries, grouped. Groups keep first-seen order, entries keep
/// append order within their group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogSnapshot {
    groups: IndexMap<String, Vec<LogEntry>>,
}

impl LogSnapshot {
    pub fn groups(&self) -> impl Iterator<Item = (&str, &[LogEntry])> {
        self.groups
            .iter()
            .map(|(name, entries)| (name.as_str(), entries.as_slice()))
    }

    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    pub fn entries(&self, group: &str) -> Option<&[LogEntry]> {
        self.groups.get(group).map(Vec::as_slice)
    }

    /// Every entry, group by group.
    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.groups.values().flatten()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    fn push(&mut self, entry: LogEntry) {
        self.groups
            .entry(entry.group().to_string())
            .or_default()
            .push(entry);
    }
}

/// Append-only store of debug messages for one request.
///
/// Each entry is attributed when it is logged: either with the label the
/// caller supplied, or with the call site found by walking the current stack.
pub struct MessageLog {
    entries: LogSnapshot,
    resolver: CallerResolver,
    source: Arc<dyn StackSource>,
}

impl MessageLog {
    pub fn new(resolver: CallerResolver, source: Arc<dyn StackSource>) -> Self {
        Self {
            entries: LogSnapshot::default(),
            resolver,
            source,
        }
    }

    /// Append a message. Never fails: without stack introspection the entry
    /// is stored with an empty origin.
    #[inline(never)]
    pub fn log(&mut self, message: impl Into<Value>, options: LogOptions) {
        let text = log_text(&message.into());
        let LogOptions {
            group,
            color,
            label,
        } = options;
        let group = group.unwrap_or_else(|| DEFAULT_GROUP.to_string());

        let origin = match label {
            Some(text) => Origin::Labeled { text },
            None => self.attribute(&group),
        };

        EntryLogged {
            group: &group,
            attributed: !origin.is_unknown(),
            message_len: text.len(),
        }
        .log();

        self.entries.push(LogEntry::new(text, group, color, origin));
    }

    #[inline(never)]
    fn attribute(&self, group: &str) -> Origin {
        match self.source.capture() {
            Some(stack) => self.resolver.caller(&stack),
            None => {
                CallerUnresolved { group }.log();
                Origin::unknown()
            }
        }
    }

    /// The filtered call stack at this point, innermost first.
    #[inline(never)]
    pub fn trace(&self) -> Vec<StackFrame> {
        self.source
            .capture()
            .map(|stack| self.resolver.trace(&stack))
            .unwrap_or_default()
    }

    /// Borrowed view of everything logged so far.
    pub fn entries(&self) -> &LogSnapshot {
        &self.entries
    }

    /// Owned copy of everything logged so far. Does not clear the log.
    pub fn snapshot(&self) -> LogSnapshot {
        self.entries.clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn resolver(&self) -> &CallerResolver {
        &self.resolver
    }

    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }
}

impl Default for MessageLog {
    fn default() -> Self {
        Self::new(
            CallerResolver::for_console(Some(DEFAULT_SKIP_PATTERN)),
            Arc::new(BacktraceSource),
        )
    }
}

impl std::fmt::Debug for MessageLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageLog")
            .field("entries", &self.entries)
            .field("source", &self.source.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stack::{NoStackSource, StaticSource};

    fn stack() -> Vec<StackFrame> {
        vec![
            StackFrame::new("attribute", "message_log.rs", 90),
            StackFrame::new("log", "app.rs", 12),
            StackFrame::new("handler", "main.rs", 4),
        ]
    }

    fn static_log() -> MessageLog {
        MessageLog::new(CallerResolver::default(), Arc::new(StaticSource::new(stack())))
    }

    #[test]
    fn test_entries_keep_call_order_within_groups() {
        let mut log = static_log();
        log.log("first", LogOptions::default());
        log.log("sql one", LogOptions::default().group("sql"));
        log.log("second", LogOptions::default());
        log.log("sql two", LogOptions::default().group("sql"));
        log.log("cache", LogOptions::default().group("cache"));

        let snapshot = log.snapshot();
        let groups: Vec<_> = snapshot.group_names().collect();
        assert_eq!(groups, vec!["message", "sql", "cache"]);

        let messages: Vec<_> = snapshot.entries("message").unwrap().iter().map(|e| e.message()).collect();
        assert_eq!(messages, vec!["first\n", "second\n"]);

        let sql: Vec<_> = snapshot.entries("sql").unwrap().iter().map(|e| e.message()).collect();
        assert_eq!(sql, vec!["sql one\n", "sql two\n"]);

        assert_eq!(snapshot.len(), 5);
        assert_eq!(snapshot.group_count(), 3);
    }

    #[test]
    fn test_unlabeled_entry_is_attributed() {
        let mut log = static_log();
        log.log(42, LogOptions::default().color("red"));

        let entry = &log.entries().entries("message").unwrap()[0];
        assert_eq!(entry.message(), "42\n");
        assert_eq!(entry.color(), Some("red"));
        assert_eq!(
            entry.origin(),
            &Origin::Attributed {
                file: Some("app.rs".to_string()),
                line: Some(12),
                function: Some("log".to_string()),
            }
        );
    }

    /// Panics if asked for a stack; proves labels bypass resolution.
    struct ForbiddenSource;

    impl StackSource for ForbiddenSource {
        fn capture(&self) -> Option<Vec<StackFrame>> {
            panic!("stack resolution must not run for labeled entries");
        }

        fn name(&self) -> &'static str {
            "forbidden"
        }
    }

    #[test]
    fn test_label_skips_stack_resolution() {
        let mut log = MessageLog::new(CallerResolver::default(), Arc::new(ForbiddenSource));
        log.log("value", LogOptions::default().label("custom"));

        let snapshot = log.snapshot();
        let entry = &snapshot.entries("message").unwrap()[0];
        assert_eq!(entry.origin(), &Origin::labeled("custom"));
    }

    #[test]
    fn test_missing_stack_gives_unknown_origin() {
        let mut log = MessageLog::new(CallerResolver::default(), Arc::new(NoStackSource));
        log.log(Value::Null, LogOptions::default());

        let snapshot = log.snapshot();
        let entry = &snapshot.entries("message").unwrap()[0];
        assert_eq!(entry.message(), "NULL");
        assert!(entry.origin().is_unknown());
        assert!(log.trace().is_empty());
    }

    #[test]
    fn test_snapshot_is_idempotent() {
        let mut log = static_log();
        log.log("a", LogOptions::default());
        log.log("b", LogOptions::default().group("other"));

        let first = log.snapshot();
        let second = log.snapshot();
        assert_eq!(first, second);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_trace_drops_own_frame() {
        let log = static_log();
        let trace = log.trace();
        assert_eq!(trace.len(), 2);
        assert_eq!(trace[0].file.as_deref(), Some("app.rs"));
    }

    #[test]
    fn test_empty_log() {
        let log = static_log();
        assert!(log.is_empty());
        assert!(log.snapshot().is_empty());
        assert_eq!(log.source_name(), "static");
    }
}
