// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::console::Console;
use crate::format::Value;
use crate::log::{LogOptions, LogSnapshot};

/// Shared access to the console of the current request.
///
/// Cloning is cheap and every clone logs into the same console, so a handler
/// can pass it to the tasks it spawns. Extract it in a handler with
/// `console: ConsoleHandle`; the [`inject_console`](super::inject_console)
/// middleware must be installed for the route.
#[derive(Debug, Clone)]
pub struct ConsoleHandle {
    inner: Arc<Mutex<Console>>,
}

impl ConsoleHandle {
    pub fn new(console: Console) -> Self {
        Self {
            inner: Arc::new(Mutex::new(console)),
        }
    }

    /// A panic while logging never takes the console down with it.
    fn lock(&self) -> MutexGuard<'_, Console> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[inline(never)]
    pub fn log(&self, message: impl Into<Value>) {
        self.lock().log_with(message, LogOptions::default());
    }

    #[inline(never)]
    pub fn log_to(&self, group: &str, message: impl Into<Value>) {
        self.lock()
            .log_with(message, LogOptions::default().group(group));
    }

    #[inline(never)]
    pub fn log_labeled(&self, label: &str, message: impl Into<Value>) {
        self.lock()
            .log_with(message, LogOptions::default().label(label));
    }

    #[inline(never)]
    pub fn log_with(&self, message: impl Into<Value>, options: LogOptions) {
        self.lock().log_with(message, options);
    }

    pub fn snapshot(&self) -> LogSnapshot {
        self.lock().snapshot()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn attach_to_page(&self, page: &str) -> String {
        self.lock().attach_to_page(page)
    }
}

impl<S> FromRequestParts<S> for ConsoleHandle
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<ConsoleHandle>().cloned().ok_or((
            StatusCode::INTERNAL_SERVER_ERROR,
            "console middleware is not installed for this route",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::{CallerResolver, Origin, StackFrame};
    use crate::render::RenderSettings;
    use crate::stack::StaticSource;

    fn handle() -> ConsoleHandle {
        let stack = vec![
            StackFrame::new("attribute", "message_log.rs", 90),
            StackFrame::new("log", "handler.rs", 5),
            StackFrame::new("main", "main.rs", 1),
        ];
        ConsoleHandle::new(Console::with_parts(
            Arc::new(RenderSettings::default()),
            CallerResolver::default(),
            Arc::new(StaticSource::new(stack)),
        ))
    }

    #[test]
    fn test_clones_share_one_console() {
        let a = handle();
        let b = a.clone();
        a.log("one");
        b.log_to("sql", "two");
        b.log_labeled("fixed", "three");

        assert_eq!(a.len(), 3);
        assert_eq!(a.snapshot(), b.snapshot());
        assert_eq!(
            b.snapshot().entries("message").unwrap()[1].origin(),
            &Origin::labeled("fixed")
        );
    }

    #[test]
    fn test_poisoned_lock_is_recovered() {
        let handle = handle();
        handle.log("before");

        let poisoner = handle.clone();
        let result = std::thread::spawn(move || {
            let _guard = poisoner.inner.lock().unwrap();
            panic!("handler panicked while holding the console");
        })
        .join();
        assert!(result.is_err());
        assert!(handle.inner.is_poisoned());

        handle.log("after");
        assert_eq!(handle.len(), 2);
        assert!(handle.attach_to_page("<body></body>").contains("after"));
    }

    #[cfg(debug_assertions)]
    #[test]
    fn test_live_attribution_through_handle() {
        let handle = ConsoleHandle::new(Console::new());
        let expected_line = line!() + 1;
        handle.log("live");

        let snapshot = handle.snapshot();
        let Origin::Attributed { file, line, function } = snapshot.entries("message").unwrap()[0].origin() else {
            panic!("expected a resolved call site");
        };
        assert!(file.as_deref().is_some_and(|f| f.ends_with("handle.rs")), "file was {:?}", file);
        assert_eq!(*line, Some(expected_line));
        assert_eq!(function.as_deref(), Some("log"));
    }
}
