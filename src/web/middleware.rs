// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use axum::body::{Body, BodyDataStream, Bytes, HttpBody};
use axum::extract::{Request, State};
use axum::http::header::{CONTENT_ENCODING, CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use futures_util::{stream, StreamExt};
use std::sync::Arc;

use super::ConsoleHandle;
use crate::config::consts::{DEFAULT_MAX_BODY_BYTES, DEFAULT_SKIP_PATTERN};
use crate::config::ConsoleConfig;
use crate::console::Console;
use crate::errors::ConsoleResult;
use crate::log::{compile_skip_pattern, CallerResolver};
use crate::observability::messages::page::{ResponseBodyUnreadable, ResponsePassedThrough};
use crate::observability::messages::StructuredLog;
use crate::render::RenderSettings;
use crate::stack::{BacktraceSource, NoStackSource};
use crate::traits::StackSource;

/// Shared state of the [`inject_console`] middleware: everything needed to
/// build a fresh console for each request.
#[derive(Clone)]
pub struct ConsoleLayerState {
    enabled: bool,
    max_body_bytes: usize,
    settings: Arc<RenderSettings>,
    resolver: CallerResolver,
    source: Arc<dyn StackSource>,
}

impl ConsoleLayerState {
    pub fn from_config(config: &ConsoleConfig) -> ConsoleResult<Self> {
        if let Some(pattern) = &config.skip_pattern {
            compile_skip_pattern(pattern)?;
        }

        Ok(Self {
            enabled: config.enabled,
            max_body_bytes: config.max_body_bytes,
            settings: Arc::new(RenderSettings::from_config(config)?),
            resolver: CallerResolver::for_console(config.skip_pattern.as_deref()),
            source: Arc::new(BacktraceSource),
        })
    }

    /// Replace the stack source used by every console built from now on.
    pub fn with_source(mut self, source: Arc<dyn StackSource>) -> Self {
        self.source = source;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// A fresh console for one request. When the layer is disabled the
    /// console still accepts entries but never captures a stack.
    pub fn new_console(&self) -> Console {
        let source: Arc<dyn StackSource> = if self.enabled {
            Arc::clone(&self.source)
        } else {
            Arc::new(NoStackSource)
        };
        Console::with_parts(Arc::clone(&self.settings), self.resolver.clone(), source)
    }
}

impl Default for ConsoleLayerState {
    fn default() -> Self {
        Self {
            enabled: true,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            settings: Arc::new(RenderSettings::default()),
            resolver: CallerResolver::for_console(Some(DEFAULT_SKIP_PATTERN)),
            source: Arc::new(BacktraceSource),
        }
    }
}

impl std::fmt::Debug for ConsoleLayerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleLayerState")
            .field("enabled", &self.enabled)
            .field("max_body_bytes", &self.max_body_bytes)
            .field("source", &self.source.name())
            .finish()
    }
}

/// Give each request its own console and attach it to HTML responses.
///
/// Install with `axum::middleware::from_fn_with_state(state, inject_console)`.
/// Handlers reach the console through the [`ConsoleHandle`] extractor, which
/// is available even when the layer is disabled.
/// Responses that are not uncompressed HTML within the body limit are
/// returned untouched.
pub async fn inject_console(
    State(state): State<ConsoleLayerState>,
    mut request: Request,
    next: Next,
) -> Response {
    let handle = ConsoleHandle::new(state.new_console());
    request.extensions_mut().insert(handle.clone());

    let response = next.run(request).await;
    if !state.enabled {
        return response;
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    if let Some(reason) = pass_through_reason(&response, content_type.as_deref(), state.max_body_bytes) {
        ResponsePassedThrough {
            reason,
            content_type: content_type.as_deref(),
        }
        .log();
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let bytes = match buffer_body(body, state.max_body_bytes).await {
        BufferedBody::Complete(bytes) => bytes,
        BufferedBody::Replayed(body) => {
            ResponsePassedThrough {
                reason: "body exceeds the size limit or failed to stream",
                content_type: content_type.as_deref(),
            }
            .log();
            return Response::from_parts(parts, body);
        }
    };

    let page = std::str::from_utf8(&bytes)
        .ok()
        .map(|text| handle.attach_to_page(text));
    let Some(page) = page else {
        ResponsePassedThrough {
            reason: "body is not valid UTF-8",
            content_type: content_type.as_deref(),
        }
        .log();
        return Response::from_parts(parts, Body::from(bytes));
    };

    parts
        .headers
        .insert(CONTENT_LENGTH, HeaderValue::from(page.len()));
    Response::from_parts(parts, Body::from(page))
}

enum BufferedBody {
    Complete(Bytes),
    /// Everything read so far followed by the unread rest of the stream.
    Replayed(Body),
}

/// Read the body frame by frame up to `limit` bytes. A body that grows past
/// the limit or fails mid-stream is handed back intact instead of dropped.
async fn buffer_body(body: Body, limit: usize) -> BufferedBody {
    let mut rest = body.into_data_stream();
    let mut read: Vec<Bytes> = Vec::new();
    let mut total = 0usize;

    while let Some(frame) = rest.next().await {
        match frame {
            Ok(chunk) => {
                total += chunk.len();
                read.push(chunk);
                if total > limit {
                    return BufferedBody::Replayed(replay(read, None, rest));
                }
            }
            Err(error) => {
                ResponseBodyUnreadable { error: &error }.log();
                return BufferedBody::Replayed(replay(read, Some(error), rest));
            }
        }
    }

    BufferedBody::Complete(Bytes::from(read.concat()))
}

fn replay(read: Vec<Bytes>, error: Option<axum::Error>, rest: BodyDataStream) -> Body {
    let read = read.into_iter().map(Ok).chain(error.map(Err));
    Body::from_stream(stream::iter(read).chain(rest))
}

fn pass_through_reason(
    response: &Response,
    content_type: Option<&str>,
    max_body_bytes: usize,
) -> Option<&'static str> {
    if !content_type.is_some_and(is_html) {
        return Some("not an HTML response");
    }
    if response.headers().contains_key(CONTENT_ENCODING) {
        return Some("body is encoded");
    }

    let declared_length = response
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<usize>().ok());
    if declared_length.is_some_and(|len| len > max_body_bytes) {
        return Some("body exceeds the size limit");
    }
    if response.body().size_hint().lower() > max_body_bytes as u64 {
        return Some("body exceeds the size limit");
    }

    None
}

fn is_html(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "text/html" || essence == "application/xhtml+xml"
}
