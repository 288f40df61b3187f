// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

/// Default console height in pixels
pub const DEFAULT_HEIGHT: u32 = 400;
/// Default tab expansion width
pub const DEFAULT_TAB_SIZE: usize = 4;
/// Largest HTML body the middleware will buffer and patch (10 MB)
pub const DEFAULT_MAX_BODY_BYTES: usize = 10_000_000;
/// Group used when a message is logged without one
pub const DEFAULT_GROUP: &str = "message";
/// Enclosing functions that only forward a call through the `Fn*` traits.
///
/// Frames generated inside these shims are elided during caller resolution,
/// however deeply they nest.
pub const DEFAULT_SKIP_PATTERN: &str = r"(?:<.*>::)?(?:core|std)::ops::function::Fn(?:Once|Mut)?::call.*";
/// Nesting depth past which the value formatter stops descending
pub const MAX_FORMAT_DEPTH: usize = 10;
/// Emitted in place of values nested deeper than [`MAX_FORMAT_DEPTH`]
pub const RECURSION_MARKER: &str = "*RECURSION*";
