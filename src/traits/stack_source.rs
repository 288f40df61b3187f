// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::log::StackFrame;

/// Something that can hand the resolver the current call stack.
///
/// Frames come innermost first in call-site form (see [`StackFrame`]), and the
/// first frame must be the function that called `capture`. `None` means stack
/// introspection is unavailable; callers degrade to an empty attribution.
pub trait StackSource: Send + Sync {
    fn capture(&self) -> Option<Vec<StackFrame>>;

    fn name(&self) -> &'static str;
}
