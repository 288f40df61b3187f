// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use super::Origin;

/// One frame of a call stack in call-site form.
///
/// `function` (and `class`, its receiver type or module path) names the
/// function being invoked; `file` and `line` name the place that invocation
/// happened. The name of the function a frame sits *inside* is therefore
/// carried by the next, outer frame.
///
/// A frame with no `file`, or one flagged `indirect`, marks a call made
/// through a generic invoke-with-receiver-and-arguments shim. The resolver
/// merges such a frame with the frame that performed the invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StackFrame {
    pub file: Option<String>,
    pub line: Option<u32>,
    pub function: Option<String>,
    pub class: Option<String>,
    pub indirect: bool,
    /// Set on a merged frame: the function of the frame merged into it.
    pub over_function: Option<String>,
}

impl StackFrame {
    pub fn new(function: impl Into<String>, file: impl Into<String>, line: u32) -> Self {
        Self {
            file: Some(file.into()),
            line: Some(line),
            function: Some(function.into()),
            ..Default::default()
        }
    }

    /// A frame with a function name but no call site.
    pub fn dummy(function: impl Into<String>) -> Self {
        Self {
            function: Some(function.into()),
            ..Default::default()
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn as_indirect(mut self) -> Self {
        self.indirect = true;
        self
    }

    pub fn is_indirect_invocation(&self) -> bool {
        self.indirect || self.file.is_none()
    }

    /// `class::function`, or just `function` when there is no class.
    pub fn qualified_name(&self) -> String {
        let function = self.function.as_deref().unwrap_or("");
        match &self.class {
            Some(class) => format!("{}::{}", class, function),
            None => function.to_string(),
        }
    }

    /// Fill this frame's missing fields from `invoker`, the frame that
    /// performed the indirect call. Fields already present win.
    pub(crate) fn merged_with(&self, invoker: &StackFrame) -> StackFrame {
        StackFrame {
            file: self.file.clone().or_else(|| invoker.file.clone()),
            line: self.line.or(invoker.line),
            function: self.function.clone().or_else(|| invoker.function.clone()),
            class: self.class.clone().or_else(|| invoker.class.clone()),
            indirect: self.indirect,
            over_function: self
                .over_function
                .clone()
                .or_else(|| invoker.function.clone()),
        }
    }

    pub fn into_origin(self) -> Origin {
        Origin::Attributed {
            file: self.file,
            line: self.line,
            function: self.function,
        }
    }
}
