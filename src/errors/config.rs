// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;

/// Errors found while validating a loaded console configuration
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Tabs cannot expand to zero columns
    ZeroTabSize,
    /// The console panel needs a visible height
    ZeroHeight,
    /// The middleware body limit must allow at least one byte
    ZeroBodyLimit,
    /// The skip pattern is not a valid regular expression
    InvalidSkipPattern {
        /// The pattern as written in the configuration
        pattern: String,
        /// Why the regex engine rejected it
        reason: String,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::ZeroTabSize => write!(f, "tab_size must be at least 1"),
            ValidationError::ZeroHeight => write!(f, "height must be at least 1 pixel"),
            ValidationError::ZeroBodyLimit => write!(f, "max_body_bytes must be at least 1"),
            ValidationError::InvalidSkipPattern { pattern, reason } => {
                write!(f, "skip_pattern '{}' is not a valid regex: {}", pattern, reason)
            }
        }
    }
}

impl std::error::Error for ValidationError {}
