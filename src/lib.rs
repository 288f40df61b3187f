// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod config;     // config loading + defaults
pub mod console;    // per-request console
pub mod errors;     // error handling
pub mod format;     // value formatting + escaping
pub mod log;        // message log + caller resolution
pub mod observability;
pub mod render;     // page injection
pub mod stack;      // stack capture
pub mod traits;     // unified abstractions
pub mod web;        // axum middleware
