// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors raised while preparing a console, before any request is served.
//!
//! Logging and rendering themselves never fail; everything here comes from
//! loading configuration or the client widget script.

use std::path::PathBuf;
use thiserror::Error;

use super::ValidationError;

#[derive(Error, Debug)]
pub enum ConsoleError {
    /// The configuration file could not be read.
    #[error("Failed to read config '{path}': {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file was read but could not be parsed.
    #[error("Failed to parse config '{path}': {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// The configuration file extension is neither YAML nor TOML.
    #[error("Unsupported config format for '{0}' (expected .yaml, .yml or .toml)")]
    UnsupportedConfigFormat(PathBuf),

    /// One or more configuration values are out of range.
    #[error("Configuration validation failed: {}", join_errors(.0))]
    InvalidConfig(Vec<ValidationError>),

    /// A skip pattern handed to the resolver failed to compile.
    #[error("Invalid skip pattern: {0}")]
    InvalidSkipPattern(#[from] regex::Error),

    /// The client widget script could not be loaded.
    #[error("Failed to load console script '{path}': {source}")]
    ScriptAsset {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

pub type ConsoleResult<T> = Result<T, ConsoleError>;
