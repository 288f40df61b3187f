// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! axum integration.
//!
//! ```no_run
//! use axum::{middleware, response::Html, routing::get, Router};
//! use the_hacker_console::web::{inject_console, ConsoleHandle, ConsoleLayerState};
//!
//! async fn index(console: ConsoleHandle) -> Html<&'static str> {
//!     console.log("rendering index");
//!     Html("<html><body>hello</body></html>")
//! }
//!
//! let app: Router = Router::new()
//!     .route("/", get(index))
//!     .layer(middleware::from_fn_with_state(
//!         ConsoleLayerState::default(),
//!         inject_console,
//!     ));
//! ```

mod handle;
mod middleware;

#[cfg(test)]
mod integration_tests;

pub use handle::ConsoleHandle;
pub use middleware::{inject_console, ConsoleLayerState};
