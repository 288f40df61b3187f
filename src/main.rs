// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use anyhow::Context;
use axum::response::Html;
use axum::routing::get;
use axum::{middleware, Router};
use std::env;
use std::time::Instant;
use the_hacker_console::config::{load_and_validate_config, ConsoleConfig};
use the_hacker_console::format::Value;
use the_hacker_console::log::LogOptions;
use the_hacker_console::web::{inject_console, ConsoleHandle, ConsoleLayerState};
use tracing_subscriber::EnvFilter;

const LISTEN_ADDR: &str = "127.0.0.1:3000";

const PAGE: &str = "<!DOCTYPE html>
<html>
<head><title>The Hacker Console</title></head>
<body>
<h1>The Hacker Console demo</h1>
<p>Press <kbd>Ctrl</kbd>+<kbd>Shift</kbd>+<kbd>`</kbd> to toggle the console.</p>
<p><a href=\"/plain\">A page without a closing body tag</a></p>
</body>
</html>
";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,the_hacker_console=debug")),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() > 2 {
        eprintln!("Usage: {} [config.yaml]", args[0]);
        std::process::exit(1);
    }

    let config = match args.get(1) {
        Some(path) => load_and_validate_config(path)
            .with_context(|| format!("loading console config from {}", path))?,
        None => ConsoleConfig::default(),
    };
    let state = ConsoleLayerState::from_config(&config)?;

    let app = Router::new()
        .route("/", get(index))
        .route("/plain", get(plain))
        .layer(middleware::from_fn_with_state(state, inject_console));

    let listener = tokio::net::TcpListener::bind(LISTEN_ADDR)
        .await
        .with_context(|| format!("binding {}", LISTEN_ADDR))?;
    println!("🚀 The Hacker Console demo on http://{}", LISTEN_ADDR);

    axum::serve(listener, app).await?;
    Ok(())
}

async fn index(console: ConsoleHandle) -> Html<&'static str> {
    let start = Instant::now();

    console.log("Rendering the index page");
    console.log(42);
    console.log(Value::Null);
    console.log(vec!["alpha", "beta", "gamma"]);
    console.log(Value::record([
        ("name", Value::from("ada")),
        ("admin", Value::from(true)),
        ("groups", Value::from(vec!["ops", "dev"])),
    ]));

    load_user(&console, 7);

    console.log_labeled("request", "GET /");
    console.log_with(
        "Something looks off",
        LogOptions::default().color("#f66").group("warnings"),
    );
    console.log_to("timing", format!("handler took {:?}", start.elapsed()));

    Html(PAGE)
}

fn load_user(console: &ConsoleHandle, id: u32) {
    console.log_to("sql", format!("SELECT * FROM users\nWHERE id = {}", id));
}

async fn plain(console: ConsoleHandle) -> Html<&'static str> {
    console.log("This page never closes its <pre> tag");
    Html("<h1>No body tag here</h1>\n<pre>\tstill preformatted")
}
