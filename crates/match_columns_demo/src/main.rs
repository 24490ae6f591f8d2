// SPDX-License-Identifier: MIT OR Apache-2.0
//! Match Columns demo - a standalone window around the pairing widget.
//!
//! Two five-item columns; drag between them to connect, click a link's disc
//! to remove it, and use Save/Restore/Clear to round-trip the pairs through
//! a file-backed store.

mod app;
mod store;

use app::DemoApp;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("match_columns_demo=debug".parse().unwrap())
        .add_directive("match_columns=debug".parse().unwrap())
        .add_directive("wgpu=warn".parse().unwrap())
        .add_directive("naga=warn".parse().unwrap());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Match Columns demo v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = DemoApp::run() {
        tracing::error!("Demo crashed: {e}");
        std::process::exit(1);
    }
}
