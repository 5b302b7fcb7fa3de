//! Portal SDK demo binary.
//!
//! Composition root that assembles an [`Sdk`] against the in-memory platform
//! and walks through the leaderboard and analytics APIs.
//!
//! # Examples
//!
//! ```bash
//! # Rakuten-style leaderboard on Link
//! PORTAL_PLATFORM=link cargo run -p portal-demo
//!
//! # Platform without leaderboards; every leaderboard call is NotSupported
//! PORTAL_PLATFORM=gd RUST_LOG=portal_sdk=debug cargo run -p portal-demo
//! ```

use std::sync::Arc;

use anyhow::{Context, Result};
use portal_sdk::{MockPlatform, Platform, Sdk, SdkSettings};

const BOARD: &str = "global";

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    setup_logging();

    // 1. Load configuration from environment
    let settings = SdkSettings::from_env();
    let platform = settings.platform.unwrap_or(Platform::Debug);
    tracing::info!("Starting portal demo on {}", platform);

    // 2. Host binding
    let host = MockPlatform::new(platform);
    host.create_leaderboard(BOARD);
    host.seed(BOARD, "alice", "Alice", 1200);
    host.seed(BOARD, "bob", "Bob", 800);
    host.connect("bob");

    // 3. Build the SDK; with auto-initialize off, drive the lifecycle here
    let auto_initialize = settings.options.auto_initialize;
    let sdk = Sdk::builder()
        .settings(settings)
        .platform_sdk(Arc::new(host))
        .build()
        .await
        .context("Failed to build SDK")?;
    if !auto_initialize {
        sdk.initialize_async()
            .await
            .context("Failed to initialize SDK")?;
    }

    let config = sdk.config()?;
    println!("platform: {}", sdk.platform());
    println!(
        "player: {} (locale {})",
        config.player().name,
        config.session().locale.as_deref().unwrap_or("unset")
    );
    println!("supported: {}", sdk.supported_apis().join(", "));

    // 4. Exercise the façade
    run_leaderboard(&sdk).await;
    run_analytics(&sdk)?;

    tracing::info!("Demo complete");
    Ok(())
}

async fn run_leaderboard(sdk: &Sdk) {
    let leaderboard = sdk.leaderboard();

    match leaderboard.send_entry(BOARD, 1000, Some("demo")).await {
        Ok(entry) => println!("submitted: rank {} with {}", entry.rank, entry.formatted_score),
        Err(e) => {
            // Unsupported platforms fail here; the rest would fail the same way.
            println!("leaderboard unavailable: [{}] {}", e.kind(), e);
            return;
        }
    }

    match leaderboard.get_entries(BOARD, 10, None).await {
        Ok(entries) => {
            for entry in entries {
                println!("#{} {} {}", entry.rank, entry.player.name, entry.formatted_score);
            }
        }
        Err(e) => println!("get_entries failed: [{}] {}", e.kind(), e),
    }

    match leaderboard.get_connected_players_entries(BOARD, 10, 0).await {
        Ok(entries) => match serde_json::to_string_pretty(&entries) {
            Ok(json) => println!("connected: {json}"),
            Err(e) => tracing::warn!("Failed to render entries: {}", e),
        },
        Err(e) => println!("connected entries failed: [{}] {}", e.kind(), e),
    }

    if let Err(e) = leaderboard.get_entries("", 10, None).await {
        println!("empty name: [{}] {}", e.kind(), e);
    }
}

fn run_analytics(sdk: &Sdk) -> Result<()> {
    let analytics = sdk.analytics();
    println!("game start: {}", analytics.log_game_start()?);
    analytics.log_level_start("1-1")?;
    println!("level end: {}", analytics.log_level_end("1-1", Some("1000"), true)?);
    Ok(())
}

/// Setup logging to stderr, INFO unless `RUST_LOG` says otherwise.
fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
