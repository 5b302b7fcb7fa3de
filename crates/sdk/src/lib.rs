//! Game-facing SDK over heterogeneous hosting platforms.
//!
//! # Architecture
//!
//! ```text
//! Sdk ──┬── LeaderboardApi ── LeaderboardDispatch ──▶ platform_core::LeaderboardService
//!       ├── Analytics ─────── AnalyticsBeacon ─────▶ HTTP endpoint
//!       └── ConfigCell (lifecycle: Session, Player, AdConfig)
//! ```
//!
//! Upstream shapes are converted in [`leaderboard::convert`]; upstream failures
//! are mapped by [`error::translate`].
//!
//! # Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use portal_sdk::{Sdk, SdkSettings};
//!
//! let sdk = Sdk::builder()
//!     .settings(SdkSettings::from_env())
//!     .platform_sdk(Arc::new(host_binding))
//!     .build()
//!     .await?;
//!
//! let top = sdk.leaderboard().get_entries("global", 10, None).await?;
//! ```

pub mod ads;
pub mod analytics;
pub mod config;
pub mod error;
pub mod leaderboard;
pub mod lifecycle;
pub mod player;
pub mod sdk;
pub mod session;

pub use ads::AdConfig;
pub use analytics::{Analytics, AnalyticsBeacon, AnalyticsEvent, Delivery, EventName};
pub use config::{DEFAULT_ANALYTICS_ENDPOINT, InitializationOptions, SdkSettings};
pub use error::{ErrorKind, Result, SdkError, translate};
pub use leaderboard::{
    LEADERBOARD_PLATFORMS, Leaderboard, LeaderboardApi, LeaderboardDispatch, LeaderboardEntry,
    LeaderboardOp, LeaderboardPlayer,
};
pub use lifecycle::{ConfigCell, ConfigSkeleton, LifecycleState, SdkConfig};
pub use player::Player;
pub use sdk::{Sdk, SdkBuilder};
pub use session::{GameState, Session, TrafficSource};

pub use platform_core::{Platform, is_supported, supported_apis};

#[cfg(feature = "mock")]
pub use platform_core::MockPlatform;
