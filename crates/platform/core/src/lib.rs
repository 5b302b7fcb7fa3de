//! Platform abstraction layer for the portal SDK.
//!
//! # Architecture
//!
//! ```text
//! Layer 1: PlatformSdk (native SDK binding, one per hosting platform)
//!          └── LeaderboardService → UpstreamLeaderboard
//!
//! Layer 0: Platform identifiers, capability registry, upstream data shapes
//! ```
//!
//! Nothing in this crate knows about the normalized game-facing model; that
//! lives in `portal-sdk`, which converts the shapes defined here.
//!
//! # Usage
//!
//! ```ignore
//! use platform_core::{Platform, capabilities};
//!
//! if capabilities::is_supported(Platform::Link, "leaderboard.sendEntryAsync") {
//!     // show the leaderboard button
//! }
//! ```

pub mod capabilities;
pub mod platform;
pub mod traits;
pub mod types;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use capabilities::{is_supported, is_supported_on, supported_apis};
pub use platform::{ErrorConvention, Platform};
pub use traits::{LeaderboardService, PlatformSdk, UpstreamError, UpstreamLeaderboard};
pub use types::{
    AdSettings, FacebookEntry, FacebookLeaderboard, FacebookPlayer, RakutenContext, RakutenEntry,
    RakutenLeaderboard, UpstreamEntry, UpstreamLeaderboardInfo, UpstreamPlayer,
};

#[cfg(any(test, feature = "mock"))]
pub use mock::{MockPlatform, MockPlatformBuilder};
