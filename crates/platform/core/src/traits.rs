//! Upstream platform SDK abstraction.
//!
//! Host bindings implement these traits over each platform's native SDK.
//! Layering mirrors the native object model:
//!
//! ```text
//! PlatformSdk
//!   ├── readiness, player snapshot, ad settings
//!   └── LeaderboardService (optional)
//!         └── UpstreamLeaderboard (handle, resolved by name per call)
//! ```

use std::sync::Arc;

use async_trait::async_trait;

use crate::platform::Platform;
use crate::types::{AdSettings, UpstreamEntry, UpstreamLeaderboardInfo, UpstreamPlayer};

/// Failure reported by a native platform SDK.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UpstreamError {
    #[error("{code}: {message}")]
    Rejected { code: String, message: String },

    #[error("platform SDK unavailable: {0}")]
    Unavailable(String),
}

impl UpstreamError {
    pub fn rejected(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Rejected {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Upstream-provided message, without the code prefix.
    pub fn message(&self) -> &str {
        match self {
            UpstreamError::Rejected { message, .. } => message,
            UpstreamError::Unavailable(message) => message,
        }
    }

    /// Upstream-provided error code, if the SDK reported one.
    pub fn code(&self) -> Option<&str> {
        match self {
            UpstreamError::Rejected { code, .. } => Some(code),
            UpstreamError::Unavailable(_) => None,
        }
    }
}

/// Native leaderboard handle.
///
/// Handles are cheap to resolve and may go stale; callers look one up by name
/// for every operation rather than holding on to it.
#[async_trait]
pub trait UpstreamLeaderboard: Send + Sync {
    /// Descriptor of this leaderboard in the platform's own shape.
    fn info(&self) -> UpstreamLeaderboardInfo;

    /// Submit a candidate score. The platform decides whether it replaces the
    /// player's existing entry and returns the entry it kept.
    async fn set_score(&self, score: i64, extra_data: &str) -> Result<UpstreamEntry, UpstreamError>;

    /// Entries in rank order, skipping `offset` top entries, at most `count` long.
    async fn entries(&self, count: u32, offset: u32) -> Result<Vec<UpstreamEntry>, UpstreamError>;

    /// The current player's entry, or `None` if they have not submitted a score.
    async fn player_entry(&self) -> Result<Option<UpstreamEntry>, UpstreamError>;

    /// Total number of entries.
    async fn entry_count(&self) -> Result<u64, UpstreamError>;

    /// Entries of players connected to the current player, in rank order.
    async fn connected_player_entries(
        &self,
        count: u32,
        offset: u32,
    ) -> Result<Vec<UpstreamEntry>, UpstreamError>;
}

/// Leaderboard lookup exposed by platforms that have leaderboards.
#[async_trait]
pub trait LeaderboardService: Send + Sync {
    async fn get_leaderboard(&self, name: &str) -> Result<Arc<dyn UpstreamLeaderboard>, UpstreamError>;
}

/// Native platform SDK.
#[async_trait]
pub trait PlatformSdk: Send + Sync {
    /// Platform this SDK belongs to.
    fn platform(&self) -> Platform;

    /// Resolve once the native SDK has finished its own startup.
    ///
    /// Platforms without a readiness signal return immediately.
    async fn wait_until_ready(&self) -> Result<(), UpstreamError>;

    /// Fetch the current player's identity.
    async fn fetch_player(&self) -> Result<UpstreamPlayer, UpstreamError>;

    /// Fetch ad placement settings.
    async fn fetch_ad_settings(&self) -> Result<AdSettings, UpstreamError>;

    /// Leaderboard service, if this SDK exposes one.
    fn leaderboards(&self) -> Option<Arc<dyn LeaderboardService>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_strips_code() {
        let err = UpstreamError::rejected("RATE_LIMITED", "slow down");
        assert_eq!(err.message(), "slow down");
        assert_eq!(err.code(), Some("RATE_LIMITED"));
        assert_eq!(err.to_string(), "RATE_LIMITED: slow down");
    }

    #[test]
    fn unavailable_has_no_code() {
        let err = UpstreamError::Unavailable("script blocked".into());
        assert_eq!(err.code(), None);
        assert_eq!(err.message(), "script blocked");
    }
}
