//! Leaderboard API.
//!
//! Every operation follows the same path:
//!
//! ```text
//! validate ─▶ readiness ─▶ dispatch table ─▶ lookup by name ─▶ sub-operation ─▶ convert
//!    │            │              │                   └──────────────┴──▶ translate error
//!    └────────────┴──────────────┴──▶ rejected before any upstream call
//! ```
//!
//! Validation, the readiness check and dispatch run when the operation is
//! *called*, not when its future is first polled, so invalid input is
//! rejected without ever reaching the platform. Leaderboard handles are never
//! cached; each call resolves the handle by name again.

pub mod convert;
pub mod dispatch;
pub mod model;

use std::future::Future;
use std::sync::Arc;

use platform_core::{LeaderboardService, Platform, UpstreamError, UpstreamEntry, UpstreamLeaderboard};

use crate::error::{Result, SdkError, translate};
use crate::lifecycle::ConfigCell;

pub use convert::{to_entry, to_leaderboard};
pub use dispatch::{LEADERBOARD_PLATFORMS, LeaderboardDispatch};
pub use model::{Leaderboard, LeaderboardEntry, LeaderboardPlayer};

/// Leaderboard operations, named by their public API identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter)]
pub enum LeaderboardOp {
    GetLeaderboard,
    SendEntry,
    GetEntries,
    GetPlayerEntry,
    GetEntryCount,
    GetConnectedPlayersEntries,
}

impl LeaderboardOp {
    /// Dotted API name errors are tagged with.
    pub const fn api_name(self) -> &'static str {
        match self {
            LeaderboardOp::GetLeaderboard => "leaderboard.getLeaderboardAsync",
            LeaderboardOp::SendEntry => "leaderboard.sendEntryAsync",
            LeaderboardOp::GetEntries => "leaderboard.getEntriesAsync",
            LeaderboardOp::GetPlayerEntry => "leaderboard.getPlayerEntryAsync",
            LeaderboardOp::GetEntryCount => "leaderboard.getEntryCountAsync",
            LeaderboardOp::GetConnectedPlayersEntries => "leaderboard.getConnectedPlayersEntriesAsync",
        }
    }

    /// Key of this operation in the capability registry.
    ///
    /// Matches [`api_name`](Self::api_name) except for connected entries,
    /// which the registry lists under a singular "Player".
    pub const fn capability_key(self) -> &'static str {
        match self {
            LeaderboardOp::GetConnectedPlayersEntries => "leaderboard.getConnectedPlayerEntriesAsync",
            other => other.api_name(),
        }
    }
}

/// A call that passed every synchronous check.
struct PreparedCall {
    op: LeaderboardOp,
    platform: Platform,
    service: Arc<dyn LeaderboardService>,
    name: String,
}

/// Game-facing leaderboard API.
#[derive(Clone)]
pub struct LeaderboardApi {
    config: Arc<ConfigCell>,
    dispatch: Arc<LeaderboardDispatch>,
}

impl LeaderboardApi {
    pub fn new(config: Arc<ConfigCell>, dispatch: LeaderboardDispatch) -> Self {
        Self {
            config,
            dispatch: Arc::new(dispatch),
        }
    }

    fn prepare(&self, op: LeaderboardOp, name: &str) -> Result<PreparedCall> {
        let context = op.api_name();
        if name.trim().is_empty() {
            return Err(SdkError::invalid_param("name cannot be null or empty.", context));
        }

        let platform = self.config.ready(context)?.platform();
        let service = self.dispatch.resolve(platform, context)?;

        Ok(PreparedCall {
            op,
            platform,
            service,
            name: name.to_string(),
        })
    }

    /// Get the leaderboard called `name`.
    pub fn get_leaderboard(&self, name: &str) -> impl Future<Output = Result<Leaderboard>> + Send + use<> {
        let call = self.prepare(LeaderboardOp::GetLeaderboard, name);
        execute(call, |board| async move { Ok(to_leaderboard(board.info())) })
    }

    /// Submit `score` to the leaderboard called `name`.
    ///
    /// The platform decides whether the score replaces the player's existing
    /// entry (usually only when strictly higher); the returned entry is the
    /// one the platform kept. `details` defaults to an empty string.
    pub fn send_entry(
        &self,
        name: &str,
        score: i64,
        details: Option<&str>,
    ) -> impl Future<Output = Result<LeaderboardEntry>> + Send + use<> {
        let call = self.prepare(LeaderboardOp::SendEntry, name);
        let details = details.unwrap_or_default().to_string();
        execute(call, move |board| async move {
            board.set_score(score, &details).await.map(to_entry)
        })
    }

    /// Up to `count` entries in rank order, after skipping `offset` (default 0)
    /// top entries.
    pub fn get_entries(
        &self,
        name: &str,
        count: u32,
        offset: Option<u32>,
    ) -> impl Future<Output = Result<Vec<LeaderboardEntry>>> + Send + use<> {
        let call = self.prepare(LeaderboardOp::GetEntries, name);
        let offset = offset.unwrap_or(0);
        execute(call, move |board| async move {
            board
                .entries(count, offset)
                .await
                .map(|entries| normalize_page(entries, count))
        })
    }

    /// The current player's entry, or `None` if they have not submitted one.
    pub fn get_player_entry(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<LeaderboardEntry>>> + Send + use<> {
        let call = self.prepare(LeaderboardOp::GetPlayerEntry, name);
        execute(call, |board| async move {
            board.player_entry().await.map(|entry| entry.map(to_entry))
        })
    }

    /// Total number of entries.
    pub fn get_entry_count(&self, name: &str) -> impl Future<Output = Result<u64>> + Send + use<> {
        let call = self.prepare(LeaderboardOp::GetEntryCount, name);
        execute(call, |board| async move { board.entry_count().await })
    }

    /// Up to `count` entries of connected players in rank order, after
    /// skipping `offset` of them.
    pub fn get_connected_players_entries(
        &self,
        name: &str,
        count: u32,
        offset: u32,
    ) -> impl Future<Output = Result<Vec<LeaderboardEntry>>> + Send + use<> {
        let call = self.prepare(LeaderboardOp::GetConnectedPlayersEntries, name);
        execute(call, move |board| async move {
            board
                .connected_player_entries(count, offset)
                .await
                .map(|entries| normalize_page(entries, count))
        })
    }
}

/// Resolve the leaderboard, run `operation` on it and translate any rejection.
async fn execute<T, F, Fut>(call: Result<PreparedCall>, operation: F) -> Result<T>
where
    F: FnOnce(Arc<dyn UpstreamLeaderboard>) -> Fut + Send,
    Fut: Future<Output = std::result::Result<T, UpstreamError>> + Send,
    T: Send,
{
    let call = call?;
    let context = call.op.api_name();
    tracing::debug!("{} on {} for leaderboard {}", context, call.platform, call.name);

    let outcome = match call.service.get_leaderboard(&call.name).await {
        Ok(board) => operation(board).await,
        Err(err) => Err(err),
    };

    outcome.map_err(|err| {
        tracing::warn!("{} failed on {}: {}", context, call.platform, err);
        translate(call.platform, err, context)
    })
}

/// Convert a page of upstream entries, bounded by `count`.
fn normalize_page(entries: Vec<UpstreamEntry>, count: u32) -> Vec<LeaderboardEntry> {
    entries
        .into_iter()
        .take(count as usize)
        .map(to_entry)
        .collect()
}
