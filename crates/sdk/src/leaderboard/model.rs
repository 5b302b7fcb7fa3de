//! Normalized leaderboard model handed to game code.

use serde::{Deserialize, Serialize};

/// A leaderboard, independent of the platform it lives on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leaderboard {
    pub name: String,
    /// Context (group, chat) the leaderboard is scoped to, if any.
    pub context_id: Option<String>,
}

/// Player attached to a leaderboard entry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardPlayer {
    pub id: String,
    pub name: String,
    pub photo: Option<String>,
}

/// A single leaderboard entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub player: LeaderboardPlayer,
    pub score: i64,
    pub formatted_score: String,
    /// Unix timestamp (seconds) of the submission; 0 when the platform omits it.
    pub timestamp: i64,
    /// 1-based rank; 0 when the platform omits it.
    pub rank: u32,
    pub details: Option<String>,
}
