//! Conversion from upstream leaderboard shapes into the normalized model.
//!
//! This is the only place that knows platform field names. Both functions are
//! total: missing optional fields become defaults, never failures.

use platform_core::{UpstreamEntry, UpstreamLeaderboardInfo};

use super::model::{Leaderboard, LeaderboardEntry, LeaderboardPlayer};

pub fn to_leaderboard(info: UpstreamLeaderboardInfo) -> Leaderboard {
    match info {
        UpstreamLeaderboardInfo::Rakuten(board) => Leaderboard {
            name: board.leaderboard_name,
            context_id: board.context.map(|context| context.id),
        },
        UpstreamLeaderboardInfo::Facebook(board) => Leaderboard {
            name: board.name,
            context_id: board.context_id,
        },
    }
}

pub fn to_entry(entry: UpstreamEntry) -> LeaderboardEntry {
    match entry {
        UpstreamEntry::Rakuten(entry) => LeaderboardEntry {
            player: LeaderboardPlayer {
                id: entry.player_id,
                name: entry.player_name.unwrap_or_default(),
                photo: entry.player_photo,
            },
            formatted_score: entry
                .formatted_score
                .unwrap_or_else(|| entry.score.to_string()),
            score: entry.score,
            timestamp: entry.timestamp.unwrap_or_default(),
            rank: entry.rank.unwrap_or_default(),
            details: entry.extra_data,
        },
        UpstreamEntry::Facebook(entry) => LeaderboardEntry {
            player: LeaderboardPlayer {
                id: entry.player.id,
                name: entry.player.name.unwrap_or_default(),
                photo: entry.player.photo,
            },
            score: entry.score,
            formatted_score: entry.formatted_score,
            timestamp: entry.timestamp,
            rank: entry.rank,
            details: entry.extra_data,
        },
    }
}
