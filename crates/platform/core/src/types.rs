//! Data shapes handed back by upstream platform SDKs.
//!
//! Each supported upstream gets its own variant so conversion into the
//! normalized model is a total match instead of duck typing.

use serde::{Deserialize, Serialize};

/// Leaderboard entry as produced by the Rakuten Games SDK (Link, Viber).
///
/// Flat shape; most fields are optional in practice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RakutenEntry {
    pub player_id: String,
    #[serde(default)]
    pub player_name: Option<String>,
    #[serde(default)]
    pub player_photo: Option<String>,
    pub score: i64,
    #[serde(default)]
    pub formatted_score: Option<String>,
    #[serde(default)]
    pub timestamp: Option<i64>,
    #[serde(default)]
    pub rank: Option<u32>,
    #[serde(default)]
    pub extra_data: Option<String>,
}

/// Player embedded in a Facebook leaderboard entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacebookPlayer {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
}

/// Leaderboard entry as produced by Facebook Instant Games.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacebookEntry {
    pub player: FacebookPlayer,
    pub score: i64,
    pub formatted_score: String,
    pub timestamp: i64,
    pub rank: u32,
    #[serde(default)]
    pub extra_data: Option<String>,
}

/// Any upstream leaderboard entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum UpstreamEntry {
    Rakuten(RakutenEntry),
    Facebook(FacebookEntry),
}

/// Context a Rakuten leaderboard is scoped to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RakutenContext {
    pub id: String,
}

/// Leaderboard descriptor as produced by the Rakuten Games SDK.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RakutenLeaderboard {
    pub leaderboard_name: String,
    #[serde(default)]
    pub context: Option<RakutenContext>,
}

/// Leaderboard descriptor as produced by Facebook Instant Games.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacebookLeaderboard {
    pub name: String,
    #[serde(default, rename = "contextID")]
    pub context_id: Option<String>,
}

/// Any upstream leaderboard descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum UpstreamLeaderboardInfo {
    Rakuten(RakutenLeaderboard),
    Facebook(FacebookLeaderboard),
}

/// Player snapshot fetched from the platform during late initialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamPlayer {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub is_first_play: bool,
}

/// Ad placement settings fetched from the platform (or the ad backend).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdSettings {
    #[serde(default)]
    pub ad_blocked: bool,
    #[serde(default)]
    pub interstitial_id: Option<String>,
    #[serde(default)]
    pub rewarded_id: Option<String>,
    #[serde(default)]
    pub has_prerolls: bool,
}
