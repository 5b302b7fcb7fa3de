//! In-memory platform SDK for tests and local runs.
//!
//! Simulates a hosting platform without any network: leaderboards live in a
//! shared map, the current player is fixed at construction, and failures can
//! be injected to exercise error translation.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::platform::Platform;
use crate::traits::{LeaderboardService, PlatformSdk, UpstreamError, UpstreamLeaderboard};
use crate::types::{
    AdSettings, FacebookEntry, FacebookLeaderboard, FacebookPlayer, RakutenContext, RakutenEntry,
    RakutenLeaderboard, UpstreamEntry, UpstreamLeaderboardInfo, UpstreamPlayer,
};

#[derive(Debug, Clone)]
struct Record {
    player: UpstreamPlayer,
    score: i64,
    extra_data: String,
    timestamp: i64,
}

#[derive(Default)]
struct Boards {
    boards: HashMap<String, Vec<Record>>,
    connected: HashSet<String>,
    failure: Option<UpstreamError>,
    ready_failure: Option<UpstreamError>,
}

struct Inner {
    platform: Platform,
    player: UpstreamPlayer,
    ad_settings: AdSettings,
    context_id: Option<String>,
    leaderboards_enabled: bool,
    boards: Mutex<Boards>,
    calls: AtomicUsize,
    clock: AtomicU64,
}

/// Mock platform SDK.
///
/// Entries are produced in the shape of the configured platform: Facebook
/// shapes for [`Platform::Facebook`], Rakuten shapes for everything else.
#[derive(Clone)]
pub struct MockPlatform {
    inner: Arc<Inner>,
}

impl MockPlatform {
    pub fn new(platform: Platform) -> Self {
        Self::builder(platform).build()
    }

    pub fn builder(platform: Platform) -> MockPlatformBuilder {
        MockPlatformBuilder {
            platform,
            player: UpstreamPlayer {
                id: "player-1".into(),
                name: Some("Mock Player".into()),
                photo: Some("https://example.invalid/player-1.png".into()),
                is_first_play: true,
            },
            ad_settings: AdSettings {
                ad_blocked: false,
                interstitial_id: Some("mock-interstitial".into()),
                rewarded_id: Some("mock-rewarded".into()),
                has_prerolls: false,
            },
            context_id: None,
            leaderboards_enabled: true,
        }
    }

    /// Create an empty leaderboard.
    pub fn create_leaderboard(&self, name: &str) {
        self.state().boards.entry(name.to_string()).or_default();
    }

    /// Insert (or overwrite) a score for an arbitrary player.
    pub fn seed(&self, board: &str, player_id: &str, name: &str, score: i64) {
        let timestamp = self.tick();
        let mut state = self.state();
        let records = state.boards.entry(board.to_string()).or_default();
        records.retain(|r| r.player.id != player_id);
        records.push(Record {
            player: UpstreamPlayer {
                id: player_id.to_string(),
                name: Some(name.to_string()),
                photo: None,
                is_first_play: false,
            },
            score,
            extra_data: String::new(),
            timestamp,
        });
    }

    /// Mark a player as connected to the current player.
    pub fn connect(&self, player_id: &str) {
        self.state().connected.insert(player_id.to_string());
    }

    /// Make every subsequent upstream call reject with `error`.
    pub fn fail_with(&self, error: UpstreamError) {
        self.state().failure = Some(error);
    }

    /// Make the readiness signal reject with `error`.
    pub fn fail_readiness(&self, error: UpstreamError) {
        self.state().ready_failure = Some(error);
    }

    /// Clear injected failures.
    pub fn recover(&self) {
        let mut state = self.state();
        state.failure = None;
        state.ready_failure = None;
    }

    /// Number of upstream calls observed so far.
    pub fn call_count(&self) -> usize {
        self.inner.calls.load(Ordering::SeqCst)
    }

    fn state(&self) -> MutexGuard<'_, Boards> {
        self.inner.boards.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn tick(&self) -> i64 {
        self.inner.clock.fetch_add(1, Ordering::SeqCst) as i64 + 1_700_000_000
    }

    /// Count the call and surface any injected failure.
    fn enter(&self) -> Result<(), UpstreamError> {
        self.inner.calls.fetch_add(1, Ordering::SeqCst);
        match &self.state().failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn entry(&self, record: &Record, rank: u32) -> UpstreamEntry {
        let extra_data = (!record.extra_data.is_empty()).then(|| record.extra_data.clone());
        match self.inner.platform {
            Platform::Facebook => UpstreamEntry::Facebook(FacebookEntry {
                player: FacebookPlayer {
                    id: record.player.id.clone(),
                    name: record.player.name.clone(),
                    photo: record.player.photo.clone(),
                },
                score: record.score,
                formatted_score: record.score.to_string(),
                timestamp: record.timestamp,
                rank,
                extra_data,
            }),
            _ => UpstreamEntry::Rakuten(RakutenEntry {
                player_id: record.player.id.clone(),
                player_name: record.player.name.clone(),
                player_photo: record.player.photo.clone(),
                score: record.score,
                formatted_score: None,
                timestamp: Some(record.timestamp),
                rank: Some(rank),
                extra_data,
            }),
        }
    }

    /// Records of `board` ordered by score (desc), earliest submission first on ties.
    fn ranked(&self, board: &str) -> Result<Vec<Record>, UpstreamError> {
        let state = self.state();
        let mut records = state
            .boards
            .get(board)
            .cloned()
            .ok_or_else(|| not_found(board))?;
        records.sort_by(|a, b| b.score.cmp(&a.score).then(a.timestamp.cmp(&b.timestamp)));
        Ok(records)
    }

    fn page<'a>(
        &self,
        ranked: impl Iterator<Item = (usize, &'a Record)>,
        count: u32,
        offset: u32,
    ) -> Vec<UpstreamEntry> {
        ranked
            .skip(offset as usize)
            .take(count as usize)
            .map(|(index, record)| self.entry(record, index as u32 + 1))
            .collect()
    }
}

fn not_found(board: &str) -> UpstreamError {
    UpstreamError::rejected(
        "LEADERBOARD_NOT_FOUND",
        format!("leaderboard {board} does not exist"),
    )
}

/// Builder for [`MockPlatform`].
pub struct MockPlatformBuilder {
    platform: Platform,
    player: UpstreamPlayer,
    ad_settings: AdSettings,
    context_id: Option<String>,
    leaderboards_enabled: bool,
}

impl MockPlatformBuilder {
    pub fn player(mut self, player: UpstreamPlayer) -> Self {
        self.player = player;
        self
    }

    pub fn ad_settings(mut self, settings: AdSettings) -> Self {
        self.ad_settings = settings;
        self
    }

    /// Scope every leaderboard to a context.
    pub fn context_id(mut self, context_id: impl Into<String>) -> Self {
        self.context_id = Some(context_id.into());
        self
    }

    /// Hide the leaderboard service entirely.
    pub fn without_leaderboards(mut self) -> Self {
        self.leaderboards_enabled = false;
        self
    }

    pub fn build(self) -> MockPlatform {
        MockPlatform {
            inner: Arc::new(Inner {
                platform: self.platform,
                player: self.player,
                ad_settings: self.ad_settings,
                context_id: self.context_id,
                leaderboards_enabled: self.leaderboards_enabled,
                boards: Mutex::new(Boards::default()),
                calls: AtomicUsize::new(0),
                clock: AtomicU64::new(0),
            }),
        }
    }
}

#[async_trait]
impl PlatformSdk for MockPlatform {
    fn platform(&self) -> Platform {
        self.inner.platform
    }

    async fn wait_until_ready(&self) -> Result<(), UpstreamError> {
        match &self.state().ready_failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    async fn fetch_player(&self) -> Result<UpstreamPlayer, UpstreamError> {
        self.enter()?;
        Ok(self.inner.player.clone())
    }

    async fn fetch_ad_settings(&self) -> Result<AdSettings, UpstreamError> {
        self.enter()?;
        Ok(self.inner.ad_settings.clone())
    }

    fn leaderboards(&self) -> Option<Arc<dyn LeaderboardService>> {
        if self.inner.leaderboards_enabled {
            Some(Arc::new(self.clone()))
        } else {
            None
        }
    }
}

#[async_trait]
impl LeaderboardService for MockPlatform {
    async fn get_leaderboard(
        &self,
        name: &str,
    ) -> Result<Arc<dyn UpstreamLeaderboard>, UpstreamError> {
        self.enter()?;
        if !self.state().boards.contains_key(name) {
            return Err(not_found(name));
        }
        Ok(Arc::new(MockLeaderboard {
            platform: self.clone(),
            name: name.to_string(),
        }))
    }
}

/// Handle onto one leaderboard of a [`MockPlatform`].
pub struct MockLeaderboard {
    platform: MockPlatform,
    name: String,
}

#[async_trait]
impl UpstreamLeaderboard for MockLeaderboard {
    fn info(&self) -> UpstreamLeaderboardInfo {
        let context_id = self.platform.inner.context_id.clone();
        match self.platform.inner.platform {
            Platform::Facebook => UpstreamLeaderboardInfo::Facebook(FacebookLeaderboard {
                name: self.name.clone(),
                context_id,
            }),
            _ => UpstreamLeaderboardInfo::Rakuten(RakutenLeaderboard {
                leaderboard_name: self.name.clone(),
                context: context_id.map(|id| RakutenContext { id }),
            }),
        }
    }

    async fn set_score(&self, score: i64, extra_data: &str) -> Result<UpstreamEntry, UpstreamError> {
        self.platform.enter()?;
        let player = self.platform.inner.player.clone();
        let timestamp = self.platform.tick();
        {
            let mut state = self.platform.state();
            let records = state
                .boards
                .get_mut(&self.name)
                .ok_or_else(|| not_found(&self.name))?;

            // Only a strictly higher score replaces the existing entry.
            match records.iter_mut().find(|r| r.player.id == player.id) {
                Some(existing) if existing.score >= score => {}
                Some(existing) => {
                    existing.score = score;
                    existing.extra_data = extra_data.to_string();
                    existing.timestamp = timestamp;
                }
                None => records.push(Record {
                    player: player.clone(),
                    score,
                    extra_data: extra_data.to_string(),
                    timestamp,
                }),
            }
        }

        let ranked = self.platform.ranked(&self.name)?;
        let (index, record) = ranked
            .iter()
            .enumerate()
            .find(|(_, r)| r.player.id == player.id)
            .ok_or_else(|| UpstreamError::rejected("INTERNAL", "submitted entry vanished"))?;
        Ok(self.platform.entry(record, index as u32 + 1))
    }

    async fn entries(&self, count: u32, offset: u32) -> Result<Vec<UpstreamEntry>, UpstreamError> {
        self.platform.enter()?;
        let ranked = self.platform.ranked(&self.name)?;
        Ok(self.platform.page(ranked.iter().enumerate(), count, offset))
    }

    async fn player_entry(&self) -> Result<Option<UpstreamEntry>, UpstreamError> {
        self.platform.enter()?;
        let ranked = self.platform.ranked(&self.name)?;
        let player_id = &self.platform.inner.player.id;
        Ok(ranked
            .iter()
            .enumerate()
            .find(|(_, r)| &r.player.id == player_id)
            .map(|(index, record)| self.platform.entry(record, index as u32 + 1)))
    }

    async fn entry_count(&self) -> Result<u64, UpstreamError> {
        self.platform.enter()?;
        Ok(self.platform.ranked(&self.name)?.len() as u64)
    }

    async fn connected_player_entries(
        &self,
        count: u32,
        offset: u32,
    ) -> Result<Vec<UpstreamEntry>, UpstreamError> {
        self.platform.enter()?;
        let ranked = self.platform.ranked(&self.name)?;
        let connected = self.platform.state().connected.clone();
        let player_id = &self.platform.inner.player.id;

        // Ranks stay global; only the visible set is filtered.
        let visible = ranked
            .iter()
            .enumerate()
            .filter(|(_, r)| connected.contains(&r.player.id) || &r.player.id == player_id);
        Ok(self.platform.page(visible, count, offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rank_of(entry: &UpstreamEntry) -> u32 {
        match entry {
            UpstreamEntry::Rakuten(e) => e.rank.unwrap_or_default(),
            UpstreamEntry::Facebook(e) => e.rank,
        }
    }

    fn score_of(entry: &UpstreamEntry) -> i64 {
        match entry {
            UpstreamEntry::Rakuten(e) => e.score,
            UpstreamEntry::Facebook(e) => e.score,
        }
    }

    #[tokio::test]
    async fn unknown_leaderboard_is_rejected() {
        let mock = MockPlatform::new(Platform::Link);
        let err = mock.get_leaderboard("missing").await.err().unwrap();
        assert_eq!(err.code(), Some("LEADERBOARD_NOT_FOUND"));
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn set_score_keeps_the_higher_score() {
        let mock = MockPlatform::new(Platform::Viber);
        mock.create_leaderboard("global");
        let board = mock.get_leaderboard("global").await.unwrap();

        let first = board.set_score(500, "first").await.unwrap();
        assert_eq!(score_of(&first), 500);

        let second = board.set_score(100, "second").await.unwrap();
        assert_eq!(score_of(&second), 500);

        let third = board.set_score(900, "").await.unwrap();
        assert_eq!(score_of(&third), 900);
    }

    #[tokio::test]
    async fn entries_are_ranked_and_paged() {
        let mock = MockPlatform::new(Platform::Facebook);
        for (i, score) in [30, 10, 50, 20, 40].into_iter().enumerate() {
            mock.seed("global", &format!("p{i}"), "someone", score);
        }
        let board = mock.get_leaderboard("global").await.unwrap();

        let page = board.entries(2, 1).await.unwrap();
        assert_eq!(page.iter().map(score_of).collect::<Vec<_>>(), vec![40, 30]);
        assert_eq!(page.iter().map(rank_of).collect::<Vec<_>>(), vec![2, 3]);
        assert!(matches!(page[0], UpstreamEntry::Facebook(_)));
        assert_eq!(board.entry_count().await.unwrap(), 5);
    }

    #[tokio::test]
    async fn connected_entries_filter_but_keep_global_rank() {
        let mock = MockPlatform::new(Platform::Link);
        mock.seed("global", "a", "A", 300);
        mock.seed("global", "b", "B", 200);
        mock.seed("global", "c", "C", 100);
        mock.connect("c");
        let board = mock.get_leaderboard("global").await.unwrap();

        let connected = board.connected_player_entries(10, 0).await.unwrap();
        assert_eq!(connected.len(), 1);
        assert_eq!(rank_of(&connected[0]), 3);
    }

    #[tokio::test]
    async fn injected_failure_applies_to_every_call() {
        let mock = MockPlatform::new(Platform::Link);
        mock.create_leaderboard("global");
        mock.fail_with(UpstreamError::rejected("NETWORK_FAILURE", "offline"));

        assert!(mock.get_leaderboard("global").await.is_err());
        assert!(mock.fetch_player().await.is_err());

        mock.recover();
        assert!(mock.get_leaderboard("global").await.is_ok());
    }

    #[tokio::test]
    async fn player_entry_absent_until_submitted() {
        let mock = MockPlatform::new(Platform::Link);
        mock.create_leaderboard("global");
        let board = mock.get_leaderboard("global").await.unwrap();

        assert!(board.player_entry().await.unwrap().is_none());
        board.set_score(7, "").await.unwrap();
        assert!(board.player_entry().await.unwrap().is_some());
    }
}
