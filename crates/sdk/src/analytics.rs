//! Analytics events and their fire-and-forget beacon.
//!
//! Events are best effort: delivery is never awaited, retried or queued, and
//! a failed POST is only logged. [`Delivery`] reports what the beacon did with
//! an event so callers and tests can observe it.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use platform_core::Platform;
use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::error::{Result, SdkError};
use crate::lifecycle::{ConfigCell, SdkConfig};
use crate::session::GameState;

const DEFAULT_TUTORIAL: &str = "Tutorial";

/// Event names understood by the analytics backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
pub enum EventName {
    GameStart,
    LevelStart,
    LevelEnd,
    TutorialStart,
    TutorialEnd,
    PostScore,
    GameChoice,
}

/// Wire payload: `{"name": ..., "features": {...}}`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AnalyticsEvent {
    pub name: String,
    pub features: Map<String, Value>,
}

impl AnalyticsEvent {
    pub fn new(name: EventName, features: Map<String, Value>) -> Self {
        Self {
            name: name.to_string(),
            features,
        }
    }
}

/// What the beacon did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Delivery {
    /// Analytics are not allowed on the platform.
    Suppressed,
    /// Debug platform or debug mode: logged instead of sent.
    Logged,
    /// POST spawned in the background.
    Dispatched,
    /// No async runtime to send from.
    Dropped,
}

/// HTTP reporter for analytics events.
#[derive(Clone, Debug)]
pub struct AnalyticsBeacon {
    endpoint: String,
    debug_mode: bool,
    http_client: reqwest::Client,
}

impl AnalyticsBeacon {
    pub fn new(endpoint: impl Into<String>, debug_mode: bool) -> Self {
        Self {
            endpoint: endpoint.into(),
            debug_mode,
            http_client: reqwest::Client::new(),
        }
    }

    /// Send `event` as reported from `platform`. Never blocks and never fails.
    pub fn send(&self, platform: Platform, event: AnalyticsEvent) -> Delivery {
        if !platform.allows_analytics() {
            tracing::debug!("Analytics disabled on {}, dropping {}", platform, event.name);
            return Delivery::Suppressed;
        }

        if platform.is_debug() || self.debug_mode {
            tracing::debug!(
                "Mock analytics event: {}",
                serde_json::to_string(&event).unwrap_or_else(|_| event.name.clone())
            );
            return Delivery::Logged;
        }

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!("No async runtime, analytics event {} dropped", event.name);
            return Delivery::Dropped;
        };

        tracing::debug!("Sending analytics event {}", event.name);
        runtime.spawn(post_event(
            self.http_client.clone(),
            self.endpoint.clone(),
            event,
        ));
        Delivery::Dispatched
    }
}

async fn post_event(http_client: reqwest::Client, endpoint: String, event: AnalyticsEvent) {
    match http_client.post(&endpoint).json(&event).send().await {
        Ok(response) if response.status().is_success() => {
            tracing::debug!("Analytics event {} accepted", event.name);
        }
        Ok(response) => {
            tracing::warn!("Analytics event {} rejected with status {}", event.name, response.status());
        }
        Err(err) => {
            tracing::warn!("Failed to send analytics event {}: {}", event.name, err);
        }
    }
}

/// Game-facing analytics API.
///
/// Every call validates its arguments first, then requires the SDK to be
/// ready, since events carry the player and platform.
#[derive(Clone)]
pub struct Analytics {
    config: Arc<ConfigCell>,
    beacon: AnalyticsBeacon,
    game_id: Option<String>,
    game: Arc<Mutex<GameState>>,
}

impl Analytics {
    pub fn new(config: Arc<ConfigCell>, beacon: AnalyticsBeacon, game_id: Option<String>) -> Self {
        Self {
            config,
            beacon,
            game_id,
            game: Arc::new(Mutex::new(GameState::new())),
        }
    }

    fn game(&self) -> MutexGuard<'_, GameState> {
        self.game.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn features(&self, config: &SdkConfig) -> Map<String, Value> {
        let mut features = Map::new();
        features.insert("game".into(), json!(self.game_id));
        features.insert("platform".into(), json!(config.platform()));
        features.insert("player".into(), json!(config.player().id));
        features
    }

    fn emit(&self, config: &SdkConfig, name: EventName, extra: Map<String, Value>) -> Delivery {
        let mut features = self.features(config);
        features.extend(extra);
        self.beacon.send(config.platform(), AnalyticsEvent::new(name, features))
    }

    /// Report that the game has started. Call once, after the SDK is ready.
    pub fn log_game_start(&self) -> Result<Delivery> {
        let config = self.config.ready("analytics.logGameStart")?;
        let time_played = self.game().game_time().as_secs();

        let mut extra = Map::new();
        extra.insert("timePlayed".into(), json!(time_played));
        Ok(self.emit(&config, EventName::GameStart, extra))
    }

    /// Report the start of `level` and begin timing it.
    pub fn log_level_start(&self, level: &str) -> Result<Delivery> {
        const CONTEXT: &str = "analytics.logLevelStart";
        require_text("level", level, CONTEXT)?;
        let config = self.config.ready(CONTEXT)?;

        self.game().start_level(level);

        let mut extra = Map::new();
        extra.insert("level".into(), json!(level));
        Ok(self.emit(&config, EventName::LevelStart, extra))
    }

    /// Report the end of `level` with how long it was played.
    ///
    /// The time is zero when `level` does not match the level in progress.
    pub fn log_level_end(&self, level: &str, score: Option<&str>, was_completed: bool) -> Result<Delivery> {
        const CONTEXT: &str = "analytics.logLevelEnd";
        require_text("level", level, CONTEXT)?;
        let config = self.config.ready(CONTEXT)?;

        let time_played = self.game().end_level(level).as_secs();

        let mut extra = Map::new();
        extra.insert("level".into(), json!(level));
        extra.insert("score".into(), json!(score.unwrap_or_default()));
        extra.insert("wasCompleted".into(), json!(was_completed));
        extra.insert("timePlayed".into(), json!(time_played));
        Ok(self.emit(&config, EventName::LevelEnd, extra))
    }

    /// Report the start of a tutorial (default name `Tutorial`).
    pub fn log_tutorial_start(&self, tutorial: Option<&str>) -> Result<Delivery> {
        let config = self.config.ready("analytics.logTutorialStart")?;
        let tutorial = tutorial.unwrap_or(DEFAULT_TUTORIAL);

        self.game().start_tutorial(tutorial);

        let mut extra = Map::new();
        extra.insert("tutorial".into(), json!(tutorial));
        Ok(self.emit(&config, EventName::TutorialStart, extra))
    }

    pub fn log_tutorial_end(&self, tutorial: Option<&str>, was_completed: bool) -> Result<Delivery> {
        let config = self.config.ready("analytics.logTutorialEnd")?;
        let tutorial = tutorial.unwrap_or(DEFAULT_TUTORIAL);

        let time_played = self.game().end_tutorial(tutorial).as_secs();

        let mut extra = Map::new();
        extra.insert("tutorial".into(), json!(tutorial));
        extra.insert("wasCompleted".into(), json!(was_completed));
        extra.insert("timePlayed".into(), json!(time_played));
        Ok(self.emit(&config, EventName::TutorialEnd, extra))
    }

    /// Report a score outside of level end, e.g. in endless games.
    pub fn log_score(&self, score: &str) -> Result<Delivery> {
        const CONTEXT: &str = "analytics.logScore";
        require_text("score", score, CONTEXT)?;
        let config = self.config.ready(CONTEXT)?;

        let mut extra = Map::new();
        extra.insert("score".into(), json!(score));
        Ok(self.emit(&config, EventName::PostScore, extra))
    }

    /// Report a choice the player made for `decision`.
    pub fn log_game_choice(&self, decision: &str, choice: &str) -> Result<Delivery> {
        const CONTEXT: &str = "analytics.logGameChoice";
        require_text("decision", decision, CONTEXT)?;
        require_text("choice", choice, CONTEXT)?;
        let config = self.config.ready(CONTEXT)?;

        let mut extra = Map::new();
        extra.insert("decision".into(), json!(decision));
        extra.insert("choice".into(), json!(choice));
        if let Some(level) = self.game().level_name() {
            extra.insert("level".into(), json!(level));
        }
        Ok(self.emit(&config, EventName::GameChoice, extra))
    }
}

fn require_text(field: &str, value: &str, context: &'static str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SdkError::invalid_param(
            format!("{field} cannot be null or empty."),
            context,
        ));
    }
    Ok(())
}
