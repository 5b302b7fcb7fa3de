//! Session information and game progress tracking.

use std::time::{Duration, Instant};

use platform_core::Platform;
use serde::{Deserialize, Serialize};

/// Where the player came from, as reported by the hosting page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrafficSource {
    #[serde(rename = "utm_source", default, skip_serializing_if = "Option::is_none")]
    pub utm_source: Option<String>,
    #[serde(rename = "r_entrypoint", default, skip_serializing_if = "Option::is_none")]
    pub entry_point: Option<String>,
}

/// Platform-independent session facts, fixed once the SDK starts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub platform: Platform,
    pub locale: Option<String>,
    pub traffic_source: TrafficSource,
}

#[derive(Clone, Debug)]
struct LevelProgress {
    name: String,
    started_at: Instant,
}

impl LevelProgress {
    fn start(name: &str) -> Option<Self> {
        Some(Self {
            name: name.to_string(),
            started_at: Instant::now(),
        })
    }

    fn finish(slot: &mut Option<Self>, name: &str) -> Duration {
        match slot.take() {
            Some(progress) if progress.name == name => progress.started_at.elapsed(),
            other => {
                *slot = other;
                Duration::ZERO
            }
        }
    }
}

/// Timers backing analytics events.
#[derive(Clone, Debug)]
pub struct GameState {
    started_at: Instant,
    level: Option<LevelProgress>,
    tutorial: Option<LevelProgress>,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            started_at: Instant::now(),
            level: None,
            tutorial: None,
        }
    }

    /// Time since the game started.
    pub fn game_time(&self) -> Duration {
        self.started_at.elapsed()
    }

    pub fn level_name(&self) -> Option<&str> {
        self.level.as_ref().map(|level| level.name.as_str())
    }

    /// Start timing `level`, replacing any level in progress.
    pub fn start_level(&mut self, level: &str) {
        self.level = LevelProgress::start(level);
    }

    /// Stop timing `level` and return how long it was played.
    ///
    /// Ending a level that was never started (or a different one) yields zero.
    pub fn end_level(&mut self, level: &str) -> Duration {
        LevelProgress::finish(&mut self.level, level)
    }

    /// Tutorials are timed independently of levels.
    pub fn start_tutorial(&mut self, tutorial: &str) {
        self.tutorial = LevelProgress::start(tutorial);
    }

    pub fn end_tutorial(&mut self, tutorial: &str) -> Duration {
        LevelProgress::finish(&mut self.tutorial, tutorial)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
