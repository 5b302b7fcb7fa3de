//! Two-phase SDK configuration lifecycle.
//!
//! ```text
//! Uninitialized ──initialize()──▶ Initialized ──late_initialize()──▶ LateInitializing ──▶ Ready
//!                                                                          └──────────────▶ Failed
//! ```
//!
//! Transitions only move forward and are not retried. A usable [`SdkConfig`]
//! (the only holder of player and ad data) exists solely in the `Ready` state;
//! every other state answers [`ConfigCell::ready`] with an error instead of
//! default data.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use platform_core::{Platform, PlatformSdk};

use crate::ads::AdConfig;
use crate::config::InitializationOptions;
use crate::error::{Result, SdkError};
use crate::player::Player;
use crate::session::{Session, TrafficSource};

const INITIALIZE: &str = "sdk.initialize";
const LATE_INITIALIZE: &str = "sdk.lateInitialize";

/// Observable lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum LifecycleState {
    Uninitialized,
    Initialized,
    LateInitializing,
    Ready,
    Failed,
}

/// Platform-independent skeleton that exists before initialization.
#[derive(Clone, Debug, Default)]
pub struct ConfigSkeleton {
    platform: Option<Platform>,
    locale: Option<String>,
    traffic_source: TrafficSource,
    options: InitializationOptions,
}

impl ConfigSkeleton {
    pub fn new(options: InitializationOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = Some(platform);
        self
    }

    pub fn locale(mut self, locale: Option<String>) -> Self {
        self.locale = locale;
        self
    }

    pub fn traffic_source(mut self, source: TrafficSource) -> Self {
        self.traffic_source = source;
        self
    }

    /// First phase: requires a resolved platform and builds the empty ad config.
    pub fn initialize(&self) -> Result<InitializedConfig> {
        let platform = self.platform.ok_or_else(|| {
            SdkError::initialization("platform must be resolved before initialize", INITIALIZE)
        })?;

        Ok(InitializedConfig {
            session: Session {
                platform,
                locale: self.locale.clone(),
                traffic_source: self.traffic_source.clone(),
            },
            options: self.options.clone(),
            ad_config: AdConfig::new(platform),
        })
    }
}

/// Configuration after the first phase; player and ad data not yet available.
#[derive(Clone, Debug)]
pub struct InitializedConfig {
    session: Session,
    options: InitializationOptions,
    ad_config: AdConfig,
}

impl InitializedConfig {
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Second phase: fetch the player (waiting on the platform SDK), then ad
    /// settings, and only then produce the ready configuration.
    pub async fn late_initialize(self, sdk: &dyn PlatformSdk) -> Result<SdkConfig> {
        let player = Player::initialize(sdk).await.map_err(|err| {
            SdkError::initialization(format!("player setup failed: {err}"), LATE_INITIALIZE)
        })?;

        let mut ad_config = self.ad_config;
        ad_config.late_initialize(sdk).await.map_err(|err| {
            SdkError::initialization(format!("ad config setup failed: {err}"), LATE_INITIALIZE)
        })?;

        Ok(SdkConfig {
            session: self.session,
            options: self.options,
            player,
            ad_config,
        })
    }
}

/// Fully initialized configuration.
#[derive(Clone, Debug)]
pub struct SdkConfig {
    session: Session,
    options: InitializationOptions,
    player: Player,
    ad_config: AdConfig,
}

impl SdkConfig {
    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn platform(&self) -> Platform {
        self.session.platform
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn ad_config(&self) -> &AdConfig {
        &self.ad_config
    }

    pub fn is_debug_mode(&self) -> bool {
        self.options.debug_mode
    }

    pub fn is_auto_init(&self) -> bool {
        self.options.auto_initialize
    }
}

enum Phase {
    Uninitialized(ConfigSkeleton),
    Initialized(InitializedConfig),
    LateInitializing,
    Ready(Arc<SdkConfig>),
    Failed(String),
}

impl Phase {
    fn state(&self) -> LifecycleState {
        match self {
            Phase::Uninitialized(_) => LifecycleState::Uninitialized,
            Phase::Initialized(_) => LifecycleState::Initialized,
            Phase::LateInitializing => LifecycleState::LateInitializing,
            Phase::Ready(_) => LifecycleState::Ready,
            Phase::Failed(_) => LifecycleState::Failed,
        }
    }
}

/// Moves the cell to `Failed` if a late initialization future is dropped
/// before it finishes.
struct PendingLateInit<'a> {
    cell: &'a ConfigCell,
    armed: bool,
}

impl Drop for PendingLateInit<'_> {
    fn drop(&mut self) {
        if self.armed {
            tracing::warn!("SDK late initialization cancelled");
            *self.cell.lock() = Phase::Failed("late initialization cancelled".to_string());
        }
    }
}

/// Shared holder of the configuration lifecycle.
///
/// Created once per SDK and handed (as `Arc<ConfigCell>`) to every component
/// that needs configuration. Only the two lifecycle methods mutate it.
pub struct ConfigCell {
    options: InitializationOptions,
    phase: Mutex<Phase>,
}

impl ConfigCell {
    pub fn new(skeleton: ConfigSkeleton) -> Self {
        Self {
            options: skeleton.options.clone(),
            phase: Mutex::new(Phase::Uninitialized(skeleton)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Phase> {
        self.phase.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> LifecycleState {
        self.lock().state()
    }

    pub fn options(&self) -> &InitializationOptions {
        &self.options
    }

    /// Failure message if late initialization failed.
    pub fn failure(&self) -> Option<String> {
        match &*self.lock() {
            Phase::Failed(reason) => Some(reason.clone()),
            _ => None,
        }
    }

    /// Run the first phase. Fails if already run or if no platform is known.
    pub fn initialize(&self) -> Result<()> {
        let mut phase = self.lock();
        let Phase::Uninitialized(skeleton) = &*phase else {
            return Err(SdkError::initialization(
                format!("initialize called while {}", phase.state()),
                INITIALIZE,
            ));
        };

        let initialized = skeleton.initialize()?;
        tracing::info!("SDK initialized for platform {}", initialized.session.platform);
        *phase = Phase::Initialized(initialized);
        Ok(())
    }

    /// Run the second phase. Fails unless the first phase completed and the
    /// second has never been attempted.
    pub async fn late_initialize(&self, sdk: &dyn PlatformSdk) -> Result<Arc<SdkConfig>> {
        let initialized = {
            let mut phase = self.lock();
            match std::mem::replace(&mut *phase, Phase::LateInitializing) {
                Phase::Initialized(initialized) => initialized,
                other => {
                    let state = other.state();
                    *phase = other;
                    return Err(SdkError::initialization(
                        format!("late initialize called while {state}"),
                        LATE_INITIALIZE,
                    ));
                }
            }
        };

        let mut guard = PendingLateInit {
            cell: self,
            armed: true,
        };
        let outcome = initialized.late_initialize(sdk).await;
        guard.armed = false;

        match outcome {
            Ok(config) => {
                let config = Arc::new(config);
                *self.lock() = Phase::Ready(Arc::clone(&config));
                tracing::info!("SDK ready on {}", config.platform());
                Ok(config)
            }
            Err(err) => {
                tracing::warn!("SDK late initialization failed: {}", err);
                *self.lock() = Phase::Failed(err.to_string());
                Err(err)
            }
        }
    }

    /// The ready configuration, or `NotInitialized` tagged with `context`.
    pub fn ready(&self, context: &'static str) -> Result<Arc<SdkConfig>> {
        match &*self.lock() {
            Phase::Ready(config) => Ok(Arc::clone(config)),
            other => Err(SdkError::NotInitialized {
                state: other.state(),
                context,
            }),
        }
    }
}
