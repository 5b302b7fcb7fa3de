//! Top-level SDK handle and its builder.

use std::sync::Arc;

use platform_core::{Platform, PlatformSdk, capabilities};

use crate::analytics::{Analytics, AnalyticsBeacon};
use crate::config::SdkSettings;
use crate::error::{Result, SdkError};
use crate::leaderboard::{LeaderboardApi, LeaderboardDispatch};
use crate::lifecycle::{ConfigCell, ConfigSkeleton, LifecycleState, SdkConfig};
use crate::player::Player;
use crate::session::TrafficSource;

/// Entry point for game code.
///
/// Owns the shared configuration and hands out the leaderboard and analytics
/// APIs, which hold their own references to it.
pub struct Sdk {
    platform: Platform,
    platform_sdk: Arc<dyn PlatformSdk>,
    config: Arc<ConfigCell>,
    leaderboard: LeaderboardApi,
    analytics: Analytics,
}

impl Sdk {
    pub fn builder() -> SdkBuilder {
        SdkBuilder::new()
    }

    /// Active platform.
    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn state(&self) -> LifecycleState {
        self.config.state()
    }

    pub fn is_initialized(&self) -> bool {
        self.state() == LifecycleState::Ready
    }

    pub fn leaderboard(&self) -> &LeaderboardApi {
        &self.leaderboard
    }

    pub fn analytics(&self) -> &Analytics {
        &self.analytics
    }

    /// Ready configuration, or `NotInitialized`.
    pub fn config(&self) -> Result<Arc<SdkConfig>> {
        self.config.ready("sdk.config")
    }

    pub fn player(&self) -> Result<Player> {
        Ok(self.config.ready("player.getID")?.player().clone())
    }

    /// Dotted API names supported on the active platform.
    pub fn supported_apis(&self) -> &'static [&'static str] {
        capabilities::supported_apis(self.platform())
    }

    /// Whether `api` (e.g. `"leaderboard.getEntriesAsync"`) is supported on
    /// the active platform.
    pub fn is_supported(&self, api: &str) -> bool {
        capabilities::is_supported(self.platform(), api)
    }

    /// Run both lifecycle phases when auto-initialize is off.
    ///
    /// Fails when auto-initialize is on, or when the SDK was already
    /// initialized (or failed to).
    pub async fn initialize_async(&self) -> Result<Arc<SdkConfig>> {
        if self.config.options().auto_initialize {
            return Err(SdkError::initialization(
                "auto initialize is enabled; initialize_async must not be called",
                "sdk.initializeAsync",
            ));
        }
        self.run_lifecycle().await
    }

    async fn run_lifecycle(&self) -> Result<Arc<SdkConfig>> {
        self.config.initialize()?;
        self.config.late_initialize(self.platform_sdk.as_ref()).await
    }
}

/// Builder for [`Sdk`].
pub struct SdkBuilder {
    settings: SdkSettings,
    platform_sdk: Option<Arc<dyn PlatformSdk>>,
    traffic_source: TrafficSource,
}

impl SdkBuilder {
    fn new() -> Self {
        Self {
            settings: SdkSettings::default(),
            platform_sdk: None,
            traffic_source: TrafficSource::default(),
        }
    }

    /// Override settings (default: [`SdkSettings::default`]).
    pub fn settings(mut self, settings: SdkSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Native platform SDK binding. Required.
    pub fn platform_sdk(mut self, sdk: Arc<dyn PlatformSdk>) -> Self {
        self.platform_sdk = Some(sdk);
        self
    }

    pub fn traffic_source(mut self, source: TrafficSource) -> Self {
        self.traffic_source = source;
        self
    }

    /// Assemble the SDK, running both lifecycle phases when auto-initialize
    /// is enabled.
    pub async fn build(self) -> Result<Sdk> {
        let platform_sdk = self.platform_sdk.ok_or_else(|| {
            SdkError::initialization("no platform SDK configured", "sdk.build")
        })?;

        let platform = self
            .settings
            .platform
            .unwrap_or_else(|| platform_sdk.platform());
        if platform != platform_sdk.platform() {
            tracing::warn!(
                "Platform override {} differs from platform SDK {}",
                platform,
                platform_sdk.platform()
            );
        }

        let options = self.settings.options.clone();
        let skeleton = ConfigSkeleton::new(options.clone())
            .platform(platform)
            .locale(self.settings.locale.clone())
            .traffic_source(self.traffic_source);
        let config = Arc::new(ConfigCell::new(skeleton));

        let dispatch = LeaderboardDispatch::for_platform(platform, platform_sdk.as_ref());
        let beacon = AnalyticsBeacon::new(self.settings.analytics_endpoint, options.debug_mode);

        let sdk = Sdk {
            platform,
            leaderboard: LeaderboardApi::new(Arc::clone(&config), dispatch),
            analytics: Analytics::new(Arc::clone(&config), beacon, self.settings.game_id),
            platform_sdk,
            config,
        };

        tracing::info!(
            "SDK assembled for {} (auto_initialize={}, debug_mode={})",
            platform,
            options.auto_initialize,
            options.debug_mode
        );

        if options.auto_initialize {
            sdk.run_lifecycle().await?;
        }
        Ok(sdk)
    }
}
