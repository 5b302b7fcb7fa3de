//! SDK settings and their environment loader.
use std::env;
use std::str::FromStr;

use platform_core::Platform;
use serde::{Deserialize, Serialize};

/// Endpoint analytics events are posted to unless overridden.
pub const DEFAULT_ANALYTICS_ENDPOINT: &str = "https://wombat.digitalwill.co.jp/wortal/events";

/// Options a game passes when starting the SDK.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InitializationOptions {
    /// Mock outbound side effects and log them instead. Default: off.
    pub debug_mode: bool,
    /// Run both initialization phases while building the SDK. Default: on.
    pub auto_initialize: bool,
}

impl Default for InitializationOptions {
    fn default() -> Self {
        Self {
            debug_mode: false,
            auto_initialize: true,
        }
    }
}

/// Settings required to assemble an [`Sdk`](crate::Sdk).
#[derive(Clone, Debug)]
pub struct SdkSettings {
    /// Platform override; the upstream SDK's own platform is used when unset.
    pub platform: Option<Platform>,
    pub options: InitializationOptions,
    pub analytics_endpoint: String,
    pub game_id: Option<String>,
    pub locale: Option<String>,
}

impl Default for SdkSettings {
    fn default() -> Self {
        Self {
            platform: None,
            options: InitializationOptions::default(),
            analytics_endpoint: DEFAULT_ANALYTICS_ENDPOINT.to_string(),
            game_id: None,
            locale: None,
        }
    }
}

impl SdkSettings {
    /// Construct settings from process environment variables.
    ///
    /// Environment variables:
    /// - `PORTAL_PLATFORM` - Platform identifier override (e.g. `link`, `facebook`)
    /// - `PORTAL_DEBUG_MODE` - Enable debug mode (default: false)
    /// - `PORTAL_AUTO_INIT` - Initialize while building (default: true)
    /// - `PORTAL_ANALYTICS_ENDPOINT` - Analytics endpoint override
    /// - `PORTAL_GAME_ID` - Game identifier attached to analytics events
    /// - `PORTAL_LOCALE` - Session locale (e.g. `en-US`)
    ///
    /// Unparseable values fall back to the defaults; an unknown platform is
    /// logged and ignored.
    pub fn from_env() -> Self {
        let mut settings = Self::default();

        if let Ok(raw) = env::var("PORTAL_PLATFORM") {
            match Platform::from_str(&raw) {
                Ok(platform) => settings.platform = Some(platform),
                Err(_) => tracing::warn!("Ignoring unknown PORTAL_PLATFORM value: {}", raw),
            }
        }

        if let Some(enable) = read_env::<bool>("PORTAL_DEBUG_MODE") {
            settings.options.debug_mode = enable;
        } else if env::var("PORTAL_DEBUG_MODE").is_ok() {
            // Also accept just setting the variable without value as "true"
            settings.options.debug_mode = true;
        }

        if let Some(enable) = read_env::<bool>("PORTAL_AUTO_INIT") {
            settings.options.auto_initialize = enable;
        }

        if let Ok(endpoint) = env::var("PORTAL_ANALYTICS_ENDPOINT") {
            settings.analytics_endpoint = endpoint;
        }

        settings.game_id = env::var("PORTAL_GAME_ID").ok();
        settings.locale = env::var("PORTAL_LOCALE").ok();

        settings
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = Some(platform);
        self
    }

    pub fn with_options(mut self, options: InitializationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_analytics_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.analytics_endpoint = endpoint.into();
        self
    }

    pub fn with_game_id(mut self, game_id: impl Into<String>) -> Self {
        self.game_id = Some(game_id.into());
        self
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_auto_initialize_without_debug() {
        let settings = SdkSettings::default();
        assert!(settings.options.auto_initialize);
        assert!(!settings.options.debug_mode);
        assert_eq!(settings.analytics_endpoint, DEFAULT_ANALYTICS_ENDPOINT);
        assert!(settings.platform.is_none());
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let options: InitializationOptions = serde_json::from_str(r#"{"debugMode":true}"#).unwrap();
        assert!(options.debug_mode);
        assert!(options.auto_initialize);
    }

    #[test]
    fn builder_style_overrides() {
        let settings = SdkSettings::default()
            .with_platform(Platform::Viber)
            .with_game_id("game-42")
            .with_analytics_endpoint("http://localhost:9999/events");

        assert_eq!(settings.platform, Some(Platform::Viber));
        assert_eq!(settings.game_id.as_deref(), Some("game-42"));
        assert_eq!(settings.analytics_endpoint, "http://localhost:9999/events");
    }
}
