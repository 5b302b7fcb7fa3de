//! Ad placement configuration.

use platform_core::{AdSettings, Platform, PlatformSdk, UpstreamError};

/// Ad configuration for the active platform.
///
/// Constructed empty during `initialize` and populated during
/// `late_initialize`, once the platform can be asked for its settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdConfig {
    platform: Platform,
    is_ad_blocked: bool,
    interstitial_id: Option<String>,
    rewarded_id: Option<String>,
    has_prerolls: bool,
    populated: bool,
}

impl AdConfig {
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            is_ad_blocked: false,
            interstitial_id: None,
            rewarded_id: None,
            has_prerolls: false,
            populated: false,
        }
    }

    /// Fetch placement settings from the platform.
    pub async fn late_initialize(&mut self, sdk: &dyn PlatformSdk) -> Result<(), UpstreamError> {
        let settings = sdk.fetch_ad_settings().await?;
        self.apply(settings);
        tracing::debug!(
            "Ad config populated for {}: blocked={}, prerolls={}",
            self.platform,
            self.is_ad_blocked,
            self.has_prerolls
        );
        Ok(())
    }

    fn apply(&mut self, settings: AdSettings) {
        self.is_ad_blocked = settings.ad_blocked;
        self.interstitial_id = settings.interstitial_id;
        self.rewarded_id = settings.rewarded_id;
        // Only the web portal serves preroll ads.
        self.has_prerolls = settings.has_prerolls && self.platform == Platform::Wortal;
        self.populated = true;
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn is_populated(&self) -> bool {
        self.populated
    }

    pub fn is_ad_blocked(&self) -> bool {
        self.is_ad_blocked
    }

    pub fn interstitial_id(&self) -> Option<&str> {
        self.interstitial_id.as_deref()
    }

    pub fn rewarded_id(&self) -> Option<&str> {
        self.rewarded_id.as_deref()
    }

    pub fn has_prerolls(&self) -> bool {
        self.has_prerolls
    }
}

#[cfg(test)]
mod tests {
    use platform_core::MockPlatform;

    use super::*;

    #[tokio::test]
    async fn starts_empty_and_populates_late() {
        let mock = MockPlatform::builder(Platform::Viber)
            .ad_settings(AdSettings {
                ad_blocked: true,
                interstitial_id: Some("inter-1".into()),
                rewarded_id: None,
                has_prerolls: true,
            })
            .build();

        let mut config = AdConfig::new(Platform::Viber);
        assert!(!config.is_populated());
        assert_eq!(config.interstitial_id(), None);

        config.late_initialize(&mock).await.unwrap();
        assert!(config.is_populated());
        assert!(config.is_ad_blocked());
        assert_eq!(config.interstitial_id(), Some("inter-1"));
        assert!(!config.has_prerolls());
    }

    #[test]
    fn prerolls_kept_on_web_portal() {
        let mut config = AdConfig::new(Platform::Wortal);
        config.apply(AdSettings {
            has_prerolls: true,
            ..AdSettings::default()
        });
        assert!(config.has_prerolls());
    }
}
