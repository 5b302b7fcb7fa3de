//! Platform → leaderboard service routing.
//!
//! The table is closed-world: only [`LEADERBOARD_PLATFORMS`] may hold a
//! route. Supporting another platform means extending that list, not
//! relaxing the check.

use std::collections::HashMap;
use std::sync::Arc;

use platform_core::{LeaderboardService, Platform, PlatformSdk};

use crate::error::{Result, SdkError};

/// Platforms whose native SDKs expose a compatible leaderboard object.
pub const LEADERBOARD_PLATFORMS: [Platform; 3] = [Platform::Link, Platform::Viber, Platform::Facebook];

/// Routes from platform to its native leaderboard service.
#[derive(Clone, Default)]
pub struct LeaderboardDispatch {
    routes: HashMap<Platform, Arc<dyn LeaderboardService>>,
}

impl LeaderboardDispatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the table for `platform` from the SDK's leaderboard service.
    ///
    /// Platforms outside the leaderboard set, or SDKs without a service, get
    /// an empty table.
    pub fn for_platform(platform: Platform, sdk: &dyn PlatformSdk) -> Self {
        let mut dispatch = Self::new();
        if let Some(service) = sdk.leaderboards()
            && let Err(err) = dispatch.register(platform, service)
        {
            tracing::debug!("No leaderboard route for {}: {}", platform, err);
        }
        dispatch
    }

    /// Register `service` for `platform`, replacing any previous route.
    pub fn register(&mut self, platform: Platform, service: Arc<dyn LeaderboardService>) -> Result<()> {
        if !LEADERBOARD_PLATFORMS.contains(&platform) {
            return Err(SdkError::not_supported(
                format!("leaderboards are not available on platform: {platform}"),
                "leaderboard.register",
            ));
        }
        self.routes.insert(platform, service);
        Ok(())
    }

    /// Resolve the service for `platform`, or `NotSupported` tagged with `context`.
    pub fn resolve(&self, platform: Platform, context: &'static str) -> Result<Arc<dyn LeaderboardService>> {
        self.routes.get(&platform).cloned().ok_or_else(|| {
            SdkError::not_supported(
                format!("Leaderboard API not currently supported on platform: {platform}"),
                context,
            )
        })
    }

    pub fn has(&self, platform: Platform) -> bool {
        self.routes.contains_key(&platform)
    }
}

#[cfg(test)]
mod tests {
    use platform_core::MockPlatform;
    use strum::IntoEnumIterator;

    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn only_leaderboard_platforms_get_routes() {
        for platform in Platform::iter() {
            let mock = MockPlatform::new(platform);
            let dispatch = LeaderboardDispatch::for_platform(platform, &mock);
            assert_eq!(
                dispatch.has(platform),
                LEADERBOARD_PLATFORMS.contains(&platform),
                "{platform}"
            );
        }
    }

    #[test]
    fn register_rejects_platforms_outside_the_set() {
        let mock = MockPlatform::new(Platform::Debug);
        let mut dispatch = LeaderboardDispatch::new();

        let err = dispatch
            .register(Platform::Debug, Arc::new(mock.clone()))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotSupported);
        assert!(!dispatch.has(Platform::Debug));
    }

    #[test]
    fn sdk_without_service_has_no_route() {
        let mock = MockPlatform::builder(Platform::Facebook)
            .without_leaderboards()
            .build();
        let dispatch = LeaderboardDispatch::for_platform(Platform::Facebook, &mock);

        let err = dispatch
            .resolve(Platform::Facebook, "leaderboard.getLeaderboardAsync")
            .err()
            .unwrap();
        assert_eq!(err.context(), "leaderboard.getLeaderboardAsync");
        assert!(err.to_string().contains("facebook"));
    }
}
