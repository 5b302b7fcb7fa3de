//! Per-platform supported API registry.
//!
//! The table is hand-maintained and must be updated whenever an API is added
//! or a platform gains support for an existing one. A missing entry is not
//! detectable at runtime: games that consult the registry will simply skip a
//! feature that would have worked.

use std::str::FromStr;

use crate::platform::Platform;

const WORTAL: &[&str] = &[
    "ads.isAdBlocked",
    "ads.showInterstitial",
    "ads.showRewarded",
    "session.getLocale",
    "session.getPlatform",
    "session.getDevice",
    "session.getOrientation",
    "session.onOrientationChange",
];

const LINK: &[&str] = &[
    "ads.isAdBlocked",
    "ads.showInterstitial",
    "ads.showRewarded",
    "context.chooseAsync",
    "context.createAsync",
    "context.getId",
    "context.getPlayersAsync",
    "context.getType",
    "context.isSizeBetween",
    "context.shareAsync",
    "context.switchAsync",
    "context.updateAsync",
    "leaderboard.getLeaderboardAsync",
    "leaderboard.sendEntryAsync",
    "leaderboard.getEntriesAsync",
    "leaderboard.getPlayerEntryAsync",
    "leaderboard.getEntryCountAsync",
    "leaderboard.getConnectedPlayerEntriesAsync",
    "player.getID",
    "player.getName",
    "player.getPhoto",
    "player.isFirstPlay",
    "player.getDataAsync",
    "player.setDataAsync",
    "player.getConnectedPlayersAsync",
    "player.getSignedPlayerInfoAsync",
    "player.flushDataAsync",
    "session.getEntryPointData",
    "session.getEntryPointAsync",
    "session.getLocale",
    "session.getPlatform",
    "session.getTrafficSource",
    "session.getDevice",
    "session.getOrientation",
    "session.onOrientationChange",
];

const VIBER: &[&str] = &[
    "ads.isAdBlocked",
    "ads.showInterstitial",
    "ads.showRewarded",
    "context.chooseAsync",
    "context.createAsync",
    "context.getId",
    "context.getPlayersAsync",
    "context.getType",
    "context.isSizeBetween",
    "context.shareAsync",
    "context.switchAsync",
    "context.updateAsync",
    "iap.getCatalogAsync",
    "iap.getPurchasesAsync",
    "iap.makePurchaseAsync",
    "iap.consumePurchaseAsync",
    "leaderboard.getLeaderboardAsync",
    "leaderboard.sendEntryAsync",
    "leaderboard.getEntriesAsync",
    "leaderboard.getPlayerEntryAsync",
    "leaderboard.getEntryCountAsync",
    "leaderboard.getConnectedPlayerEntriesAsync",
    "player.getID",
    "player.getName",
    "player.getPhoto",
    "player.isFirstPlay",
    "player.getDataAsync",
    "player.setDataAsync",
    "player.getConnectedPlayersAsync",
    "player.getSignedPlayerInfoAsync",
    "player.flushDataAsync",
    "session.getEntryPointData",
    "session.getEntryPointAsync",
    "session.getLocale",
    "session.getPlatform",
    "session.getTrafficSource",
    "session.setSessionData",
    "session.getDevice",
    "session.getOrientation",
    "session.onOrientationChange",
];

const GD: &[&str] = &[
    "ads.isAdBlocked",
    "ads.showInterstitial",
    "ads.showRewarded",
    "session.getLocale",
    "session.getPlatform",
    "session.getDevice",
    "session.getOrientation",
    "session.onOrientationChange",
];

const FACEBOOK: &[&str] = &[
    "ads.isAdBlocked",
    "ads.showInterstitial",
    "ads.showRewarded",
    "context.chooseAsync",
    "context.createAsync",
    "context.getId",
    "context.getPlayersAsync",
    "context.getType",
    "context.isSizeBetween",
    "context.shareAsync",
    "context.shareLinkAsync",
    "context.switchAsync",
    "context.updateAsync",
    "iap.getCatalogAsync",
    "iap.getPurchasesAsync",
    "iap.makePurchaseAsync",
    "iap.consumePurchaseAsync",
    "leaderboard.getLeaderboardAsync",
    "leaderboard.sendEntryAsync",
    "leaderboard.getEntriesAsync",
    "leaderboard.getPlayerEntryAsync",
    "leaderboard.getEntryCountAsync",
    "leaderboard.getConnectedPlayerEntriesAsync",
    "notifications.scheduleAsync",
    "notifications.cancelAsync",
    "notifications.cancelAllAsync",
    "notifications.getHistoryAsync",
    "player.getID",
    "player.getName",
    "player.getPhoto",
    "player.getDataAsync",
    "player.setDataAsync",
    "player.getConnectedPlayersAsync",
    "player.getSignedPlayerInfoAsync",
    "player.flushDataAsync",
    "session.getEntryPointData",
    "session.getEntryPointAsync",
    "session.getLocale",
    "session.getPlatform",
    "session.setSessionData",
    "session.getDevice",
    "session.getOrientation",
    "session.onOrientationChange",
    "session.switchGameAsync",
    "tournament.getCurrentAsync",
    "tournament.getAllAsync",
    "tournament.postScoreAsync",
    "tournament.createAsync",
    "tournament.shareAsync",
    "tournament.joinAsync",
];

const CRAZY_GAMES: &[&str] = &[
    "ads.isAdBlocked",
    "ads.showInterstitial",
    "ads.showRewarded",
    "session.happyTimeAsync",
    "session.gameplayStartAsync",
    "session.gameplayStopAsync",
    "session.gameLoadingStartAsync",
    "session.gameLoadingStopAsync",
];

const GAME_PIX: &[&str] = &[
    "ads.isAdBlocked",
    "ads.showInterstitial",
    "ads.showRewarded",
    "session.getLocale",
    "session.getPlatform",
    "session.getDevice",
    "session.getOrientation",
    "session.onOrientationChange",
];

const DEBUG: &[&str] = &[
    "ads.isAdBlocked",
    "ads.showInterstitial",
    "ads.showRewarded",
    "context.chooseAsync",
    "context.createAsync",
    "context.getId",
    "context.getPlayersAsync",
    "context.getType",
    "context.isSizeBetween",
    "context.shareAsync",
    "context.shareLinkAsync",
    "context.switchAsync",
    "context.updateAsync",
    "iap.getCatalogAsync",
    "iap.getPurchasesAsync",
    "iap.makePurchaseAsync",
    "iap.consumePurchaseAsync",
    "leaderboard.getLeaderboardAsync",
    "leaderboard.sendEntryAsync",
    "leaderboard.getEntriesAsync",
    "leaderboard.getPlayerEntryAsync",
    "leaderboard.getEntryCountAsync",
    "leaderboard.getConnectedPlayerEntriesAsync",
    "notifications.scheduleAsync",
    "notifications.cancelAsync",
    "notifications.cancelAllAsync",
    "notifications.getHistoryAsync",
    "player.getID",
    "player.getName",
    "player.getPhoto",
    "player.getDataAsync",
    "player.setDataAsync",
    "player.getConnectedPlayersAsync",
    "player.getSignedPlayerInfoAsync",
    "player.flushDataAsync",
    "session.getEntryPointData",
    "session.getEntryPointAsync",
    "session.getLocale",
    "session.getTrafficSource",
    "session.getPlatform",
    "session.setSessionData",
    "session.getDevice",
    "session.getOrientation",
    "session.onOrientationChange",
    "session.switchGameAsync",
    "tournament.getCurrentAsync",
    "tournament.getAllAsync",
    "tournament.postScoreAsync",
    "tournament.createAsync",
    "tournament.shareAsync",
    "tournament.joinAsync",
];

/// Ordered list of dotted API names supported on `platform`.
pub fn supported_apis(platform: Platform) -> &'static [&'static str] {
    match platform {
        Platform::Wortal => WORTAL,
        Platform::Link => LINK,
        Platform::Viber => VIBER,
        Platform::Gd => GD,
        Platform::Facebook => FACEBOOK,
        Platform::CrazyGames => CRAZY_GAMES,
        Platform::GamePix => GAME_PIX,
        Platform::Debug => DEBUG,
    }
}

/// Check whether `api` (e.g. `"leaderboard.getEntriesAsync"`) is available on `platform`.
///
/// Advisory only: nothing in the SDK consults this before dispatching.
pub fn is_supported(platform: Platform, api: &str) -> bool {
    supported_apis(platform).contains(&api)
}

/// Like [`is_supported`], keyed by the platform's string identifier.
///
/// Unknown platform identifiers are simply unsupported.
pub fn is_supported_on(platform: &str, api: &str) -> bool {
    Platform::from_str(platform)
        .map(|platform| is_supported(platform, api))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn leaderboard_apis_follow_platform() {
        assert!(is_supported(Platform::Link, "leaderboard.sendEntryAsync"));
        assert!(is_supported(Platform::Facebook, "leaderboard.getEntriesAsync"));
        assert!(!is_supported(Platform::Gd, "leaderboard.getLeaderboardAsync"));
        assert!(!is_supported(Platform::CrazyGames, "leaderboard.getEntryCountAsync"));
    }

    #[test]
    fn unknown_platform_or_method_is_unsupported() {
        assert!(!is_supported(Platform::Debug, "leaderboard.deleteAsync"));
        assert!(!is_supported(Platform::Link, ""));
        assert!(!is_supported_on("steam", "ads.showInterstitial"));
        assert!(is_supported_on("viber", "iap.getCatalogAsync"));
    }

    #[test]
    fn every_platform_has_unique_entries() {
        for platform in Platform::iter() {
            let apis = supported_apis(platform);
            assert!(!apis.is_empty(), "{platform} has no registered APIs");

            let unique: HashSet<_> = apis.iter().collect();
            assert_eq!(unique.len(), apis.len(), "{platform} registers duplicates");
        }
    }

    #[test]
    fn names_are_dotted_category_method_pairs() {
        for platform in Platform::iter() {
            for api in supported_apis(platform) {
                let (category, method) = api.split_once('.').expect("dotted name");
                assert!(!category.is_empty() && !method.is_empty(), "{api}");
                assert!(!method.contains('.'), "{api}");
            }
        }
    }
}
