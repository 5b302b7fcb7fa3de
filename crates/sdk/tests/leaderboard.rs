//! End-to-end leaderboard behavior against the in-memory platform.

use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use platform_core::{MockPlatform, Platform, UpstreamError};
use portal_sdk::{ErrorKind, LEADERBOARD_PLATFORMS, Sdk, SdkError};
use strum::IntoEnumIterator;

async fn sdk_on(mock: &MockPlatform) -> Sdk {
    Sdk::builder()
        .platform_sdk(Arc::new(mock.clone()))
        .build()
        .await
        .expect("sdk builds")
}

fn seeded(platform: Platform) -> MockPlatform {
    let mock = MockPlatform::new(platform);
    mock.create_leaderboard("global");
    mock.seed("global", "alice", "Alice", 500);
    mock.seed("global", "bob", "Bob", 300);
    mock.seed("global", "carol", "Carol", 300);
    mock.seed("global", "dave", "Dave", 100);
    mock
}

#[tokio::test]
async fn entries_are_ranked_and_paged() {
    let mock = seeded(Platform::Link);
    let sdk = sdk_on(&mock).await;

    let top = sdk.leaderboard().get_entries("global", 2, None).await.unwrap();
    assert_eq!(
        top.iter().map(|e| e.player.id.as_str()).collect::<Vec<_>>(),
        ["alice", "bob"]
    );
    assert_eq!(top[0].rank, 1);
    assert_eq!(top[0].formatted_score, "500");

    let rest = sdk.leaderboard().get_entries("global", 10, Some(2)).await.unwrap();
    assert_eq!(rest.len(), 2);
    assert_eq!(rest[0].player.id, "carol");
    assert_eq!(rest[0].rank, 3);

    let none = sdk.leaderboard().get_entries("global", 0, None).await.unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn send_entry_keeps_the_higher_score() {
    let mock = seeded(Platform::Viber);
    let sdk = sdk_on(&mock).await;
    let leaderboard = sdk.leaderboard();

    assert_eq!(leaderboard.get_player_entry("global").await.unwrap(), None);

    let first = leaderboard.send_entry("global", 400, Some("stage-3")).await.unwrap();
    assert_eq!(first.score, 400);
    assert_eq!(first.rank, 2);
    assert_eq!(first.details.as_deref(), Some("stage-3"));

    let lower = leaderboard.send_entry("global", 200, None).await.unwrap();
    assert_eq!(lower.score, 400);
    assert_eq!(lower.details.as_deref(), Some("stage-3"));

    let mine = leaderboard.get_player_entry("global").await.unwrap().unwrap();
    assert_eq!(mine.player.id, "player-1");
    assert_eq!(mine.player.name, "Mock Player");
    assert_eq!(leaderboard.get_entry_count("global").await.unwrap(), 5);
}

#[tokio::test]
async fn connected_entries_keep_global_rank() {
    let mock = seeded(Platform::Facebook);
    mock.connect("carol");
    let sdk = sdk_on(&mock).await;
    sdk.leaderboard().send_entry("global", 50, None).await.unwrap();

    let friends = sdk
        .leaderboard()
        .get_connected_players_entries("global", 10, 0)
        .await
        .unwrap();
    assert_eq!(
        friends.iter().map(|e| (e.player.id.as_str(), e.rank)).collect::<Vec<_>>(),
        [("carol", 3), ("player-1", 5)]
    );

    let second = sdk
        .leaderboard()
        .get_connected_players_entries("global", 1, 1)
        .await
        .unwrap();
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].player.id, "player-1");
}

#[tokio::test]
async fn both_entry_shapes_normalize_identically() {
    let rakuten = sdk_on(&seeded(Platform::Link)).await;
    let facebook = sdk_on(&seeded(Platform::Facebook)).await;

    let from_rakuten = rakuten.leaderboard().get_entries("global", 4, None).await.unwrap();
    let from_facebook = facebook.leaderboard().get_entries("global", 4, None).await.unwrap();
    assert_eq!(from_rakuten, from_facebook);

    let board = facebook.leaderboard().get_leaderboard("global").await.unwrap();
    assert_eq!(board.name, "global");
    assert_eq!(board.context_id, None);
}

#[tokio::test]
async fn leaderboard_context_is_carried_over() {
    let mock = MockPlatform::builder(Platform::Link)
        .context_id("chat-42")
        .build();
    mock.create_leaderboard("weekly");
    let sdk = sdk_on(&mock).await;

    let board = sdk.leaderboard().get_leaderboard("weekly").await.unwrap();
    assert_eq!(board.context_id.as_deref(), Some("chat-42"));
}

/// One call per leaderboard operation, tagged with its expected error context.
fn every_operation(sdk: &Sdk, name: &str) -> Vec<(&'static str, BoxFuture<'static, Result<(), SdkError>>)> {
    let leaderboard = sdk.leaderboard();
    vec![
        (
            "leaderboard.getLeaderboardAsync",
            leaderboard.get_leaderboard(name).map(|r| r.map(drop)).boxed(),
        ),
        (
            "leaderboard.sendEntryAsync",
            leaderboard.send_entry(name, 10, None).map(|r| r.map(drop)).boxed(),
        ),
        (
            "leaderboard.getEntriesAsync",
            leaderboard.get_entries(name, 5, None).map(|r| r.map(drop)).boxed(),
        ),
        (
            "leaderboard.getPlayerEntryAsync",
            leaderboard.get_player_entry(name).map(|r| r.map(drop)).boxed(),
        ),
        (
            "leaderboard.getEntryCountAsync",
            leaderboard.get_entry_count(name).map(|r| r.map(drop)).boxed(),
        ),
        (
            "leaderboard.getConnectedPlayersEntriesAsync",
            leaderboard
                .get_connected_players_entries(name, 5, 0)
                .map(|r| r.map(drop))
                .boxed(),
        ),
    ]
}

#[tokio::test]
async fn every_operation_is_rejected_off_leaderboard_platforms() {
    for platform in Platform::iter().filter(|p| !LEADERBOARD_PLATFORMS.contains(p)) {
        let mock = seeded(platform);
        let sdk = sdk_on(&mock).await;
        let calls = mock.call_count();

        for (context, call) in every_operation(&sdk, "global") {
            let err = call
                .now_or_never()
                .expect("rejected without suspending")
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::NotSupported, "{platform} {context}");
            assert_eq!(err.context(), context, "{platform}");
        }
        assert_eq!(mock.call_count(), calls, "{platform}");
    }
}

#[tokio::test]
async fn every_operation_rejects_blank_names() {
    for platform in [Platform::Link, Platform::Facebook, Platform::Gd] {
        let mock = seeded(platform);
        let sdk = sdk_on(&mock).await;
        let calls = mock.call_count();

        for name in ["", "  \t"] {
            for (context, call) in every_operation(&sdk, name) {
                let err = call
                    .now_or_never()
                    .expect("rejected without suspending")
                    .unwrap_err();
                assert_eq!(err.kind(), ErrorKind::InvalidParam, "{platform} {context} {name:?}");
                assert_eq!(err.context(), context, "{platform}");
            }
        }
        assert_eq!(mock.call_count(), calls, "{platform}");
    }
}

#[tokio::test]
async fn unsupported_platforms_never_reach_upstream() {
    for platform in Platform::iter().filter(|p| !LEADERBOARD_PLATFORMS.contains(p)) {
        let mock = seeded(platform);
        let sdk = sdk_on(&mock).await;
        let calls = mock.call_count();

        let err = sdk
            .leaderboard()
            .get_entries("global", 5, None)
            .now_or_never()
            .expect("rejected without suspending")
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotSupported, "{platform}");
        assert_eq!(err.context(), "leaderboard.getEntriesAsync");
        assert!(err.to_string().contains(platform.as_ref()));
        assert_eq!(mock.call_count(), calls, "{platform}");
    }
}

#[tokio::test]
async fn validation_precedes_platform_support() {
    let mock = seeded(Platform::Gd);
    let sdk = sdk_on(&mock).await;

    let err = sdk.leaderboard().get_entry_count("").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidParam);
}

#[tokio::test]
async fn rakuten_rejections_are_rethrown() {
    for platform in [Platform::Link, Platform::Viber] {
        let mock = seeded(platform);
        let sdk = sdk_on(&mock).await;
        mock.fail_with(UpstreamError::rejected("NETWORK_FAILURE", "offline"));

        let err = sdk.leaderboard().send_entry("global", 1, None).await.unwrap_err();
        assert_eq!(
            err,
            SdkError::RethrowFromPlatform {
                code: Some("NETWORK_FAILURE".into()),
                message: "offline".into(),
                context: "leaderboard.sendEntryAsync",
            }
        );
    }
}

#[tokio::test]
async fn facebook_rejections_are_wrapped() {
    let mock = seeded(Platform::Facebook);
    let sdk = sdk_on(&mock).await;
    mock.fail_with(UpstreamError::rejected("RATE_LIMITED", "slow down"));

    let err = sdk.leaderboard().get_player_entry("global").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unknown);
    assert_eq!(err.context(), "leaderboard.getPlayerEntryAsync");
    assert!(err.to_string().contains("slow down"));
}

#[tokio::test]
async fn unknown_leaderboard_is_an_upstream_rejection() {
    let mock = seeded(Platform::Link);
    let sdk = sdk_on(&mock).await;

    let err = sdk.leaderboard().get_leaderboard("missing").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RethrowFromPlatform);
    assert_eq!(err.context(), "leaderboard.getLeaderboardAsync");
}

#[tokio::test]
async fn handles_are_resolved_per_call() {
    let mock = seeded(Platform::Viber);
    let sdk = sdk_on(&mock).await;

    let before = mock.call_count();
    sdk.leaderboard().get_entry_count("global").await.unwrap();
    sdk.leaderboard().get_entry_count("global").await.unwrap();

    // lookup + count, twice
    assert_eq!(mock.call_count() - before, 4);
}
