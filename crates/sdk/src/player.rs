//! Current player identity.

use platform_core::{PlatformSdk, UpstreamError, UpstreamPlayer};
use serde::{Deserialize, Serialize};

/// The player running the game, as reported by the hosting platform.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: String,
    pub name: String,
    pub photo: Option<String>,
    pub is_first_play: bool,
}

impl Player {
    /// Wait for the platform SDK and fetch the player from it.
    pub async fn initialize(sdk: &dyn PlatformSdk) -> Result<Self, UpstreamError> {
        sdk.wait_until_ready().await?;
        let upstream = sdk.fetch_player().await?;
        tracing::debug!("Player fetched from {}: {}", sdk.platform(), upstream.id);
        Ok(Self::from(upstream))
    }
}

impl From<UpstreamPlayer> for Player {
    fn from(player: UpstreamPlayer) -> Self {
        Self {
            id: player.id,
            name: player.name.unwrap_or_default(),
            photo: player.photo,
            is_first_play: player.is_first_play,
        }
    }
}

#[cfg(test)]
mod tests {
    use platform_core::{MockPlatform, Platform};

    use super::*;

    #[tokio::test]
    async fn initialize_fetches_from_platform() {
        let mock = MockPlatform::builder(Platform::Link)
            .player(UpstreamPlayer {
                id: "abc".into(),
                name: None,
                photo: None,
                is_first_play: false,
            })
            .build();

        let player = Player::initialize(&mock).await.unwrap();
        assert_eq!(player.id, "abc");
        assert_eq!(player.name, "");
        assert!(!player.is_first_play);
    }

    #[tokio::test]
    async fn initialize_waits_for_readiness() {
        let mock = MockPlatform::new(Platform::Facebook);
        mock.fail_readiness(UpstreamError::Unavailable("SDK script failed to load".into()));

        let err = Player::initialize(&mock).await.unwrap_err();
        assert_eq!(err.message(), "SDK script failed to load");
        assert_eq!(mock.call_count(), 0);
    }
}
