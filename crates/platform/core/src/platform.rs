//! Hosting platform identifiers.

use serde::{Deserialize, Serialize};

/// Hosting platform the game is running on.
///
/// The set is closed: every dispatch decision downstream matches on it, so a
/// new platform means a new variant and a compiler-guided walk through every
/// match.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Platform {
    /// Wortal-hosted web build
    Wortal,
    /// Rakuten Games (Link)
    Link,
    /// Rakuten Viber
    Viber,
    /// GameDistribution
    Gd,
    /// Facebook Instant Games
    Facebook,
    /// CrazyGames portal
    CrazyGames,
    /// GamePix portal
    GamePix,
    /// Local development; every platform API is mocked
    Debug,
}

/// How a platform reports failures from its native SDK.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorConvention {
    /// Rakuten SDK errors: `{ code, message }` objects that are rethrown with context
    Rakuten,
    /// Anything else: the raw rejection is wrapped without interpretation
    Opaque,
}

impl Platform {
    /// Error convention of this platform's native SDK.
    pub fn error_convention(&self) -> ErrorConvention {
        match self {
            Platform::Link | Platform::Viber => ErrorConvention::Rakuten,
            _ => ErrorConvention::Opaque,
        }
    }

    /// Whether analytics events may leave the device on this platform.
    ///
    /// GD disallows third-party analytics since SDK 1.6.10, GamePix since 1.6.11.
    pub fn allows_analytics(&self) -> bool {
        !matches!(self, Platform::Gd | Platform::GamePix)
    }

    pub fn is_debug(&self) -> bool {
        matches!(self, Platform::Debug)
    }
}
