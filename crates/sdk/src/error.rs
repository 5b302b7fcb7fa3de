//! Error taxonomy surfaced to game code.
//!
//! Every failure carries the dotted API name it originated from (its
//! *context*) so callers can trace it back without a stack.

use platform_core::{ErrorConvention, Platform, UpstreamError};
use thiserror::Error;

use crate::lifecycle::LifecycleState;

pub type Result<T> = std::result::Result<T, SdkError>;

/// Stable error code, matching what the SDK reports on every platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    InvalidParam,
    NotSupported,
    RethrowFromPlatform,
    InitializationError,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SdkError {
    #[error("invalid parameter in {context}: {message}")]
    InvalidParam {
        message: String,
        context: &'static str,
    },

    #[error("{context} is not supported: {message}")]
    NotSupported {
        message: String,
        context: &'static str,
    },

    #[error("platform rejected {context}: {message}")]
    RethrowFromPlatform {
        code: Option<String>,
        message: String,
        context: &'static str,
    },

    #[error("upstream call failed in {context}: {message}")]
    Upstream {
        message: String,
        context: &'static str,
    },

    #[error("{context} called before the SDK finished initializing (state: {state})")]
    NotInitialized {
        state: LifecycleState,
        context: &'static str,
    },

    #[error("initialization failed in {context}: {message}")]
    Initialization {
        message: String,
        context: &'static str,
    },
}

impl SdkError {
    pub fn invalid_param(message: impl Into<String>, context: &'static str) -> Self {
        Self::InvalidParam {
            message: message.into(),
            context,
        }
    }

    pub fn not_supported(message: impl Into<String>, context: &'static str) -> Self {
        Self::NotSupported {
            message: message.into(),
            context,
        }
    }

    pub fn initialization(message: impl Into<String>, context: &'static str) -> Self {
        Self::Initialization {
            message: message.into(),
            context,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            SdkError::InvalidParam { .. } => ErrorKind::InvalidParam,
            SdkError::NotSupported { .. } => ErrorKind::NotSupported,
            SdkError::RethrowFromPlatform { .. } => ErrorKind::RethrowFromPlatform,
            SdkError::NotInitialized { .. } | SdkError::Initialization { .. } => {
                ErrorKind::InitializationError
            }
            SdkError::Upstream { .. } => ErrorKind::Unknown,
        }
    }

    /// Dotted API name the error originated from.
    pub fn context(&self) -> &'static str {
        match self {
            SdkError::InvalidParam { context, .. }
            | SdkError::NotSupported { context, .. }
            | SdkError::RethrowFromPlatform { context, .. }
            | SdkError::Upstream { context, .. }
            | SdkError::NotInitialized { context, .. }
            | SdkError::Initialization { context, .. } => context,
        }
    }
}

/// Map an upstream rejection onto the SDK taxonomy.
///
/// Rakuten-convention platforms get their message rethrown verbatim with the
/// originating API attached; everything else is wrapped as an unknown failure.
pub fn translate(platform: Platform, error: UpstreamError, context: &'static str) -> SdkError {
    match platform.error_convention() {
        ErrorConvention::Rakuten => SdkError::RethrowFromPlatform {
            code: error.code().map(str::to_string),
            message: error.message().to_string(),
            context,
        },
        ErrorConvention::Opaque => SdkError::Upstream {
            message: error.to_string(),
            context,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rakuten_rejections_are_rethrown_with_original_message() {
        let upstream = UpstreamError::rejected("NETWORK_FAILURE", "connection reset");

        for platform in [Platform::Link, Platform::Viber] {
            let err = translate(platform, upstream.clone(), "leaderboard.sendEntryAsync");
            assert_eq!(err.kind(), ErrorKind::RethrowFromPlatform);
            assert_eq!(
                err,
                SdkError::RethrowFromPlatform {
                    code: Some("NETWORK_FAILURE".into()),
                    message: "connection reset".into(),
                    context: "leaderboard.sendEntryAsync",
                }
            );
        }
    }

    #[test]
    fn other_platforms_wrap_generically() {
        let upstream = UpstreamError::rejected("RATE_LIMITED", "too many calls");
        let err = translate(Platform::Facebook, upstream, "leaderboard.getEntriesAsync");

        assert_eq!(err.kind(), ErrorKind::Unknown);
        assert_eq!(err.context(), "leaderboard.getEntriesAsync");
        let SdkError::Upstream { message, .. } = err else {
            panic!("expected generic wrap");
        };
        assert!(message.contains("too many calls"));
    }

    #[test]
    fn kinds_render_as_stable_codes() {
        assert_eq!(ErrorKind::InvalidParam.to_string(), "INVALID_PARAM");
        assert_eq!(ErrorKind::RethrowFromPlatform.as_ref(), "RETHROW_FROM_PLATFORM");
        assert_eq!(
            SdkError::NotInitialized {
                state: LifecycleState::Initialized,
                context: "leaderboard.getLeaderboardAsync",
            }
            .kind(),
            ErrorKind::InitializationError
        );
    }
}
