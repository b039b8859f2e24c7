//! Typed errors for the Spotify client, the weather lookup and the
//! recommendation pipeline.
//!
//! The split mirrors how failures propagate: a [`SpotifyError`] is what a
//! single API call returns, a [`StageDegraded`] is a stage that gave up and
//! contributed nothing, and a [`PipelineError`] is a terminal failure of the
//! whole run that reaches the CLI.

use reqwest::StatusCode;
use thiserror::Error;

use crate::recommend::Stage;

/// Missing or malformed configuration values.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Failure of a single call against the Spotify Web API.
#[derive(Debug, Error)]
pub enum SpotifyError {
    /// Network failure, timeout or undecodable body.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("access token rejected (401)")]
    Unauthorized,

    /// The account or app lacks permission for the endpoint (403).
    #[error("permission denied: {0}")]
    Forbidden(String),

    #[error("rate limited, retry after {retry_after:?} seconds")]
    RateLimited { retry_after: Option<u64> },

    #[error("unexpected status {status}: {message}")]
    Status { status: u16, message: String },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl SpotifyError {
    pub fn from_status(status: StatusCode, message: String, retry_after: Option<u64>) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => SpotifyError::Unauthorized,
            StatusCode::FORBIDDEN => SpotifyError::Forbidden(message),
            StatusCode::TOO_MANY_REQUESTS => SpotifyError::RateLimited { retry_after },
            other => SpotifyError::Status {
                status: other.as_u16(),
                message,
            },
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, SpotifyError::Unauthorized)
    }

    pub fn is_permission_denied(&self) -> bool {
        matches!(self, SpotifyError::Unauthorized | SpotifyError::Forbidden(_))
    }
}

/// A pipeline stage that failed or was denied. Never fatal on its own.
#[derive(Debug, Error)]
#[error("{stage} degraded: {reason}")]
pub struct StageDegraded {
    pub stage: Stage,
    pub reason: String,
}

impl StageDegraded {
    pub fn new(stage: Stage, reason: impl Into<String>) -> Self {
        Self {
            stage,
            reason: reason.into(),
        }
    }
}

/// Terminal failures of a playlist generation run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Spotify session is unusable: {0}")]
    AuthFailure(String),

    #[error("no liked songs found, like some songs on Spotify first")]
    NoLikedSongs,

    #[error("failed to fetch liked songs: {0}")]
    LibraryFetch(#[source] SpotifyError),

    #[error("no liked songs match the requested mood")]
    InsufficientCandidates,

    #[error("no tracks provided to add to the playlist")]
    NoTracksProvided,

    #[error("failed to look up the current user: {0}")]
    UserLookupFailed(#[source] SpotifyError),

    #[error("failed to create playlist: {0}")]
    PlaylistCreateFailed(#[source] SpotifyError),

    /// The playlist exists but is left empty; it is not cleaned up.
    #[error("failed to add tracks to playlist {playlist_id}: {source}")]
    AddTracksFailed {
        playlist_id: String,
        #[source]
        source: SpotifyError,
    },
}

/// Failure of the weather lookup. Callers fall back to the neutral mood.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("weather request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("no weather data available for {0}")]
    Empty(String),
}
