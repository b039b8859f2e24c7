//! # Spotify Integration Module
//!
//! Everything moodplay needs from the Spotify Web API, split in two halves:
//!
//! - [`SpotifyApi`] is the capability surface the recommendation pipeline and
//!   the playlist writer are written against. Each method is one provider call
//!   returning either a typed result or a [`SpotifyError`]. Batch ceilings are
//!   the provider's: 20 ids per track lookup, 100 per audio-feature or
//!   recommendation call, 50 per library page.
//! - [`SpotifyClient`] implements the trait over `reqwest` for an
//!   authenticated session, and [`auth`] runs the OAuth 2.0 PKCE handshake
//!   that produces the token it needs.
//!
//! ```text
//! CLI (playlist, auth)
//!          ↓
//! recommend::Assembler / recommend::writer
//!          ↓
//! SpotifyApi (trait)  ←  SpotifyClient (reqwest, bearer token)
//!          ↓
//! Spotify Web API
//! ```
//!
//! No call is retried. A 401 maps to [`SpotifyError::Unauthorized`], a 403
//! to [`SpotifyError::Forbidden`] and a 429 to
//! [`SpotifyError::RateLimited`]; the caller decides whether that is fatal.

use async_trait::async_trait;

use crate::{
    error::SpotifyError,
    types::{
        Artist, ArtistId, AudioFeatures, CreatePlaylistRequest, Playlist, PlaylistSummary, Seeds,
        Track, TrackAttributes, TrackId, User,
    },
};

pub mod auth;
mod client;

pub use client::SpotifyClient;

/// Largest number of ids accepted by a several-tracks lookup.
pub const TRACKS_BATCH_LIMIT: usize = 20;
/// Largest number of ids accepted by an audio-features lookup.
pub const AUDIO_FEATURES_BATCH_LIMIT: usize = 100;
/// Largest page of saved tracks.
pub const SAVED_TRACKS_PAGE_LIMIT: u32 = 50;
/// Largest number of tracks added to a playlist per call.
pub const ADD_TRACKS_BATCH_LIMIT: usize = 100;
/// Largest number of recommendations per call.
pub const RECOMMENDATIONS_LIMIT: u32 = 100;

/// Calls the pipeline makes against the music catalog and the user account.
#[async_trait]
pub trait SpotifyApi: Send + Sync {
    /// One page of the user's liked tracks.
    async fn saved_tracks(&self, limit: u32, offset: u32) -> Result<Vec<Track>, SpotifyError>;

    /// The user's top artists over the medium term.
    async fn top_artists(&self, limit: u32) -> Result<Vec<Artist>, SpotifyError>;

    /// The user's top tracks over the medium term.
    async fn top_tracks(&self, limit: u32) -> Result<Vec<Track>, SpotifyError>;

    /// Full records for at most [`TRACKS_BATCH_LIMIT`] ids. Unknown ids are
    /// omitted from the result.
    async fn tracks(&self, ids: &[TrackId]) -> Result<Vec<Track>, SpotifyError>;

    /// Audio features for at most [`AUDIO_FEATURES_BATCH_LIMIT`] ids. Tracks
    /// without analysis are omitted.
    async fn audio_features(
        &self,
        ids: &[TrackId],
    ) -> Result<Vec<(TrackId, AudioFeatures)>, SpotifyError>;

    async fn artist(&self, id: &ArtistId) -> Result<Artist, SpotifyError>;

    async fn search_playlists(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<PlaylistSummary>, SpotifyError>;

    async fn search_tracks(&self, query: &str, limit: u32) -> Result<Vec<Track>, SpotifyError>;

    /// Playable tracks of a playlist (first page).
    async fn playlist_items(&self, playlist_id: &str) -> Result<Vec<Track>, SpotifyError>;

    async fn recommendations(
        &self,
        seeds: &Seeds,
        attributes: &TrackAttributes,
        limit: u32,
    ) -> Result<Vec<Track>, SpotifyError>;

    async fn current_user(&self) -> Result<User, SpotifyError>;

    async fn create_playlist(
        &self,
        user_id: &str,
        request: &CreatePlaylistRequest,
    ) -> Result<Playlist, SpotifyError>;

    /// Appends tracks by URI and returns the new snapshot id.
    async fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<String, SpotifyError>;
}
