use std::fmt;

use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

#[derive(Debug, Clone)]
pub struct PkceToken {
    pub code_verifier: String,
    pub state: String,
    pub token: Option<Token>,
}

/// Opaque Spotify track identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(String);

impl TrackId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn uri(&self) -> String {
        format!("spotify:track:{}", self.0)
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque Spotify artist identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtistId(String);

impl ArtistId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArtistId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtistRef {
    pub id: ArtistId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AlbumRef {
    pub id: Option<String>,
    pub name: String,
}

/// Immutable snapshot of a catalog track. Always credits at least one artist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: TrackId,
    pub name: String,
    pub artists: Vec<ArtistRef>,
    pub album: AlbumRef,
}

impl Track {
    pub fn uri(&self) -> String {
        self.id.uri()
    }

    pub fn artist_names(&self) -> String {
        self.artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    pub id: ArtistId,
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
}

/// Catalog audio descriptors. Everything is 0.0..=1.0 except `tempo` (BPM).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AudioFeatures {
    pub energy: f32,
    pub danceability: f32,
    pub valence: f32,
    pub tempo: f32,
    pub acousticness: f32,
    pub instrumentalness: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackAudioFeatures {
    pub id: TrackId,
    #[serde(flatten)]
    pub features: AudioFeatures,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub display_name: Option<String>,
}

impl User {
    pub fn name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistSummary {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
    pub collaborative: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub track_ids: Vec<TrackId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistResponse {
    pub snapshot_id: String,
}

/// Seeds for a catalog recommendation query. At most five in total.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Seeds {
    pub artists: Vec<ArtistId>,
    pub tracks: Vec<TrackId>,
    pub genres: Vec<String>,
}

impl Seeds {
    pub fn len(&self) -> usize {
        self.artists.len() + self.tracks.len() + self.genres.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Tunable attribute targets sent with a recommendation query.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TrackAttributes {
    pub min_energy: Option<f32>,
    pub max_energy: Option<f32>,
    pub target_energy: Option<f32>,
    pub min_danceability: Option<f32>,
    pub target_danceability: Option<f32>,
    pub min_valence: Option<f32>,
    pub max_valence: Option<f32>,
    pub target_valence: Option<f32>,
    pub target_acousticness: Option<f32>,
    pub target_instrumentalness: Option<f32>,
    pub target_loudness: Option<f32>,
}

impl TrackAttributes {
    pub const NONE: TrackAttributes = TrackAttributes {
        min_energy: None,
        max_energy: None,
        target_energy: None,
        min_danceability: None,
        target_danceability: None,
        min_valence: None,
        max_valence: None,
        target_valence: None,
        target_acousticness: None,
        target_instrumentalness: None,
        target_loudness: None,
    };

    /// Query parameters for the attributes that are set.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        [
            ("min_energy", self.min_energy),
            ("max_energy", self.max_energy),
            ("target_energy", self.target_energy),
            ("min_danceability", self.min_danceability),
            ("target_danceability", self.target_danceability),
            ("min_valence", self.min_valence),
            ("max_valence", self.max_valence),
            ("target_valence", self.target_valence),
            ("target_acousticness", self.target_acousticness),
            ("target_instrumentalness", self.target_instrumentalness),
            ("target_loudness", self.target_loudness),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key, v.to_string())))
        .collect()
    }
}

#[derive(Tabled)]
pub struct TrackTableRow {
    #[tabled(rename = "#")]
    pub position: usize,
    pub name: String,
    pub artists: String,
    pub album: String,
}

#[derive(Tabled)]
pub struct MoodTableRow {
    pub mood: String,
    pub thresholds: String,
    pub genres: String,
    pub queries: String,
}

// Wire formats of the Spotify Web API. Local files and removed tracks come
// back with null ids, so everything is optional until converted.

#[derive(Debug, Clone, Deserialize)]
pub struct ApiArtistRef {
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiAlbumRef {
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiTrack {
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub artists: Vec<ApiArtistRef>,
    pub album: Option<ApiAlbumRef>,
}

impl ApiTrack {
    /// Converts to a domain track, dropping unplayable entries.
    pub fn into_track(self) -> Option<Track> {
        let id = self.id.filter(|id| !id.is_empty())?;
        let artists: Vec<ArtistRef> = self
            .artists
            .into_iter()
            .filter_map(|a| {
                a.id.filter(|id| !id.is_empty()).map(|id| ArtistRef {
                    id: ArtistId::new(id),
                    name: a.name,
                })
            })
            .collect();
        if artists.is_empty() {
            return None;
        }

        let album = self
            .album
            .map(|a| AlbumRef {
                id: a.id,
                name: a.name,
            })
            .unwrap_or_default();

        Some(Track {
            id: TrackId::new(id),
            name: self.name,
            artists,
            album,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SavedTrackItem {
    pub track: Option<ApiTrack>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SavedTracksResponse {
    pub items: Vec<SavedTrackItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopArtistsResponse {
    pub items: Vec<Artist>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopTracksResponse {
    pub items: Vec<ApiTrack>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeveralTracksResponse {
    pub tracks: Vec<Option<ApiTrack>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AudioFeaturesResponse {
    pub audio_features: Vec<Option<TrackAudioFeatures>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistPage {
    pub items: Vec<Option<PlaylistSummary>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackPage {
    pub items: Vec<ApiTrack>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub playlists: Option<PlaylistPage>,
    pub tracks: Option<TrackPage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistItem {
    pub track: Option<ApiTrack>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistItemsResponse {
    pub items: Vec<PlaylistItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationsResponse {
    pub tracks: Vec<ApiTrack>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlaylistResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
}

// OpenWeatherMap current-weather response, reduced to what the mood needs.

#[derive(Debug, Clone, Deserialize)]
pub struct Weather {
    pub main: WeatherMain,
    #[serde(default)]
    pub weather: Vec<WeatherCondition>,
}

impl Weather {
    pub fn description(&self) -> Option<&str> {
        self.weather.first().map(|w| w.description.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeatherMain {
    pub temp: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeatherCondition {
    pub description: String,
}
