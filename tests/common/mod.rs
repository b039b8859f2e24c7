#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use moodplay::{
    error::SpotifyError,
    spotify::SpotifyApi,
    types::{
        AlbumRef, Artist, ArtistId, ArtistRef, AudioFeatures, CreatePlaylistRequest, Playlist,
        PlaylistSummary, Seeds, Track, TrackAttributes, TrackId, User,
    },
};

/// Per-method call counters.
#[derive(Default)]
pub struct Calls {
    pub saved_tracks: AtomicUsize,
    pub top_artists: AtomicUsize,
    pub top_tracks: AtomicUsize,
    pub tracks: AtomicUsize,
    pub audio_features: AtomicUsize,
    pub artist: AtomicUsize,
    pub search_playlists: AtomicUsize,
    pub search_tracks: AtomicUsize,
    pub playlist_items: AtomicUsize,
    pub recommendations: AtomicUsize,
    pub current_user: AtomicUsize,
    pub create_playlist: AtomicUsize,
    pub add_tracks: AtomicUsize,
}

fn hit(counter: &AtomicUsize) {
    counter.fetch_add(1, Ordering::SeqCst);
}

pub fn count(counter: &AtomicUsize) -> usize {
    counter.load(Ordering::SeqCst)
}

/// In-memory stand-in for the Spotify Web API.
#[derive(Default)]
pub struct FakeSpotify {
    pub liked: Vec<Track>,
    /// Status returned by every saved-tracks page.
    pub saved_status: Option<u16>,
    /// Tracks known to the catalog but not liked.
    pub catalog: Vec<Track>,
    pub tracks_delay: Option<Duration>,
    pub tracks_fail: bool,
    pub features: HashMap<TrackId, AudioFeatures>,
    pub audio_denied: bool,
    pub audio_delay: Option<Duration>,
    pub genres: HashMap<ArtistId, Vec<String>>,
    pub artist_lookup_fails: bool,
    pub playlist_search: HashMap<String, Vec<PlaylistSummary>>,
    pub playlist_search_fails: bool,
    pub playlist_tracks: HashMap<String, Vec<Track>>,
    pub top_artists: Vec<Artist>,
    pub top_tracks: Vec<Track>,
    pub recommended: Vec<Track>,
    pub searched: Vec<Track>,
    pub fail_user_lookup: bool,
    pub fail_create: bool,
    pub fail_add: bool,

    pub calls: Calls,
    pub last_seeds: Mutex<Option<Seeds>>,
    pub created: Mutex<Vec<CreatePlaylistRequest>>,
    pub added: Mutex<Vec<String>>,
}

impl FakeSpotify {
    pub fn with_liked(liked: Vec<Track>) -> Self {
        Self {
            liked,
            ..Default::default()
        }
    }

    pub fn set_features(&mut self, ids: impl IntoIterator<Item = TrackId>, features: AudioFeatures) {
        for id in ids {
            self.features.insert(id, features);
        }
    }

    pub fn set_genres(&mut self, artist: &str, genres: &[&str]) {
        self.genres.insert(
            ArtistId::new(artist),
            genres.iter().map(|g| g.to_string()).collect(),
        );
    }

    fn find(&self, id: &TrackId) -> Option<Track> {
        self.liked
            .iter()
            .chain(self.catalog.iter())
            .find(|t| &t.id == id)
            .cloned()
    }
}

#[async_trait]
impl SpotifyApi for FakeSpotify {
    async fn saved_tracks(&self, limit: u32, offset: u32) -> Result<Vec<Track>, SpotifyError> {
        hit(&self.calls.saved_tracks);
        match self.saved_status {
            Some(401) => return Err(SpotifyError::Unauthorized),
            Some(status) => {
                return Err(SpotifyError::Status {
                    status,
                    message: "saved tracks".into(),
                });
            }
            None => {}
        }
        Ok(self
            .liked
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn top_artists(&self, limit: u32) -> Result<Vec<Artist>, SpotifyError> {
        hit(&self.calls.top_artists);
        Ok(self.top_artists.iter().take(limit as usize).cloned().collect())
    }

    async fn top_tracks(&self, limit: u32) -> Result<Vec<Track>, SpotifyError> {
        hit(&self.calls.top_tracks);
        Ok(self.top_tracks.iter().take(limit as usize).cloned().collect())
    }

    async fn tracks(&self, ids: &[TrackId]) -> Result<Vec<Track>, SpotifyError> {
        hit(&self.calls.tracks);
        assert!(ids.len() <= 20, "track lookup batch of {}", ids.len());
        if let Some(delay) = self.tracks_delay {
            tokio::time::sleep(delay).await;
        }
        if self.tracks_fail {
            return Err(SpotifyError::Status {
                status: 502,
                message: "tracks".into(),
            });
        }
        Ok(ids.iter().filter_map(|id| self.find(id)).collect())
    }

    async fn audio_features(
        &self,
        ids: &[TrackId],
    ) -> Result<Vec<(TrackId, AudioFeatures)>, SpotifyError> {
        hit(&self.calls.audio_features);
        assert!(ids.len() <= 100, "audio feature batch of {}", ids.len());
        if let Some(delay) = self.audio_delay {
            tokio::time::sleep(delay).await;
        }
        if self.audio_denied {
            return Err(SpotifyError::Forbidden("audio features".into()));
        }
        Ok(ids
            .iter()
            .filter_map(|id| self.features.get(id).map(|f| (id.clone(), *f)))
            .collect())
    }

    async fn artist(&self, id: &ArtistId) -> Result<Artist, SpotifyError> {
        hit(&self.calls.artist);
        if self.artist_lookup_fails {
            return Err(SpotifyError::Status {
                status: 500,
                message: "artist lookup".into(),
            });
        }
        Ok(Artist {
            id: id.clone(),
            name: id.as_str().to_uppercase(),
            genres: self.genres.get(id).cloned().unwrap_or_default(),
        })
    }

    async fn search_playlists(
        &self,
        query: &str,
        _limit: u32,
    ) -> Result<Vec<PlaylistSummary>, SpotifyError> {
        hit(&self.calls.search_playlists);
        if self.playlist_search_fails {
            return Err(SpotifyError::RateLimited {
                retry_after: Some(30),
            });
        }
        Ok(self.playlist_search.get(query).cloned().unwrap_or_default())
    }

    async fn search_tracks(&self, _query: &str, limit: u32) -> Result<Vec<Track>, SpotifyError> {
        hit(&self.calls.search_tracks);
        Ok(self.searched.iter().take(limit as usize).cloned().collect())
    }

    async fn playlist_items(&self, playlist_id: &str) -> Result<Vec<Track>, SpotifyError> {
        hit(&self.calls.playlist_items);
        Ok(self
            .playlist_tracks
            .get(playlist_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn recommendations(
        &self,
        seeds: &Seeds,
        _attributes: &TrackAttributes,
        limit: u32,
    ) -> Result<Vec<Track>, SpotifyError> {
        hit(&self.calls.recommendations);
        *self.last_seeds.lock().unwrap() = Some(seeds.clone());
        Ok(self.recommended.iter().take(limit as usize).cloned().collect())
    }

    async fn current_user(&self) -> Result<User, SpotifyError> {
        hit(&self.calls.current_user);
        if self.fail_user_lookup {
            return Err(SpotifyError::Unauthorized);
        }
        Ok(User {
            id: "listener".into(),
            display_name: Some("Listener".into()),
        })
    }

    async fn create_playlist(
        &self,
        _user_id: &str,
        request: &CreatePlaylistRequest,
    ) -> Result<Playlist, SpotifyError> {
        hit(&self.calls.create_playlist);
        if self.fail_create {
            return Err(SpotifyError::Status {
                status: 500,
                message: "create".into(),
            });
        }
        self.created.lock().unwrap().push(request.clone());
        Ok(Playlist {
            id: "pl-1".into(),
            name: request.name.clone(),
            description: Some(request.description.clone()),
            track_ids: Vec::new(),
        })
    }

    async fn add_tracks(&self, _playlist_id: &str, uris: &[String]) -> Result<String, SpotifyError> {
        hit(&self.calls.add_tracks);
        if self.fail_add {
            return Err(SpotifyError::Forbidden("add".into()));
        }
        self.added.lock().unwrap().extend(uris.iter().cloned());
        Ok("snapshot".into())
    }
}

pub fn track(id: &str, artist: &str) -> Track {
    Track {
        id: TrackId::new(id),
        name: format!("Song {}", id),
        artists: vec![ArtistRef {
            id: ArtistId::new(artist),
            name: artist.to_uppercase(),
        }],
        album: AlbumRef {
            id: None,
            name: "Album".into(),
        },
    }
}

/// `n` tracks `{prefix}0..`, each by its own artist `{prefix}-artist-i`.
pub fn tracks_by_distinct_artists(prefix: &str, n: usize) -> Vec<Track> {
    (0..n)
        .map(|i| track(&format!("{prefix}{i}"), &format!("{prefix}-artist-{i}")))
        .collect()
}

pub fn artist(id: &str) -> Artist {
    Artist {
        id: ArtistId::new(id),
        name: id.to_uppercase(),
        genres: Vec::new(),
    }
}

pub fn ids(tracks: &[Track]) -> Vec<TrackId> {
    tracks.iter().map(|t| t.id.clone()).collect()
}

/// Passes every energetic band.
pub fn energetic_features() -> AudioFeatures {
    AudioFeatures {
        energy: 0.9,
        danceability: 0.8,
        valence: 0.7,
        tempo: 128.0,
        acousticness: 0.1,
        instrumentalness: 0.0,
    }
}

/// Fails every mood except neutral.
pub fn flat_features() -> AudioFeatures {
    AudioFeatures {
        energy: 0.55,
        danceability: 0.2,
        valence: 0.6,
        tempo: 180.0,
        acousticness: 0.35,
        instrumentalness: 0.1,
    }
}
