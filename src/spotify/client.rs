use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use super::SpotifyApi;
use crate::{
    config,
    error::SpotifyError,
    types::{
        AddTrackToPlaylistRequest, AddTrackToPlaylistResponse, ApiTrack, Artist, ArtistId,
        AudioFeatures, AudioFeaturesResponse, CreatePlaylistRequest, CreatePlaylistResponse,
        Playlist, PlaylistItemsResponse, PlaylistSummary, RecommendationsResponse,
        SavedTracksResponse, SearchResponse, Seeds, SeveralTracksResponse, TopArtistsResponse,
        TopTracksResponse, Track, TrackAttributes, TrackId, User,
    },
};

/// Quick lookups of the signed-in profile.
const PROFILE_TIMEOUT: Duration = Duration::from_secs(5);
/// Account reads and playlist writes.
const ACCOUNT_TIMEOUT: Duration = Duration::from_secs(10);
/// Catalog lookups, searches and recommendations.
const CATALOG_TIMEOUT: Duration = Duration::from_secs(15);
/// Library paging and audio analysis, which run many batched calls.
const LIBRARY_TIMEOUT: Duration = Duration::from_secs(60);

const TOP_ITEMS_TIME_RANGE: &str = "medium_term";

/// Authenticated Spotify Web API client.
///
/// Holds a single access token for the lifetime of a run; refreshing is the
/// job of [`crate::management::TokenManager`] before the client is built.
#[derive(Clone)]
pub struct SpotifyClient {
    http: Client,
    base_url: String,
    access_token: String,
}

impl SpotifyClient {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self::with_base_url(config::spotify_apiurl(), access_token)
    }

    pub fn with_base_url(base_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get(&self, path: &str, timeout: Duration) -> RequestBuilder {
        self.http
            .get(self.url(path))
            .bearer_auth(&self.access_token)
            .timeout(timeout)
    }

    fn post(&self, path: &str, timeout: Duration) -> RequestBuilder {
        self.http
            .post(self.url(path))
            .bearer_auth(&self.access_token)
            .timeout(timeout)
    }

    async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, SpotifyError> {
        let response = check_status(request.send().await?).await?;
        Ok(response.json::<T>().await?)
    }
}

/// Turns non-success responses into typed errors.
async fn check_status(response: Response) -> Result<Response, SpotifyError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let retry_after = response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok());
    let message = response.text().await.unwrap_or_default();

    Err(SpotifyError::from_status(status, message, retry_after))
}

fn join_ids<'a>(ids: impl IntoIterator<Item = &'a str>) -> String {
    ids.into_iter().collect::<Vec<_>>().join(",")
}

fn into_tracks(items: impl IntoIterator<Item = ApiTrack>) -> Vec<Track> {
    items.into_iter().filter_map(ApiTrack::into_track).collect()
}

#[async_trait]
impl SpotifyApi for SpotifyClient {
    async fn saved_tracks(&self, limit: u32, offset: u32) -> Result<Vec<Track>, SpotifyError> {
        let request = self
            .get("/me/tracks", LIBRARY_TIMEOUT)
            .query(&[("limit", limit), ("offset", offset)]);
        let page: SavedTracksResponse = Self::send_json(request).await?;

        Ok(into_tracks(page.items.into_iter().filter_map(|i| i.track)))
    }

    async fn top_artists(&self, limit: u32) -> Result<Vec<Artist>, SpotifyError> {
        let request = self
            .get("/me/top/artists", ACCOUNT_TIMEOUT)
            .query(&[("limit", limit.to_string().as_str()), ("time_range", TOP_ITEMS_TIME_RANGE)]);
        let page: TopArtistsResponse = Self::send_json(request).await?;

        Ok(page.items)
    }

    async fn top_tracks(&self, limit: u32) -> Result<Vec<Track>, SpotifyError> {
        let request = self
            .get("/me/top/tracks", ACCOUNT_TIMEOUT)
            .query(&[("limit", limit.to_string().as_str()), ("time_range", TOP_ITEMS_TIME_RANGE)]);
        let page: TopTracksResponse = Self::send_json(request).await?;

        Ok(into_tracks(page.items))
    }

    async fn tracks(&self, ids: &[TrackId]) -> Result<Vec<Track>, SpotifyError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let request = self
            .get("/tracks", CATALOG_TIMEOUT)
            .query(&[("ids", join_ids(ids.iter().map(TrackId::as_str)))]);
        let res: SeveralTracksResponse = Self::send_json(request).await?;

        Ok(into_tracks(res.tracks.into_iter().flatten()))
    }

    async fn audio_features(
        &self,
        ids: &[TrackId],
    ) -> Result<Vec<(TrackId, AudioFeatures)>, SpotifyError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let request = self
            .get("/audio-features", LIBRARY_TIMEOUT)
            .query(&[("ids", join_ids(ids.iter().map(TrackId::as_str)))]);
        let res: AudioFeaturesResponse = Self::send_json(request).await?;

        Ok(res
            .audio_features
            .into_iter()
            .flatten()
            .map(|f| (f.id, f.features))
            .collect())
    }

    async fn artist(&self, id: &ArtistId) -> Result<Artist, SpotifyError> {
        let request = self.get(&format!("/artists/{}", id), CATALOG_TIMEOUT);
        Self::send_json(request).await
    }

    async fn search_playlists(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<PlaylistSummary>, SpotifyError> {
        let request = self.get("/search", CATALOG_TIMEOUT).query(&[
            ("q", query),
            ("type", "playlist"),
            ("limit", limit.to_string().as_str()),
        ]);
        let res: SearchResponse = Self::send_json(request).await?;

        Ok(res
            .playlists
            .map(|p| p.items.into_iter().flatten().collect())
            .unwrap_or_default())
    }

    async fn search_tracks(&self, query: &str, limit: u32) -> Result<Vec<Track>, SpotifyError> {
        let request = self.get("/search", CATALOG_TIMEOUT).query(&[
            ("q", query),
            ("type", "track"),
            ("limit", limit.to_string().as_str()),
        ]);
        let res: SearchResponse = Self::send_json(request).await?;

        Ok(res.tracks.map(|t| into_tracks(t.items)).unwrap_or_default())
    }

    async fn playlist_items(&self, playlist_id: &str) -> Result<Vec<Track>, SpotifyError> {
        let request = self
            .get(&format!("/playlists/{}/tracks", playlist_id), CATALOG_TIMEOUT)
            .query(&[("limit", "100")]);
        let res: PlaylistItemsResponse = Self::send_json(request).await?;

        Ok(into_tracks(res.items.into_iter().filter_map(|i| i.track)))
    }

    async fn recommendations(
        &self,
        seeds: &Seeds,
        attributes: &TrackAttributes,
        limit: u32,
    ) -> Result<Vec<Track>, SpotifyError> {
        let mut params: Vec<(&str, String)> = vec![("limit", limit.to_string())];
        if !seeds.artists.is_empty() {
            params.push((
                "seed_artists",
                join_ids(seeds.artists.iter().map(ArtistId::as_str)),
            ));
        }
        if !seeds.tracks.is_empty() {
            params.push((
                "seed_tracks",
                join_ids(seeds.tracks.iter().map(TrackId::as_str)),
            ));
        }
        if !seeds.genres.is_empty() {
            params.push(("seed_genres", seeds.genres.join(",")));
        }
        params.extend(attributes.query_pairs());

        let request = self.get("/recommendations", CATALOG_TIMEOUT).query(&params);
        let res: RecommendationsResponse = Self::send_json(request).await?;

        Ok(into_tracks(res.tracks))
    }

    async fn current_user(&self) -> Result<User, SpotifyError> {
        Self::send_json(self.get("/me", PROFILE_TIMEOUT)).await
    }

    async fn create_playlist(
        &self,
        user_id: &str,
        request: &CreatePlaylistRequest,
    ) -> Result<Playlist, SpotifyError> {
        let builder = self
            .post(&format!("/users/{}/playlists", user_id), ACCOUNT_TIMEOUT)
            .json(request);
        let res: CreatePlaylistResponse = Self::send_json(builder).await?;

        Ok(Playlist {
            id: res.id,
            name: res.name,
            description: res.description,
            track_ids: Vec::new(),
        })
    }

    async fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<String, SpotifyError> {
        let body = AddTrackToPlaylistRequest {
            uris: uris.to_vec(),
        };
        let builder = self
            .post(&format!("/playlists/{}/tracks", playlist_id), ACCOUNT_TIMEOUT)
            .json(&body);
        let res: AddTrackToPlaylistResponse = Self::send_json(builder).await?;

        Ok(res.snapshot_id)
    }
}
