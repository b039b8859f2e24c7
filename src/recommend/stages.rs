//! The five candidate sources, tried in order by the assembler.
//!
//! Each stage returns the tracks it would like to add; admission into the
//! pool (liked-only, no duplicates) is done by the caller. A stage that
//! cannot do its job returns [`StageDegraded`] and contributes nothing.

use std::collections::{HashMap, HashSet};

use super::{CandidatePool, LikedLibrary, Stage};
use crate::{
    error::{SpotifyError, StageDegraded},
    info,
    mood::{MoodProfile, Thresholds},
    spotify::{AUDIO_FEATURES_BATCH_LIMIT, RECOMMENDATIONS_LIMIT, SpotifyApi, TRACKS_BATCH_LIMIT},
    types::{ArtistId, Seeds, Track, TrackId},
    warning,
};

/// Ids sent in the audio-feature permission probe.
pub const AUDIO_PROBE_SIZE: usize = 5;
pub const PLAYLIST_SEARCH_LIMIT: u32 = 5;
pub const TRACK_SEARCH_LIMIT: u32 = 20;
pub const MAX_SEEDS: usize = 5;
pub const MAX_TOP_ARTIST_SEEDS: usize = 2;

/// Fetches full track records in batches. Failed batches are skipped.
///
/// # Errors
///
/// The last batch error when every batch failed.
pub async fn hydrate_tracks<C: SpotifyApi + ?Sized>(
    client: &C,
    ids: &[TrackId],
) -> Result<Vec<Track>, SpotifyError> {
    let mut tracks = Vec::with_capacity(ids.len());
    let mut batches_ok = 0;
    let mut last_error: Option<SpotifyError> = None;

    for (n, batch) in ids.chunks(TRACKS_BATCH_LIMIT).enumerate() {
        match client.tracks(batch).await {
            Ok(found) => {
                batches_ok += 1;
                tracks.extend(found);
            }
            Err(e) => {
                let start = n * TRACKS_BATCH_LIMIT;
                warning!(
                    "Failed to fetch tracks {}-{}: {}",
                    start,
                    start + batch.len(),
                    e
                );
                last_error = Some(e);
            }
        }
    }

    match last_error {
        Some(e) if batches_ok == 0 => Err(e),
        _ => Ok(tracks),
    }
}

/// Stage 1: liked tracks whose audio features fall inside every band.
pub async fn audio_feature_match<C: SpotifyApi + ?Sized>(
    client: &C,
    thresholds: &Thresholds,
    liked: &[Track],
) -> Result<Vec<Track>, StageDegraded> {
    if liked.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<TrackId> = liked.iter().map(|t| t.id.clone()).collect();

    let probe = &ids[..ids.len().min(AUDIO_PROBE_SIZE)];
    if let Err(e) = client.audio_features(probe).await {
        let reason = if e.is_permission_denied() {
            format!("audio features are not accessible ({})", e)
        } else {
            format!("audio feature probe failed ({})", e)
        };
        return Err(StageDegraded::new(Stage::AudioFeatures, reason));
    }

    let mut matching: HashSet<TrackId> = HashSet::new();
    for (n, batch) in ids.chunks(AUDIO_FEATURES_BATCH_LIMIT).enumerate() {
        match client.audio_features(batch).await {
            Ok(features) => matching.extend(
                features
                    .into_iter()
                    .filter(|(_, f)| thresholds.matches(f))
                    .map(|(id, _)| id),
            ),
            Err(e) => {
                let start = n * AUDIO_FEATURES_BATCH_LIMIT;
                warning!(
                    "Failed to get audio features for tracks {}-{}: {}",
                    start,
                    start + batch.len(),
                    e
                )
            }
        }
    }

    Ok(liked
        .iter()
        .filter(|t| matching.contains(&t.id))
        .cloned()
        .collect())
}

/// Stage 2: liked tracks with an artist whose genres match the mood.
///
/// Artist lookups are cached for the stage, failures included. Collection
/// stops after `room` matches.
pub async fn genre_match<C: SpotifyApi + ?Sized>(
    client: &C,
    profile: &MoodProfile,
    liked: &[Track],
    pool: &CandidatePool,
    room: usize,
) -> Result<Vec<Track>, StageDegraded> {
    let mut genres: HashMap<ArtistId, Vec<String>> = HashMap::new();
    let mut failed: HashSet<ArtistId> = HashSet::new();
    let mut last_error: Option<SpotifyError> = None;
    let mut matched = Vec::new();

    info!(
        "Matching artist genres against {} '{}' keywords",
        profile.genres.len(),
        profile.mood
    );

    for track in liked.iter().filter(|t| !pool.contains(&t.id)) {
        if matched.len() >= room {
            break;
        }

        let mut is_match = false;
        for artist in &track.artists {
            if failed.contains(&artist.id) {
                continue;
            }
            if !genres.contains_key(&artist.id) {
                match client.artist(&artist.id).await {
                    Ok(found) => {
                        genres.insert(artist.id.clone(), found.genres);
                    }
                    Err(e) => {
                        failed.insert(artist.id.clone());
                        last_error = Some(e);
                        continue;
                    }
                }
            }

            if genres
                .get(&artist.id)
                .is_some_and(|g| profile.matches_genre(g))
            {
                is_match = true;
                break;
            }
        }

        if is_match {
            matched.push(track.clone());
        }
    }

    if genres.is_empty() {
        if let Some(e) = last_error {
            return Err(StageDegraded::new(
                Stage::Genres,
                format!("every artist lookup failed ({})", e),
            ));
        }
    }

    Ok(matched)
}

/// Stage 3: liked tracks found in playlists matching the mood's queries.
pub async fn playlist_mining<C: SpotifyApi + ?Sized>(
    client: &C,
    profile: &MoodProfile,
    library: &LikedLibrary,
    pool: &CandidatePool,
    room: usize,
    mined_cap: usize,
) -> Result<Vec<Track>, StageDegraded> {
    let mut mined: Vec<Track> = Vec::new();
    let mut searches_ok = 0;
    let mut last_error: Option<SpotifyError> = None;

    'queries: for query in profile.playlist_queries {
        if mined.len() >= mined_cap {
            break;
        }

        info!("Searching for '{}' playlists...", query);
        let playlists = match client.search_playlists(query, PLAYLIST_SEARCH_LIMIT).await {
            Ok(playlists) => {
                searches_ok += 1;
                playlists
            }
            Err(e) => {
                warning!("Playlist search '{}' failed: {}", query, e);
                last_error = Some(e);
                continue;
            }
        };

        for playlist in playlists {
            if mined.len() >= mined_cap {
                break 'queries;
            }

            match client.playlist_items(&playlist.id).await {
                Ok(items) => mined.extend(items),
                Err(e) => warning!("Skipping playlist '{}': {}", playlist.name, e),
            }
        }
    }

    if searches_ok == 0 {
        if let Some(e) = last_error {
            return Err(StageDegraded::new(
                Stage::Playlists,
                format!("every playlist search failed ({})", e),
            ));
        }
    }

    info!("Found {} tracks in mood playlists", mined.len());

    let mut seen = HashSet::new();
    Ok(mined
        .into_iter()
        .filter(|t| {
            library.contains_track(&t.id) && !pool.contains(&t.id) && seen.insert(t.id.clone())
        })
        .take(room)
        .collect())
}

/// Stage 4: catalog recommendations seeded from the user's taste, kept only
/// when already liked.
pub async fn catalog_recommendations<C: SpotifyApi + ?Sized>(
    client: &C,
    profile: &MoodProfile,
    library: &LikedLibrary,
    top_limit: u32,
) -> Result<Vec<Track>, StageDegraded> {
    let seeds = build_seeds(client, profile, library, top_limit).await;
    info!(
        "Requesting recommendations with {} artist, {} track and {} genre seeds",
        seeds.artists.len(),
        seeds.tracks.len(),
        seeds.genres.len()
    );

    let recommended = client
        .recommendations(&seeds, &profile.attributes, RECOMMENDATIONS_LIMIT)
        .await
        .map_err(|e| StageDegraded::new(Stage::Recommendations, e.to_string()))?;
    info!("Received {} recommendations", recommended.len());

    let ids: Vec<TrackId> = recommended.into_iter().map(|t| t.id).collect();
    let full = hydrate_tracks(client, &ids)
        .await
        .map_err(|e| StageDegraded::new(Stage::Recommendations, e.to_string()))?;

    Ok(full
        .into_iter()
        .filter(|t| library.contains_track(&t.id))
        .collect())
}

/// Up to [`MAX_SEEDS`] seeds: liked top artists first, then liked top
/// tracks, then the mood's seed genres.
pub async fn build_seeds<C: SpotifyApi + ?Sized>(
    client: &C,
    profile: &MoodProfile,
    library: &LikedLibrary,
    top_limit: u32,
) -> Seeds {
    let mut seeds = Seeds::default();

    match client.top_artists(top_limit).await {
        Ok(artists) => {
            for artist in artists.iter().take(MAX_TOP_ARTIST_SEEDS) {
                if library.contains_artist(&artist.id) {
                    info!("Using top artist as seed: {}", artist.name);
                    seeds.artists.push(artist.id.clone());
                }
            }
        }
        Err(e) => warning!("Could not fetch your top artists: {}", e),
    }

    let room = MAX_SEEDS - seeds.len();
    match client.top_tracks(top_limit).await {
        Ok(tracks) => {
            for track in tracks.iter().take(room) {
                if library.contains_track(&track.id) {
                    info!(
                        "Using top track as seed: {} by {}",
                        track.name,
                        track.artist_names()
                    );
                    seeds.tracks.push(track.id.clone());
                }
            }
        }
        Err(e) => warning!("Could not fetch your top tracks: {}", e),
    }

    let room = MAX_SEEDS - seeds.len();
    seeds.genres = profile
        .seed_genres
        .iter()
        .take(room)
        .map(|g| g.to_string())
        .collect();

    seeds
}

/// Stage 5: a single mood keyword track search, kept only when liked.
pub async fn search_fallback<C: SpotifyApi + ?Sized>(
    client: &C,
    profile: &MoodProfile,
    library: &LikedLibrary,
) -> Result<Vec<Track>, StageDegraded> {
    info!("Searching for tracks with query: {}", profile.search_query);

    let found = client
        .search_tracks(profile.search_query, TRACK_SEARCH_LIMIT)
        .await
        .map_err(|e| StageDegraded::new(Stage::Search, e.to_string()))?;

    Ok(found
        .into_iter()
        .filter(|t| library.contains_track(&t.id))
        .collect())
}
