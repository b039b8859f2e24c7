use std::collections::HashSet;

use crate::{
    error::PipelineError,
    info,
    spotify::{SAVED_TRACKS_PAGE_LIMIT, SpotifyApi},
    types::{ArtistId, Track, TrackId},
    warning,
};

/// Most liked tracks indexed per run (20 pages). Larger libraries are only
/// partially indexed.
pub const LIBRARY_TRACK_CAP: u32 = 1000;

/// The user's liked tracks and the artists credited on them.
///
/// Ground truth for a run: nothing outside `track_ids` may reach a playlist.
#[derive(Debug, Clone, Default)]
pub struct LikedLibrary {
    track_ids: HashSet<TrackId>,
    artist_ids: HashSet<ArtistId>,
    /// Library order, newest like first.
    order: Vec<TrackId>,
    truncated: bool,
}

impl LikedLibrary {
    /// Pages through the saved-tracks endpoint until a short page or the
    /// [`LIBRARY_TRACK_CAP`] is reached.
    ///
    /// # Errors
    ///
    /// - [`PipelineError::AuthFailure`] when the token is rejected
    /// - [`PipelineError::LibraryFetch`] for any other failed page
    /// - [`PipelineError::NoLikedSongs`] when the library is empty
    pub async fn build<C: SpotifyApi + ?Sized>(client: &C) -> Result<Self, PipelineError> {
        let mut library = LikedLibrary::default();
        let mut offset = 0;

        info!("Fetching your liked songs...");

        loop {
            let page = client
                .saved_tracks(SAVED_TRACKS_PAGE_LIMIT, offset)
                .await
                .map_err(|e| {
                    if e.is_unauthorized() {
                        PipelineError::AuthFailure(e.to_string())
                    } else {
                        PipelineError::LibraryFetch(e)
                    }
                })?;

            if page.is_empty() {
                break;
            }

            let page_len = page.len();
            library.extend(&page);
            info!(
                "Processed {} liked songs, {} unique artists so far...",
                library.len(),
                library.artist_count()
            );

            if page_len < SAVED_TRACKS_PAGE_LIMIT as usize {
                break;
            }

            offset += SAVED_TRACKS_PAGE_LIMIT;
            if offset >= LIBRARY_TRACK_CAP {
                warning!(
                    "Reached the limit of {} liked songs, the rest of your library is not considered.",
                    LIBRARY_TRACK_CAP
                );
                library.truncated = true;
                break;
            }
        }

        if library.is_empty() {
            return Err(PipelineError::NoLikedSongs);
        }

        info!(
            "Found {} liked songs by {} artists",
            library.len(),
            library.artist_count()
        );
        Ok(library)
    }

    pub fn from_tracks<'a>(tracks: impl IntoIterator<Item = &'a Track>) -> Self {
        let mut library = LikedLibrary::default();
        for track in tracks {
            library.insert(track);
        }
        library
    }

    fn extend(&mut self, tracks: &[Track]) {
        for track in tracks {
            self.insert(track);
        }
    }

    fn insert(&mut self, track: &Track) {
        if self.track_ids.insert(track.id.clone()) {
            self.order.push(track.id.clone());
        }
        self.artist_ids
            .extend(track.artists.iter().map(|a| a.id.clone()));
    }

    pub fn contains_track(&self, id: &TrackId) -> bool {
        self.track_ids.contains(id)
    }

    pub fn contains_artist(&self, id: &ArtistId) -> bool {
        self.artist_ids.contains(id)
    }

    /// Liked track ids in library order.
    pub fn track_ids(&self) -> &[TrackId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn artist_count(&self) -> usize {
        self.artist_ids.len()
    }

    /// True if the cap stopped paging before the end of the library.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }
}
