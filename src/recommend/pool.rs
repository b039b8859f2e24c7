use std::collections::HashSet;

use super::LikedLibrary;
use crate::types::{Track, TrackId};

/// Ordered, deduplicated accumulator of candidate tracks.
///
/// Only liked tracks are admitted and each id at most once, so the pool
/// holds both invariants at every stage boundary.
#[derive(Debug, Default)]
pub struct CandidatePool {
    tracks: Vec<Track>,
    seen: HashSet<TrackId>,
}

impl CandidatePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Admits a track if it is liked and not yet pooled.
    pub fn admit(&mut self, track: Track, library: &LikedLibrary) -> bool {
        if !library.contains_track(&track.id) || self.seen.contains(&track.id) {
            return false;
        }
        self.seen.insert(track.id.clone());
        self.tracks.push(track);
        true
    }

    /// Admits every eligible track and returns how many were added.
    pub fn extend(&mut self, tracks: impl IntoIterator<Item = Track>, library: &LikedLibrary) -> usize {
        let mut added = 0;
        for track in tracks {
            if self.admit(track, library) {
                added += 1;
            }
        }
        added
    }

    pub fn contains(&self, id: &TrackId) -> bool {
        self.seen.contains(id)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn into_tracks(self) -> Vec<Track> {
        self.tracks
    }
}
