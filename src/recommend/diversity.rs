//! Post-processing applied to the pool once every stage has run.

use std::collections::HashMap;

use chrono::Utc;
use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

use super::LikedLibrary;
use crate::types::{ArtistId, Track};

/// Drops anything that is not a liked track.
pub fn retain_liked(tracks: &mut Vec<Track>, library: &LikedLibrary) {
    tracks.retain(|t| library.contains_track(&t.id));
}

/// Keeps tracks in order while every credited artist still has quota left.
///
/// Each artist starts with `max_per_artist` slots; an admitted track takes
/// one slot from each of its artists.
pub fn cap_per_artist(tracks: Vec<Track>, max_per_artist: usize) -> Vec<Track> {
    let mut used: HashMap<ArtistId, usize> = HashMap::new();
    let mut kept = Vec::with_capacity(tracks.len());

    for track in tracks {
        let exhausted = track
            .artists
            .iter()
            .any(|a| used.get(&a.id).copied().unwrap_or(0) >= max_per_artist);
        if exhausted {
            continue;
        }

        for artist in &track.artists {
            *used.entry(artist.id.clone()).or_insert(0) += 1;
        }
        kept.push(track);
    }

    kept
}

/// Artist names with the number of candidates crediting them, most first.
pub fn artist_distribution(tracks: &[Track], top: usize) -> Vec<(String, usize)> {
    let mut counts: HashMap<&ArtistId, (&str, usize)> = HashMap::new();
    for artist in tracks.iter().flat_map(|t| &t.artists) {
        counts.entry(&artist.id).or_insert((artist.name.as_str(), 0)).1 += 1;
    }

    let mut ranked: Vec<(String, usize)> = counts
        .into_values()
        .map(|(name, count)| (name.to_string(), count))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(top);
    ranked
}

/// Uniform random permutation seeded from the current time.
pub fn shuffle(tracks: &mut [Track]) {
    let seed = Utc::now().timestamp_nanos_opt().unwrap_or_default() as u64;
    shuffle_with_seed(tracks, seed);
}

pub fn shuffle_with_seed(tracks: &mut [Track], seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    tracks.shuffle(&mut rng);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AlbumRef, ArtistRef, TrackId};

    fn track(id: &str, artists: &[&str]) -> Track {
        Track {
            id: TrackId::new(id),
            name: id.into(),
            artists: artists
                .iter()
                .map(|a| ArtistRef {
                    id: ArtistId::new(*a),
                    name: a.to_uppercase(),
                })
                .collect(),
            album: AlbumRef::default(),
        }
    }

    #[test]
    fn caps_in_pool_order() {
        let tracks: Vec<Track> = (0..8).map(|i| track(&format!("t{i}"), &["a"])).collect();
        let kept = cap_per_artist(tracks, 5);

        let ids: Vec<&str> = kept.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["t0", "t1", "t2", "t3", "t4"]);
    }

    #[test]
    fn collaboration_needs_quota_from_every_artist() {
        let tracks = vec![
            track("t1", &["a"]),
            track("t2", &["a"]),
            track("t3", &["a", "b"]),
            track("t4", &["b"]),
        ];
        let kept = cap_per_artist(tracks, 2);

        let ids: Vec<&str> = kept.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["t1", "t2", "t4"]);
    }

    #[test]
    fn distribution_ranks_by_count() {
        let tracks = vec![
            track("t1", &["a"]),
            track("t2", &["b"]),
            track("t3", &["b", "c"]),
        ];
        let ranked = artist_distribution(&tracks, 2);
        assert_eq!(ranked, vec![("B".to_string(), 2), ("A".to_string(), 1)]);
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut tracks: Vec<Track> = (0..20).map(|i| track(&format!("t{i}"), &["a"])).collect();
        let before: Vec<TrackId> = tracks.iter().map(|t| t.id.clone()).collect();

        shuffle_with_seed(&mut tracks, 42);

        let mut after: Vec<TrackId> = tracks.iter().map(|t| t.id.clone()).collect();
        let mut sorted = before.clone();
        sorted.sort();
        after.sort();
        assert_eq!(after, sorted);
    }
}
