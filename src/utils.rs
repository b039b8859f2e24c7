use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Local, TimeZone};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

use crate::{mood::Mood, recommend::PlaylistDetails};

pub fn generate_code_verifier() -> String {
    random_alphanumeric(128)
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Opaque value round-tripped through the authorization redirect.
pub fn generate_state() -> String {
    random_alphanumeric(32)
}

fn random_alphanumeric(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Where the mood of a playlist came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoodSource {
    Weather,
    Chosen,
}

pub fn playlist_details(mood: Mood, source: MoodSource) -> PlaylistDetails {
    playlist_details_at(mood, source, &Local::now())
}

pub fn playlist_details_at<Tz: TimeZone>(
    mood: Mood,
    source: MoodSource,
    at: &DateTime<Tz>,
) -> PlaylistDetails
where
    Tz::Offset: std::fmt::Display,
{
    let stamp = at.format("%b %d %H:%M");
    match source {
        MoodSource::Weather => PlaylistDetails {
            name: format!("Weather Mood Playlist - {}", stamp),
            description: format!(
                "Songs from your liked tracks for a {} mood, picked by the weather",
                mood
            ),
        },
        MoodSource::Chosen => PlaylistDetails {
            name: format!("{} Mood Playlist - {}", mood.title(), stamp),
            description: format!("Songs from your liked tracks for a {} mood", mood),
        },
    }
}
