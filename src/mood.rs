//! Moods and the static table describing how each one is matched.
//!
//! Every mood owns a single [`MoodProfile`] bundling its audio-feature bands,
//! genre keywords, playlist search queries, fallback track search, seed
//! genres and recommendation targets. Lookups are pure and never touch the
//! network.

use std::fmt;

use crate::types::{AudioFeatures, TrackAttributes};

/// Closed set of listening moods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mood {
    Energetic,
    Relaxed,
    Intense,
    Thoughtful,
    Neutral,
}

impl Mood {
    pub const ALL: [Mood; 5] = [
        Mood::Energetic,
        Mood::Relaxed,
        Mood::Intense,
        Mood::Thoughtful,
        Mood::Neutral,
    ];

    /// Parses a mood tag, returning `None` for tags outside the enumeration.
    pub fn parse(tag: &str) -> Option<Mood> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "energetic" => Some(Mood::Energetic),
            "relaxed" => Some(Mood::Relaxed),
            "intense" => Some(Mood::Intense),
            "thoughtful" => Some(Mood::Thoughtful),
            "neutral" => Some(Mood::Neutral),
            _ => None,
        }
    }

    /// Like [`Mood::parse`] but unknown tags fall back to [`Mood::Neutral`].
    pub fn from_tag(tag: &str) -> Mood {
        Mood::parse(tag).unwrap_or(Mood::Neutral)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Energetic => "energetic",
            Mood::Relaxed => "relaxed",
            Mood::Intense => "intense",
            Mood::Thoughtful => "thoughtful",
            Mood::Neutral => "neutral",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Mood::Energetic => "Energetic",
            Mood::Relaxed => "Relaxed",
            Mood::Intense => "Intense",
            Mood::Thoughtful => "Thoughtful",
            Mood::Neutral => "Neutral",
        }
    }

    pub fn profile(&self) -> &'static MoodProfile {
        match self {
            Mood::Energetic => &ENERGETIC,
            Mood::Relaxed => &RELAXED,
            Mood::Intense => &INTENSE,
            Mood::Thoughtful => &THOUGHTFUL,
            Mood::Neutral => &NEUTRAL,
        }
    }

    pub fn thresholds(&self) -> &'static Thresholds {
        &self.profile().thresholds
    }

    pub fn genres(&self) -> &'static [&'static str] {
        self.profile().genres
    }

    pub fn playlist_queries(&self) -> &'static [&'static str] {
        self.profile().playlist_queries
    }

    pub fn search_query(&self) -> &'static str {
        self.profile().search_query
    }
}

impl From<&str> for Mood {
    fn from(tag: &str) -> Self {
        Mood::from_tag(tag)
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive range on one audio feature. An unset side does not constrain.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Band {
    pub min: Option<f32>,
    pub max: Option<f32>,
}

impl Band {
    pub const ANY: Band = Band {
        min: None,
        max: None,
    };

    pub const fn at_least(min: f32) -> Band {
        Band {
            min: Some(min),
            max: None,
        }
    }

    pub const fn at_most(max: f32) -> Band {
        Band {
            min: None,
            max: Some(max),
        }
    }

    pub const fn between(min: f32, max: f32) -> Band {
        Band {
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn contains(&self, value: f32) -> bool {
        self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
    }

    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.min, self.max) {
            (Some(min), Some(max)) => write!(f, "{}-{}", min, max),
            (Some(min), None) => write!(f, ">={}", min),
            (None, Some(max)) => write!(f, "<={}", max),
            (None, None) => f.write_str("any"),
        }
    }
}

/// Audio-feature bands a track must satisfy to match a mood.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub energy: Band,
    pub danceability: Band,
    pub valence: Band,
    pub tempo: Band,
    pub acousticness: Band,
    pub instrumentalness: Band,
}

impl Thresholds {
    pub const NONE: Thresholds = Thresholds {
        energy: Band::ANY,
        danceability: Band::ANY,
        valence: Band::ANY,
        tempo: Band::ANY,
        acousticness: Band::ANY,
        instrumentalness: Band::ANY,
    };

    pub fn matches(&self, features: &AudioFeatures) -> bool {
        self.energy.contains(features.energy)
            && self.danceability.contains(features.danceability)
            && self.valence.contains(features.valence)
            && self.tempo.contains(features.tempo)
            && self.acousticness.contains(features.acousticness)
            && self.instrumentalness.contains(features.instrumentalness)
    }

    /// Short human readable summary of the bounded features.
    pub fn summary(&self) -> String {
        let parts: Vec<String> = [
            ("energy", self.energy),
            ("danceability", self.danceability),
            ("valence", self.valence),
            ("tempo", self.tempo),
            ("acousticness", self.acousticness),
            ("instrumentalness", self.instrumentalness),
        ]
        .iter()
        .filter(|(_, band)| !band.is_unbounded())
        .map(|(name, band)| format!("{} {}", name, band))
        .collect();

        if parts.is_empty() {
            "no constraints".to_string()
        } else {
            parts.join(", ")
        }
    }
}

/// Everything the pipeline needs to know about a mood.
#[derive(Debug)]
pub struct MoodProfile {
    pub mood: Mood,
    pub thresholds: Thresholds,
    /// Lowercase keywords matched against artist genres.
    pub genres: &'static [&'static str],
    /// Ranked playlist search queries.
    pub playlist_queries: &'static [&'static str],
    /// Track search used when nothing else produced candidates.
    pub search_query: &'static str,
    pub seed_genres: &'static [&'static str],
    pub attributes: TrackAttributes,
}

static ENERGETIC: MoodProfile = MoodProfile {
    mood: Mood::Energetic,
    thresholds: Thresholds {
        energy: Band::at_least(0.7),
        danceability: Band::at_least(0.6),
        valence: Band::at_least(0.5),
        tempo: Band::between(120.0, 300.0),
        acousticness: Band::at_most(0.4),
        instrumentalness: Band::at_most(0.3),
    },
    genres: &[
        "dance", "edm", "electro", "house", "techno", "trance", "dubstep", "pop", "power-pop",
        "dance-pop", "party", "club", "disco", "funk", "happy", "upbeat", "workout", "gym",
    ],
    playlist_queries: &[
        "workout energy",
        "party upbeat",
        "dance energy",
        "gym motivation",
        "high energy",
    ],
    search_query: "pop dance",
    seed_genres: &["pop", "dance", "edm", "party", "house"],
    attributes: TrackAttributes {
        min_energy: Some(0.7),
        min_danceability: Some(0.6),
        target_valence: Some(0.8),
        ..TrackAttributes::NONE
    },
};

static RELAXED: MoodProfile = MoodProfile {
    mood: Mood::Relaxed,
    thresholds: Thresholds {
        energy: Band::at_most(0.5),
        acousticness: Band::at_least(0.4),
        tempo: Band::at_most(110.0),
        ..Thresholds::NONE
    },
    genres: &[
        "chill", "acoustic", "ambient", "lofi", "sleep", "study", "jazz", "soul", "r-n-b", "folk",
        "indie-folk", "meditation", "calm", "piano", "classical", "soft-rock",
    ],
    playlist_queries: &[
        "chill relax",
        "calm acoustic",
        "sleep peaceful",
        "meditation calm",
        "lofi chill",
    ],
    search_query: "chill acoustic",
    seed_genres: &["chill", "acoustic", "ambient", "jazz", "lofi"],
    attributes: TrackAttributes {
        max_energy: Some(0.5),
        min_valence: Some(0.3),
        target_acousticness: Some(0.8),
        ..TrackAttributes::NONE
    },
};

static INTENSE: MoodProfile = MoodProfile {
    mood: Mood::Intense,
    thresholds: Thresholds {
        energy: Band::at_least(0.8),
        valence: Band::at_most(0.5),
        tempo: Band::at_least(100.0),
        acousticness: Band::at_most(0.3),
        ..Thresholds::NONE
    },
    genres: &[
        "rock",
        "metal",
        "hard-rock",
        "heavy-metal",
        "punk",
        "hardcore",
        "alt-rock",
        "alternative",
        "grunge",
        "industrial",
        "emo",
        "post-hardcore",
        "thrash",
        "death-metal",
    ],
    playlist_queries: &[
        "intense rock",
        "metal hardcore",
        "workout intense",
        "running intense",
        "epic intense",
    ],
    search_query: "rock metal",
    seed_genres: &["rock", "metal", "punk", "hard-rock", "alt-rock"],
    attributes: TrackAttributes {
        min_energy: Some(0.8),
        max_valence: Some(0.4),
        target_loudness: Some(0.8),
        ..TrackAttributes::NONE
    },
};

static THOUGHTFUL: MoodProfile = MoodProfile {
    mood: Mood::Thoughtful,
    thresholds: Thresholds {
        energy: Band::at_most(0.6),
        acousticness: Band::at_least(0.3),
        instrumentalness: Band::at_least(0.2),
        tempo: Band::at_most(120.0),
        ..Thresholds::NONE
    },
    genres: &[
        "indie",
        "indie-pop",
        "indie-rock",
        "alternative",
        "folk",
        "singer-songwriter",
        "ambient",
        "post-rock",
        "experimental",
        "classical",
        "instrumental",
        "soundtrack",
        "piano",
        "sad",
    ],
    playlist_queries: &[
        "thoughtful indie",
        "ambient calm",
        "focus concentration",
        "study peaceful",
        "introspective mood",
    ],
    search_query: "indie ambient",
    seed_genres: &["indie", "folk", "classical", "singer-songwriter", "ambient"],
    attributes: TrackAttributes {
        max_energy: Some(0.6),
        target_instrumentalness: Some(0.5),
        target_valence: Some(0.5),
        ..TrackAttributes::NONE
    },
};

static NEUTRAL: MoodProfile = MoodProfile {
    mood: Mood::Neutral,
    thresholds: Thresholds::NONE,
    genres: &["pop", "rock", "indie", "alternative"],
    playlist_queries: &["mood neutral"],
    search_query: "pop",
    seed_genres: &["pop", "indie", "alternative", "rock", "electronic"],
    attributes: TrackAttributes {
        target_energy: Some(0.6),
        target_danceability: Some(0.6),
        ..TrackAttributes::NONE
    },
};

impl MoodProfile {
    /// True if any genre equals or contains one of this mood's keywords.
    pub fn matches_genre<'a>(&self, artist_genres: impl IntoIterator<Item = &'a String>) -> bool {
        artist_genres.into_iter().any(|genre| {
            let genre = genre.to_lowercase();
            self.genres
                .iter()
                .any(|keyword| genre == *keyword || genre.contains(keyword))
        })
    }
}
