use moodplay::{
    mood::{Band, Mood},
    types::{ArtistId, ArtistRef, AudioFeatures, Track, TrackId},
    weather,
};

fn features(energy: f32, danceability: f32, valence: f32, tempo: f32) -> AudioFeatures {
    AudioFeatures {
        energy,
        danceability,
        valence,
        tempo,
        acousticness: 0.2,
        instrumentalness: 0.1,
    }
}

#[test]
fn test_lookups_are_stable() {
    for mood in Mood::ALL {
        assert_eq!(mood.thresholds(), mood.thresholds());
        assert_eq!(mood.genres(), Mood::from_tag(mood.as_str()).genres());
        assert_eq!(Mood::parse(mood.as_str()), Some(mood));
        assert_eq!(mood.playlist_queries(), mood.profile().playlist_queries);
        assert!(!mood.search_query().is_empty());
    }
}

#[test]
fn test_unknown_tags_fall_back_to_neutral() {
    assert_eq!(Mood::parse("whimsical"), None);
    assert_eq!(Mood::from_tag("whimsical"), Mood::Neutral);
    assert_eq!(Mood::from_tag(" RELAXED "), Mood::Relaxed);

    let neutral = Mood::Neutral.profile();
    assert_eq!(Mood::from("whimsical").genres(), neutral.genres);
    assert!(neutral.thresholds.matches(&features(0.0, 0.0, 0.0, 0.0)));
}

#[test]
fn test_energetic_bands() {
    let thresholds = Mood::Energetic.thresholds();

    assert!(thresholds.matches(&features(0.7, 0.6, 0.5, 120.0)));
    assert!(!thresholds.matches(&features(0.69, 0.9, 0.9, 130.0)));
    assert!(!thresholds.matches(&features(0.9, 0.9, 0.9, 119.0)));
    assert!(!thresholds.matches(&features(0.9, 0.9, 0.9, 301.0)));
}

#[test]
fn test_intense_caps_valence() {
    let thresholds = Mood::Intense.thresholds();

    assert!(thresholds.matches(&features(0.85, 0.1, 0.5, 140.0)));
    assert!(!thresholds.matches(&features(0.85, 0.1, 0.51, 140.0)));
}

#[test]
fn test_relaxed_leaves_unlisted_features_open() {
    let relaxed = Mood::Relaxed.thresholds();

    assert_eq!(relaxed.danceability, Band::ANY);
    assert_eq!(relaxed.valence, Band::ANY);
    assert_eq!(relaxed.instrumentalness, Band::ANY);
}

#[test]
fn test_genre_matching_is_case_insensitive_substring() {
    let relaxed = Mood::Relaxed.profile();

    assert!(relaxed.matches_genre(&vec!["Acoustic Pop".to_string()]));
    assert!(relaxed.matches_genre(&vec!["jazz".to_string()]));
    assert!(!relaxed.matches_genre(&vec!["thrash metal".to_string()]));
    assert!(!relaxed.matches_genre(&Vec::<String>::new()));
}

#[test]
fn test_weather_descriptions_map_to_moods() {
    assert_eq!(weather::mood_for_description("clear sky"), Mood::Energetic);
    assert_eq!(weather::mood_for_description("thunderstorm"), Mood::Intense);
    assert_eq!(weather::mood_for_description("light rain"), Mood::Relaxed);
    assert_eq!(weather::mood_for_description("overcast clouds"), Mood::Thoughtful);
    assert_eq!(weather::mood_for_description("mist"), Mood::Neutral);
}

#[test]
fn test_track_uri_and_credits() {
    let track = Track {
        id: TrackId::new("4uLU6hMCjMI75M1A2tKUQC"),
        name: "Song".into(),
        artists: vec![
            ArtistRef {
                id: ArtistId::new("a1"),
                name: "First".into(),
            },
            ArtistRef {
                id: ArtistId::new("a2"),
                name: "Second".into(),
            },
        ],
        album: Default::default(),
    };

    assert_eq!(track.uri(), "spotify:track:4uLU6hMCjMI75M1A2tKUQC");
    assert_eq!(track.artist_names(), "First, Second");
}
