use chrono::{TimeZone, Utc};
use moodplay::mood::Mood;
use moodplay::utils::*;

#[test]
fn test_generate_code_verifier() {
    let verifier = generate_code_verifier();

    // Should be exactly 128 characters
    assert_eq!(verifier.len(), 128);

    // Should contain only alphanumeric characters
    assert!(verifier.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated verifiers should be different
    let verifier2 = generate_code_verifier();
    assert_ne!(verifier, verifier2);
}

#[test]
fn test_generate_code_challenge() {
    let verifier = "test_verifier_123";
    let challenge = generate_code_challenge(verifier);

    // Should be deterministic - same input produces same output
    assert_eq!(challenge, generate_code_challenge(verifier));
    assert_ne!(challenge, generate_code_challenge("different_verifier"));

    // Should be base64-encoded (URL-safe, no padding)
    assert!(
        challenge
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    );
}

#[test]
fn test_code_challenge_matches_rfc_7636_example() {
    let challenge = generate_code_challenge("dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk");
    assert_eq!(challenge, "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM");
}

#[test]
fn test_generate_state() {
    let state = generate_state();

    assert_eq!(state.len(), 32);
    assert!(state.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_ne!(state, generate_state());
}

#[test]
fn test_weather_playlist_name() {
    let at = Utc.with_ymd_and_hms(2026, 10, 16, 9, 5, 0).unwrap();
    let details = playlist_details_at(Mood::Relaxed, MoodSource::Weather, &at);

    assert_eq!(details.name, "Weather Mood Playlist - Oct 16 09:05");
    assert!(details.description.contains("relaxed"));
}

#[test]
fn test_chosen_mood_playlist_name() {
    let at = Utc.with_ymd_and_hms(2026, 3, 2, 21, 40, 0).unwrap();
    let details = playlist_details_at(Mood::Intense, MoodSource::Chosen, &at);

    assert_eq!(details.name, "Intense Mood Playlist - Mar 02 21:40");
    assert!(details.description.contains("intense"));
}
