use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    error, info,
    management::Session,
    mood::Mood,
    recommend::{self, Assembler, Assembly, StageOutcome},
    success,
    types::{Track, TrackTableRow},
    utils::{self, MoodSource},
    warning, weather,
};

/// Builds a mood playlist from the user's liked songs.
///
/// The mood comes from the weather in `city` or from the `mood` tag; exactly
/// one of them is expected. With `dry_run` the selection is only printed.
pub async fn playlist(city: Option<String>, mood: Option<String>, dry_run: bool) {
    let session = match Session::open().await {
        Ok(session) => session,
        Err(e) => error!("{}\nPlease run moodplay auth.", e),
    };
    info!("Logged in as {}", session.user().name());

    let (mood, source) = match (city, mood) {
        (Some(city), _) => (mood_for_city(&city).await, MoodSource::Weather),
        (None, Some(tag)) => (mood_for_tag(&tag), MoodSource::Chosen),
        (None, None) => error!("Either --city or --mood is required."),
    };

    let assembly = match Assembler::new(session.client(), mood).run().await {
        Ok(assembly) => assembly,
        Err(e) => error!("Cannot build a {} playlist: {}", mood, e),
    };

    print_stage_summary(&assembly);
    print_tracks(&assembly.tracks);

    if dry_run {
        info!("Dry run, no playlist was created.");
        return;
    }

    let details = utils::playlist_details(mood, source);
    let pb = spinner(format!("Creating playlist '{}'...", details.name));
    let result = recommend::create_and_fill(session.client(), &assembly.tracks, &details).await;
    pb.finish_and_clear();

    match result {
        Ok(playlist) => success!(
            "Created '{}' with {} tracks: https://open.spotify.com/playlist/{}",
            playlist.name,
            playlist.track_ids.len(),
            playlist.id
        ),
        Err(e) => error!("{}", e),
    }
}

async fn mood_for_city(city: &str) -> Mood {
    let pb = spinner(format!("Checking the weather in {}...", city));
    let result = weather::current_weather(city).await;
    pb.finish_and_clear();

    match result {
        Ok(current) => {
            info!(
                "Weather in {}: {:.1}°C, {}",
                city,
                current.main.temp,
                current.description().unwrap_or("unknown")
            );
            let mood = weather::mood_for_weather(&current);
            info!("Mood for this weather: {}", mood);
            mood
        }
        Err(e) => {
            warning!(
                "Could not get the weather for {}: {}. Using the neutral mood.",
                city,
                e
            );
            Mood::Neutral
        }
    }
}

fn mood_for_tag(tag: &str) -> Mood {
    match Mood::parse(tag) {
        Some(mood) => mood,
        None => {
            warning!("Unknown mood '{}', using the neutral mood.", tag);
            Mood::Neutral
        }
    }
}

fn print_stage_summary(assembly: &Assembly) {
    info!(
        "Considered {} liked songs{}",
        assembly.library_size,
        if assembly.library_truncated {
            " (library truncated)"
        } else {
            ""
        }
    );

    for report in &assembly.stages {
        match &report.outcome {
            StageOutcome::Contributed(n) => info!("  {}: {} tracks", report.stage, n),
            StageOutcome::Degraded(reason) => warning!("  {}: skipped, {}", report.stage, reason),
            StageOutcome::Skipped => {}
        }
    }
}

fn print_tracks(tracks: &[Track]) {
    let rows: Vec<TrackTableRow> = tracks
        .iter()
        .enumerate()
        .map(|(i, t)| TrackTableRow {
            position: i + 1,
            name: t.name.clone(),
            artists: t.artist_names(),
            album: t.album.name.clone(),
        })
        .collect();

    let table = Table::new(rows);
    println!("{}", table);
}

fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
