use tabled::Table;

use crate::{mood::Mood, types::MoodTableRow};

/// Prints every mood with the bands, genres and queries used to match it.
pub fn moods() {
    let rows: Vec<MoodTableRow> = Mood::ALL
        .iter()
        .map(|mood| {
            let profile = mood.profile();
            MoodTableRow {
                mood: mood.as_str().to_string(),
                thresholds: profile.thresholds.summary(),
                genres: profile.genres.join(", "),
                queries: profile.playlist_queries.join(", "),
            }
        })
        .collect();

    let table = Table::new(rows);
    println!("{}", table);
}
