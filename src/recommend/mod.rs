//! # Recommendation Module
//!
//! Turns "this user" and "this mood" into an ordered list of at most 50
//! liked tracks, ready to be written into a playlist.
//!
//! ## Pipeline
//!
//! ```text
//! LikedLibrary::build       (fatal on failure)
//!        ↓
//! 1. audio-feature match    ┐
//! 2. genre match            │ each stage runs only while the pool is
//! 3. playlist mining        │ below the target floor; a failing stage
//! 4. catalog seeding        │ degrades and contributes nothing
//! 5. plain search fallback  ┘ (only when the pool is still empty)
//!        ↓
//! liked re-filter → per-artist cap → shuffle → truncate
//! ```
//!
//! Every candidate goes through [`CandidatePool`], which refuses tracks the
//! user has not liked and tracks already pooled. The library fetch and the
//! playlist write are the only network failures that end a run.

use std::{
    fmt,
    time::{Duration, Instant},
};

use tokio::time::timeout;

use crate::{
    error::{PipelineError, StageDegraded},
    info,
    mood::Mood,
    spotify::SpotifyApi,
    success,
    types::Track,
    warning,
};

mod diversity;
mod library;
mod pool;
pub mod stages;
mod writer;

pub use diversity::{artist_distribution, cap_per_artist, retain_liked, shuffle, shuffle_with_seed};
pub use library::{LIBRARY_TRACK_CAP, LikedLibrary};
pub use pool::CandidatePool;
pub use writer::{PlaylistDetails, create_and_fill};

/// The candidate sources, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    AudioFeatures,
    Genres,
    Playlists,
    Recommendations,
    Search,
}

impl Stage {
    pub const ALL: [Stage; 5] = [
        Stage::AudioFeatures,
        Stage::Genres,
        Stage::Playlists,
        Stage::Recommendations,
        Stage::Search,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::AudioFeatures => "audio-feature match",
            Stage::Genres => "genre match",
            Stage::Playlists => "playlist mining",
            Stage::Recommendations => "catalog recommendations",
            Stage::Search => "search fallback",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StageOutcome {
    /// Number of new tracks admitted into the pool.
    Contributed(usize),
    Degraded(String),
    /// Not run because the pool was already large enough.
    Skipped,
}

#[derive(Debug, Clone)]
pub struct StageReport {
    pub stage: Stage,
    pub outcome: StageOutcome,
}

/// Pipeline tunables.
#[derive(Debug, Clone)]
pub struct AssemblerConfig {
    /// Stop trying further stages once the pool holds this many tracks.
    pub target_floor: usize,
    /// Genre matching and playlist mining stop collecting at this pool size.
    pub pool_ceiling: usize,
    pub max_per_artist: usize,
    pub playlist_size: usize,
    /// Most playlist tracks mined before filtering.
    pub mined_cap: usize,
    pub stage_timeout: Duration,
    /// Top artists and top tracks fetched for recommendation seeds.
    pub top_seed_limit: u32,
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self {
            target_floor: 50,
            pool_ceiling: 100,
            max_per_artist: 5,
            playlist_size: 50,
            mined_cap: 200,
            stage_timeout: Duration::from_secs(60),
            top_seed_limit: 5,
        }
    }
}

/// Result of a successful run.
#[derive(Debug, Clone)]
pub struct Assembly {
    pub mood: Mood,
    /// Shuffled, capped and never empty.
    pub tracks: Vec<Track>,
    pub stages: Vec<StageReport>,
    pub library_size: usize,
    pub library_truncated: bool,
}

impl Assembly {
    pub fn outcome(&self, stage: Stage) -> Option<&StageOutcome> {
        self.stages
            .iter()
            .find(|r| r.stage == stage)
            .map(|r| &r.outcome)
    }
}

/// Runs the staged fallback pipeline for one mood against one session.
pub struct Assembler<'a, C: SpotifyApi + ?Sized> {
    client: &'a C,
    mood: Mood,
    config: AssemblerConfig,
}

impl<'a, C: SpotifyApi + ?Sized> Assembler<'a, C> {
    pub fn new(client: &'a C, mood: Mood) -> Self {
        Self {
            client,
            mood,
            config: AssemblerConfig::default(),
        }
    }

    pub fn with_config(mut self, config: AssemblerConfig) -> Self {
        self.config = config;
        self
    }

    /// Builds the liked library, runs the stages and post-processes the pool.
    ///
    /// # Errors
    ///
    /// [`PipelineError::AuthFailure`], [`PipelineError::LibraryFetch`] and
    /// [`PipelineError::NoLikedSongs`] from the library fetch, or
    /// [`PipelineError::InsufficientCandidates`] when nothing matched.
    pub async fn run(&self) -> Result<Assembly, PipelineError> {
        let library = LikedLibrary::build(self.client).await?;

        let started = Instant::now();
        let liked = self.liked_details(&library).await;

        let mut pool = CandidatePool::new();
        let mut reports = Vec::with_capacity(Stage::ALL.len());

        for (n, stage) in Stage::ALL.into_iter().enumerate() {
            let skip = match stage {
                Stage::Search => !pool.is_empty(),
                _ => pool.len() >= self.config.target_floor,
            };
            if skip {
                reports.push(StageReport {
                    stage,
                    outcome: StageOutcome::Skipped,
                });
                continue;
            }

            info!("Stage {}: {}...", n + 1, stage);
            let result = match (&liked, stage) {
                (Err(reason), Stage::AudioFeatures | Stage::Genres) => Err(StageDegraded::new(
                    stage,
                    format!("liked track details unavailable: {}", reason),
                )),
                _ => {
                    // The liked-track fetch counts against stage 1's budget.
                    let budget = match stage {
                        Stage::AudioFeatures => {
                            self.config.stage_timeout.saturating_sub(started.elapsed())
                        }
                        _ => self.config.stage_timeout,
                    };
                    let liked = liked.as_ref().map(Vec::as_slice).unwrap_or(&[]);
                    timeout(budget, self.run_stage(stage, liked, &library, &pool))
                        .await
                        .unwrap_or_else(|_| {
                            Err(StageDegraded::new(
                                stage,
                                format!(
                                    "timed out after {}s",
                                    self.config.stage_timeout.as_secs()
                                ),
                            ))
                        })
                }
            };

            let outcome = match result {
                Ok(candidates) => {
                    let added = pool.extend(candidates, &library);
                    info!("{} added {} tracks, pool size {}", stage, added, pool.len());
                    StageOutcome::Contributed(added)
                }
                Err(degraded) => {
                    warning!("{}", degraded);
                    StageOutcome::Degraded(degraded.reason)
                }
            };
            reports.push(StageReport { stage, outcome });
        }

        let tracks = self.finish(pool, &library)?;
        success!(
            "Selected {} tracks for a {} mood",
            tracks.len(),
            self.mood
        );

        Ok(Assembly {
            mood: self.mood,
            tracks,
            stages: reports,
            library_size: library.len(),
            library_truncated: library.is_truncated(),
        })
    }

    /// Full records of the liked tracks, fetched within one stage timeout.
    async fn liked_details(&self, library: &LikedLibrary) -> Result<Vec<Track>, String> {
        info!("Fetching details of {} liked songs...", library.len());
        match timeout(
            self.config.stage_timeout,
            stages::hydrate_tracks(self.client, library.track_ids()),
        )
        .await
        {
            Ok(Ok(liked)) => Ok(liked),
            Ok(Err(e)) => {
                warning!("Could not fetch any liked song details: {}", e);
                Err(format!("every track lookup failed ({})", e))
            }
            Err(_) => {
                warning!("Timed out fetching liked song details");
                Err(format!(
                    "timed out after {}s",
                    self.config.stage_timeout.as_secs()
                ))
            }
        }
    }

    async fn run_stage(
        &self,
        stage: Stage,
        liked: &[Track],
        library: &LikedLibrary,
        pool: &CandidatePool,
    ) -> Result<Vec<Track>, StageDegraded> {
        let profile = self.mood.profile();
        let room = self.config.pool_ceiling.saturating_sub(pool.len());

        match stage {
            Stage::AudioFeatures => {
                stages::audio_feature_match(self.client, &profile.thresholds, liked).await
            }
            Stage::Genres => stages::genre_match(self.client, profile, liked, pool, room).await,
            Stage::Playlists => {
                stages::playlist_mining(
                    self.client,
                    profile,
                    library,
                    pool,
                    room,
                    self.config.mined_cap,
                )
                .await
            }
            Stage::Recommendations => {
                stages::catalog_recommendations(
                    self.client,
                    profile,
                    library,
                    self.config.top_seed_limit,
                )
                .await
            }
            Stage::Search => stages::search_fallback(self.client, profile, library).await,
        }
    }

    fn finish(&self, pool: CandidatePool, library: &LikedLibrary) -> Result<Vec<Track>, PipelineError> {
        let mut tracks = pool.into_tracks();
        retain_liked(&mut tracks, library);

        if !tracks.is_empty() {
            info!("Artist distribution among {} candidates:", tracks.len());
            for (name, count) in artist_distribution(&tracks, 5) {
                info!("  {}: {} tracks", name, count);
            }
        }

        let mut tracks = cap_per_artist(tracks, self.config.max_per_artist);
        shuffle(&mut tracks);
        tracks.truncate(self.config.playlist_size);

        if tracks.is_empty() {
            return Err(PipelineError::InsufficientCandidates);
        }
        Ok(tracks)
    }
}

/// Assembles the track list for `mood` with the default configuration.
pub async fn assemble<C: SpotifyApi + ?Sized>(
    mood: Mood,
    client: &C,
) -> Result<Vec<Track>, PipelineError> {
    Assembler::new(client, mood)
        .run()
        .await
        .map(|assembly| assembly.tracks)
}
