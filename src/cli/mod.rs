//! # CLI Module
//!
//! The command-line layer of moodplay. Each command handles user
//! interaction, progress feedback and error presentation, and delegates the
//! actual work to the library modules.
//!
//! ## Commands
//!
//! - [`auth`] - Runs the Spotify OAuth 2.0 PKCE flow and stores the token
//! - [`playlist`] - Builds a mood playlist from liked songs, with the mood
//!   taken from the weather in a city or chosen directly
//! - [`moods`] - Lists the moods and how each one is matched
//!
//! ## Architecture
//!
//! ```text
//! CLI Layer (User Interface)
//!     ↓
//! Session / Mood resolution (management, weather)
//!     ↓
//! Recommendation pipeline (recommend)
//!     ↓
//! Spotify client (spotify)
//! ```
//!
//! ## Error Handling
//!
//! Failures that end a command (no session, no liked songs, nothing matched
//! the mood, the playlist could not be written) are printed with `error!`,
//! which exits with code 1. Everything else is a `warning!` and the command
//! carries on: a failed weather lookup falls back to the neutral mood and a
//! degraded pipeline stage simply contributes nothing.
//!
//! ## Usage
//!
//! ```bash
//! moodplay auth                          # Authenticate with Spotify
//! moodplay playlist --city Berlin        # Mood from the current weather
//! moodplay playlist --mood relaxed       # Mood chosen directly
//! moodplay playlist --mood intense --dry-run
//! moodplay moods                         # Show the mood table
//! ```

mod auth;
mod moods;
mod playlist;

pub use auth::auth;
pub use moods::moods;
pub use playlist::playlist;
