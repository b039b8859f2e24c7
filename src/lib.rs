//! Weather Mood Playlist CLI Library
//!
//! This library builds Spotify playlists out of a user's liked songs, tuned to
//! a mood that is either chosen directly or derived from the current weather
//! in a city. It includes the OAuth PKCE flow, a typed Spotify client, the
//! staged recommendation pipeline and the playlist writer.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the local callback server
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - Typed errors for the client, weather lookup and pipeline
//! - `management` - Token cache and the authenticated session
//! - `mood` - Moods and their matching profiles
//! - `recommend` - The recommendation pipeline and the playlist writer
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - PKCE helpers and playlist naming
//! - `weather` - Current weather lookup and weather to mood mapping
//!
//! # Example
//!
//! ```
//! use moodplay::{management::Session, mood::Mood, recommend};
//!
//! #[tokio::main]
//! async fn main() -> moodplay::Res<()> {
//!     moodplay::config::load_env().await?;
//!     let session = Session::open().await?;
//!     let tracks = recommend::assemble(Mood::Relaxed, session.client()).await?;
//!     println!("{} tracks", tracks.len());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod mood;
pub mod recommend;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;
pub mod weather;

/// A convenient Result type alias for operations that may fail.
///
/// Used by the CLI glue and the OAuth flow, where failures are only ever
/// printed. Library code below that returns the typed errors in [`error`].
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Fetching your liked songs...");
/// info!("Found {} liked songs", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Exits with code 1 right after printing, so it is only used by the CLI
/// layer for failures that end a command.
///
/// # Example
///
/// ```
/// error!("Failed to create playlist: {}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues, such as a pipeline stage that degraded or a
/// weather lookup that fell back to the neutral mood.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
