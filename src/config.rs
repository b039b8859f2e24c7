//! Configuration management for moodplay.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. It provides a centralized way to manage application
//! configuration including Spotify API credentials, server settings and the
//! weather API key.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use std::{env, path::PathBuf};

use crate::error::ConfigError;

const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8081";
const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:8081/callback";
const DEFAULT_SCOPE: &str = "user-read-private user-read-email playlist-modify-private playlist-modify-public user-top-read user-library-read";
const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const DEFAULT_WEATHER_API_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Loads environment variables from a `.env` file in the local data directory.
///
/// The file lives under the platform-specific local data directory:
/// - Linux: `~/.local/share/moodplay/.env`
/// - macOS: `~/Library/Application Support/moodplay/.env`
/// - Windows: `%LOCALAPPDATA%/moodplay/.env`
///
/// Variables already present in the process environment are not overridden.
///
/// # Errors
///
/// Returns an error string if the directory cannot be created or the `.env`
/// file is missing or cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    dotenv::from_path(&path).map_err(|e| format!("{}: {}", path.display(), e))?;
    Ok(())
}

/// Platform-specific directory holding the `.env` file and caches.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("moodplay");
    path
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(name)),
    }
}

fn with_default(name: &'static str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Address the local OAuth callback server binds to (`SERVER_ADDRESS`).
pub fn server_addr() -> String {
    with_default("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS)
}

/// Client ID of the registered Spotify application (`SPOTIFY_API_AUTH_CLIENT_ID`).
pub fn spotify_client_id() -> Result<String, ConfigError> {
    required("SPOTIFY_API_AUTH_CLIENT_ID")
}

/// OAuth redirect URI; must match the one registered with Spotify.
pub fn spotify_redirect_uri() -> String {
    with_default("SPOTIFY_API_REDIRECT_URI", DEFAULT_REDIRECT_URI)
}

/// Space separated OAuth scopes.
///
/// The defaults cover reading the library and top items and writing
/// private playlists, which is everything a playlist run needs.
pub fn spotify_scope() -> String {
    with_default("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SCOPE)
}

pub fn spotify_apiauth_url() -> String {
    with_default("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL)
}

pub fn spotify_apiurl() -> String {
    with_default("SPOTIFY_API_URL", DEFAULT_API_URL)
}

pub fn spotify_apitoken_url() -> String {
    with_default("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL)
}

/// OpenWeatherMap API key (`WEATHER_API_KEY`). Only needed in weather mode.
pub fn weather_api_key() -> Result<String, ConfigError> {
    required("WEATHER_API_KEY")
}

pub fn weather_api_url() -> String {
    with_default("WEATHER_API_URL", DEFAULT_WEATHER_API_URL)
}
