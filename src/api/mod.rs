//! # API Module
//!
//! HTTP endpoints served by the local callback server while `moodplay auth`
//! waits for the browser handshake.
//!
//! - [`callback`] - receives the authorization code from Spotify, checks the
//!   `state` parameter and exchanges the code for a token using the PKCE
//!   verifier held in shared state.
//! - [`health`] - returns status and version information.
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use moodplay::api::{callback, health};
//!
//! let app = Router::new()
//!     .route("/callback", get(callback))
//!     .route("/health", get(health));
//! ```

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
