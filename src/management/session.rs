use crate::{
    error::PipelineError,
    management::TokenManager,
    spotify::{SpotifyApi, SpotifyClient},
    types::User,
};

/// An authenticated Spotify session for one playlist run.
///
/// Built once from the cached token and handed to the pipeline by
/// reference; nothing about the session is global.
pub struct Session {
    client: SpotifyClient,
    user: User,
}

impl Session {
    /// Loads the cached token, refreshes it if needed and verifies it by
    /// fetching the current user.
    pub async fn open() -> Result<Self, PipelineError> {
        let mut token_mgr = TokenManager::load().await.map_err(|e| {
            PipelineError::AuthFailure(format!("no saved token ({}), run moodplay auth", e))
        })?;

        let client = SpotifyClient::new(token_mgr.get_valid_token().await);
        let user = client
            .current_user()
            .await
            .map_err(|e| PipelineError::AuthFailure(e.to_string()))?;

        Ok(Self { client, user })
    }

    pub fn client(&self) -> &SpotifyClient {
        &self.client
    }

    pub fn user(&self) -> &User {
        &self.user
    }
}
