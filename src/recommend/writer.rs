use crate::{
    error::PipelineError,
    info,
    spotify::{ADD_TRACKS_BATCH_LIMIT, SpotifyApi},
    types::{CreatePlaylistRequest, Playlist, Track},
};

/// Name and description of the playlist to create.
#[derive(Debug, Clone)]
pub struct PlaylistDetails {
    pub name: String,
    pub description: String,
}

/// Creates a private playlist for the current user and adds `tracks` to it.
///
/// A failure while adding tracks leaves the created playlist behind, empty;
/// its id is carried in [`PipelineError::AddTracksFailed`].
pub async fn create_and_fill<C: SpotifyApi + ?Sized>(
    client: &C,
    tracks: &[Track],
    details: &PlaylistDetails,
) -> Result<Playlist, PipelineError> {
    if tracks.is_empty() {
        return Err(PipelineError::NoTracksProvided);
    }

    let user = client
        .current_user()
        .await
        .map_err(PipelineError::UserLookupFailed)?;

    let request = CreatePlaylistRequest {
        name: details.name.clone(),
        description: details.description.clone(),
        public: false,
        collaborative: false,
    };
    let mut playlist = client
        .create_playlist(&user.id, &request)
        .await
        .map_err(PipelineError::PlaylistCreateFailed)?;
    info!("Created playlist '{}'", playlist.name);

    let uris: Vec<String> = tracks.iter().map(Track::uri).collect();
    for chunk in uris.chunks(ADD_TRACKS_BATCH_LIMIT) {
        client
            .add_tracks(&playlist.id, chunk)
            .await
            .map_err(|source| PipelineError::AddTracksFailed {
                playlist_id: playlist.id.clone(),
                source,
            })?;
    }

    playlist.track_ids = tracks.iter().map(|t| t.id.clone()).collect();
    Ok(playlist)
}
