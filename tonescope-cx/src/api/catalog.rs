//! Selector enumerations drawn from the loaded dataset
//!
//! The UI's choice lists are closed sets: cluster ids and song identities
//! come from the table itself, feature names from the fixed allowed set.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

/// One cluster choice for the cluster selector
#[derive(Debug, Serialize)]
pub struct ClusterChoice {
    pub cluster: u32,
    pub size: usize,
    pub label: Option<String>,
}

/// Cluster list response, sorted by cluster id ascending
#[derive(Debug, Serialize)]
pub struct ClusterListResponse {
    pub clusters: Vec<ClusterChoice>,
}

/// GET /api/clusters
///
/// Distinct cluster ids with their sizes and labels.
pub async fn list_clusters(State(state): State<AppState>) -> Json<ClusterListResponse> {
    let dataset = &state.dataset;

    let clusters = dataset
        .cluster_ids()
        .iter()
        .map(|&cluster| ClusterChoice {
            cluster,
            size: dataset.cluster_size(cluster),
            label: dataset.cluster_label(cluster).map(str::to_string),
        })
        .collect();

    Json(ClusterListResponse { clusters })
}

/// One song choice for the song selector
#[derive(Debug, Serialize)]
pub struct SongChoice {
    pub name_song: String,
    pub name_artists: String,
}

/// Song list response, deduplicated by (song, artist) in table order
#[derive(Debug, Serialize)]
pub struct SongListResponse {
    pub total: usize,
    pub songs: Vec<SongChoice>,
}

/// GET /api/songs
///
/// Distinct (song, artist) pairs for the recommender's song selector.
pub async fn list_songs(State(state): State<AppState>) -> Json<SongListResponse> {
    let choices = state.dataset.song_choices();

    let songs: Vec<SongChoice> = choices
        .iter()
        .map(|(name, artists)| SongChoice {
            name_song: name.to_string(),
            name_artists: artists.to_string(),
        })
        .collect();

    Json(SongListResponse {
        total: songs.len(),
        songs,
    })
}
