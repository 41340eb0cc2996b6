//! Song recommender: same-cluster neighbors and audio profile comparison

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tonescope_common::{stats, AudioFeature, Song};

use crate::AppState;

/// Similar songs shown per request
const DISPLAY_ROWS: usize = 10;

/// Query parameters identifying the chosen song
#[derive(Debug, Deserialize)]
pub struct RecommendQuery {
    /// Song title
    pub song: String,
    /// Artist name(s), exactly as in the table
    pub artist: String,
}

/// The chosen song's display info
#[derive(Debug, Serialize)]
pub struct SelectedSong {
    pub name_song: String,
    pub name_artists: String,
    pub cluster: u32,
    pub interpretation: Option<String>,
}

/// One recommended song
#[derive(Debug, Serialize)]
pub struct SimilarSong {
    pub name_song: String,
    pub name_artists: String,
    pub genres: String,
}

/// Per-feature comparison of the chosen song against the cluster average.
/// The average is `None` when the cluster has no other songs.
#[derive(Debug, Serialize)]
pub struct ProfileComparison {
    pub feature: &'static str,
    pub song_value: f64,
    pub cluster_mean: Option<f64>,
}

/// Recommender response
#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub selected: SelectedSong,
    /// Size of the full similar set; `similar` is truncated for display
    pub total_similar: usize,
    pub similar: Vec<SimilarSong>,
    pub profile: Vec<ProfileComparison>,
}

/// GET /api/recommend?song=TITLE&artist=NAME
///
/// Looks up the chosen song (first match in table order when duplicated)
/// and returns other songs from its cluster plus a feature-by-feature
/// comparison against the cluster average.
pub async fn get_recommendations(
    State(state): State<AppState>,
    Query(query): Query<RecommendQuery>,
) -> Result<Json<RecommendResponse>, RecommendError> {
    let dataset = &state.dataset;

    let selected = dataset
        .find_song(&query.song, &query.artist)
        .ok_or_else(|| RecommendError::SongNotFound(format!("{} - {}", query.song, query.artist)))?;

    // Neighbors share the cluster. The chosen title is excluded by song name
    // alone, so a same-titled song by another artist in the same cluster is
    // excluded as well.
    let similar: Vec<&Song> = dataset
        .rows_in_cluster(selected.cluster)
        .filter(|s| s.name != selected.name)
        .collect();

    let display = similar
        .iter()
        .take(DISPLAY_ROWS)
        .map(|s| SimilarSong {
            name_song: s.name.clone(),
            name_artists: s.artists.clone(),
            genres: s.genres.clone(),
        })
        .collect();

    let profile = AudioFeature::PROFILE
        .iter()
        .map(|f| {
            let values: Vec<f64> = similar.iter().map(|&s| f.of(s)).collect();
            ProfileComparison {
                feature: f.name(),
                song_value: f.of(selected),
                cluster_mean: stats::mean(&values),
            }
        })
        .collect();

    Ok(Json(RecommendResponse {
        selected: SelectedSong {
            name_song: selected.name.clone(),
            name_artists: selected.artists.clone(),
            cluster: selected.cluster,
            interpretation: selected.cluster_interpretation.clone(),
        },
        total_similar: similar.len(),
        similar: display,
        profile,
    }))
}

/// Recommender errors
#[derive(Debug)]
pub enum RecommendError {
    SongNotFound(String),
}

impl IntoResponse for RecommendError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            RecommendError::SongNotFound(id) => {
                (StatusCode::NOT_FOUND, format!("Song not found: {}", id))
            }
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
