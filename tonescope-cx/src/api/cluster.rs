//! Cluster explorer: one cluster's profile against the whole table

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use tonescope_common::{stats, AudioFeature};

use crate::AppState;

/// Sample rows shown per cluster
const SAMPLE_ROWS: usize = 10;

/// Per-feature comparison of cluster mean against the overall mean.
/// Means are `None` when the backing group is empty.
#[derive(Debug, Serialize)]
pub struct FeatureComparison {
    pub feature: &'static str,
    pub cluster_mean: Option<f64>,
    pub overall_mean: Option<f64>,
}

/// Sample row for display
#[derive(Debug, Serialize)]
pub struct SampleSong {
    pub name_song: String,
    pub name_artists: String,
    pub genres: String,
}

/// Cluster explorer response
#[derive(Debug, Serialize)]
pub struct ClusterResponse {
    pub cluster: u32,
    pub size: usize,
    /// Share of the whole table, 0-100
    pub percent: f64,
    /// Short label: first `|`-separated token of the interpretation
    pub label: Option<String>,
    pub interpretation: Option<String>,
    pub features: Vec<FeatureComparison>,
    /// First rows of the cluster in table order (display truncation)
    pub sample_songs: Vec<SampleSong>,
}

/// GET /api/cluster/:id
///
/// Profiles one cluster: size, share, interpretation label, feature means
/// against the overall average, and sample songs.
pub async fn get_cluster(
    State(state): State<AppState>,
    Path(cluster): Path<u32>,
) -> Result<Json<ClusterResponse>, ClusterError> {
    let dataset = &state.dataset;

    if !dataset.has_cluster(cluster) {
        return Err(ClusterError::UnknownCluster(cluster));
    }

    let size = dataset.cluster_size(cluster);
    let percent = if dataset.len() > 0 {
        size as f64 / dataset.len() as f64 * 100.0
    } else {
        0.0
    };

    let features = AudioFeature::COMPARISON
        .iter()
        .map(|f| {
            let subset: Vec<f64> = dataset.rows_in_cluster(cluster).map(|s| f.of(s)).collect();
            FeatureComparison {
                feature: f.name(),
                cluster_mean: stats::mean(&subset),
                overall_mean: stats::mean(&dataset.feature_column(*f)),
            }
        })
        .collect();

    let sample_songs = dataset
        .rows_in_cluster(cluster)
        .take(SAMPLE_ROWS)
        .map(|s| SampleSong {
            name_song: s.name.clone(),
            name_artists: s.artists.clone(),
            genres: s.genres.clone(),
        })
        .collect();

    Ok(Json(ClusterResponse {
        cluster,
        size,
        percent,
        label: dataset.cluster_label(cluster).map(str::to_string),
        interpretation: dataset.cluster_interpretation(cluster).map(str::to_string),
        features,
        sample_songs,
    }))
}

/// Cluster explorer errors
#[derive(Debug)]
pub enum ClusterError {
    UnknownCluster(u32),
}

impl IntoResponse for ClusterError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ClusterError::UnknownCluster(id) => {
                (StatusCode::NOT_FOUND, format!("Unknown cluster: {}", id))
            }
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
