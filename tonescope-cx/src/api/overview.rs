//! Project overview: dataset totals and cluster distribution

use axum::{extract::State, Json};
use serde::Serialize;
use tonescope_common::AudioFeature;

use crate::AppState;

/// One bar of the cluster distribution series
#[derive(Debug, Serialize)]
pub struct ClusterCount {
    pub cluster: u32,
    pub count: usize,
    /// Share of the whole table, 0-100
    pub percent: f64,
}

/// Overview response: summary metrics plus the chart-ready count series
#[derive(Debug, Serialize)]
pub struct OverviewResponse {
    pub total_songs: usize,
    pub num_clusters: usize,
    pub audio_features: usize,
    /// Per-cluster counts and percentages, sorted by cluster id ascending
    pub cluster_counts: Vec<ClusterCount>,
}

/// GET /api/overview
///
/// Summary metrics and the per-cluster distribution series. An empty
/// dataset renders zero-state metrics rather than dividing by zero.
pub async fn get_overview(State(state): State<AppState>) -> Json<OverviewResponse> {
    let dataset = &state.dataset;
    let total = dataset.len();

    let cluster_counts = dataset
        .cluster_ids()
        .iter()
        .map(|&cluster| {
            let count = dataset.cluster_size(cluster);
            let percent = if total > 0 {
                count as f64 / total as f64 * 100.0
            } else {
                0.0
            };
            ClusterCount {
                cluster,
                count,
                percent,
            }
        })
        .collect();

    Json(OverviewResponse {
        total_songs: total,
        num_clusters: dataset.cluster_ids().len(),
        audio_features: AudioFeature::ALL.len(),
        cluster_counts,
    })
}
