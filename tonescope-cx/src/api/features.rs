//! Feature analysis: per-cluster distributions and feature correlations

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use tonescope_common::stats::{self, FiveNumberSummary};
use tonescope_common::AudioFeature;

use crate::AppState;

/// Feature list response for the feature selector
#[derive(Debug, Serialize)]
pub struct FeatureListResponse {
    pub features: Vec<&'static str>,
}

/// GET /api/features
///
/// The fixed set of analyzable feature names.
pub async fn list_features() -> Json<FeatureListResponse> {
    Json(FeatureListResponse {
        features: AudioFeature::ALL.iter().map(|f| f.name()).collect(),
    })
}

/// Boxplot-style distribution of one feature within one cluster.
/// `summary` is `None` for an empty group.
#[derive(Debug, Serialize)]
pub struct ClusterDistribution {
    pub cluster: u32,
    pub summary: Option<FiveNumberSummary>,
}

/// Correlation matrix over the fixed feature subset.
/// Entries are `None` where a feature has zero variance.
#[derive(Debug, Serialize)]
pub struct CorrelationMatrix {
    pub features: Vec<&'static str>,
    pub matrix: Vec<Vec<Option<f64>>>,
}

/// Feature analysis response
#[derive(Debug, Serialize)]
pub struct FeatureAnalysisResponse {
    pub feature: &'static str,
    /// Distribution summaries grouped by cluster id, ascending
    pub distributions: Vec<ClusterDistribution>,
    pub correlation: CorrelationMatrix,
}

/// GET /api/features/:name
///
/// Five-number summaries (with outliers) of the chosen feature per cluster,
/// plus the Pearson correlation matrix over the fixed feature subset across
/// the whole table.
pub async fn get_feature_analysis(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<FeatureAnalysisResponse>, FeatureError> {
    let feature =
        AudioFeature::from_name(&name).ok_or_else(|| FeatureError::UnknownFeature(name.clone()))?;

    let dataset = &state.dataset;

    let distributions = dataset
        .cluster_ids()
        .iter()
        .map(|&cluster| {
            let values: Vec<f64> = dataset
                .rows_in_cluster(cluster)
                .map(|s| feature.of(s))
                .collect();
            ClusterDistribution {
                cluster,
                summary: FiveNumberSummary::from_values(&values),
            }
        })
        .collect();

    let columns: Vec<Vec<f64>> = AudioFeature::CORRELATION
        .iter()
        .map(|f| dataset.feature_column(*f))
        .collect();
    let correlation = CorrelationMatrix {
        features: AudioFeature::CORRELATION.iter().map(|f| f.name()).collect(),
        matrix: stats::correlation_matrix(&columns),
    };

    Ok(Json(FeatureAnalysisResponse {
        feature: feature.name(),
        distributions,
        correlation,
    }))
}

/// Feature analysis errors
#[derive(Debug)]
pub enum FeatureError {
    UnknownFeature(String),
}

impl IntoResponse for FeatureError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            FeatureError::UnknownFeature(name) => {
                (StatusCode::BAD_REQUEST, format!("Unknown feature: {}", name))
            }
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
