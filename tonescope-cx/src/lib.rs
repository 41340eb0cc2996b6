//! tonescope-cx library - Cluster Explorer dashboard
//!
//! Read-only analytical views over the clustered song table: overview,
//! per-cluster exploration, feature analysis, and a same-cluster song
//! recommender. The dataset is loaded once at startup; every handler is a
//! pure function of (dataset, selection).

use std::sync::Arc;

use axum::Router;
use tonescope_common::Dataset;
use tower_http::trace::TraceLayer;

pub mod api;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Loaded dataset, shared read-only for the process lifetime
    pub dataset: Arc<Dataset>,
}

impl AppState {
    /// Create new application state
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset: Arc::new(dataset),
        }
    }
}

/// Build application router
///
/// One route per dashboard view plus the selector enumerations the UI
/// draws its closed choice lists from. Unknown paths fall through to
/// axum's 404 handler.
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    // Analytical views and selector enumerations
    let views = Router::new()
        .route("/api/overview", get(api::get_overview))
        .route("/api/cluster/:id", get(api::get_cluster))
        .route("/api/features", get(api::list_features))
        .route("/api/features/:name", get(api::get_feature_analysis))
        .route("/api/recommend", get(api::get_recommendations))
        .route("/api/clusters", get(api::list_clusters))
        .route("/api/songs", get(api::list_songs))
        .route("/api/buildinfo", get(api::get_build_info));

    // Static UI and service endpoints
    let public = Router::new()
        .route("/", get(api::serve_index))
        .route("/static/app.js", get(api::serve_app_js))
        .merge(api::health_routes());

    Router::new()
        .merge(views)
        .merge(public)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
