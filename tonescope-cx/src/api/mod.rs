//! HTTP API handlers for tonescope-cx

pub mod buildinfo;
pub mod catalog;
pub mod cluster;
pub mod features;
pub mod health;
pub mod overview;
pub mod recommend;
pub mod ui;

pub use buildinfo::get_build_info;
pub use catalog::{list_clusters, list_songs};
pub use cluster::get_cluster;
pub use features::{get_feature_analysis, list_features};
pub use health::health_routes;
pub use overview::get_overview;
pub use recommend::get_recommendations;
pub use ui::{serve_app_js, serve_index};
