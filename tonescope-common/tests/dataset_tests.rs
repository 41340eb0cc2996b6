//! Loader tests for the clustered song table
//!
//! Tests cover:
//! - Full CSV load with and without the optional interpretation column
//! - Column-presence validation before any row is read
//! - Fail-fast on rows with a missing or unparsable cluster label
//! - Missing-file load error

use std::io::Write;

use tempfile::NamedTempFile;
use tonescope_common::{Dataset, Error};

const FULL_HEADER: &str = "name_song,name_artists,genres,cluster,danceability,energy,acousticness,valence,tempo,loudness,speechiness,cluster_interpretation";

/// Test helper: write CSV content to a temp file and load it
fn load_csv(content: &str) -> Result<Dataset, Error> {
    let mut file = NamedTempFile::new().expect("Should create temp file");
    file.write_all(content.as_bytes())
        .expect("Should write fixture");
    Dataset::load(file.path())
}

#[test]
fn test_load_full_table() {
    let ds = load_csv(&format!(
        "{FULL_HEADER}\n\
         Song A,Artist X,pop,0,0.2,0.5,0.1,0.6,120.0,-6.0,0.05,Upbeat | danceable pop\n\
         Song B,Artist Y,rock,1,0.4,0.9,0.2,0.3,140.0,-4.0,0.04,Intense | loud rock\n\
         Song C,Artist Z,pop,0,0.6,0.4,0.3,0.7,110.0,-7.0,0.06,Upbeat | danceable pop\n"
    ))
    .expect("Should load");

    assert_eq!(ds.len(), 3);
    assert_eq!(ds.cluster_ids(), &[0, 1]);
    assert_eq!(ds.cluster_size(0), 2);
    assert_eq!(ds.cluster_label(0), Some("Upbeat"));
    assert_eq!(ds.songs()[1].name, "Song B");
    assert_eq!(ds.songs()[1].tempo, 140.0);
}

#[test]
fn test_load_without_interpretation_column() {
    let header = FULL_HEADER
        .strip_suffix(",cluster_interpretation")
        .unwrap();
    let ds = load_csv(&format!(
        "{header}\n\
         Song A,Artist X,pop,0,0.2,0.5,0.1,0.6,120.0,-6.0,0.05\n"
    ))
    .expect("Should load without optional column");

    assert_eq!(ds.len(), 1);
    assert_eq!(ds.cluster_label(0), None);
}

#[test]
fn test_load_missing_required_column() {
    // No `cluster` column at all
    let err = load_csv(
        "name_song,name_artists,genres,danceability,energy,acousticness,valence,tempo,loudness,speechiness\n\
         Song A,Artist X,pop,0.2,0.5,0.1,0.6,120.0,-6.0,0.05\n",
    )
    .expect_err("Should reject header without cluster column");

    assert!(err.to_string().contains("cluster"));
}

#[test]
fn test_load_rejects_row_with_empty_cluster() {
    let err = load_csv(&format!(
        "{FULL_HEADER}\n\
         Song A,Artist X,pop,0,0.2,0.5,0.1,0.6,120.0,-6.0,0.05,Upbeat | pop\n\
         Song B,Artist Y,rock,,0.4,0.9,0.2,0.3,140.0,-4.0,0.04,Intense | rock\n"
    ))
    .expect_err("Should reject row with empty cluster");

    // Error names the offending line (header is line 1, bad row is line 3)
    assert!(err.to_string().contains("line 3"));
}

#[test]
fn test_load_rejects_unparsable_feature() {
    let err = load_csv(&format!(
        "{FULL_HEADER}\n\
         Song A,Artist X,pop,0,not-a-number,0.5,0.1,0.6,120.0,-6.0,0.05,Upbeat | pop\n"
    ))
    .expect_err("Should reject non-numeric feature value");

    assert!(err.to_string().contains("line 2"));
}

#[test]
fn test_load_missing_file() {
    let err = Dataset::load(std::path::Path::new("/nonexistent/music_with_clusters.csv"))
        .expect_err("Should fail on missing file");

    assert!(err.to_string().contains("Dataset not found"));
}

#[test]
fn test_load_empty_table_is_valid() {
    let ds = load_csv(&format!("{FULL_HEADER}\n")).expect("Header-only file should load");
    assert!(ds.is_empty());
    assert!(ds.cluster_ids().is_empty());
}
