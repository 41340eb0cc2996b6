//! Clustered song table model and CSV loader
//!
//! The table is produced offline by the clustering pipeline and consumed here
//! as a read-only contract: every row carries a `cluster` label alongside the
//! audio feature columns. The dataset is loaded once at process startup and
//! never mutated afterwards; all views recompute their aggregates from it on
//! each request.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{Error, Result};

/// Columns that must be present in the dataset header row.
///
/// `cluster_interpretation` is optional and intentionally absent here.
pub const REQUIRED_COLUMNS: [&str; 11] = [
    "name_song",
    "name_artists",
    "genres",
    "cluster",
    "danceability",
    "energy",
    "acousticness",
    "valence",
    "tempo",
    "loudness",
    "speechiness",
];

/// One row of the clustered song table
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Song {
    /// Song title
    #[serde(rename = "name_song")]
    pub name: String,
    /// Artist name(s), as a single display string
    #[serde(rename = "name_artists")]
    pub artists: String,
    /// Genre tags, as a single display string
    pub genres: String,
    /// Cluster label assigned by the offline clustering pipeline
    pub cluster: u32,
    pub danceability: f64,
    pub energy: f64,
    pub acousticness: f64,
    pub valence: f64,
    pub tempo: f64,
    pub loudness: f64,
    pub speechiness: f64,
    /// Optional human-readable cluster description, `"<label> | <free text>"`
    #[serde(default)]
    pub cluster_interpretation: Option<String>,
}

/// Audio feature columns understood by the dashboard views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFeature {
    Danceability,
    Energy,
    Acousticness,
    Valence,
    Tempo,
    Loudness,
    Speechiness,
}

impl AudioFeature {
    /// Every analyzable feature, in display order
    pub const ALL: [AudioFeature; 7] = [
        AudioFeature::Danceability,
        AudioFeature::Energy,
        AudioFeature::Acousticness,
        AudioFeature::Valence,
        AudioFeature::Tempo,
        AudioFeature::Loudness,
        AudioFeature::Speechiness,
    ];

    /// Features compared against the overall average in the cluster explorer
    pub const COMPARISON: [AudioFeature; 6] = [
        AudioFeature::Danceability,
        AudioFeature::Energy,
        AudioFeature::Acousticness,
        AudioFeature::Valence,
        AudioFeature::Tempo,
        AudioFeature::Loudness,
    ];

    /// Fixed subset the correlation matrix is computed over
    pub const CORRELATION: [AudioFeature; 5] = [
        AudioFeature::Danceability,
        AudioFeature::Energy,
        AudioFeature::Acousticness,
        AudioFeature::Valence,
        AudioFeature::Loudness,
    ];

    /// Subset used for the song-vs-cluster audio profile comparison
    pub const PROFILE: [AudioFeature; 4] = [
        AudioFeature::Danceability,
        AudioFeature::Energy,
        AudioFeature::Acousticness,
        AudioFeature::Valence,
    ];

    /// Column name as it appears in the dataset header
    pub fn name(&self) -> &'static str {
        match self {
            AudioFeature::Danceability => "danceability",
            AudioFeature::Energy => "energy",
            AudioFeature::Acousticness => "acousticness",
            AudioFeature::Valence => "valence",
            AudioFeature::Tempo => "tempo",
            AudioFeature::Loudness => "loudness",
            AudioFeature::Speechiness => "speechiness",
        }
    }

    /// Parse a column name back into a feature; `None` for anything outside
    /// the allowed set
    pub fn from_name(name: &str) -> Option<AudioFeature> {
        AudioFeature::ALL.into_iter().find(|f| f.name() == name)
    }

    /// Value of this feature on a given song
    pub fn of(&self, song: &Song) -> f64 {
        match self {
            AudioFeature::Danceability => song.danceability,
            AudioFeature::Energy => song.energy,
            AudioFeature::Acousticness => song.acousticness,
            AudioFeature::Valence => song.valence,
            AudioFeature::Tempo => song.tempo,
            AudioFeature::Loudness => song.loudness,
            AudioFeature::Speechiness => song.speechiness,
        }
    }
}

/// Immutable, memory-resident song table plus its derived cluster index
#[derive(Debug, Clone)]
pub struct Dataset {
    songs: Vec<Song>,
    /// Distinct cluster ids, ascending
    cluster_ids: Vec<u32>,
}

impl Dataset {
    /// Load the dataset from a CSV file, fully into memory.
    ///
    /// Validates column presence before reading rows, and fails fast on any
    /// row whose `cluster` (or any numeric column) is missing or unparsable.
    /// Load failures are fatal to the caller: no view renders without data.
    pub fn load(path: &Path) -> Result<Dataset> {
        if !path.exists() {
            return Err(Error::Dataset(format!(
                "Dataset not found: {}\nExpected a clustered song table (CSV) produced by the clustering pipeline.",
                path.display()
            )));
        }

        let mut rdr = csv::Reader::from_path(path)?;

        let headers = rdr.headers()?.clone();
        for required in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == required) {
                return Err(Error::Dataset(format!(
                    "missing required column '{}' in {}",
                    required,
                    path.display()
                )));
            }
        }

        let mut songs = Vec::new();
        for (idx, record) in rdr.deserialize::<Song>().enumerate() {
            // Header row is line 1; data rows start at line 2
            let song =
                record.map_err(|e| Error::Dataset(format!("line {}: {}", idx + 2, e)))?;
            songs.push(song);
        }

        Ok(Dataset::from_songs(songs))
    }

    /// Build a dataset from already-parsed rows.
    ///
    /// Derives the sorted distinct cluster-id list and checks the "one
    /// interpretation label per cluster" assumption, warning per cluster
    /// when the table disagrees with itself. The label is cosmetic, so a
    /// mismatch is not a load failure.
    pub fn from_songs(songs: Vec<Song>) -> Dataset {
        let mut cluster_ids: Vec<u32> = songs
            .iter()
            .map(|s| s.cluster)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        cluster_ids.sort_unstable();

        let mut labels: BTreeMap<u32, &str> = BTreeMap::new();
        for song in &songs {
            if let Some(interp) = song.cluster_interpretation.as_deref() {
                if let Some(previous) = labels.insert(song.cluster, interp) {
                    if previous != interp {
                        warn!(
                            "cluster {} carries conflicting interpretations ({:?} vs {:?}); views use the first row's",
                            song.cluster, previous, interp
                        );
                    }
                }
            }
        }

        Dataset { songs, cluster_ids }
    }

    /// Total number of rows
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// All rows, in table order
    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    /// Distinct cluster ids, ascending
    pub fn cluster_ids(&self) -> &[u32] {
        &self.cluster_ids
    }

    /// Whether a cluster id is present in the table
    pub fn has_cluster(&self, cluster: u32) -> bool {
        self.cluster_ids.binary_search(&cluster).is_ok()
    }

    /// Rows belonging to one cluster, in table order
    pub fn rows_in_cluster(&self, cluster: u32) -> impl Iterator<Item = &Song> {
        self.songs.iter().filter(move |s| s.cluster == cluster)
    }

    /// Number of rows in one cluster
    pub fn cluster_size(&self, cluster: u32) -> usize {
        self.rows_in_cluster(cluster).count()
    }

    /// Full interpretation string for a cluster, from its first row
    pub fn cluster_interpretation(&self, cluster: u32) -> Option<&str> {
        self.rows_in_cluster(cluster)
            .next()
            .and_then(|s| s.cluster_interpretation.as_deref())
    }

    /// Short cluster label: the first `|`-separated token of the
    /// interpretation string, trimmed
    pub fn cluster_label(&self, cluster: u32) -> Option<&str> {
        self.cluster_interpretation(cluster)
            .map(|interp| interp.split('|').next().unwrap_or(interp).trim())
    }

    /// Values of one feature across all rows, in table order
    pub fn feature_column(&self, feature: AudioFeature) -> Vec<f64> {
        self.songs.iter().map(|s| feature.of(s)).collect()
    }

    /// First row matching (song name, artist name), in table order
    pub fn find_song(&self, name: &str, artists: &str) -> Option<&Song> {
        self.songs
            .iter()
            .find(|s| s.name == name && s.artists == artists)
    }

    /// Distinct (song, artist) pairs in table order, for the song selector
    pub fn song_choices(&self) -> Vec<(&str, &str)> {
        let mut seen = HashSet::new();
        let mut choices = Vec::new();
        for song in &self.songs {
            if seen.insert((song.name.as_str(), song.artists.as_str())) {
                choices.push((song.name.as_str(), song.artists.as_str()));
            }
        }
        choices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song(name: &str, artists: &str, cluster: u32, danceability: f64) -> Song {
        Song {
            name: name.to_string(),
            artists: artists.to_string(),
            genres: "pop".to_string(),
            cluster,
            danceability,
            energy: 0.5,
            acousticness: 0.5,
            valence: 0.5,
            tempo: 120.0,
            loudness: -6.0,
            speechiness: 0.05,
            cluster_interpretation: Some(format!("Cluster {} | test", cluster)),
        }
    }

    #[test]
    fn test_cluster_ids_sorted_and_distinct() {
        let ds = Dataset::from_songs(vec![
            song("a", "x", 2, 0.1),
            song("b", "y", 0, 0.2),
            song("c", "z", 2, 0.3),
        ]);
        assert_eq!(ds.cluster_ids(), &[0, 2]);
        assert!(ds.has_cluster(2));
        assert!(!ds.has_cluster(1));
    }

    #[test]
    fn test_cluster_label_takes_first_token() {
        let ds = Dataset::from_songs(vec![song("a", "x", 3, 0.1)]);
        assert_eq!(ds.cluster_label(3), Some("Cluster 3"));
        assert_eq!(ds.cluster_interpretation(3), Some("Cluster 3 | test"));
    }

    #[test]
    fn test_cluster_label_absent() {
        let mut s = song("a", "x", 1, 0.1);
        s.cluster_interpretation = None;
        let ds = Dataset::from_songs(vec![s]);
        assert_eq!(ds.cluster_label(1), None);
    }

    #[test]
    fn test_find_song_first_match_wins() {
        let ds = Dataset::from_songs(vec![
            song("same", "first", 0, 0.1),
            song("same", "first", 1, 0.9),
        ]);
        let found = ds.find_song("same", "first").unwrap();
        assert_eq!(found.cluster, 0);
    }

    #[test]
    fn test_song_choices_deduplicated_in_order() {
        let ds = Dataset::from_songs(vec![
            song("a", "x", 0, 0.1),
            song("b", "y", 0, 0.2),
            song("a", "x", 1, 0.3),
        ]);
        assert_eq!(ds.song_choices(), vec![("a", "x"), ("b", "y")]);
    }

    #[test]
    fn test_feature_from_name_closed_set() {
        assert_eq!(
            AudioFeature::from_name("danceability"),
            Some(AudioFeature::Danceability)
        );
        assert_eq!(AudioFeature::from_name("cluster"), None);
        assert_eq!(AudioFeature::from_name(""), None);
    }

    #[test]
    fn test_feature_of_reads_the_right_column() {
        let s = song("a", "x", 0, 0.42);
        assert_eq!(AudioFeature::Danceability.of(&s), 0.42);
        assert_eq!(AudioFeature::Tempo.of(&s), 120.0);
    }
}
