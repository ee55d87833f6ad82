//! Hymnal cross-reference lookup.
//!
//! Loads the static hymnal table (a JSON array with one row per tune) and
//! builds a case-insensitive title index once at startup. A song title can
//! appear in several rows when it is sung to multiple tunes; those rows merge
//! into one entry with multiple versions.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Sentinel number in the hymnal table for "not present in that hymnal".
pub const NOT_IN_HYMNAL: i64 = -1;

/// One raw row of the hymnal table.
#[derive(Debug, Clone, Deserialize)]
pub struct HymnRow {
    /// Song title as printed in the hymnal.
    pub song_title: String,
    /// Name of the tune this row sets the song to.
    pub tune_name: String,
    /// Number in the Rejoice Hymns hymnal, or [`NOT_IN_HYMNAL`].
    pub rejoice_hymns: i64,
    /// Number in the Great Hymns of the Faith hymnal, or [`NOT_IN_HYMNAL`].
    pub great_hymns_of_the_faith: i64,
}

/// One tune a song is set to, with its per-hymnal numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HymnVersion {
    /// Stable identifier within a lookup response.
    pub id: String,
    /// Name of the tune.
    pub tune_name: String,
    /// Rejoice Hymns number, or [`NOT_IN_HYMNAL`].
    pub rejoice_number: i64,
    /// Great Hymns of the Faith number, or [`NOT_IN_HYMNAL`].
    pub great_hymns_number: i64,
    /// Whether this version is the one currently chosen for rendering.
    pub selected: bool,
}

/// All known versions of one song title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HymnEntry {
    /// The queried song title, echoed back verbatim.
    pub song_title: String,
    /// Every tune the title is set to.
    pub versions: Vec<HymnVersion>,
}

/// Case-insensitive multi-map from song title to hymnal rows.
#[derive(Debug, Default)]
pub struct HymnIndex {
    by_title: HashMap<String, Vec<HymnRow>>,
}

impl HymnIndex {
    /// Build an index from raw hymnal rows.
    pub fn from_rows(rows: impl IntoIterator<Item = HymnRow>) -> Self {
        let mut by_title: HashMap<String, Vec<HymnRow>> = HashMap::new();
        for row in rows {
            by_title.entry(row.song_title.to_lowercase()).or_default().push(row);
        }
        Self { by_title }
    }

    /// Load and index the hymnal table from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::io(e, path.to_path_buf()))?;
        let rows: Vec<HymnRow> = serde_json::from_str(&raw)
            .map_err(|e| Error::parse(format!("Invalid hymnal table: {e}"), path.to_path_buf()))?;

        let index = Self::from_rows(rows);
        tracing::info!("Indexed {} hymn titles from {}", index.len(), path.display());
        Ok(index)
    }

    /// Number of distinct titles in the index.
    pub fn len(&self) -> usize {
        self.by_title.len()
    }

    /// Whether the index holds no titles at all.
    pub fn is_empty(&self) -> bool {
        self.by_title.is_empty()
    }

    /// Look up a title, case-insensitively, exact match only.
    ///
    /// A title with exactly one version comes back with that version
    /// selected; multiple versions carry no selection, leaving the choice to
    /// the caller.
    pub fn lookup(&self, title: &str) -> Option<HymnEntry> {
        let rows = self.by_title.get(&title.to_lowercase())?;
        let versions: Vec<HymnVersion> = rows.iter().enumerate()
            .map(|(index, row)| HymnVersion {
                id: format!("{}-{index}", row.song_title),
                tune_name: row.tune_name.clone(),
                rejoice_number: row.rejoice_hymns,
                great_hymns_number: row.great_hymns_of_the_faith,
                selected: rows.len() == 1,
            })
            .collect();
        Some(HymnEntry { song_title: title.to_string(), versions })
    }

    /// Look up a batch of titles; titles with zero matches are omitted.
    pub fn lookup_batch<S: AsRef<str>>(&self, titles: &[S]) -> Vec<HymnEntry> {
        titles.iter()
            .filter_map(|title| self.lookup(title.as_ref()))
            .collect()
    }
}
