//! Lexical pool types and per-file load summaries.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Lemma lists for one seed word, keyed by language code ("ang", "non", "cy").
///
/// Order follows the data files, so selection over the keys is reproducible.
pub type LemmaPool = IndexMap<String, Vec<String>>;

/// Seed word → per-language lemma lists.
pub type LexicalPool = IndexMap<String, LemmaPool>;

/// Theme name → lemma list, independent of seed words.
pub type ThematicPool = IndexMap<String, Vec<String>>;

/// Marker key that tags a document as a thematic dataset.
pub const DATASET_MARKER_KEY: &str = "dataset";
/// Marker value that tags a document as a thematic dataset.
pub const THEMATIC_MARKER: &str = "thematic";
/// Field holding theme → lemma lists in a thematic dataset.
pub const THEMES_KEY: &str = "themes";

/// Which kind of document a data file turned out to be.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetKind {
    SeedPool,
    Thematic,
}

/// What one data file contributed to the repository.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FileSummary {
    pub file: String,
    pub kind: DatasetKind,
    /// Seed words merged from this file (0 for thematic files).
    pub seeds: usize,
    /// Seed/language pairs merged from this file.
    pub languages: usize,
    /// Lemmas merged from this file, across seeds or themes.
    pub lemmas: usize,
    /// Themes merged from this file (0 for seed-pool files).
    pub themes: usize,
    /// Hex SHA-256 of the file contents, compared against the manifest.
    pub sha256: String,
}

impl FileSummary {
    pub(crate) fn new(file: &str, kind: DatasetKind, sha256: String) -> Self {
        Self {
            file: file.to_string(),
            kind,
            seeds: 0,
            languages: 0,
            lemmas: 0,
            themes: 0,
            sha256,
        }
    }
}

/// Merge `lemmas` onto the end of an existing list, creating it if needed.
pub(crate) fn merge_lemmas(target: &mut IndexMap<String, Vec<String>>, key: &str, lemmas: Vec<String>) {
    target.entry(key.to_string()).or_default().extend(lemmas);
}
