//! Lexical repository: seed-word lemma pools and thematic lemma lists.
//!
//! Data lives in a directory of JSON documents. A seed-pool document maps
//! seed words to language → lemma lists:
//!
//! ```json
//! { "forest": { "ang": ["wudu", "holt"], "non": ["skogr"] } }
//! ```
//!
//! A thematic document carries `"dataset": "thematic"` and a `themes` object
//! of theme → lemma list. An optional `manifest.json` records content hashes.
//!
//! Loading never fails as a whole. Malformed files, seeds, and lemmas are
//! skipped and recorded as diagnostics, surfaced through
//! [`LexicalRepository::validate_integrity`].

pub mod integrity;
pub mod manifest;
pub mod pool_data;

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use log::{debug, info, warn};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use crate::error::DataError;

pub use integrity::{IntegrityReport, IntegrityStats};
pub use manifest::{Manifest, ManifestEntry, MANIFEST_FILE};
pub use pool_data::{DatasetKind, FileSummary, LemmaPool, LexicalPool, ThematicPool};

use manifest::{parse_manifest, ManifestParse};
use pool_data::{merge_lemmas, DATASET_MARKER_KEY, THEMATIC_MARKER, THEMES_KEY};

/// Extension recognised for data files.
const DATA_EXTENSION: &str = "json";

/// Owns all lemma data. Immutable between loads.
#[derive(Clone, Debug, Default)]
pub struct LexicalRepository {
    pools: LexicalPool,
    themes: ThematicPool,
    files: IndexMap<String, FileSummary>,
    manifest: Option<Manifest>,
    errors: Vec<DataError>,
    warnings: Vec<String>,
    /// Returned by `pool_for` for unknown seeds.
    empty_pool: LemmaPool,
}

impl LexicalRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a repository from a data directory.
    pub fn load(base_path: impl AsRef<Path>) -> Self {
        let mut repo = Self::new();
        repo.load_all(base_path);
        repo
    }

    /// Replace all state with the contents of `base_path`.
    ///
    /// Data files are merged in file-name order. The only condition that
    /// stops a load early is an unreadable directory, which leaves the
    /// repository empty with a single error.
    pub fn load_all(&mut self, base_path: impl AsRef<Path>) {
        let base = base_path.as_ref();
        self.clear();

        let entries = match fs::read_dir(base) {
            Ok(entries) => entries,
            Err(e) => {
                self.record_error(DataError::DirectoryUnreadable {
                    path: base.to_path_buf(),
                    reason: e.to_string(),
                });
                return;
            }
        };

        let mut data_files = Vec::new();
        let mut manifest_path = None;
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let is_data = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map_or(false, |ext| ext.eq_ignore_ascii_case(DATA_EXTENSION));
            if !is_data {
                continue;
            }
            if path.file_name().and_then(|n| n.to_str()) == Some(MANIFEST_FILE) {
                manifest_path = Some(path);
            } else {
                data_files.push(path);
            }
        }
        data_files.sort();

        for path in &data_files {
            let name = file_label(path);
            match fs::read_to_string(path) {
                Ok(text) => {
                    self.ingest_document(&name, &text);
                }
                Err(e) => self.record_error(DataError::FileUnreadable {
                    file: name,
                    reason: e.to_string(),
                }),
            }
        }

        if let Some(path) = manifest_path {
            match fs::read_to_string(&path) {
                Ok(text) => self.ingest_manifest(&text),
                Err(e) => self.record_warning(format!("cannot read {}: {}", MANIFEST_FILE, e)),
            }
        }

        info!(
            "Loaded {} seeds and {} themes from {} files in {} ({} errors, {} warnings)",
            self.pools.len(),
            self.themes.len(),
            self.files.len(),
            base.display(),
            self.errors.len(),
            self.warnings.len(),
        );
    }

    /// Merge one JSON document into the repository.
    ///
    /// The document is parsed in full before anything is merged, so a file
    /// that fails to parse contributes nothing. Returns whether it was merged.
    pub fn ingest_document(&mut self, file: &str, text: &str) -> bool {
        let value: Value = match serde_json::from_str(text) {
            Ok(v) => v,
            Err(e) => {
                self.record_error(DataError::MalformedDocument {
                    file: file.to_string(),
                    reason: e.to_string(),
                });
                return false;
            }
        };

        let Value::Object(root) = value else {
            self.record_error(DataError::MalformedDocument {
                file: file.to_string(),
                reason: "top level is not an object".to_string(),
            });
            return false;
        };

        let digest = hex::encode(Sha256::digest(text.as_bytes()));
        let is_thematic =
            root.get(DATASET_MARKER_KEY).and_then(Value::as_str) == Some(THEMATIC_MARKER);

        let summary = if is_thematic {
            self.merge_thematic(file, root, digest)
        } else {
            Some(self.merge_seed_pools(file, root, digest))
        };

        match summary {
            Some(summary) => {
                debug!(
                    "{}: {:?} with {} seeds, {} themes, {} lemmas",
                    file, summary.kind, summary.seeds, summary.themes, summary.lemmas
                );
                self.files.insert(file.to_string(), summary);
                true
            }
            None => false,
        }
    }

    /// Parse and keep a manifest document. Problems are warnings only.
    pub fn ingest_manifest(&mut self, text: &str) {
        match parse_manifest(text) {
            ManifestParse::Parsed(manifest) => self.manifest = Some(manifest),
            ManifestParse::Rejected(warning) => self.record_warning(warning),
        }
    }

    fn merge_seed_pools(&mut self, file: &str, root: Map<String, Value>, digest: String) -> FileSummary {
        let mut summary = FileSummary::new(file, DatasetKind::SeedPool, digest);

        for (seed, value) in root {
            if seed.starts_with('_') {
                continue;
            }
            let Value::Object(languages) = value else {
                self.record_error(DataError::InvalidPoolFormat {
                    file: file.to_string(),
                    seed,
                });
                continue;
            };

            let mut parsed: Vec<(String, Vec<String>)> = Vec::with_capacity(languages.len());
            for (language, lemmas) in languages {
                let Value::Array(items) = lemmas else {
                    self.record_error(DataError::InvalidLemmaList {
                        file: file.to_string(),
                        seed: seed.clone(),
                        language,
                    });
                    continue;
                };
                let owner = format!("{}/{}", seed, language);
                let lemmas = self.collect_lemmas(file, &owner, items);
                parsed.push((language, lemmas));
            }

            let pool = self.pools.entry(seed).or_default();
            summary.seeds += 1;
            for (language, lemmas) in parsed {
                summary.languages += 1;
                summary.lemmas += lemmas.len();
                merge_lemmas(pool, &language, lemmas);
            }
        }

        summary
    }

    fn merge_thematic(&mut self, file: &str, mut root: Map<String, Value>, digest: String) -> Option<FileSummary> {
        let Some(Value::Object(themes)) = root.remove(THEMES_KEY) else {
            self.record_error(DataError::InvalidThemes {
                file: file.to_string(),
            });
            return None;
        };

        let mut summary = FileSummary::new(file, DatasetKind::Thematic, digest);
        for (theme, value) in themes {
            let Value::Array(items) = value else {
                self.record_error(DataError::InvalidTheme {
                    file: file.to_string(),
                    theme,
                });
                continue;
            };
            let lemmas = self.collect_lemmas(file, &theme, items);
            summary.themes += 1;
            summary.lemmas += lemmas.len();
            merge_lemmas(&mut self.themes, &theme, lemmas);
        }

        Some(summary)
    }

    /// Keep trimmed, non-blank string items; everything else is a diagnostic.
    fn collect_lemmas(&mut self, file: &str, owner: &str, items: Vec<Value>) -> Vec<String> {
        let mut lemmas = Vec::with_capacity(items.len());
        for item in items {
            match item {
                Value::String(s) => {
                    let trimmed = s.trim();
                    if trimmed.is_empty() {
                        self.record_warning(format!("blank lemma under '{}' in {}", owner, file));
                    } else {
                        lemmas.push(trimmed.to_string());
                    }
                }
                _ => self.record_error(DataError::InvalidLemma {
                    file: file.to_string(),
                    owner: owner.to_string(),
                }),
            }
        }
        lemmas
    }

    fn clear(&mut self) {
        self.pools.clear();
        self.themes.clear();
        self.files.clear();
        self.manifest = None;
        self.errors.clear();
        self.warnings.clear();
    }

    fn record_error(&mut self, error: DataError) {
        warn!("{}", error);
        self.errors.push(error);
    }

    fn record_warning(&mut self, warning: String) {
        warn!("{}", warning);
        self.warnings.push(warning);
    }

    // --- Queries ---

    pub fn has_seed(&self, word: &str) -> bool {
        self.pools.contains_key(word)
    }

    /// Language codes for a seed word, in data order. Empty if unknown.
    pub fn languages_for(&self, word: &str) -> Vec<&str> {
        self.pools
            .get(word)
            .map(|pool| pool.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Language → lemma lists for a seed word. Empty if unknown.
    pub fn pool_for(&self, word: &str) -> &LemmaPool {
        self.pools.get(word).unwrap_or(&self.empty_pool)
    }

    /// Lemmas for a theme. Empty if unknown.
    pub fn theme(&self, name: &str) -> &[String] {
        self.themes.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Theme names, sorted.
    pub fn theme_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.themes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Seed words, sorted.
    pub fn seed_words(&self) -> Vec<&str> {
        let mut seeds: Vec<&str> = self.pools.keys().map(String::as_str).collect();
        seeds.sort_unstable();
        seeds
    }

    /// Per-file load summaries, in load order.
    pub fn file_summaries(&self) -> impl Iterator<Item = &FileSummary> {
        self.files.values()
    }

    pub fn manifest(&self) -> Option<&Manifest> {
        self.manifest.as_ref()
    }

    /// Load errors accumulated since the last `load_all`.
    pub fn errors(&self) -> &[DataError] {
        &self.errors
    }

    /// Load warnings accumulated since the last `load_all`.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Total lemmas across seed pools and themes.
    pub fn lemma_count(&self) -> usize {
        let pooled: usize = self.pools.values().flat_map(|p| p.values()).map(Vec::len).sum();
        let themed: usize = self.themes.values().map(Vec::len).sum();
        pooled + themed
    }

    // --- Validation ---

    /// Walk all loaded data and report problems. Does not mutate state.
    pub fn validate_integrity(&self) -> IntegrityReport {
        let errors: Vec<String> = self.errors.iter().map(ToString::to_string).collect();
        let mut warnings = self.warnings.clone();
        let mut languages = BTreeSet::new();

        for (seed, pool) in &self.pools {
            if pool.is_empty() {
                warnings.push(format!("seed '{}' has no languages", seed));
                continue;
            }
            let mut total = 0;
            for (language, lemmas) in pool {
                languages.insert(language.as_str());
                if lemmas.is_empty() {
                    warnings.push(format!("empty pool for seed '{}' language '{}'", seed, language));
                }
                total += lemmas.len();
            }
            if total == 0 {
                warnings.push(format!("seed '{}' has no lemmas in any language", seed));
            }
        }

        for (theme, lemmas) in &self.themes {
            if lemmas.is_empty() {
                warnings.push(format!("theme '{}' is empty", theme));
            }
        }

        if let Some(manifest) = &self.manifest {
            self.check_manifest(manifest, &mut warnings);
        }

        IntegrityReport {
            valid: errors.is_empty(),
            errors,
            warnings,
            stats: IntegrityStats {
                seeds: self.pools.len(),
                themes: self.themes.len(),
                files: self.files.len(),
                languages: languages.len(),
                lemmas: self.lemma_count(),
            },
        }
    }

    fn check_manifest(&self, manifest: &Manifest, warnings: &mut Vec<String>) {
        for (file, entry) in &manifest.files {
            let Some(summary) = self.files.get(file) else {
                warnings.push(format!("{} is listed in the manifest but was not loaded", file));
                continue;
            };
            match &entry.sha256 {
                Some(expected) if !expected.eq_ignore_ascii_case(&summary.sha256) => {
                    warnings.push(format!(
                        "hash mismatch for {}: manifest {}, actual {}",
                        file, expected, summary.sha256
                    ));
                }
                Some(_) => {}
                None => warnings.push(format!("manifest entry for {} has no hash", file)),
            }
        }
        for file in self.files.keys() {
            if !manifest.files.contains_key(file) {
                warnings.push(format!("{} is not listed in the manifest", file));
            }
        }
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
