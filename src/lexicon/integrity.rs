//! Integrity report over loaded lexical data.

use serde::{Deserialize, Serialize};

/// Read-only snapshot of data health, produced by
/// [`LexicalRepository::validate_integrity`](super::LexicalRepository::validate_integrity).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct IntegrityReport {
    /// True when no structural errors were found.
    pub valid: bool,
    /// Structural problems (unparseable files, non-mapping seeds, non-list lemmas).
    pub errors: Vec<String>,
    /// Soft problems (empty pools, empty themes, manifest mismatches).
    pub warnings: Vec<String>,
    pub stats: IntegrityStats,
}

/// Summary counts for an [`IntegrityReport`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrityStats {
    pub seeds: usize,
    pub themes: usize,
    /// Source files that parsed and contributed data.
    pub files: usize,
    /// Distinct language codes across all seeds.
    pub languages: usize,
    /// Lemmas across all seed pools and themes.
    pub lemmas: usize,
}

impl IntegrityReport {
    /// Does any error mention `needle`?
    pub fn has_error_mentioning(&self, needle: &str) -> bool {
        self.errors.iter().any(|e| e.contains(needle))
    }

    /// Does any warning mention `needle`?
    pub fn has_warning_mentioning(&self, needle: &str) -> bool {
        self.warnings.iter().any(|w| w.contains(needle))
    }
}
