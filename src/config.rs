//! Configuration for the name forge.

use serde::{Deserialize, Serialize};

/// Compounds longer than this many characters are hyphenated when
/// hyphenation is enabled.
pub const DEFAULT_HYPHEN_THRESHOLD: usize = 10;

/// Configuration flags for [`NameForge`](crate::forge::NameForge).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForgeConfig {
    /// Derive the generator seed from the seed word and region (default: true).
    /// When false, each call draws a fresh seed from system entropy.
    pub deterministic: bool,

    /// Transliterate Arabic, Hebrew, and accented Latin output to ASCII (default: false).
    pub latinize_output: bool,

    /// Join long compounds with a hyphen instead of fusing them (default: false).
    pub hyphenate_long: bool,

    /// Character count above which a compound is hyphenated.
    pub hyphen_threshold: usize,
}

impl Default for ForgeConfig {
    fn default() -> Self {
        Self {
            deterministic: true,
            latinize_output: false,
            hyphenate_long: false,
            hyphen_threshold: DEFAULT_HYPHEN_THRESHOLD,
        }
    }
}

impl ForgeConfig {
    /// Threshold to use when composing, or `None` when hyphenation is off.
    pub fn active_hyphen_threshold(&self) -> Option<usize> {
        self.hyphenate_long.then_some(self.hyphen_threshold)
    }
}
