//! Error types for lexical data loading and blend tables.

use std::path::PathBuf;

/// Result type alias using [`ForgeError`].
pub type Result<T> = std::result::Result<T, ForgeError>;

/// Errors from the fallible helper APIs (blend tables, CLI input).
#[derive(Debug, thiserror::Error)]
pub enum ForgeError {
    /// I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A `lang=weight` blend string could not be parsed.
    #[error("invalid blend '{0}': expected lang=weight pairs separated by commas")]
    InvalidBlend(String),

    /// A blends document has the wrong shape.
    #[error("invalid blend table: {0}")]
    InvalidBlendTable(String),
}

/// A load-time diagnostic recorded by the lexical repository.
///
/// None of these abort a load; they are collected and surfaced through
/// [`crate::lexicon::IntegrityReport`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DataError {
    #[error("cannot access data directory {}: {reason}", .path.display())]
    DirectoryUnreadable { path: PathBuf, reason: String },

    #[error("cannot read {file}: {reason}")]
    FileUnreadable { file: String, reason: String },

    #[error("malformed document {file}: {reason}")]
    MalformedDocument { file: String, reason: String },

    #[error("invalid pool format for seed '{seed}' in {file}")]
    InvalidPoolFormat { file: String, seed: String },

    #[error("lemmas for seed '{seed}' language '{language}' in {file} are not a list")]
    InvalidLemmaList {
        file: String,
        seed: String,
        language: String,
    },

    #[error("non-string lemma under '{owner}' in {file}")]
    InvalidLemma { file: String, owner: String },

    #[error("thematic dataset {file} has no 'themes' object")]
    InvalidThemes { file: String },

    #[error("theme '{theme}' in {file} is not a list")]
    InvalidTheme { file: String, theme: String },
}
