//! Optional provenance manifest for a lexical data directory.
//!
//! The manifest lists each data file with a content hash. Hashes are only
//! compared to produce integrity warnings; they are never enforced.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// File name of the manifest inside a data directory.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Top-level key the manifest must carry.
pub const MANIFEST_FILES_KEY: &str = "files";

/// Parsed manifest: file name → provenance entry.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub files: IndexMap<String, ManifestEntry>,
}

/// Provenance for one data file. Fields other than the hash are kept verbatim.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ManifestEntry {
    #[serde(default)]
    pub sha256: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Outcome of reading a manifest document.
#[derive(Debug)]
pub(crate) enum ManifestParse {
    Parsed(Manifest),
    /// The document is usable JSON but not a manifest; carries a warning.
    Rejected(String),
}

/// Parse manifest text. Never fails hard; problems become a warning string.
pub(crate) fn parse_manifest(text: &str) -> ManifestParse {
    let value: Value = match serde_json::from_str(text) {
        Ok(v) => v,
        Err(e) => return ManifestParse::Rejected(format!("manifest is not valid JSON: {}", e)),
    };

    if value.get(MANIFEST_FILES_KEY).is_none() {
        return ManifestParse::Rejected(format!(
            "manifest is missing the '{}' key",
            MANIFEST_FILES_KEY
        ));
    }

    match serde_json::from_value::<Manifest>(value) {
        Ok(manifest) => ManifestParse::Parsed(manifest),
        Err(e) => ManifestParse::Rejected(format!("manifest has an unexpected shape: {}", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_manifest_with_extra_fields() {
        let text = r#"{"files": {"core.json": {"sha256": "abc", "source": "wiktionary"}}}"#;
        match parse_manifest(text) {
            ManifestParse::Parsed(m) => {
                let entry = &m.files["core.json"];
                assert_eq!(entry.sha256.as_deref(), Some("abc"));
                assert_eq!(entry.extra["source"], "wiktionary");
            }
            ManifestParse::Rejected(w) => panic!("unexpected rejection: {}", w),
        }
    }

    #[test]
    fn test_missing_files_key_is_rejected() {
        match parse_manifest(r#"{"version": 2}"#) {
            ManifestParse::Rejected(w) => assert!(w.contains("'files'"), "warning was: {}", w),
            ManifestParse::Parsed(_) => panic!("manifest without files key should be rejected"),
        }
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(matches!(parse_manifest("not json"), ManifestParse::Rejected(_)));
    }
}
