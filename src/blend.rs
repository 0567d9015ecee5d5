//! Blend profiles and their resolution for narrative stages and regions.
//!
//! A [`BlendProfile`] weights source languages. The [`BlendResolver`] picks a
//! base profile for a stage, scales it by a region's [`RegionalModifier`], and
//! renormalizes so the weights sum to 1.0. The forge itself never sees stages
//! or regions; it only receives the resolved profile.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{ForgeError, Result};

/// Profile used when a stage has no entry: an even split of two languages.
pub const FALLBACK_BLEND: [(&str, f64); 2] = [("ang", 0.5), ("non", 0.5)];

/// Language code → non-negative weight, in insertion order.
///
/// Weights need not sum to anything in particular; the forge discretizes
/// them itself.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlendProfile(IndexMap<String, f64>);

impl BlendProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, language: impl Into<String>, weight: f64) {
        self.0.insert(language.into(), weight);
    }

    pub fn weight(&self, language: &str) -> Option<f64> {
        self.0.get(language).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(lang, w)| (lang.as_str(), *w))
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Scale weights so they sum to 1.0. Left unchanged if the sum is not positive.
    pub fn renormalize(&mut self) {
        let total = self.total();
        if !(total.is_finite() && total > 0.0) {
            return;
        }
        for weight in self.0.values_mut() {
            *weight /= total;
        }
    }

    fn fallback() -> Self {
        FALLBACK_BLEND.iter().map(|&(lang, w)| (lang, w)).collect()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for BlendProfile {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(lang, w)| (lang.into(), w)).collect())
    }
}

/// Parses `"ang=0.5,cy=0.5"`. An empty string is an empty blend.
impl FromStr for BlendProfile {
    type Err = ForgeError;

    fn from_str(s: &str) -> Result<Self> {
        let mut profile = BlendProfile::new();
        for pair in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (lang, weight) = pair
                .split_once('=')
                .ok_or_else(|| ForgeError::InvalidBlend(s.to_string()))?;
            let lang = lang.trim();
            let weight: f64 = weight
                .trim()
                .parse()
                .map_err(|_| ForgeError::InvalidBlend(s.to_string()))?;
            if lang.is_empty() || !weight.is_finite() || weight < 0.0 {
                return Err(ForgeError::InvalidBlend(s.to_string()));
            }
            profile.insert(lang, weight);
        }
        Ok(profile)
    }
}

/// Per-language multipliers for one region. Missing languages count as 1.0.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionalModifier(IndexMap<String, f64>);

impl RegionalModifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, language: impl Into<String>, multiplier: f64) {
        self.0.insert(language.into(), multiplier);
    }

    pub fn multiplier(&self, language: &str) -> f64 {
        self.0.get(language).copied().unwrap_or(1.0)
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for RegionalModifier {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(lang, m)| (lang.into(), m)).collect())
    }
}

/// Multiply each weight by the region's multiplier, then renormalize.
pub fn apply_regional_modifier(profile: &BlendProfile, modifier: &RegionalModifier) -> BlendProfile {
    let mut adjusted: BlendProfile = profile
        .iter()
        .map(|(lang, w)| (lang, w * modifier.multiplier(lang)))
        .collect();
    adjusted.renormalize();
    adjusted
}

/// Stage profiles and regional modifiers, as stored in a blends JSON file.
///
/// ```json
/// {
///   "stages": { "calm": { "ang": 0.6, "cy": 0.4 } },
///   "regions": { "marsh": { "ang": 2.0 } }
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlendTable {
    pub stages: IndexMap<String, BlendProfile>,
    pub regions: IndexMap<String, RegionalModifier>,
}

impl BlendTable {
    /// Parse a blends document. The top level must be a JSON object.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        if !value.is_object() {
            return Err(ForgeError::InvalidBlendTable(
                "top level must be an object with 'stages' and 'regions'".to_string(),
            ));
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

/// Resolves the blend for a narrative stage and optional region.
#[derive(Clone, Debug, Default)]
pub struct BlendResolver {
    table: BlendTable,
}

impl BlendResolver {
    pub fn new(table: BlendTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &BlendTable {
        &self.table
    }

    /// Base profile for `stage_key` (or [`FALLBACK_BLEND`]), scaled and
    /// renormalized when `region_key` names a known region.
    pub fn resolve_blend(&self, stage_key: &str, region_key: Option<&str>) -> BlendProfile {
        let base = match self.table.stages.get(stage_key) {
            Some(profile) => profile.clone(),
            None => {
                debug!("No blend for stage '{}', using fallback", stage_key);
                BlendProfile::fallback()
            }
        };

        match region_key.and_then(|key| self.table.regions.get(key)) {
            Some(modifier) => apply_regional_modifier(&base, modifier),
            None => base,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    fn sample_resolver() -> BlendResolver {
        let table = BlendTable::from_json_str(
            r#"{
                "stages": {
                    "calm": {"ang": 0.5, "cy": 0.5},
                    "dread": {"he": 0.7, "ar": 0.3}
                },
                "regions": {
                    "marsh": {"ang": 2.0},
                    "desert": {"ar": 3.0, "he": 0.5}
                }
            }"#,
        )
        .unwrap();
        BlendResolver::new(table)
    }

    #[test]
    fn test_regional_renormalization() {
        let blend: BlendProfile = [("ang", 0.5), ("cy", 0.5)].into_iter().collect();
        let modifier: RegionalModifier = [("ang", 2.0)].into_iter().collect();
        let result = apply_regional_modifier(&blend, &modifier);

        assert!(approx(result.weight("ang").unwrap(), 2.0 / 3.0));
        assert!(approx(result.weight("cy").unwrap(), 1.0 / 3.0));
        assert!(approx(result.total(), 1.0));
    }

    #[test]
    fn test_resolve_known_stage_and_region() {
        let resolver = sample_resolver();

        let calm = resolver.resolve_blend("calm", None);
        assert_eq!(calm.weight("ang"), Some(0.5));

        let marsh = resolver.resolve_blend("calm", Some("marsh"));
        assert!(approx(marsh.weight("ang").unwrap(), 2.0 / 3.0));

        let desert = resolver.resolve_blend("dread", Some("desert"));
        // he: 0.35, ar: 0.9 → 0.28, 0.72
        assert!(approx(desert.weight("he").unwrap(), 0.35 / 1.25));
        assert!(approx(desert.weight("ar").unwrap(), 0.9 / 1.25));
        assert_eq!(desert.languages().collect::<Vec<_>>(), vec!["he", "ar"]);
    }

    #[test]
    fn test_unknown_stage_uses_fallback() {
        let resolver = sample_resolver();
        let blend = resolver.resolve_blend("unwritten", None);
        assert_eq!(blend.len(), 2);
        assert_eq!(blend.weight("ang"), Some(0.5));
        assert_eq!(blend.weight("non"), Some(0.5));

        let adjusted = resolver.resolve_blend("unwritten", Some("marsh"));
        assert!(approx(adjusted.weight("ang").unwrap(), 2.0 / 3.0));
    }

    #[test]
    fn test_unknown_region_leaves_profile_alone() {
        let resolver = sample_resolver();
        let blend = resolver.resolve_blend("dread", Some("nowhere"));
        assert_eq!(blend.weight("he"), Some(0.7));
        assert_eq!(blend.weight("ar"), Some(0.3));
    }

    #[test]
    fn test_renormalize_zero_total_is_untouched() {
        let mut blend: BlendProfile = [("ang", 0.0), ("cy", 0.0)].into_iter().collect();
        blend.renormalize();
        assert_eq!(blend.weight("ang"), Some(0.0));
    }

    #[test]
    fn test_parse_blend_string() {
        let blend: BlendProfile = "ang=0.5, cy=1.5".parse().unwrap();
        assert_eq!(blend.weight("ang"), Some(0.5));
        assert_eq!(blend.weight("cy"), Some(1.5));
        assert!("".parse::<BlendProfile>().unwrap().is_empty());
        assert!("ang".parse::<BlendProfile>().is_err());
        assert!("ang=lots".parse::<BlendProfile>().is_err());
        assert!("ang=-1".parse::<BlendProfile>().is_err());
    }

    #[test]
    fn test_load_bundled_blends() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/blends.json");
        let resolver = BlendResolver::new(BlendTable::load(&path).unwrap());
        let dread = resolver.resolve_blend("dread", Some("desert"));
        assert!(approx(dread.total(), 1.0));
        assert!(BlendTable::load(Path::new("/nonexistent/blends.json")).is_err());
    }

    #[test]
    fn test_blend_table_missing_sections_default() {
        let table = BlendTable::from_json_str(r#"{"stages": {}}"#).unwrap();
        assert!(table.regions.is_empty());
        assert!(BlendTable::from_json_str("{}").unwrap().stages.is_empty());
    }

    #[test]
    fn test_blend_table_rejects_non_objects() {
        for text in ["[]", "[{}, {}]", "null", "3", r#""calm""#] {
            let err = BlendTable::from_json_str(text).unwrap_err();
            assert!(matches!(err, ForgeError::InvalidBlendTable(_)), "{} gave {:?}", text, err);
        }
        assert!(matches!(BlendTable::from_json_str("{"), Err(ForgeError::Json(_))));
        assert!(matches!(
            BlendTable::from_json_str(r#"{"stages": []}"#),
            Err(ForgeError::Json(_))
        ));
    }
}
