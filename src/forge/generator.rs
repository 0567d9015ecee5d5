//! The name forge: seeded language selection and lemma composition.

use log::trace;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::latinize::latinize;
use super::phonotactics::{capitalize, compound, polish};
use super::seeding::{name_seed, stable_hash};
use crate::blend::BlendProfile;
use crate::config::ForgeConfig;
use crate::lexicon::{LemmaPool, LexicalRepository};

/// Decorrelation tags for the two lemma draws.
const FIRST_TAG: &str = "A";
const SECOND_TAG: &str = "B";

/// Upper bound on a single language's repeat count.
///
/// Larger weights are clamped, so the total over a blend fits in a `u64`.
pub const MAX_REPEAT_COUNT: u64 = u32::MAX as u64;

/// Repeat count for a blend weight: `max(1, floor(w * 10))`, clamped to
/// [`MAX_REPEAT_COUNT`].
///
/// A weight of 0.0 still yields one entry, as do negative and non-finite
/// weights.
pub fn repeat_count(weight: f64) -> u64 {
    let scaled = (weight * 10.0).floor();
    if weight.is_finite() && scaled > 1.0 {
        scaled.min(MAX_REPEAT_COUNT as f64) as u64
    } else {
        1
    }
}

/// Candidate languages paired with their repeat counts, in blend order.
///
/// Equivalent to a flat list with each language repeated `count` times,
/// without materializing it. An empty blend falls back to every language in
/// the pool, once each.
pub fn weighted_languages<'a>(blend: &'a BlendProfile, pool: &'a LemmaPool) -> Vec<(&'a str, u64)> {
    if blend.is_empty() {
        return pool.keys().map(|language| (language.as_str(), 1)).collect();
    }
    blend
        .iter()
        .map(|(language, weight)| (language, repeat_count(weight)))
        .collect()
}

/// Synthesizes names from lexical pools.
///
/// Holds a single seeded generator, so one forge must not be driven from
/// several threads at once without a lock.
pub struct NameForge {
    rng: ChaCha8Rng,
    seed: u64,
    config: ForgeConfig,
}

impl Default for NameForge {
    fn default() -> Self {
        Self::new()
    }
}

impl NameForge {
    pub fn new() -> Self {
        Self::with_config(ForgeConfig::default())
    }

    pub fn with_config(config: ForgeConfig) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(0),
            seed: 0,
            config,
        }
    }

    pub fn config(&self) -> &ForgeConfig {
        &self.config
    }

    /// Current generator seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Reseed the generator.
    pub fn set_seed(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }

    pub fn set_deterministic_mode(&mut self, enabled: bool) {
        self.config.deterministic = enabled;
    }

    pub fn set_latinize_output(&mut self, enabled: bool) {
        self.config.latinize_output = enabled;
    }

    pub fn set_hyphenate_long(&mut self, enabled: bool) {
        self.config.hyphenate_long = enabled;
    }

    /// Forge a name for `seed_word` from the languages in `blend`.
    ///
    /// Never fails: an unknown seed word comes back capitalized, and a pick
    /// that finds only one lemma yields that lemma alone. With latinized
    /// output enabled, the transliterated name has its first letter
    /// capitalized again, since scripts like Arabic have no case.
    pub fn forge(
        &mut self,
        repo: &LexicalRepository,
        seed_word: &str,
        blend: &BlendProfile,
        region_key: &str,
        explicit_seed: Option<u64>,
    ) -> String {
        self.resolve_seed(seed_word, region_key, explicit_seed);

        let pool = repo.pool_for(seed_word);
        if pool.is_empty() {
            return self.finish(capitalize(seed_word));
        }

        let candidates = weighted_languages(blend, pool);
        let lang_a = self.draw_language(&candidates);
        let lang_b = self.draw_language(&candidates);
        let (Some(lang_a), Some(lang_b)) = (lang_a, lang_b) else {
            return self.finish(capitalize(seed_word));
        };

        let first = self.pick_lemma(lemmas_of(pool, lang_a), Some(FIRST_TAG));
        let second = self.pick_lemma(lemmas_of(pool, lang_b), Some(SECOND_TAG));
        trace!(
            "forge '{}' seed={:#x}: {}:'{}' + {}:'{}'",
            seed_word, self.seed, lang_a, first, lang_b, second
        );

        let name = self.compose(seed_word, first, second);
        self.finish(name)
    }

    /// Forge one name per region key, with the same seed word and blend.
    pub fn forge_many(
        &mut self,
        repo: &LexicalRepository,
        seed_word: &str,
        blend: &BlendProfile,
        region_keys: &[&str],
    ) -> Vec<String> {
        region_keys
            .iter()
            .map(|region| self.forge(repo, seed_word, blend, region, None))
            .collect()
    }

    /// Forge a name from two lemmas of one theme.
    ///
    /// Falls back to the capitalized theme name when the theme is empty.
    pub fn theme_name(&mut self, repo: &LexicalRepository, theme: &str, explicit_seed: Option<u64>) -> String {
        self.resolve_seed(theme, "", explicit_seed);
        let lemmas = repo.theme(theme);
        let first = self.pick_lemma(lemmas, Some(FIRST_TAG));
        let second = self.pick_lemma(lemmas, Some(SECOND_TAG));
        let name = self.compose(theme, first, second);
        self.finish(name)
    }

    fn resolve_seed(&mut self, seed_word: &str, region_key: &str, explicit_seed: Option<u64>) {
        let seed = match explicit_seed {
            Some(seed) => seed,
            None if self.config.deterministic => name_seed(seed_word, region_key),
            None => rand::random(),
        };
        self.set_seed(seed);
    }

    /// Draw one language with probability proportional to its repeat count.
    fn draw_language<'a>(&mut self, candidates: &[(&'a str, u64)]) -> Option<&'a str> {
        let total = candidates
            .iter()
            .fold(0u64, |sum, &(_, count)| sum.saturating_add(count));
        if total == 0 {
            return None;
        }
        let mut index = self.rng.gen_range(0..total);
        candidates.iter().find_map(|&(language, count)| {
            if index < count {
                Some(language)
            } else {
                index -= count;
                None
            }
        })
    }

    /// Pick one lemma uniformly, first mixing `extra_seed` into the seed.
    fn pick_lemma<'a>(&mut self, lemmas: &'a [String], extra_seed: Option<&str>) -> &'a str {
        if lemmas.is_empty() {
            return "";
        }
        if let Some(tag) = extra_seed {
            self.set_seed(self.seed ^ stable_hash(tag));
        }
        &lemmas[self.rng.gen_range(0..lemmas.len())]
    }

    fn compose(&self, seed_word: &str, first: &str, second: &str) -> String {
        match (first.is_empty(), second.is_empty()) {
            (true, true) => capitalize(seed_word),
            (false, true) => capitalize(&first.to_lowercase()),
            (true, false) => capitalize(&second.to_lowercase()),
            (false, false) => {
                let raw = compound(first, second, self.config.active_hyphen_threshold());
                capitalize(&polish(&raw))
            }
        }
    }

    fn finish(&self, name: String) -> String {
        if self.config.latinize_output {
            capitalize(&latinize(&name))
        } else {
            name
        }
    }
}

fn lemmas_of<'a>(pool: &'a LemmaPool, language: &str) -> &'a [String] {
    pool.get(language).map(Vec::as_slice).unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blend::{apply_regional_modifier, RegionalModifier};

    fn repo_from(json: &str) -> LexicalRepository {
        let mut repo = LexicalRepository::new();
        assert!(repo.ingest_document("test.json", json));
        repo
    }

    fn blend(pairs: &[(&str, f64)]) -> BlendProfile {
        pairs.iter().map(|&(lang, w)| (lang, w)).collect()
    }

    fn forest_repo() -> LexicalRepository {
        repo_from(r#"{"forest": {"ang": ["wald"], "non": ["skogr"]}}"#)
    }

    const FOREST_NAMES: [&str; 4] = ["Waldwald", "Waldskogr", "Skogrwald", "Skogrskogr"];

    #[test]
    fn test_end_to_end_forest() {
        let repo = forest_repo();
        let recipe = blend(&[("ang", 1.0), ("non", 1.0)]);

        let mut forge = NameForge::new();
        assert_eq!(forge.forge(&repo, "forest", &recipe, "", Some(7)), "Waldwald");
        assert_eq!(forge.forge(&repo, "forest", &recipe, "", Some(5)), "Waldskogr");
        assert_eq!(forge.forge(&repo, "forest", &recipe, "", Some(0)), "Skogrwald");

        assert_eq!(forge.forge(&repo, "forest", &recipe, "", Some(7)), "Waldwald");
        assert_eq!(NameForge::new().forge(&repo, "forest", &recipe, "", Some(7)), "Waldwald");
    }

    #[test]
    fn test_seed_word_hash_names_are_pinned() {
        let repo = repo_from(
            r#"{"forest": {"ang": ["wudu", "holt", "weald"], "cy": ["coed", "gwig"], "non": ["skogr", "lundr"]}}"#,
        );
        let recipe = blend(&[("ang", 0.5), ("cy", 0.3), ("non", 0.2)]);
        let mut forge = NameForge::new();

        assert_eq!(forge.forge(&repo, "forest", &recipe, "marsh", None), "Wealdweald");
        assert_eq!(forge.seed() ^ stable_hash("A") ^ stable_hash("B"), name_seed("forest", "marsh"));
        assert_eq!(forge.forge(&repo, "forest", &recipe, "coast", None), "Holtlundr");
    }

    #[test]
    fn test_deterministic_mode_repeats() {
        let repo = repo_from(
            r#"{"forest": {"ang": ["wudu", "holt", "weald"], "cy": ["coed", "gwig"], "non": ["skogr", "lundr"]}}"#,
        );
        let recipe = blend(&[("ang", 0.5), ("cy", 0.3), ("non", 0.2)]);

        let first = NameForge::new().forge(&repo, "forest", &recipe, "marsh", None);
        for _ in 0..5 {
            let mut forge = NameForge::new();
            assert_eq!(forge.forge(&repo, "forest", &recipe, "marsh", None), first);
        }
    }

    #[test]
    fn test_region_changes_the_seed() {
        let repo = forest_repo();
        let recipe = blend(&[("ang", 1.0)]);
        let mut forge = NameForge::new();

        forge.forge(&repo, "forest", &recipe, "marsh", None);
        let marsh_seed = forge.seed();
        forge.forge(&repo, "forest", &recipe, "coast", None);
        assert_ne!(forge.seed(), marsh_seed);
    }

    #[test]
    fn test_explicit_seed_overrides_region_hash() {
        let repo = repo_from(
            r#"{"forest": {"ang": ["wudu", "holt", "weald", "hyrst"], "non": ["skogr", "lundr", "vidr"]}}"#,
        );
        let recipe = blend(&[("ang", 1.0), ("non", 1.0)]);
        let mut forge = NameForge::new();

        let a = forge.forge(&repo, "forest", &recipe, "marsh", Some(42));
        let b = forge.forge(&repo, "forest", &recipe, "marsh", Some(42));
        let c = forge.forge(&repo, "forest", &recipe, "coast", Some(42));
        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn test_unknown_seed_falls_back() {
        let repo = forest_repo();
        let mut forge = NameForge::new();
        let name = forge.forge(&repo, "zzznotarealword", &blend(&[("ang", 1.0)]), "", None);
        assert_eq!(name, "Zzznotarealword");
    }

    #[test]
    fn test_empty_blend_uses_pool_languages() {
        let repo = repo_from(r#"{"forest": {"ang": ["wudu", "holt"], "cy": ["coed", "gwig"]}}"#);
        let mut forge = NameForge::new();
        for seed in 0..20 {
            let name = forge.forge(&repo, "forest", &BlendProfile::new(), "", Some(seed));
            assert_ne!(name, "Forest");
            let lower = name.to_lowercase();
            let parts = ["wudu", "holt", "coed", "gwig"];
            assert!(
                parts.iter().any(|p| lower.starts_with(&p[..3])),
                "'{}' should be built from pool lemmas",
                name
            );
        }
    }

    #[test]
    fn test_zero_weight_still_selected() {
        assert_eq!(repeat_count(0.0), 1);
        assert_eq!(repeat_count(0.05), 1);
        assert_eq!(repeat_count(0.25), 2);
        assert_eq!(repeat_count(1.0), 10);
        assert_eq!(repeat_count(-3.0), 1);
        assert_eq!(repeat_count(f64::NAN), 1);

        let pool = LemmaPool::new();
        let recipe = blend(&[("ang", 0.0), ("cy", 0.25)]);
        assert_eq!(weighted_languages(&recipe, &pool), vec![("ang", 1), ("cy", 2)]);

        // The only candidate carries weight 0.0 and is still used.
        let repo = forest_repo();
        let name = NameForge::new().forge(&repo, "forest", &blend(&[("ang", 0.0)]), "", None);
        assert_eq!(name, "Waldwald");
    }

    #[test]
    fn test_weighted_languages_empty_blend() {
        let repo = forest_repo();
        let empty = BlendProfile::new();
        let candidates = weighted_languages(&empty, repo.pool_for("forest"));
        assert_eq!(candidates, vec![("ang", 1), ("non", 1)]);
    }

    #[test]
    fn test_renormalized_weights_discretize_on_tenths() {
        let recipe = blend(&[("ang", 0.7), ("non", 0.7)]);
        let marsh: RegionalModifier = [("ang", 1.5)].into_iter().collect();
        let adjusted = apply_regional_modifier(&recipe, &marsh);

        let pool = LemmaPool::new();
        assert_eq!(weighted_languages(&adjusted, &pool), vec![("ang", 6), ("non", 4)]);
    }

    #[test]
    fn test_huge_weights_are_clamped() {
        assert_eq!(repeat_count(1e30), MAX_REPEAT_COUNT);
        assert_eq!(repeat_count(f64::MAX), MAX_REPEAT_COUNT);
        assert_eq!(repeat_count(f64::INFINITY), 1);

        let repo = forest_repo();
        let recipe: BlendProfile = "ang=1e30,non=1".parse().unwrap();
        assert_eq!(
            weighted_languages(&recipe, repo.pool_for("forest")),
            vec![("ang", MAX_REPEAT_COUNT), ("non", 10)]
        );
        let name = NameForge::new().forge(&repo, "forest", &recipe, "", Some(7));
        assert_eq!(name, "Waldwald");

        let crowded: BlendProfile = (0..8).map(|i| (format!("x{}", i), 1e300)).collect();
        let name = NameForge::new().forge(&repo, "forest", &crowded, "", Some(7));
        assert_eq!(name, "Forest");
    }

    #[test]
    fn test_empty_lemma_lists_fall_back_to_seed() {
        let repo = repo_from(r#"{"ash": {"ang": [], "non": []}}"#);
        let name = NameForge::new().forge(&repo, "ash", &blend(&[("ang", 1.0)]), "", None);
        assert_eq!(name, "Ash");
    }

    #[test]
    fn test_blend_language_missing_from_pool() {
        let repo = forest_repo();
        let name = NameForge::new().forge(&repo, "forest", &blend(&[("he", 1.0)]), "", None);
        assert_eq!(name, "Forest");
    }

    #[test]
    fn test_compose_rules() {
        let forge = NameForge::new();
        assert_eq!(forge.compose("river", "", ""), "River");
        assert_eq!(forge.compose("river", "AFON", ""), "Afon");
        assert_eq!(forge.compose("river", "", "Ea"), "Ea");
        assert_eq!(forge.compose("fort", "wald", "dun"), "Waldun");
        assert_eq!(forge.compose("fort", "Hall", "Lund"), "Halund");
        assert_eq!(forge.compose("fort", "blodmoor", "skogrheim"), "Blodmorskogrheim");
    }

    #[test]
    fn test_hyphenated_compounds() {
        let mut forge = NameForge::new();
        forge.set_hyphenate_long(true);
        assert_eq!(forge.compose("fort", "blodmoor", "skogrheim"), "Blodmor-skogrheim");
        assert_eq!(forge.compose("fort", "wald", "dun"), "Waldun");
    }

    #[test]
    fn test_latinized_output() {
        let repo = repo_from(r#"{"sun": {"ar": ["شمس"]}}"#);
        let recipe = blend(&[("ar", 1.0)]);
        let mut forge = NameForge::new();

        assert_eq!(forge.forge(&repo, "sun", &recipe, "", None), "شمسشمس");
        forge.set_latinize_output(true);
        assert_eq!(forge.forge(&repo, "sun", &recipe, "", None), "Shmsshms");
    }

    #[test]
    fn test_non_deterministic_mode_still_names() {
        let repo = forest_repo();
        let recipe = blend(&[("ang", 1.0), ("non", 1.0)]);
        let mut forge = NameForge::new();
        forge.set_deterministic_mode(false);
        for _ in 0..10 {
            let name = forge.forge(&repo, "forest", &recipe, "", None);
            assert!(FOREST_NAMES.contains(&name.as_str()), "unexpected name '{}'", name);
        }
    }

    #[test]
    fn test_forge_many_matches_single_calls() {
        let repo = forest_repo();
        let recipe = blend(&[("ang", 1.0), ("non", 1.0)]);
        let mut forge = NameForge::new();

        let names = forge.forge_many(&repo, "forest", &recipe, &["marsh", "coast"]);
        assert_eq!(names.len(), 2);
        assert_eq!(names[0], forge.forge(&repo, "forest", &recipe, "marsh", None));
        assert_eq!(names[1], forge.forge(&repo, "forest", &recipe, "coast", None));
    }

    #[test]
    fn test_theme_names() {
        let repo = repo_from(r#"{"dataset": "thematic", "themes": {"grief": ["sorh"], "void": []}}"#);
        let mut forge = NameForge::new();
        assert_eq!(forge.theme_name(&repo, "grief", None), "Sorhsorh");
        assert_eq!(forge.theme_name(&repo, "void", None), "Void");
        assert_eq!(forge.theme_name(&repo, "missing", Some(3)), "Missing");
    }
}
