//! Name synthesis from weighted language blends.
//!
//! The forge draws two languages from a blend, picks a lemma for each from a
//! seed word's pool, and fuses them into one name. Generation is seeded from
//! the seed word and region so the same inputs always give the same name.

pub mod generator;
pub mod latinize;
pub mod phonotactics;
pub mod seeding;

pub use generator::{weighted_languages, repeat_count, NameForge};
pub use latinize::latinize;
pub use phonotactics::{capitalize, compound, polish};
pub use seeding::stable_hash;
