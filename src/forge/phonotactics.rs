//! Compound joining and phonotactic clean-up.
//!
//! Compounds are fused at the boundary ("wald" + "dun" → "waldun"), then
//! polished: runs of the same consonant collapse everywhere, and runs of the
//! same vowel collapse away from the word edges, so "aa" openings and
//! "ee" endings survive while "skoggr" becomes "skogr".

const CONSONANTS: &str = "bcdfghjklmnpqrstvwxyz";
const VOWELS: &str = "aeiou";

fn is_consonant(c: char) -> bool {
    c.is_ascii_alphabetic() && CONSONANTS.contains(c.to_ascii_lowercase())
}

fn is_vowel(c: char) -> bool {
    c.is_ascii_alphabetic() && VOWELS.contains(c.to_ascii_lowercase())
}

fn same_letter(a: char, b: char) -> bool {
    a.to_ascii_lowercase() == b.to_ascii_lowercase()
}

/// Uppercase the first character, leaving the rest untouched.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Join two lemmas into a raw (unpolished, lower-case) compound.
///
/// A character shared across the boundary is written once. With a
/// `hyphen_threshold`, compounds longer than the threshold are joined with
/// a hyphen instead.
pub fn compound(first: &str, second: &str, hyphen_threshold: Option<usize>) -> String {
    let first = first.to_lowercase();
    let second = second.to_lowercase();

    let elide = match (first.chars().last(), second.chars().next()) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    };
    let tail = if elide {
        let mut rest = second.chars();
        rest.next();
        rest.as_str()
    } else {
        second.as_str()
    };

    let joined_len = first.chars().count() + tail.chars().count();
    match hyphen_threshold {
        Some(limit) if joined_len > limit => format!("{}-{}", first, second),
        _ => format!("{}{}", first, tail),
    }
}

/// Collapse doubled consonants, then doubled interior vowels.
///
/// Each pass re-checks the same position after a collapse, so longer runs
/// shrink to a single letter. Applying this twice is a no-op.
pub fn polish(raw: &str) -> String {
    let mut chars: Vec<char> = raw.chars().collect();

    let mut i = 0;
    while i + 1 < chars.len() {
        if is_consonant(chars[i]) && same_letter(chars[i], chars[i + 1]) {
            chars.remove(i + 1);
        } else {
            i += 1;
        }
    }

    // Pairs must lie strictly between the first and last character.
    let mut i = 1;
    while i + 2 < chars.len() {
        if is_vowel(chars[i]) && same_letter(chars[i], chars[i + 1]) {
            chars.remove(i + 1);
        } else {
            i += 1;
        }
    }

    chars.into_iter().collect()
}
