//! ASCII transliteration for Arabic, Hebrew, and accented Latin letters.
//!
//! Every mapped character becomes an ASCII string (sometimes a digraph, such
//! as "sh" for ش or "ae" for æ). Characters without an entry pass through.
//! Upper-case Latin letters map through their lower-case entry and are
//! re-capitalized.

use super::phonotactics::capitalize;

/// Transliterate `text` character by character.
pub fn latinize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if let Some(ascii) = transliterate(c) {
            out.push_str(ascii);
            continue;
        }
        let lower = single_lowercase(c);
        match lower.and_then(latin) {
            Some(ascii) => out.push_str(&capitalize(ascii)),
            None => out.push(c),
        }
    }
    out
}

/// Lower-case form of an upper-case letter, if it is a single character.
fn single_lowercase(c: char) -> Option<char> {
    if !c.is_uppercase() {
        return None;
    }
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => Some(l),
        _ => None,
    }
}

/// Look up a character in the per-script tables.
pub fn transliterate(c: char) -> Option<&'static str> {
    match c as u32 {
        0x00C0..=0x024F | 0x1E00..=0x1EFF => latin(c),
        0x0600..=0x06FF => arabic(c),
        0x0590..=0x05FF => hebrew(c),
        _ => None,
    }
}

fn latin(c: char) -> Option<&'static str> {
    let ascii = match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' | 'ǎ' | 'ạ' => "a",
        'æ' | 'ǣ' | 'ǽ' => "ae",
        'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' => "c",
        'ď' | 'đ' | 'ḍ' => "d",
        'ð' => "dh",
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' | 'ẹ' => "e",
        'ĝ' | 'ğ' | 'ġ' | 'ģ' => "g",
        'ĥ' | 'ħ' | 'ḥ' => "h",
        'ì' | 'í' | 'î' | 'ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' | 'ı' | 'ǐ' | 'ị' => "i",
        'ĵ' => "j",
        'ķ' => "k",
        'ĺ' | 'ļ' | 'ľ' | 'ŀ' | 'ł' => "l",
        'ñ' | 'ń' | 'ņ' | 'ň' => "n",
        'ŋ' => "ng",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ŏ' | 'ő' | 'ǒ' | 'ǫ' | 'ọ' => "o",
        'œ' => "oe",
        'ŕ' | 'ŗ' | 'ř' => "r",
        'ś' | 'ŝ' | 'ş' | 'š' | 'ș' | 'ṣ' => "s",
        'ß' => "ss",
        'ţ' | 'ť' | 'ŧ' | 'ț' | 'ṭ' => "t",
        'þ' => "th",
        'ù' | 'ú' | 'û' | 'ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' | 'ǔ' | 'ụ' => "u",
        'ŵ' | 'ẁ' | 'ẃ' | 'ẅ' | 'ƿ' => "w",
        'ý' | 'ÿ' | 'ŷ' | 'ỳ' | 'ȝ' => "y",
        'ź' | 'ż' | 'ž' | 'ẓ' => "z",
        _ => return None,
    };
    Some(ascii)
}

fn arabic(c: char) -> Option<&'static str> {
    let ascii = match c {
        'ا' | 'أ' | 'ى' | 'ة' => "a",
        'إ' => "i",
        'آ' => "aa",
        'ب' => "b",
        'ت' | 'ط' => "t",
        'ث' => "th",
        'ج' => "j",
        'ح' | 'ه' => "h",
        'خ' => "kh",
        'د' | 'ض' => "d",
        'ذ' => "dh",
        'ر' => "r",
        'ز' | 'ظ' => "z",
        'س' | 'ص' => "s",
        'ش' => "sh",
        'ع' => "a",
        'غ' => "gh",
        'ف' => "f",
        'ق' => "q",
        'ك' => "k",
        'ل' => "l",
        'م' => "m",
        'ن' => "n",
        'و' | 'ؤ' => "w",
        'ي' | 'ئ' => "y",
        // Hamza, tatweel, sukun, shadda.
        'ء' | 'ـ' | '\u{0652}' | '\u{0651}' => "",
        // Short vowels and nunation.
        '\u{064E}' | '\u{0670}' => "a",
        '\u{064F}' => "u",
        '\u{0650}' => "i",
        '\u{064B}' => "an",
        '\u{064C}' => "un",
        '\u{064D}' => "in",
        _ => return None,
    };
    Some(ascii)
}

fn hebrew(c: char) -> Option<&'static str> {
    let ascii = match c {
        'א' | 'ע' => "a",
        'ב' => "v",
        'ג' => "g",
        'ד' => "d",
        'ה' => "h",
        'ו' => "v",
        'ז' => "z",
        'ח' => "ch",
        'ט' | 'ת' => "t",
        'י' => "y",
        'כ' | 'ך' | 'ק' => "k",
        'ל' => "l",
        'מ' | 'ם' => "m",
        'נ' | 'ן' => "n",
        'ס' => "s",
        'פ' | 'ף' => "f",
        'צ' | 'ץ' => "ts",
        'ר' => "r",
        'ש' => "sh",
        // Niqqud vowel points.
        '\u{05B4}' => "i",
        '\u{05B5}' | '\u{05B6}' => "e",
        '\u{05B7}' | '\u{05B8}' => "a",
        '\u{05B1}' => "e",
        '\u{05B2}' => "a",
        '\u{05B3}' | '\u{05B9}' | '\u{05BA}' | '\u{05C7}' => "o",
        '\u{05BB}' => "u",
        // Sheva, dagesh, meteg, rafe, shin/sin dots.
        '\u{05B0}' | '\u{05BC}' | '\u{05BD}' | '\u{05BF}' | '\u{05C1}' | '\u{05C2}' => "",
        _ => return None,
    };
    Some(ascii)
}
