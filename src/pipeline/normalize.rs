use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use unicode_normalization::char::{decompose_compatible, is_combining_mark};

const FRACTION_SLASH: char = '\u{2044}';

/// Canonical form used by every downstream stage.
///
/// Transliterates to ASCII (accents stripped via NFKD, typographic quotes and
/// dashes mapped to their ASCII counterparts, Greek and Cyrillic letters
/// romanized, vulgar fractions spelled `1/2` with a space on each side,
/// anything else non-ASCII dropped), collapses whitespace runs to one space
/// and trims. Empty in, empty out.
pub fn normalize(raw: &str) -> String {
    let mut folded = String::with_capacity(raw.len());
    let mut decomposed = String::new();

    for c in raw.chars() {
        if c.is_ascii() {
            fold_char(&mut folded, c);
            continue;
        }

        decomposed.clear();
        decompose_compatible(c, |d| decomposed.push(d));

        // 1½ -> "1 1/2", not "11/2".
        let fraction = decomposed.contains(FRACTION_SLASH);
        if fraction {
            folded.push(' ');
        }
        for d in decomposed.chars() {
            fold_char(&mut folded, d);
        }
        if fraction {
            folded.push(' ');
        }
    }

    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn fold_char(out: &mut String, c: char) {
    if c.is_ascii() {
        if !c.is_ascii_control() || c.is_ascii_whitespace() {
            out.push(c);
        }
    } else if is_combining_mark(c) {
        // accents
    } else if c.is_whitespace() {
        out.push(' ');
    } else if let Some(ascii) = transliterate(c) {
        out.push_str(ascii);
    } else if let Some(ascii) = romanize(c) {
        out.push_str(&ascii);
    }
}

/// ASCII replacements for symbols and Latin letters NFKD leaves non-ASCII.
fn transliterate(c: char) -> Option<&'static str> {
    let ascii = match c {
        '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' | '\u{2032}' | '\u{00B4}' => "'",
        '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' | '\u{00AB}' | '\u{00BB}' | '\u{2033}' => "\"",
        '\u{2010}'..='\u{2015}' | '\u{2212}' => "-",
        FRACTION_SLASH | '\u{2215}' => "/",
        '\u{2026}' => "...",
        '\u{2022}' | '\u{00B7}' => "*",
        'ß' => "ss",
        'æ' => "ae",
        'Æ' => "AE",
        'œ' => "oe",
        'Œ' => "OE",
        'ø' => "o",
        'Ø' => "O",
        'ł' => "l",
        'Ł' => "L",
        'đ' | 'ð' => "d",
        'Đ' | 'Ð' => "D",
        'þ' => "th",
        'Þ' => "TH",
        'ı' => "i",
        _ => return None,
    };
    Some(ascii)
}

/// Greek and Cyrillic letters, case preserved on the first ASCII letter.
///
/// Accented forms never reach this point: NFKD has already split off the
/// accent (`ά` -> `α`, `й` -> `и`).
fn romanize(c: char) -> Option<String> {
    let lower = c.to_lowercase().next()?;
    let ascii = match lower {
        // Greek
        'α' => "a",
        'β' => "b",
        'γ' => "g",
        'δ' => "d",
        'ε' => "e",
        'ζ' => "z",
        'η' => "e",
        'θ' => "th",
        'ι' => "i",
        'κ' => "k",
        'λ' => "l",
        'μ' => "m",
        'ν' => "n",
        'ξ' => "x",
        'ο' => "o",
        'π' => "p",
        'ρ' => "r",
        'σ' | 'ς' => "s",
        'τ' => "t",
        'υ' => "u",
        'φ' => "ph",
        'χ' => "kh",
        'ψ' => "ps",
        'ω' => "o",
        // Cyrillic
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' | 'э' => "e",
        'ж' => "zh",
        'з' => "z",
        'и' | 'і' => "i",
        'ї' => "yi",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "kh",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "shch",
        'ы' => "y",
        'ъ' | 'ь' => "",
        'ю' => "iu",
        'я' => "ia",
        'є' => "ie",
        _ => return None,
    };

    if !c.is_uppercase() {
        return Some(ascii.to_string());
    }
    let mut chars = ascii.chars();
    Some(match chars.next() {
        Some(first) => format!("{}{}", first.to_ascii_uppercase(), chars.as_str()),
        None => String::new(),
    })
}

/// Optional caller-side preprocessing, applied before `normalize`.
///
/// The engine normalizes regardless of these settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreprocessingOptions {
    #[serde(default)]
    pub remove_punctuation: bool,
    #[serde(default)]
    pub lowercase: bool,
    /// When false, every token's lemma is its lowercase form.
    #[serde(default = "default_true")]
    pub lemmatize: bool,
}

fn default_true() -> bool {
    true
}

impl Default for PreprocessingOptions {
    fn default() -> Self {
        Self {
            remove_punctuation: false,
            lowercase: false,
            lemmatize: true,
        }
    }
}

impl PreprocessingOptions {
    pub fn apply(&self, raw: &str) -> String {
        static PUNCTUATION: LazyLock<Regex> = LazyLock::new(|| {
            // Apostrophes are kept so contractions survive.
            Regex::new(r"[^\w\s'\u{2018}\u{2019}]").expect("Invalid punctuation regex")
        });

        let mut text = raw.to_string();
        if self.remove_punctuation {
            text = PUNCTUATION.replace_all(&text, " ").into_owned();
        }
        if self.lowercase {
            text = text.to_lowercase();
        }
        text
    }
}
