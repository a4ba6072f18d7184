//! Rule-based English lemmatizer.
//!
//! An irregular-form table first (including `be` contractions such as
//! `i'm`, which the segmenter keeps whole), then suffix stripping for
//! `-ies`, `-es`, `-s`, `-ed` and `-ing` with consonant-doubling and
//! silent-`e` repair.
//! Input must already be lowercase.

/// Irregular inflections → base form.
const IRREGULAR: &[(&str, &str)] = &[
    ("am", "be"), ("is", "be"), ("are", "be"), ("was", "be"), ("were", "be"),
    ("been", "be"), ("being", "be"),
    ("i'm", "be"), ("you're", "be"), ("we're", "be"), ("they're", "be"),
    ("he's", "be"), ("she's", "be"), ("it's", "be"),
    ("has", "have"), ("had", "have"), ("having", "have"),
    ("does", "do"), ("did", "do"), ("done", "do"), ("doing", "do"),
    ("felt", "feel"),
    ("woke", "wake"), ("woken", "wake"),
    ("slept", "sleep"),
    ("lost", "lose"),
    ("ate", "eat"), ("eaten", "eat"),
    ("went", "go"), ("gone", "go"), ("goes", "go"),
    ("thought", "think"),
    ("got", "get"), ("gotten", "get"),
    ("made", "make"),
    ("kept", "keep"),
    ("left", "leave"),
    ("said", "say"),
    ("found", "find"),
    ("took", "take"), ("taken", "take"),
    ("gave", "give"), ("given", "give"),
    ("came", "come"),
    ("saw", "see"), ("seen", "see"),
    ("told", "tell"),
    ("knew", "know"), ("known", "know"),
    ("began", "begin"), ("begun", "begin"),
    ("lay", "lie"), ("lying", "lie"),
    ("dying", "die"),
    ("cried", "cry"),
    ("quit", "quit"),
];

/// Words that look inflected but are not.
const INVARIANT: &[&str] = &[
    "nothing", "anything", "something", "everything", "thing", "morning",
    "evening", "during", "ceiling", "king", "ring", "sing", "bring", "spring",
    "string", "swing", "wing", "sibling", "this", "his", "its", "us", "yes",
    "always", "sometimes", "less", "unless", "bless", "various", "anxious",
    "nervous", "serious", "hopeless", "worthless", "useless", "restless",
    "sleepless", "pointless", "helpless", "numbness", "sadness", "illness",
    "stress", "focus", "bus", "tired", "bed", "need", "red", "shed", "sped",
    "indeed", "naked", "wicked", "hundred",
];

/// Base form of a lowercase word.
pub fn lemmatize(lower: &str) -> String {
    if let Some((_, base)) = IRREGULAR.iter().find(|(form, _)| *form == lower) {
        return (*base).to_string();
    }
    if INVARIANT.contains(&lower) || !lower.chars().all(|c| c.is_ascii_alphabetic()) {
        return lower.to_string();
    }

    if let Some(stem) = lower.strip_suffix("ies") {
        if stem.len() >= 2 {
            return format!("{stem}y");
        }
    }
    if let Some(stem) = lower.strip_suffix("ing") {
        if let Some(base) = repair_stem(stem) {
            return base;
        }
    }
    if let Some(stem) = lower.strip_suffix("ed") {
        if !lower.ends_with("eed") {
            if let Some(base) = repair_stem(stem) {
                return base;
            }
        }
    }
    if let Some(stem) = lower.strip_suffix("es") {
        if ["s", "x", "z", "ch", "sh"].iter().any(|s| stem.ends_with(s)) && stem.len() >= 2 {
            return stem.to_string();
        }
    }
    if let Some(stem) = lower.strip_suffix('s') {
        if stem.len() >= 2 && !stem.ends_with('s') && !stem.ends_with('u') && !stem.ends_with('i') {
            return stem.to_string();
        }
    }

    lower.to_string()
}

/// Rebuild the base form after removing `-ing` / `-ed`.
fn repair_stem(stem: &str) -> Option<String> {
    if stem.len() < 2 || !stem.chars().any(|c| is_vowel(c) || c == 'y') {
        return None;
    }

    let chars: Vec<char> = stem.chars().collect();
    let n = chars.len();
    let last = chars[n - 1];
    let prev = chars[n - 2];

    // stopped → stop, running → run
    if last == prev && !is_vowel(last) && !matches!(last, 'l' | 's' | 'z' | 'f') {
        return Some(chars[..n - 1].iter().collect());
    }

    // waking → wake, excited → excite, caring → care
    if n >= 3 && ends_cvc(&chars) && !matches!(last, 'w' | 'x' | 'y') {
        let restore = n <= 3 || !matches!(last, 'n' | 'r' | 'l');
        if restore {
            return Some(format!("{stem}e"));
        }
    }

    Some(stem.to_string())
}

fn ends_cvc(chars: &[char]) -> bool {
    let n = chars.len();
    !is_vowel(chars[n - 3]) && is_vowel(chars[n - 2]) && !is_vowel(chars[n - 1])
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}
