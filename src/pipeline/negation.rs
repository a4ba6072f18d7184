//! Negation scoping for matcher hits and keyword fallback.

use super::segment::Token;
use crate::catalog::patterns::{CONTRAST_TERMS, NEGATION_TERMS};

/// Tokens before a hit searched for a negation term.
pub const NEGATION_WINDOW: usize = 3;
/// Tokens past a hit's end searched for a contrast conjunction.
pub const CONTRAST_LOOKAHEAD: usize = 3;
/// Characters before a keyword inspected by the string-only check.
pub const KEYWORD_CONTEXT_CHARS: usize = 50;
/// Trailing words of that context compared against the negation terms.
pub const KEYWORD_CONTEXT_WORDS: usize = 5;

fn is_negation_term(word: &str) -> bool {
    NEGATION_TERMS.contains(&word)
}

fn is_contrast_term(word: &str) -> bool {
    CONTRAST_TERMS.contains(&word)
}

/// Whether the hit over tokens `[start, end)` is negated by its context.
///
/// A negation term in the `NEGATION_WINDOW` tokens before `start` negates
/// the hit unless a contrast term follows it, up to `CONTRAST_LOOKAHEAD`
/// tokens past `end`. A negation term strictly inside the span (not its
/// first or last token) negates unconditionally. Edge tokens belong to the
/// pattern itself, as in `[no][energy]` or `[can't][sleep]`.
pub fn is_negated(tokens: &[Token], start: usize, end: usize) -> bool {
    let end = end.min(tokens.len());
    let start = start.min(end);
    let lookahead_end = (end + CONTRAST_LOOKAHEAD).min(tokens.len());

    for i in start.saturating_sub(NEGATION_WINDOW)..start {
        if !is_negation_term(&tokens[i].lower) {
            continue;
        }
        let reversed = tokens[i + 1..lookahead_end]
            .iter()
            .any(|t| is_contrast_term(&t.lower));
        if !reversed {
            return true;
        }
    }

    if end > start + 2 {
        return tokens[start + 1..end - 1]
            .iter()
            .any(|t| is_negation_term(&t.lower));
    }
    false
}

/// String-only negation check for keyword hits.
///
/// Finds the first case-insensitive occurrence of `phrase` and looks for a
/// negation term among the last `KEYWORD_CONTEXT_WORDS` words of the
/// `KEYWORD_CONTEXT_CHARS` characters before it. Absent phrases are not negated.
pub fn phrase_negated(text: &str, phrase: &str) -> bool {
    let text = text.to_lowercase();
    let phrase = phrase.to_lowercase();
    let Some(pos) = text.find(&phrase) else {
        return false;
    };

    let mut from = pos.saturating_sub(KEYWORD_CONTEXT_CHARS);
    while !text.is_char_boundary(from) {
        from += 1;
    }

    let words: Vec<&str> = text[from..pos].split_whitespace().collect();
    words
        .iter()
        .rev()
        .take(KEYWORD_CONTEXT_WORDS)
        .any(|w| is_negation_term(w))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::segment::{Segmenter, UnicodeSegmenter};

    fn tokens(text: &str) -> Vec<Token> {
        UnicodeSegmenter::new().segment(text).tokens
    }

    /// Token index of the first token whose lowercase form is `word`.
    fn at(tokens: &[Token], word: &str) -> usize {
        tokens.iter().position(|t| t.lower == word).unwrap()
    }

    // =================================================================
    // TOKEN WINDOW
    // =================================================================

    #[test]
    fn preceding_negation_negates() {
        let toks = tokens("I am not sad");
        let s = at(&toks, "sad");
        assert!(is_negated(&toks, s, s + 1));
    }

    #[test]
    fn negation_outside_window_ignored() {
        let toks = tokens("not that I would say I feel sad");
        let s = at(&toks, "feel");
        assert!(!is_negated(&toks, s, s + 2));
    }

    #[test]
    fn window_reaches_exactly_three_tokens() {
        let toks = tokens("never once did I feel sad");
        let s = at(&toks, "feel");
        // "never" is four tokens back.
        assert!(!is_negated(&toks, s, s + 2));

        let toks = tokens("never did I feel sad");
        let s = at(&toks, "feel");
        assert!(is_negated(&toks, s, s + 2));
    }

    #[test]
    fn contrast_after_negation_reverses_it() {
        let toks = tokens("I don't feel sad, but I do feel hopeless");
        let s = at(&toks, "feel");
        assert!(!is_negated(&toks, s, s + 2));
    }

    #[test]
    fn contrast_beyond_lookahead_does_not_reverse() {
        let toks = tokens("I don't feel sad at all really but fine");
        let s = at(&toks, "feel");
        assert!(is_negated(&toks, s, s + 2));
    }

    #[test]
    fn negation_term_at_pattern_edge_is_part_of_the_hit() {
        let toks = tokens("I have no energy");
        let s = at(&toks, "no");
        assert!(!is_negated(&toks, s, s + 2));
    }

    #[test]
    fn interior_negation_negates_without_override() {
        let toks = tokens("mood is not low but fine");
        // Synthetic three-token span with "is" in the middle is clean...
        assert!(!is_negated(&toks, 0, 3));
        // ...while a span containing "not" strictly inside is negated.
        assert!(is_negated(&toks, 1, 4));
    }

    #[test]
    fn hit_at_text_start_has_empty_window() {
        let toks = tokens("sad and tired");
        assert!(!is_negated(&toks, 0, 1));
    }

    // =================================================================
    // STRING FALLBACK
    // =================================================================

    #[test]
    fn phrase_negated_checks_preceding_words() {
        assert!(phrase_negated("I am not sad", "sad"));
        assert!(!phrase_negated("I am sad", "sad"));
        assert!(phrase_negated("I have NO appetite", "appetite"));
    }

    #[test]
    fn phrase_negated_limits_to_five_words() {
        assert!(!phrase_negated("not one two three four five sad", "sad"));
        assert!(phrase_negated("not one two three four sad", "sad"));
    }

    #[test]
    fn phrase_negated_limits_to_fifty_chars() {
        // "not" is two words back but 51 characters away.
        let far = format!("not {} sad", "x".repeat(50));
        assert!(!phrase_negated(&far, "sad"));

        let near = format!("not {} sad", "x".repeat(40));
        assert!(phrase_negated(&near, "sad"));
    }

    #[test]
    fn phrase_negated_uses_first_occurrence_only() {
        assert!(phrase_negated("not sad today, sad tomorrow", "sad"));
    }

    #[test]
    fn absent_phrase_is_not_negated() {
        assert!(!phrase_negated("I am fine", "sad"));
    }

    #[test]
    fn punctuation_glued_to_negation_hides_it() {
        assert!(!phrase_negated("no, sad", "sad"));
    }
}
