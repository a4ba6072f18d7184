//! Tokens and sentence spans over normalized text.
//!
//! The extractor only needs stable byte offsets and sentence ranges, so the
//! segmenter sits behind a trait. `UnicodeSegmenter` is the default: UAX-29
//! word and sentence boundaries, whitespace dropped, punctuation kept as
//! tokens, contractions (`can't`, `i'm`) kept whole.

use unicode_segmentation::UnicodeSegmentation;

use super::lemma::lemmatize;

/// One token of the normalized text. Read-only to the matchers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub lower: String,
    pub lemma: String,
    /// Byte offset into the normalized text.
    pub start: usize,
}

impl Token {
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }
}

/// Token index range `[start, end)` of one sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sentence {
    pub start: usize,
    pub end: usize,
}

impl Sentence {
    pub fn contains(&self, token_index: usize) -> bool {
        self.start <= token_index && token_index < self.end
    }
}

/// Segmenter output, owning the text it indexes.
#[derive(Debug, Clone, Default)]
pub struct Segmentation {
    pub text: String,
    pub tokens: Vec<Token>,
    pub sentences: Vec<Sentence>,
}

impl Segmentation {
    /// Source text covered by tokens `[start, end)`.
    pub fn span_text(&self, start: usize, end: usize) -> &str {
        if start >= end || end > self.tokens.len() {
            return "";
        }
        &self.text[self.tokens[start].start..self.tokens[end - 1].end()]
    }

    /// Sentence enclosing the given token.
    pub fn sentence_of(&self, token_index: usize) -> Option<&Sentence> {
        self.sentences.iter().find(|s| s.contains(token_index))
    }

    pub fn sentence_text(&self, sentence: &Sentence) -> &str {
        self.span_text(sentence.start, sentence.end)
    }

    /// Replace every lemma with the token's lowercase form.
    pub fn without_lemmas(mut self) -> Self {
        for token in &mut self.tokens {
            token.lemma.clone_from(&token.lower);
        }
        self
    }
}

/// Produces tokens and sentence spans.
pub trait Segmenter: Send + Sync {
    fn segment(&self, text: &str) -> Segmentation;
}

/// UAX-29 segmenter with rule-based lemmas.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeSegmenter;

impl UnicodeSegmenter {
    pub fn new() -> Self {
        Self
    }
}

impl Segmenter for UnicodeSegmenter {
    fn segment(&self, text: &str) -> Segmentation {
        let tokens: Vec<Token> = text
            .split_word_bound_indices()
            .filter(|(_, word)| !word.chars().all(char::is_whitespace))
            .map(|(start, word)| {
                let lower = word.to_lowercase();
                let lemma = lemmatize(&lower);
                Token {
                    text: word.to_string(),
                    lower,
                    lemma,
                    start,
                }
            })
            .collect();

        let mut sentences = Vec::new();
        let mut cursor = 0;
        for (offset, sentence) in text.split_sentence_bound_indices() {
            let limit = offset + sentence.len();
            let first = cursor;
            while cursor < tokens.len() && tokens[cursor].start < limit {
                cursor += 1;
            }
            if cursor > first {
                sentences.push(Sentence {
                    start: first,
                    end: cursor,
                });
            }
        }

        Segmentation {
            text: text.to_string(),
            tokens,
            sentences,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lowers(seg: &Segmentation) -> Vec<&str> {
        seg.tokens.iter().map(|t| t.lower.as_str()).collect()
    }

    #[test]
    fn empty_text_has_no_tokens_or_sentences() {
        let seg = UnicodeSegmenter::new().segment("");
        assert!(seg.tokens.is_empty());
        assert!(seg.sentences.is_empty());
        assert_eq!(seg.span_text(0, 0), "");
    }

    #[test]
    fn contractions_stay_whole_and_punctuation_splits() {
        let seg = UnicodeSegmenter::new().segment("I can't sleep, I'm tired.");
        assert_eq!(lowers(&seg), vec!["i", "can't", "sleep", ",", "i'm", "tired", "."]);
    }

    #[test]
    fn offsets_point_into_text() {
        let text = "I felt hopeless today";
        let seg = UnicodeSegmenter::new().segment(text);
        for token in &seg.tokens {
            assert_eq!(&text[token.start..token.end()], token.text);
        }
        assert_eq!(seg.span_text(1, 3), "felt hopeless");
    }

    #[test]
    fn lemmas_are_attached() {
        let seg = UnicodeSegmenter::new().segment("I felt sad and was crying");
        let lemmas: Vec<&str> = seg.tokens.iter().map(|t| t.lemma.as_str()).collect();
        assert_eq!(lemmas, vec!["i", "feel", "sad", "and", "be", "cry"]);

        let seg = UnicodeSegmenter::new().segment("I'm sad");
        assert_eq!(seg.tokens[0].lower, "i'm");
        assert_eq!(seg.tokens[0].lemma, "be");
    }

    #[test]
    fn sentences_cover_token_ranges() {
        let seg = UnicodeSegmenter::new().segment("I feel sad. I can't sleep!");
        assert_eq!(seg.tokens.len(), 8);
        assert_eq!(seg.sentences.len(), 2);
        assert_eq!(seg.sentences[0], Sentence { start: 0, end: 4 });
        assert_eq!(seg.sentences[1], Sentence { start: 4, end: 8 });
        assert_eq!(seg.sentence_text(&seg.sentences[0]), "I feel sad.");
        assert_eq!(seg.sentence_text(&seg.sentences[1]), "I can't sleep!");
        assert_eq!(seg.sentence_of(6), Some(&seg.sentences[1]));
        assert_eq!(seg.sentence_of(99), None);
    }

    #[test]
    fn without_lemmas_copies_lowercase_form() {
        let seg = UnicodeSegmenter::new().segment("Felt").without_lemmas();
        assert_eq!(seg.tokens[0].lemma, "felt");
    }
}
