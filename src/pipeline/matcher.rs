//! Structured matchers over the token stream.
//!
//! Token patterns slide over every start position. Phrases go through one
//! Aho-Corasick automaton built over space-delimited lowercase token forms,
//! so a phrase only ever matches on token boundaries.

use aho_corasick::{AhoCorasick, AhoCorasickBuilder, MatchKind};

use super::segment::{Segmenter, Token};
use crate::catalog::{CatalogError, SymptomCatalog};
use crate::models::enums::MatchType;

/// Candidate match before negation filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchHit {
    /// Index into `SymptomCatalog::definitions()`.
    pub definition: usize,
    /// Token range `[start, end)`.
    pub start: usize,
    pub end: usize,
    pub match_type: MatchType,
}

fn sort_hits(hits: &mut [MatchHit]) {
    hits.sort_by_key(|h| (h.start, h.end, h.definition));
}

/// Every token-pattern match, ordered by start, end, then catalog order.
pub fn match_tokens(catalog: &SymptomCatalog, tokens: &[Token]) -> Vec<MatchHit> {
    let mut hits = Vec::new();
    for (definition, def) in catalog.definitions().iter().enumerate() {
        for pattern in &def.token_patterns {
            if pattern.len() > tokens.len() {
                continue;
            }
            for start in 0..=tokens.len() - pattern.len() {
                if pattern.matches_at(tokens, start) {
                    hits.push(MatchHit {
                        definition,
                        start,
                        end: start + pattern.len(),
                        match_type: MatchType::Token,
                    });
                }
            }
        }
    }
    sort_hits(&mut hits);
    hits
}

// ═══════════════════════════════════════════
// Phrase index
// ═══════════════════════════════════════════

#[derive(Debug)]
struct PhraseKey {
    token_len: usize,
    /// Definitions listing this phrase, in catalog order.
    owners: Vec<usize>,
}

/// Compiled phrase automaton. Built once per catalog, then read-only.
#[derive(Debug)]
pub struct PhraseIndex {
    automaton: Option<AhoCorasick>,
    keys: Vec<PhraseKey>,
}

impl PhraseIndex {
    /// Tokenize every catalog phrase with `segmenter` and compile the automaton.
    pub fn build<S: Segmenter + ?Sized>(
        catalog: &SymptomCatalog,
        segmenter: &S,
    ) -> Result<Self, CatalogError> {
        let mut patterns: Vec<String> = Vec::new();
        let mut keys: Vec<PhraseKey> = Vec::new();

        for (definition, def) in catalog.definitions().iter().enumerate() {
            for phrase in &def.phrases {
                let forms: Vec<String> = segmenter
                    .segment(phrase)
                    .tokens
                    .into_iter()
                    .map(|t| t.lower)
                    .collect();
                if forms.is_empty() {
                    continue;
                }

                let pattern = format!(" {} ", forms.join(" "));
                match patterns.iter().position(|p| *p == pattern) {
                    Some(existing) => {
                        if !keys[existing].owners.contains(&definition) {
                            keys[existing].owners.push(definition);
                        }
                    }
                    None => {
                        patterns.push(pattern);
                        keys.push(PhraseKey {
                            token_len: forms.len(),
                            owners: vec![definition],
                        });
                    }
                }
            }
        }

        if patterns.is_empty() {
            return Ok(Self {
                automaton: None,
                keys,
            });
        }

        let automaton = AhoCorasickBuilder::new()
            .match_kind(MatchKind::Standard)
            .build(&patterns)
            .map_err(|e| CatalogError::Configuration(format!("Failed to build phrase automaton: {e}")))?;

        tracing::debug!(phrases = patterns.len(), "Phrase automaton built");

        Ok(Self {
            automaton: Some(automaton),
            keys,
        })
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Every phrase occurrence, ordered by start, end, then catalog order.
    pub fn find(&self, tokens: &[Token]) -> Vec<MatchHit> {
        let automaton = match &self.automaton {
            Some(a) => a,
            None => return vec![],
        };
        if tokens.is_empty() {
            return vec![];
        }

        // Byte offset of the space preceding each token.
        let mut haystack = String::from(" ");
        let mut offsets = Vec::with_capacity(tokens.len());
        for token in tokens {
            offsets.push(haystack.len() - 1);
            haystack.push_str(&token.lower);
            haystack.push(' ');
        }

        let mut hits = Vec::new();
        for mat in automaton.find_overlapping_iter(&haystack) {
            let Ok(start) = offsets.binary_search(&mat.start()) else {
                continue;
            };
            let key = &self.keys[mat.pattern().as_usize()];
            for &definition in &key.owners {
                hits.push(MatchHit {
                    definition,
                    start,
                    end: start + key.token_len,
                    match_type: MatchType::Phrase,
                });
            }
        }
        sort_hits(&mut hits);
        hits
    }
}
