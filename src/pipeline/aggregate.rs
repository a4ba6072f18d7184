//! Negation filtering and first-wins deduplication of matcher hits.

use std::collections::HashSet;

use super::matcher::MatchHit;
use super::negation::is_negated;
use super::segment::Segmentation;
use crate::catalog::{SymptomCatalog, SymptomDefinition};
use crate::models::enums::MatchType;
use crate::models::result::SymptomResult;

/// Symptom ids already emitted in the current extraction.
///
/// Shared by every strategy of one call so the first claim per id wins.
#[derive(Debug, Default)]
pub struct DetectionLedger {
    detected: HashSet<String>,
}

impl DetectionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `symptom_id`; false if it was already claimed.
    pub fn claim(&mut self, symptom_id: &str) -> bool {
        if self.detected.contains(symptom_id) {
            return false;
        }
        self.detected.insert(symptom_id.to_string())
    }

    pub fn contains(&self, symptom_id: &str) -> bool {
        self.detected.contains(symptom_id)
    }

    pub fn len(&self) -> usize {
        self.detected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.detected.is_empty()
    }
}

pub(crate) fn symptom_result(
    def: &SymptomDefinition,
    match_type: MatchType,
    matched_phrases: Vec<String>,
    sentence_context: Option<String>,
) -> SymptomResult {
    SymptomResult {
        symptom_id: def.symptom_id.clone(),
        dsm5_code: def.dsm5_code,
        name: def.display_name.clone(),
        detected: true,
        confidence: match_type.confidence(),
        matched_phrases,
        sentence_context,
        is_negated: false,
        match_type,
    }
}

/// Turn matcher hits into results, in hit order.
///
/// Negated hits are dropped before they can claim their symptom, so a later
/// clean occurrence of the same symptom still gets through.
pub fn collect_hits<I>(
    catalog: &SymptomCatalog,
    segmentation: &Segmentation,
    hits: I,
    ledger: &mut DetectionLedger,
) -> Vec<SymptomResult>
where
    I: IntoIterator<Item = MatchHit>,
{
    let mut results = Vec::new();

    for hit in hits {
        let Some(def) = catalog.definitions().get(hit.definition) else {
            continue;
        };

        if is_negated(&segmentation.tokens, hit.start, hit.end) {
            tracing::debug!(
                symptom_id = %def.symptom_id,
                match_type = %hit.match_type,
                start = hit.start,
                "Negated hit dropped"
            );
            continue;
        }

        if !ledger.claim(&def.symptom_id) {
            tracing::debug!(
                symptom_id = %def.symptom_id,
                match_type = %hit.match_type,
                "Duplicate hit suppressed"
            );
            continue;
        }

        let matched = segmentation.span_text(hit.start, hit.end).to_lowercase();
        let sentence_context = segmentation
            .sentence_of(hit.start)
            .map(|s| segmentation.sentence_text(s).to_string());

        results.push(symptom_result(def, hit.match_type, vec![matched], sentence_context));
    }

    results
}
