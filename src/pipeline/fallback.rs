//! Keyword fallback for symptoms the structured matchers missed.

use super::aggregate::{symptom_result, DetectionLedger};
use super::negation::phrase_negated;
use crate::catalog::SymptomCatalog;
use crate::models::enums::MatchType;
use crate::models::result::SymptomResult;

/// Substring-scan keywords of every unclaimed symptom.
///
/// A symptom is emitted when at least one keyword occurs and is not negated
/// by the string-only check; all surviving keywords become its evidence.
/// Emitted ids are claimed in `ledger`.
pub fn keyword_fallback(
    text: &str,
    catalog: &SymptomCatalog,
    ledger: &mut DetectionLedger,
) -> Vec<SymptomResult> {
    let lower = text.to_lowercase();
    let mut results = Vec::new();

    for def in catalog.definitions() {
        if ledger.contains(&def.symptom_id) {
            continue;
        }

        let surviving: Vec<String> = def
            .keywords
            .iter()
            .filter(|kw| lower.contains(kw.as_str()) && !phrase_negated(&lower, kw))
            .cloned()
            .collect();

        if surviving.is_empty() || !ledger.claim(&def.symptom_id) {
            continue;
        }

        tracing::debug!(
            symptom_id = %def.symptom_id,
            keywords = surviving.len(),
            "Keyword fallback hit"
        );
        results.push(symptom_result(def, MatchType::Keyword, surviving, None));
    }

    results
}
