//! Symptom extraction orchestrator.
//!
//! normalize → segment → token patterns → phrases → negation filter and
//! dedupe → keyword fallback → metadata. The catalog and phrase automaton are
//! built once in the constructor and only read afterwards, so one extractor
//! can serve concurrent calls.

use std::sync::Arc;
use std::time::Instant;

use super::aggregate::{collect_hits, DetectionLedger};
use super::fallback::keyword_fallback;
use super::matcher::{match_tokens, PhraseIndex};
use super::metadata::extract_metadata;
use super::normalize::{normalize, PreprocessingOptions};
use super::segment::{Segmenter, UnicodeSegmenter};
use crate::catalog::{CatalogError, CatalogStats, SymptomCatalog};
use crate::models::result::{AnalysisReport, AnalysisResult};

pub struct SymptomExtractor<S: Segmenter = UnicodeSegmenter> {
    catalog: Arc<SymptomCatalog>,
    phrases: PhraseIndex,
    segmenter: S,
}

impl SymptomExtractor<UnicodeSegmenter> {
    pub fn new(catalog: Arc<SymptomCatalog>) -> Result<Self, CatalogError> {
        Self::with_segmenter(catalog, UnicodeSegmenter::new())
    }

    /// Extractor over the built-in DSM-5 A1–A9 catalog.
    pub fn with_builtin_catalog() -> Result<Self, CatalogError> {
        Self::new(Arc::new(SymptomCatalog::builtin()?))
    }
}

impl<S: Segmenter> SymptomExtractor<S> {
    pub fn with_segmenter(catalog: Arc<SymptomCatalog>, segmenter: S) -> Result<Self, CatalogError> {
        let phrases = PhraseIndex::build(&catalog, &segmenter)?;
        Ok(Self {
            catalog,
            phrases,
            segmenter,
        })
    }

    pub fn catalog(&self) -> &SymptomCatalog {
        &self.catalog
    }

    /// Catalog counts, for readiness reporting.
    pub fn stats(&self) -> CatalogStats {
        self.catalog.stats()
    }

    /// Detect DSM-5 criteria and severity metadata in `text`.
    ///
    /// Total over string input: empty text yields an empty result with
    /// zero-valued metadata.
    pub fn extract(&self, text: &str) -> AnalysisResult {
        self.run(normalize(text), true)
    }

    /// `extract` after applying caller-side preprocessing.
    pub fn extract_with_options(&self, text: &str, options: &PreprocessingOptions) -> AnalysisResult {
        self.run(normalize(&options.apply(text)), options.lemmatize)
    }

    /// Extraction plus derived summary, as emitted at the boundary.
    pub fn analyze(&self, text: &str) -> AnalysisReport {
        AnalysisReport::from(self.extract(text))
    }

    fn run(&self, normalized: String, lemmatize: bool) -> AnalysisResult {
        let start = Instant::now();

        let mut segmentation = self.segmenter.segment(&normalized);
        if !lemmatize {
            segmentation = segmentation.without_lemmas();
        }

        let token_hits = match_tokens(&self.catalog, &segmentation.tokens);
        let phrase_hits = self.phrases.find(&segmentation.tokens);

        let mut ledger = DetectionLedger::new();
        let mut symptoms = collect_hits(
            &self.catalog,
            &segmentation,
            token_hits.into_iter().chain(phrase_hits),
            &mut ledger,
        );
        symptoms.extend(keyword_fallback(&segmentation.text, &self.catalog, &mut ledger));

        let metadata = extract_metadata(&segmentation);

        tracing::info!(
            tokens = metadata.token_count,
            symptoms = symptoms.len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "Symptom extraction complete"
        );

        AnalysisResult { symptoms, metadata }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::{Dsm5Code, ImpairmentSeverity, MatchType};

    fn extractor() -> SymptomExtractor {
        SymptomExtractor::with_builtin_catalog().unwrap()
    }

    fn ids(result: &AnalysisResult) -> Vec<&str> {
        result.symptoms.iter().map(|s| s.symptom_id.as_str()).collect()
    }

    const NARRATIVE: &str = "I have felt hopeless and empty for the past 3 weeks. \
        I can't sleep and have no energy at all. I don't enjoy anything anymore.";

    // =================================================================
    // END TO END
    // =================================================================

    #[test]
    fn narrative_detects_four_criteria() {
        let report = extractor().analyze(NARRATIVE);
        let result = &report.result;

        assert_eq!(
            ids(result),
            vec!["depressed_mood", "sleep_disturbance", "fatigue", "anhedonia"]
        );
        assert_eq!(
            report.summary.symptom_codes,
            vec![Dsm5Code::A1, Dsm5Code::A4, Dsm5Code::A6, Dsm5Code::A2]
        );
        assert_eq!(result.metadata.duration_days, 21);
        assert_eq!(result.metadata.sentence_count, 3);
        assert_eq!(result.metadata.token_count, 28);
        assert!(!report.summary.crisis_flag);
        assert!(report.summary.duration_specified);

        let mood = result.symptom("depressed_mood").unwrap();
        assert_eq!(mood.match_type, MatchType::Token);
        assert_eq!(mood.matched_phrases, vec!["felt hopeless"]);
        assert_eq!(
            mood.sentence_context.as_deref(),
            Some("I have felt hopeless and empty for the past 3 weeks.")
        );
        assert!(result.symptoms.iter().all(|s| s.detected && !s.is_negated));
    }

    #[test]
    fn extraction_is_idempotent() {
        let extractor = extractor();
        assert_eq!(extractor.extract(NARRATIVE), extractor.extract(NARRATIVE));
    }

    #[test]
    fn empty_input_yields_empty_result() {
        let extractor = extractor();
        assert_eq!(extractor.extract(""), AnalysisResult::default());
        assert_eq!(extractor.extract(" \n\t"), AnalysisResult::default());
    }

    #[test]
    fn typographic_apostrophes_are_normalized() {
        let result = extractor().extract("Lately I can\u{2019}t sleep at all");
        assert_eq!(ids(&result), vec!["sleep_disturbance"]);
        assert_eq!(result.symptoms[0].matched_phrases, vec!["can't sleep"]);
    }

    // =================================================================
    // NEGATION
    // =================================================================

    #[test]
    fn negated_only_occurrence_is_dropped() {
        let result = extractor().extract("I am not sad");
        assert!(!result.has_symptom("depressed_mood"));
        assert!(result.symptoms.is_empty());
    }

    #[test]
    fn clause_after_contrast_still_detected() {
        let result = extractor().extract("I am not sad, but I feel hopeless");
        let mood = result.symptom("depressed_mood").unwrap();
        assert_eq!(mood.matched_phrases, vec!["feel hopeless"]);
    }

    #[test]
    fn be_contraction_feeds_lemma_pattern() {
        let result = extractor().extract("Honestly I'm depressed");
        assert_eq!(ids(&result), vec!["depressed_mood"]);
        let mood = &result.symptoms[0];
        assert_eq!(mood.match_type, MatchType::Token);
        assert_eq!(mood.matched_phrases, vec!["i'm depressed"]);
    }

    #[test]
    fn negated_first_clause_spares_contracted_second_clause() {
        let result = extractor().extract("I'm not tired, but I'm sad.");
        assert_eq!(ids(&result), vec!["depressed_mood"]);
        let mood = &result.symptoms[0];
        assert_eq!(mood.match_type, MatchType::Token);
        assert_eq!(mood.sentence_context.as_deref(), Some("I'm not tired, but I'm sad."));
    }

    #[test]
    fn phrase_with_inner_negation_is_covered_by_token_pattern() {
        // "always tired but can't sleep" carries "can't" inside its span and is
        // always dropped; [can't][sleep] still reports the symptom.
        let result = extractor().extract("I am always tired but can't sleep");
        assert_eq!(ids(&result), vec!["fatigue", "sleep_disturbance"]);
        let sleep = result.symptom("sleep_disturbance").unwrap();
        assert_eq!(sleep.match_type, MatchType::Token);
        assert_eq!(sleep.matched_phrases, vec!["can't sleep"]);
    }

    #[test]
    fn contrast_overrides_earlier_negation() {
        let result = extractor().extract("I don't feel sad, but I do feel hopeless");
        assert!(result.has_symptom("depressed_mood"));
        assert_eq!(ids(&result), vec!["depressed_mood"]);
    }

    // =================================================================
    // DEDUPLICATION
    // =================================================================

    #[test]
    fn token_hit_wins_over_phrase_and_keyword() {
        let result = extractor().extract("Honestly I feel worthless");
        assert_eq!(ids(&result), vec!["worthlessness"]);
        let hit = &result.symptoms[0];
        assert_eq!(hit.match_type, MatchType::Token);
        assert_eq!(hit.confidence, 0.7);
    }

    #[test]
    fn keyword_fallback_fills_gaps() {
        let result = extractor().extract("I am so tired these days");
        let fatigue = result.symptom("fatigue").unwrap();
        assert_eq!(fatigue.match_type, MatchType::Keyword);
        assert_eq!(fatigue.confidence, 0.6);
        assert_eq!(fatigue.matched_phrases, vec!["tired"]);
        assert!(fatigue.sentence_context.is_none());
    }

    // =================================================================
    // CRISIS FLAG
    // =================================================================

    #[test]
    fn suicidal_ideation_sets_crisis_flag() {
        let report = extractor().analyze("Sometimes I want to die");
        assert!(report.result.has_symptom("suicidal_ideation"));
        assert!(report.summary.crisis_flag);
    }

    #[test]
    fn other_symptoms_never_set_crisis_flag() {
        let report = extractor().analyze(NARRATIVE);
        assert_eq!(report.summary.unique_symptoms, 4);
        assert!(!report.summary.crisis_flag);
    }

    // =================================================================
    // METADATA
    // =================================================================

    #[test]
    fn duration_scenarios() {
        let extractor = extractor();
        let days = |text: &str| extractor.extract(text).metadata.duration_days;
        assert_eq!(days("symptoms for 3 weeks"), 21);
        assert_eq!(days("depressed for 2 months"), 60);
        assert_eq!(days("I have felt sad for 1\u{00BD} weeks"), 14);
        assert_eq!(days("I constantly feel off"), 90);
        assert_eq!(days("Lately I feel off"), 21);
        assert_eq!(days("I feel off today"), 0);
    }

    #[test]
    fn impairment_scenarios() {
        let extractor = extractor();
        let severity = |text: &str| extractor.extract(text).metadata.functional_impairment.severity;
        assert_eq!(severity("I had a normal week"), ImpairmentSeverity::None);
        assert_eq!(severity("I can't work and I feel isolated"), ImpairmentSeverity::Moderate);
        assert_eq!(
            severity("I can't work, I feel isolated and I stay in bed all day"),
            ImpairmentSeverity::Severe
        );
    }

    // =================================================================
    // OPTIONS AND SHARING
    // =================================================================

    #[test]
    fn disabling_lemmas_turns_off_lemma_constraints() {
        let extractor = extractor();
        let with_lemmas = extractor.extract("I felt hopeless");
        assert_eq!(with_lemmas.symptoms[0].match_type, MatchType::Token);

        let options = PreprocessingOptions {
            lemmatize: false,
            ..Default::default()
        };
        let without = extractor.extract_with_options("I felt hopeless", &options);
        assert_eq!(ids(&without), vec!["depressed_mood"]);
        assert_eq!(without.symptoms[0].match_type, MatchType::Keyword);
        assert_eq!(without.symptoms[0].matched_phrases, vec!["hopeless"]);
    }

    #[test]
    fn punctuation_removal_option_applies_before_normalization() {
        let options = PreprocessingOptions {
            remove_punctuation: true,
            lowercase: true,
            lemmatize: true,
        };
        let result = extractor().extract_with_options("I CAN'T SLEEP!!!", &options);
        assert_eq!(ids(&result), vec!["sleep_disturbance"]);
        assert_eq!(result.metadata.token_count, 3);
    }

    #[test]
    fn stats_report_builtin_catalog() {
        let stats = extractor().stats();
        assert_eq!(stats.symptoms, 9);
        assert_eq!(stats.token_patterns, 27);
        assert_eq!(stats.reference.required_symptoms, 5);
    }

    #[test]
    fn one_extractor_serves_concurrent_calls() {
        let extractor = extractor();
        let expected = extractor.extract(NARRATIVE);
        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| extractor.extract(NARRATIVE)))
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }

    #[test]
    fn report_serializes_summary_fields() {
        let report = extractor().analyze(NARRATIVE);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["summary"]["total_symptoms_detected"], 4);
        assert_eq!(json["summary"]["duration_days"], 21);
        assert_eq!(json["summary"]["functional_impairment_detected"], false);
        assert_eq!(json["symptoms"][0]["dsm5_code"], "A1");
        assert_eq!(json["metadata"]["temporal_markers"]["recent"], serde_json::json!([]));
    }
}
