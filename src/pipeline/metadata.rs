//! Severity metadata scanned straight from the normalized text.
//!
//! None of these look at symptom hits; each is a substring or regex scan.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use super::segment::Segmentation;
use crate::catalog::patterns::{FUNCTIONAL_IMPAIRMENT_KEYWORDS, INTENSITY_MARKERS, TEMPORAL_MARKERS};
use crate::models::enums::{ImpairmentSeverity, IntensityCategory, TemporalCategory};
use crate::models::result::{AnalysisMetadata, FunctionalImpairment};

/// Days assumed when only a chronic marker ("always", "constantly") is present.
pub const CHRONIC_DEFAULT_DAYS: u32 = 90;
/// Days assumed when only a recent marker ("lately", "recently") is present.
pub const RECENT_DEFAULT_DAYS: u32 = 21;

static WEEKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*(?:week|wk|weeks|wks)").expect("Invalid weeks regex"));
static MONTHS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*(?:month|months|mo)").expect("Invalid months regex"));
static DAYS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*(?:day|days)").expect("Invalid days regex"));

/// Every metadata field for one extraction.
pub fn extract_metadata(segmentation: &Segmentation) -> AnalysisMetadata {
    let lower = segmentation.text.to_lowercase();
    let temporal_markers = scan_temporal(&lower);
    let duration_days = extract_duration(&lower, &temporal_markers);

    AnalysisMetadata {
        token_count: segmentation.tokens.len(),
        sentence_count: segmentation.sentences.len(),
        intensity_markers: scan_intensity(&lower),
        functional_impairment: scan_impairment(&lower),
        temporal_markers,
        duration_days,
    }
}

fn scan_markers<C: Ord + Copy>(lower: &str, table: &[(C, &[&str])]) -> BTreeMap<C, Vec<String>> {
    table
        .iter()
        .map(|(category, markers)| {
            let found = markers
                .iter()
                .filter(|m| lower.contains(*m))
                .map(|m| m.to_string())
                .collect();
            (*category, found)
        })
        .collect()
}

/// Temporal markers by category. Every category is present.
pub fn scan_temporal(text: &str) -> BTreeMap<TemporalCategory, Vec<String>> {
    scan_markers(&text.to_lowercase(), TEMPORAL_MARKERS)
}

/// Intensity markers by category. Every category is present.
pub fn scan_intensity(text: &str) -> BTreeMap<IntensityCategory, Vec<String>> {
    scan_markers(&text.to_lowercase(), INTENSITY_MARKERS)
}

/// Distinct functional-impairment phrases and their severity bucket.
pub fn scan_impairment(text: &str) -> FunctionalImpairment {
    let lower = text.to_lowercase();
    let matched_keywords: Vec<String> = FUNCTIONAL_IMPAIRMENT_KEYWORDS
        .iter()
        .filter(|kw| lower.contains(*kw))
        .map(|kw| kw.to_string())
        .collect();
    let count = matched_keywords.len();

    FunctionalImpairment {
        detected: count > 0,
        severity: ImpairmentSeverity::from_count(count),
        matched_keywords,
        count,
    }
}

fn first_number(re: &Regex, text: &str) -> Option<u32> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Best-effort duration in days.
///
/// Weeks (×7) then months (×30) write the same accumulator, so a month
/// mention replaces a week mention. Days combine by `max`. With nothing
/// extracted, chronic then recent markers supply a default.
pub fn extract_duration(text: &str, temporal: &BTreeMap<TemporalCategory, Vec<String>>) -> u32 {
    let lower = text.to_lowercase();
    let mut days = 0;

    if let Some(n) = first_number(&WEEKS, &lower) {
        days = n.saturating_mul(7);
    }
    if let Some(n) = first_number(&MONTHS, &lower) {
        days = n.saturating_mul(30);
    }
    if let Some(n) = first_number(&DAYS, &lower) {
        days = days.max(n);
    }

    let has = |category: TemporalCategory| {
        temporal
            .get(&category)
            .is_some_and(|found| !found.is_empty())
    };
    if days == 0 && has(TemporalCategory::Chronic) {
        days = CHRONIC_DEFAULT_DAYS;
    }
    if days == 0 && has(TemporalCategory::Recent) {
        days = RECENT_DEFAULT_DAYS;
    }
    days
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::segment::{Segmenter, UnicodeSegmenter};

    fn duration(text: &str) -> u32 {
        extract_duration(text, &scan_temporal(text))
    }

    // =================================================================
    // DURATION
    // =================================================================

    #[test]
    fn weeks_months_and_days() {
        assert_eq!(duration("symptoms for 3 weeks"), 21);
        assert_eq!(duration("depressed for 2 months"), 60);
        assert_eq!(duration("it has been 10 days"), 10);
        assert_eq!(duration("about 3wks now"), 21);
    }

    #[test]
    fn marker_defaults_apply_without_numbers() {
        assert_eq!(duration("I constantly feel bad"), 90);
        assert_eq!(duration("Lately I feel bad"), 21);
        assert_eq!(duration("I feel bad"), 0);
    }

    #[test]
    fn chronic_default_wins_over_recent() {
        assert_eq!(duration("lately I am always tired"), 90);
    }

    #[test]
    fn explicit_number_beats_marker_defaults() {
        assert_eq!(duration("always like this for 2 weeks"), 14);
    }

    #[test]
    fn month_overwrites_week() {
        assert_eq!(duration("2 months and 3 weeks"), 60);
        assert_eq!(duration("10 weeks and 1 month"), 30);
    }

    #[test]
    fn days_combine_by_maximum() {
        assert_eq!(duration("45 days and 1 month"), 45);
        assert_eq!(duration("5 days and 2 weeks"), 14);
    }

    #[test]
    fn huge_numbers_saturate() {
        assert_eq!(duration("99999999999 weeks"), 0);
        assert_eq!(duration("4000000000 weeks"), u32::MAX);
    }

    // =================================================================
    // MARKERS
    // =================================================================

    #[test]
    fn temporal_markers_grouped_by_category() {
        let found = scan_temporal("I Always feel sad and sometimes cry");
        assert_eq!(found[&TemporalCategory::Chronic], vec!["always"]);
        assert_eq!(found[&TemporalCategory::Intermittent], vec!["sometimes"]);
        assert!(found[&TemporalCategory::Frequent].is_empty());
        assert_eq!(found.len(), 4);
    }

    #[test]
    fn intensity_markers_grouped_by_category() {
        let found = scan_intensity("I feel very tired and a bit sad");
        assert_eq!(found[&IntensityCategory::High], vec!["very"]);
        assert_eq!(found[&IntensityCategory::Low], vec!["a bit"]);
        assert!(found[&IntensityCategory::Moderate].is_empty());
    }

    // =================================================================
    // FUNCTIONAL IMPAIRMENT
    // =================================================================

    #[test]
    fn impairment_severity_follows_distinct_count() {
        let none = scan_impairment("I feel fine");
        assert!(!none.detected);
        assert_eq!(none.severity, ImpairmentSeverity::None);

        let mild = scan_impairment("I quit my job");
        assert_eq!(mild.severity, ImpairmentSeverity::Mild);

        let moderate = scan_impairment("I can't work and feel isolated");
        assert_eq!(moderate.count, 2);
        assert_eq!(moderate.severity, ImpairmentSeverity::Moderate);
        assert_eq!(moderate.matched_keywords, vec!["can't work", "isolated"]);

        let severe = scan_impairment("I can't work, feel isolated and stay in bed all day");
        assert_eq!(severe.count, 3);
        assert_eq!(severe.severity, ImpairmentSeverity::Severe);
        assert!(severe.detected);
    }

    // =================================================================
    // ASSEMBLY
    // =================================================================

    #[test]
    fn metadata_counts_tokens_and_sentences() {
        let seg = UnicodeSegmenter::new().segment("I feel sad. For 3 weeks now.");
        let meta = extract_metadata(&seg);
        assert_eq!(meta.token_count, 9);
        assert_eq!(meta.sentence_count, 2);
        assert_eq!(meta.duration_days, 21);
    }

    #[test]
    fn empty_text_yields_default_metadata() {
        let seg = UnicodeSegmenter::new().segment("");
        assert_eq!(extract_metadata(&seg), AnalysisMetadata::default());
    }
}
