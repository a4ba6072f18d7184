//! Output types of a single extraction call.
//!
//! Everything here is created per `extract()` call and handed to the caller;
//! nothing is shared across calls. Field names are the JSON wire names.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::enums::{Dsm5Code, ImpairmentSeverity, IntensityCategory, MatchType, TemporalCategory};
use crate::catalog::patterns::CRISIS_SYMPTOM_ID;

/// A detected DSM-5 criterion that survived negation filtering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymptomResult {
    pub symptom_id: String,
    pub dsm5_code: Dsm5Code,
    pub name: String,
    pub detected: bool,
    /// Strategy weight in (0, 1].
    pub confidence: f32,
    /// Lowercased matched span(s), or the surviving keywords for keyword hits.
    pub matched_phrases: Vec<String>,
    /// Enclosing sentence of the hit. Always `None` for keyword hits.
    pub sentence_context: Option<String>,
    /// Negated hits are dropped, so this is always `false` in output.
    pub is_negated: bool,
    pub match_type: MatchType,
}

/// Functional-impairment scan over the whole text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionalImpairment {
    pub detected: bool,
    pub severity: ImpairmentSeverity,
    pub matched_keywords: Vec<String>,
    pub count: usize,
}

impl Default for FunctionalImpairment {
    fn default() -> Self {
        Self {
            detected: false,
            severity: ImpairmentSeverity::None,
            matched_keywords: Vec::new(),
            count: 0,
        }
    }
}

/// Severity-relevant metadata, computed independently of symptom detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    pub token_count: usize,
    pub sentence_count: usize,
    pub temporal_markers: BTreeMap<TemporalCategory, Vec<String>>,
    pub intensity_markers: BTreeMap<IntensityCategory, Vec<String>>,
    pub functional_impairment: FunctionalImpairment,
    pub duration_days: u32,
}

impl Default for AnalysisMetadata {
    fn default() -> Self {
        Self {
            token_count: 0,
            sentence_count: 0,
            temporal_markers: TemporalCategory::ALL
                .iter()
                .map(|c| (*c, Vec::new()))
                .collect(),
            intensity_markers: IntensityCategory::ALL
                .iter()
                .map(|c| (*c, Vec::new()))
                .collect(),
            functional_impairment: FunctionalImpairment::default(),
            duration_days: 0,
        }
    }
}

/// The engine's sole output artifact.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub symptoms: Vec<SymptomResult>,
    pub metadata: AnalysisMetadata,
}

impl AnalysisResult {
    pub fn has_symptom(&self, symptom_id: &str) -> bool {
        self.symptoms.iter().any(|s| s.symptom_id == symptom_id)
    }

    pub fn symptom(&self, symptom_id: &str) -> Option<&SymptomResult> {
        self.symptoms.iter().find(|s| s.symptom_id == symptom_id)
    }

    /// Derived counts and flags. Recomputed on every call.
    pub fn summarize(&self) -> Summary {
        Summary::from_result(self)
    }

    /// Reduced per-symptom view consumed by the retrieval/assessment stage.
    pub fn evidence_for_retrieval(&self) -> Vec<EvidenceSymptom> {
        self.symptoms.iter().map(EvidenceSymptom::from).collect()
    }
}

/// Read-only view over an `AnalysisResult`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total_symptoms_detected: usize,
    pub unique_symptoms: usize,
    /// Distinct codes in first-detection order.
    pub symptom_codes: Vec<Dsm5Code>,
    pub crisis_flag: bool,
    pub duration_specified: bool,
    pub duration_days: u32,
    pub functional_impairment_detected: bool,
}

impl Summary {
    pub fn from_result(result: &AnalysisResult) -> Self {
        let unique_ids: BTreeSet<&str> = result
            .symptoms
            .iter()
            .map(|s| s.symptom_id.as_str())
            .collect();

        let mut symptom_codes: Vec<Dsm5Code> = Vec::new();
        for symptom in &result.symptoms {
            if !symptom_codes.contains(&symptom.dsm5_code) {
                symptom_codes.push(symptom.dsm5_code);
            }
        }

        Self {
            total_symptoms_detected: result.symptoms.len(),
            unique_symptoms: unique_ids.len(),
            symptom_codes,
            crisis_flag: unique_ids.contains(CRISIS_SYMPTOM_ID),
            duration_specified: result.metadata.duration_days > 0,
            duration_days: result.metadata.duration_days,
            functional_impairment_detected: result.metadata.functional_impairment.detected,
        }
    }
}

/// JSON payload emitted at the boundary: result plus summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    #[serde(flatten)]
    pub result: AnalysisResult,
    pub summary: Summary,
}

impl From<AnalysisResult> for AnalysisReport {
    fn from(result: AnalysisResult) -> Self {
        let summary = result.summarize();
        Self { result, summary }
    }
}

/// Per-symptom evidence in the shape the assessment prompt builder expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceSymptom {
    pub dsm5_code: Dsm5Code,
    pub symptom_id: String,
    pub name: String,
    pub detected: bool,
    pub confidence: f32,
    pub evidence: Vec<String>,
    pub sentence_context: Option<String>,
    pub match_type: MatchType,
}

impl From<&SymptomResult> for EvidenceSymptom {
    fn from(s: &SymptomResult) -> Self {
        Self {
            dsm5_code: s.dsm5_code,
            symptom_id: s.symptom_id.clone(),
            name: s.name.clone(),
            detected: s.detected,
            confidence: s.confidence,
            evidence: s.matched_phrases.clone(),
            sentence_context: s.sentence_context.clone(),
            match_type: s.match_type,
        }
    }
}
