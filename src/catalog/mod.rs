//! Symptom catalog: the immutable table of DSM-5 criteria definitions.
//!
//! Built once at startup (from the static table or from JSON), validated,
//! then shared read-only behind an `Arc` by every extractor.

pub mod patterns;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::enums::Dsm5Code;
use crate::pipeline::segment::Token;

use patterns::{
    ConstraintSpec, MddReference, SymptomSpec, CATALOG_VERSION, MDD_REFERENCE, SYMPTOM_SPECS,
};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Catalog configuration error: {0}")]
    Configuration(String),

    #[error("Malformed token pattern for {symptom_id}: {reason}")]
    MalformedPattern { symptom_id: String, reason: String },

    #[error("Invalid {field} value: {value}")]
    UnknownValue { field: String, value: String },
}

// ═══════════════════════════════════════════
// Token patterns
// ═══════════════════════════════════════════

/// One constraint on one token: the accepted lowercase forms or lemmas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenConstraint {
    Lower(Vec<String>),
    Lemma(Vec<String>),
}

impl TokenConstraint {
    pub fn matches(&self, token: &Token) -> bool {
        match self {
            Self::Lower(forms) => forms.iter().any(|f| *f == token.lower),
            Self::Lemma(lemmas) => lemmas.iter().any(|l| *l == token.lemma),
        }
    }

    fn values(&self) -> &[String] {
        match self {
            Self::Lower(v) | Self::Lemma(v) => v,
        }
    }
}

/// Ordered constraints matched against a window of consecutive tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPattern {
    constraints: Vec<TokenConstraint>,
}

impl TokenPattern {
    pub fn new(symptom_id: &str, constraints: Vec<TokenConstraint>) -> Result<Self, CatalogError> {
        if constraints.is_empty() {
            return Err(CatalogError::MalformedPattern {
                symptom_id: symptom_id.to_string(),
                reason: "pattern has no constraints".into(),
            });
        }
        if constraints.iter().any(|c| c.values().is_empty()) {
            return Err(CatalogError::MalformedPattern {
                symptom_id: symptom_id.to_string(),
                reason: "constraint lists no accepted values".into(),
            });
        }
        Ok(Self { constraints })
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn constraints(&self) -> &[TokenConstraint] {
        &self.constraints
    }

    /// True when every constraint accepts the token at the same offset from `start`.
    pub fn matches_at(&self, tokens: &[Token], start: usize) -> bool {
        match tokens.get(start..start + self.constraints.len()) {
            Some(window) => self
                .constraints
                .iter()
                .zip(window)
                .all(|(constraint, token)| constraint.matches(token)),
            None => false,
        }
    }
}

// ═══════════════════════════════════════════
// Definitions
// ═══════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymptomDefinition {
    pub dsm5_code: Dsm5Code,
    pub symptom_id: String,
    pub display_name: String,
    /// Unique, lowercase, in declaration order.
    pub keywords: Vec<String>,
    pub phrases: Vec<String>,
    pub token_patterns: Vec<TokenPattern>,
    pub crisis_flag: bool,
}

impl SymptomDefinition {
    fn from_spec(spec: &SymptomSpec) -> Result<Self, CatalogError> {
        let token_patterns = spec
            .token_patterns
            .iter()
            .map(|constraints| {
                let constraints = constraints
                    .iter()
                    .map(|c| match c {
                        ConstraintSpec::Lower(v) => TokenConstraint::Lower(to_owned_lower(v)),
                        ConstraintSpec::Lemma(v) => TokenConstraint::Lemma(to_owned_lower(v)),
                    })
                    .collect();
                TokenPattern::new(spec.id, constraints)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            dsm5_code: spec.code,
            symptom_id: spec.id.to_string(),
            display_name: spec.name.to_string(),
            keywords: unique_lower(spec.keywords.iter().copied()),
            phrases: unique_lower(spec.phrases.iter().copied()),
            token_patterns,
            crisis_flag: spec.crisis,
        })
    }
}

fn to_owned_lower(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_lowercase()).collect()
}

fn unique_lower<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty() && seen.insert(v.clone()))
        .collect()
}

// ═══════════════════════════════════════════
// Catalog
// ═══════════════════════════════════════════

/// Counts reported once the catalog is ready, plus the MDD thresholds
/// downstream consumers evaluate against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub version: &'static str,
    pub symptoms: usize,
    pub keywords: usize,
    pub phrases: usize,
    pub token_patterns: usize,
    pub reference: MddReference,
}

#[derive(Debug)]
pub struct SymptomCatalog {
    definitions: Vec<SymptomDefinition>,
}

impl SymptomCatalog {
    /// Validate and freeze a set of definitions.
    ///
    /// Rejects duplicate `symptom_id` or `dsm5_code` values; no partial
    /// catalog is ever returned.
    pub fn new(definitions: Vec<SymptomDefinition>) -> Result<Self, CatalogError> {
        if definitions.is_empty() {
            return Err(CatalogError::Configuration("catalog has no definitions".into()));
        }

        let mut ids = HashSet::new();
        let mut codes = HashSet::new();
        for def in &definitions {
            if def.symptom_id.trim().is_empty() {
                return Err(CatalogError::Configuration(format!(
                    "empty symptom_id for {}",
                    def.dsm5_code
                )));
            }
            if !ids.insert(def.symptom_id.as_str()) {
                return Err(CatalogError::Configuration(format!(
                    "duplicate symptom_id: {}",
                    def.symptom_id
                )));
            }
            if !codes.insert(def.dsm5_code) {
                return Err(CatalogError::Configuration(format!(
                    "duplicate dsm5_code: {}",
                    def.dsm5_code
                )));
            }
        }

        let catalog = Self { definitions };
        let stats = catalog.stats();
        tracing::info!(
            version = stats.version,
            symptoms = stats.symptoms,
            keywords = stats.keywords,
            phrases = stats.phrases,
            token_patterns = stats.token_patterns,
            mdd_required_symptoms = stats.reference.required_symptoms,
            mdd_required_days = stats.reference.required_duration_days,
            "Symptom catalog loaded"
        );
        Ok(catalog)
    }

    /// The built-in DSM-5 A1–A9 table.
    pub fn builtin() -> Result<Self, CatalogError> {
        let definitions = SYMPTOM_SPECS
            .iter()
            .map(SymptomDefinition::from_spec)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(definitions)
    }

    /// Load definitions from JSON using `{"LOWER": ...}` / `{"LEMMA": {"IN": [...]}}`
    /// token constraints.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let raw: Vec<RawDefinition> = serde_json::from_str(json)
            .map_err(|e| CatalogError::Configuration(format!("catalog JSON: {e}")))?;
        let definitions = raw
            .into_iter()
            .map(RawDefinition::into_definition)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(definitions)
    }

    pub fn definitions(&self) -> &[SymptomDefinition] {
        &self.definitions
    }

    pub fn get(&self, symptom_id: &str) -> Option<&SymptomDefinition> {
        self.definitions.iter().find(|d| d.symptom_id == symptom_id)
    }

    pub fn by_code(&self, code: Dsm5Code) -> Option<&SymptomDefinition> {
        self.definitions.iter().find(|d| d.dsm5_code == code)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            version: CATALOG_VERSION,
            symptoms: self.definitions.len(),
            keywords: self.definitions.iter().map(|d| d.keywords.len()).sum(),
            phrases: self.definitions.iter().map(|d| d.phrases.len()).sum(),
            token_patterns: self.definitions.iter().map(|d| d.token_patterns.len()).sum(),
            reference: MDD_REFERENCE,
        }
    }
}

// ═══════════════════════════════════════════
// JSON form
// ═══════════════════════════════════════════

#[derive(Debug, Deserialize)]
struct RawDefinition {
    dsm5_code: String,
    symptom_id: String,
    display_name: String,
    #[serde(default)]
    keywords: Vec<String>,
    #[serde(default)]
    phrases: Vec<String>,
    #[serde(default)]
    token_patterns: Vec<Vec<Map<String, Value>>>,
    #[serde(default)]
    crisis_flag: bool,
}

impl RawDefinition {
    fn into_definition(self) -> Result<SymptomDefinition, CatalogError> {
        let dsm5_code: Dsm5Code = self.dsm5_code.parse()?;
        let token_patterns = self
            .token_patterns
            .iter()
            .map(|raw| {
                let constraints = raw
                    .iter()
                    .map(|c| parse_constraint(&self.symptom_id, c))
                    .collect::<Result<Vec<_>, _>>()?;
                TokenPattern::new(&self.symptom_id, constraints)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SymptomDefinition {
            dsm5_code,
            keywords: unique_lower(self.keywords.iter().map(String::as_str)),
            phrases: unique_lower(self.phrases.iter().map(String::as_str)),
            token_patterns,
            crisis_flag: self.crisis_flag,
            display_name: self.display_name,
            symptom_id: self.symptom_id,
        })
    }
}

fn parse_constraint(symptom_id: &str, raw: &Map<String, Value>) -> Result<TokenConstraint, CatalogError> {
    let malformed = |reason: String| CatalogError::MalformedPattern {
        symptom_id: symptom_id.to_string(),
        reason,
    };

    let mut entries = raw.iter();
    let (kind, value) = match (entries.next(), entries.next()) {
        (Some(entry), None) => entry,
        _ => {
            return Err(malformed(format!(
                "constraint must have exactly one attribute, found {}",
                raw.len()
            )))
        }
    };

    let values = match value {
        Value::String(s) => vec![s.to_lowercase()],
        Value::Object(obj) => match (obj.get("IN"), obj.len()) {
            (Some(Value::Array(items)), 1) => items
                .iter()
                .map(|item| {
                    item.as_str()
                        .map(str::to_lowercase)
                        .ok_or_else(|| malformed(format!("non-string value in {kind} IN list")))
                })
                .collect::<Result<Vec<_>, _>>()?,
            _ => return Err(malformed(format!("{kind} object must be {{\"IN\": [...]}}"))),
        },
        other => return Err(malformed(format!("unsupported {kind} value: {other}"))),
    };

    match kind.as_str() {
        "LOWER" => Ok(TokenConstraint::Lower(values)),
        "LEMMA" => Ok(TokenConstraint::Lemma(values)),
        other => Err(malformed(format!("unknown constraint kind '{other}'"))),
    }
}
