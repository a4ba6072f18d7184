//! Built-in pattern tables: the nine DSM-5 major-depressive-episode criteria
//! plus the marker vocabularies used by the metadata scanners.
//!
//! Token patterns use one constraint per token. `Lower` compares the token's
//! lowercase form, `Lemma` its lemma; each lists the accepted alternatives.

use crate::models::enums::{Dsm5Code, IntensityCategory, TemporalCategory};

/// A single-token constraint as written in the static table.
#[derive(Debug, Clone, Copy)]
pub enum ConstraintSpec {
    Lower(&'static [&'static str]),
    Lemma(&'static [&'static str]),
}

use ConstraintSpec::{Lemma, Lower};

/// Static description of one criterion.
#[derive(Debug)]
pub struct SymptomSpec {
    pub code: Dsm5Code,
    pub id: &'static str,
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    pub phrases: &'static [&'static str],
    pub token_patterns: &'static [&'static [ConstraintSpec]],
    pub crisis: bool,
}

/// Symptom whose detection raises the crisis flag.
pub const CRISIS_SYMPTOM_ID: &str = "suicidal_ideation";

/// Bumped whenever any table in this file changes.
pub const CATALOG_VERSION: &str = "dsm5-mdd-2024.1";

pub static SYMPTOM_SPECS: &[SymptomSpec] = &[
    SymptomSpec {
        code: Dsm5Code::A1,
        id: "depressed_mood",
        name: "Depressed mood most of the day",
        keywords: &[
            "sad", "depressed", "empty", "hopeless", "down", "low mood",
            "miserable", "unhappy", "blue", "gloomy", "melancholy",
            "dejected", "despondent", "crying", "tearful",
        ],
        phrases: &[
            "feel sad", "feeling depressed", "feel empty", "feel hopeless",
            "mood is low", "feeling down", "feel miserable", "feel unhappy",
            "can't stop crying", "nothing makes me happy", "life feels meaningless",
            "everything feels dark", "feel like giving up", "no point in anything",
            "feeling blue", "feel awful", "emotionally numb",
        ],
        token_patterns: &[
            &[
                Lemma(&["feel"]),
                Lower(&["sad", "depressed", "down", "empty", "hopeless", "miserable"]),
            ],
            &[Lower(&["mood"]), Lower(&["is"]), Lower(&["low", "down", "bad"])],
            &[Lemma(&["be"]), Lower(&["sad", "depressed", "unhappy", "miserable"])],
        ],
        crisis: false,
    },
    SymptomSpec {
        code: Dsm5Code::A2,
        id: "anhedonia",
        name: "Diminished interest or pleasure in activities",
        keywords: &[
            "no interest", "lost interest", "don't enjoy", "no pleasure",
            "anhedonia", "apathy", "unmotivated", "indifferent",
        ],
        phrases: &[
            "don't enjoy", "no interest in", "lost interest", "nothing feels good",
            "can't enjoy anything", "nothing interests me", "don't care about",
            "no motivation", "everything feels dull", "can't find pleasure",
            "activities don't appeal", "hobbies aren't fun", "stopped doing things i love",
            "nothing excites me", "lost passion", "don't want to do anything",
        ],
        token_patterns: &[
            &[Lower(&["no", "lost"]), Lower(&["interest"])],
            &[Lower(&["don't", "can't", "cannot"]), Lower(&["enjoy"])],
            &[Lower(&["nothing"]), Lemma(&["interest", "excite", "appeal"])],
        ],
        crisis: false,
    },
    SymptomSpec {
        code: Dsm5Code::A3,
        id: "weight_change",
        name: "Significant weight loss or gain, or change in appetite",
        keywords: &[
            "lost weight", "gained weight", "weight loss", "weight gain",
            "no appetite", "eating too much", "appetite", "lost appetite",
            "overeating", "can't eat", "eating less",
        ],
        phrases: &[
            "lost weight", "gained weight", "no appetite", "eating too much",
            "can't eat", "lost appetite", "always hungry", "never hungry",
            "eating less", "eating more", "weight changed", "food doesn't appeal",
            "force myself to eat", "binge eating", "can't stop eating",
            "dropped pounds", "put on weight",
        ],
        token_patterns: &[
            &[Lower(&["lost", "gained"]), Lower(&["weight"])],
            &[Lower(&["no"]), Lower(&["appetite"])],
            &[Lower(&["eating", "eat"]), Lower(&["less", "more", "too much"])],
        ],
        crisis: false,
    },
    SymptomSpec {
        code: Dsm5Code::A4,
        id: "sleep_disturbance",
        name: "Insomnia or hypersomnia nearly every day",
        keywords: &[
            "can't sleep", "insomnia", "trouble sleeping", "awake at night",
            "sleeping too much", "hypersomnia", "sleep all day", "can't get up",
        ],
        phrases: &[
            "can't sleep", "trouble sleeping", "can't fall asleep", "wake up at night",
            "lying awake", "tossing and turning", "insomnia", "sleepless nights",
            "sleeping too much", "sleep all day", "can't get out of bed",
            "always tired but can't sleep", "waking up early", "sleeping 12 hours",
            "no rest", "exhausted but awake", "oversleeping",
        ],
        token_patterns: &[
            &[Lower(&["can't", "cannot", "trouble"]), Lower(&["sleep", "sleeping"])],
            &[Lower(&["sleeping"]), Lower(&["too", "all"]), Lower(&["much", "day"])],
            &[Lemma(&["wake"]), Lower(&["up", "at"]), Lower(&["night"])],
        ],
        crisis: false,
    },
    SymptomSpec {
        code: Dsm5Code::A5,
        id: "psychomotor",
        name: "Psychomotor agitation or retardation",
        keywords: &[
            "restless", "can't sit still", "agitated", "fidgety",
            "slowed down", "moving slow", "sluggish", "lethargic",
        ],
        phrases: &[
            "feel restless", "can't sit still", "always moving", "fidgeting",
            "everything is slow", "moving in slow motion", "feel sluggish",
            "body feels heavy", "like moving through water", "thoughts are slow",
            "can't stop pacing", "nervous energy", "feel slowed down",
        ],
        token_patterns: &[
            &[Lower(&["feel", "feeling"]), Lower(&["restless", "agitated", "sluggish"])],
            &[Lower(&["can't", "cannot"]), Lower(&["sit"]), Lower(&["still"])],
            &[Lower(&["moving", "everything"]), Lower(&["slow", "slowly"])],
        ],
        crisis: false,
    },
    SymptomSpec {
        code: Dsm5Code::A6,
        id: "fatigue",
        name: "Fatigue or loss of energy nearly every day",
        keywords: &[
            "tired", "exhausted", "fatigue", "no energy", "drained",
            "worn out", "depleted", "lethargic", "weak",
        ],
        phrases: &[
            "always tired", "no energy", "completely exhausted", "feel drained",
            "worn out", "too tired to", "constant fatigue", "can't do anything",
            "body feels heavy", "no stamina", "feel weak", "depleted",
            "running on empty", "zero energy", "exhausted all the time",
        ],
        token_patterns: &[
            &[Lower(&["always", "constantly", "completely"]), Lower(&["tired", "exhausted"])],
            &[Lower(&["no"]), Lower(&["energy", "stamina"])],
            &[Lemma(&["feel"]), Lower(&["tired", "exhausted", "drained", "weak"])],
        ],
        crisis: false,
    },
    SymptomSpec {
        code: Dsm5Code::A7,
        id: "worthlessness",
        name: "Feelings of worthlessness or excessive guilt",
        keywords: &[
            "worthless", "useless", "failure", "guilty", "shame",
            "inadequate", "burden", "let everyone down",
        ],
        phrases: &[
            "feel worthless", "feel useless", "i'm a failure", "feel guilty",
            "everything is my fault", "i'm a burden", "let everyone down",
            "not good enough", "feel inadequate", "ashamed of myself",
            "hate myself", "feel like a failure", "no value", "waste of space",
            "don't deserve", "feel terrible about myself",
        ],
        token_patterns: &[
            &[Lemma(&["feel"]), Lower(&["worthless", "useless", "guilty", "inadequate"])],
            &[Lower(&["i'm"]), Lower(&["a", "failure", "worthless", "useless"])],
            &[Lower(&["hate", "ashamed"]), Lower(&["myself"])],
        ],
        crisis: false,
    },
    SymptomSpec {
        code: Dsm5Code::A8,
        id: "concentration",
        name: "Diminished ability to think, concentrate, or make decisions",
        keywords: &[
            "can't focus", "can't concentrate", "can't think", "brain fog",
            "indecisive", "forgetful", "confused", "distracted",
        ],
        phrases: &[
            "can't focus", "can't concentrate", "trouble thinking", "mind is blank",
            "brain fog", "can't make decisions", "everything is confusing",
            "can't remember", "thoughts are jumbled", "mind won't work",
            "can't think clearly", "hard to focus", "constantly distracted",
            "forget everything", "indecisive about everything",
        ],
        token_patterns: &[
            &[
                Lower(&["can't", "cannot", "trouble"]),
                Lower(&["focus", "concentrate", "think"]),
            ],
            &[Lower(&["brain"]), Lower(&["fog"])],
            &[Lower(&["hard", "difficult"]), Lower(&["to"]), Lower(&["focus", "concentrate"])],
        ],
        crisis: false,
    },
    SymptomSpec {
        code: Dsm5Code::A9,
        id: CRISIS_SYMPTOM_ID,
        name: "Recurrent thoughts of death, suicidal ideation, or suicide attempt",
        keywords: &[
            "suicide", "kill myself", "end it all", "death", "dying",
            "better off dead", "want to die", "suicidal",
        ],
        phrases: &[
            "want to die", "think about death", "kill myself", "end it all",
            "better off dead", "everyone would be better without me",
            "suicidal thoughts", "plan to die", "thoughts of suicide",
            "wish i was dead", "don't want to live", "end my life",
            "think about dying", "thoughts of ending it",
        ],
        token_patterns: &[
            &[Lower(&["want", "wish"]), Lower(&["to"]), Lower(&["die"])],
            &[Lower(&["kill", "end"]), Lower(&["myself"])],
            &[
                Lower(&["think", "thinking", "thoughts"]),
                Lower(&["about"]),
                Lower(&["death", "dying", "suicide"]),
            ],
        ],
        crisis: true,
    },
];

// ═══════════════════════════════════════════
// Negation vocabulary
// ═══════════════════════════════════════════

pub const NEGATION_TERMS: &[&str] = &[
    "no", "not", "never", "none", "without", "barely", "hardly", "rarely",
    "don't", "doesn't", "didn't", "won't", "can't", "cannot",
];

/// Words that end a negation's reach over the following clause.
pub const CONTRAST_TERMS: &[&str] = &["but", "however", "although", "though"];

// ═══════════════════════════════════════════
// Metadata vocabularies
// ═══════════════════════════════════════════

pub const TEMPORAL_MARKERS: &[(TemporalCategory, &[&str])] = &[
    (
        TemporalCategory::Chronic,
        &["always", "constantly", "every day", "all the time", "nonstop"],
    ),
    (
        TemporalCategory::Frequent,
        &["often", "usually", "most days", "frequently", "regularly"],
    ),
    (
        TemporalCategory::Recent,
        &["lately", "recently", "past few weeks", "for 2 weeks", "past month", "last month"],
    ),
    (
        TemporalCategory::Intermittent,
        &["sometimes", "occasionally", "now and then", "once in a while"],
    ),
];

pub const INTENSITY_MARKERS: &[(IntensityCategory, &[&str])] = &[
    (
        IntensityCategory::High,
        &["very", "extremely", "severely", "completely", "totally", "absolutely", "incredibly"],
    ),
    (
        IntensityCategory::Moderate,
        &["quite", "fairly", "somewhat", "pretty", "rather", "moderately"],
    ),
    (
        IntensityCategory::Low,
        &["a little", "slightly", "mildly", "a bit", "kind of", "sort of"],
    ),
];

pub const FUNCTIONAL_IMPAIRMENT_KEYWORDS: &[&str] = &[
    "can't work", "can't go to work", "stopped working", "quit my job",
    "can't get out of bed", "stopped showering", "don't shower", "hygiene",
    "can't take care", "stopped seeing friends", "isolated", "stay in bed all day",
    "can't function", "can't do anything", "stopped doing", "gave up on",
    "relationships suffering", "marriage falling apart", "losing friends",
    "can't handle", "too much to cope", "falling apart", "life falling apart",
    "can't take care of myself", "neglecting myself", "stopped activities",
];

// ═══════════════════════════════════════════
// Reference thresholds (data only, never evaluated here)
// ═══════════════════════════════════════════

/// DSM-5 major depressive episode thresholds, exposed for downstream consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct MddReference {
    pub required_symptoms: usize,
    pub required_duration_days: u32,
    pub must_include_one_of: &'static [Dsm5Code],
}

pub const MDD_REFERENCE: MddReference = MddReference {
    required_symptoms: 5,
    required_duration_days: 14,
    must_include_one_of: &[Dsm5Code::A1, Dsm5Code::A2],
};
