pub mod normalize;
pub mod lemma;
pub mod segment;
pub mod matcher;
pub mod negation;
pub mod aggregate;
pub mod fallback;
pub mod metadata;
pub mod orchestrator;

pub use normalize::{normalize, PreprocessingOptions};
pub use orchestrator::SymptomExtractor;
pub use segment::{Segmenter, UnicodeSegmenter};
