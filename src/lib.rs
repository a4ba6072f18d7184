pub mod catalog;
pub mod config;
pub mod models;
pub mod pipeline;

pub use catalog::{CatalogError, CatalogStats, SymptomCatalog, SymptomDefinition};
pub use models::{AnalysisReport, AnalysisResult, Summary, SymptomResult};
pub use pipeline::{PreprocessingOptions, SymptomExtractor};

use tracing_subscriber::EnvFilter;

/// Install the global `fmt` subscriber.
///
/// `RUST_LOG` wins over `config::default_log_filter()`. Safe to call more
/// than once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .with_writer(std::io::stderr)
        .try_init();
}
