//! Reads a narrative from stdin and prints the JSON analysis report.
//!
//! Usage: `moodscan [catalog.json] < narrative.txt`

use std::io::Read;
use std::process::ExitCode;
use std::sync::Arc;

use moodscan_lib::config::{self, InputLimits};
use moodscan_lib::{SymptomCatalog, SymptomExtractor};

fn load_catalog(path: Option<String>) -> Result<SymptomCatalog, String> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .map_err(|e| format!("Cannot read catalog {path}: {e}"))?;
            SymptomCatalog::from_json(&json).map_err(|e| e.to_string())
        }
        None => SymptomCatalog::builtin().map_err(|e| e.to_string()),
    }
}

fn run() -> Result<String, String> {
    let catalog = load_catalog(std::env::args().nth(1))?;
    let extractor = SymptomExtractor::new(Arc::new(catalog)).map_err(|e| e.to_string())?;

    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .map_err(|e| format!("Cannot read stdin: {e}"))?;

    InputLimits::from_env().check(&text).map_err(|e| e.to_string())?;

    let report = extractor.analyze(&text);
    serde_json::to_string_pretty(&report).map_err(|e| format!("Cannot serialize report: {e}"))
}

fn main() -> ExitCode {
    moodscan_lib::init_tracing();
    tracing::info!("{} v{}", config::APP_NAME, config::APP_VERSION);

    match run() {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Analysis failed");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
