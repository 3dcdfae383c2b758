//! Optional list of flagged tickers shown with a marker

use std::collections::HashSet;
use std::path::Path;

use common::error::{Error, Result};
use serde::Deserialize;
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
struct FlaggedFile {
    #[serde(alias = "tickers", default)]
    ginarea_tickers: Vec<String>,
}

/// Parse `{"ginarea_tickers": [...]}` (or `{"tickers": [...]}`)
pub fn parse_flagged(raw: &str) -> Result<HashSet<String>> {
    let file: FlaggedFile =
        serde_json::from_str(raw).map_err(|e| Error::Parse(format!("Invalid flagged tickers file: {}", e)))?;
    Ok(file.ginarea_tickers.into_iter().collect())
}

/// Load flagged tickers from `path`; a missing or unreadable file is an
/// empty set
pub async fn load_flagged(path: &Path) -> HashSet<String> {
    let raw = match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) => {
            warn!("Could not load flagged tickers from {}: {}", path.display(), e);
            return HashSet::new();
        }
    };

    match parse_flagged(&raw) {
        Ok(flagged) => {
            info!("Loaded {} flagged tickers", flagged.len());
            flagged
        }
        Err(e) => {
            warn!("{}", e);
            HashSet::new()
        }
    }
}
