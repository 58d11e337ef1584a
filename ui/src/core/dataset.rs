//! The static worklet collection the dashboard summarizes.

use once_cell::sync::Lazy;
use thiserror::Error;
use tracing::{info, warn};

use super::model::Worklet;

const SAMPLE_WORKLETS_JSON: &str = include_str!("../../assets/data/worklets.json");

static SAMPLE_WORKLETS: Lazy<Vec<Worklet>> =
    Lazy::new(|| match parse_worklets(SAMPLE_WORKLETS_JSON) {
        Ok(worklets) => {
            info!(count = worklets.len(), "loaded sample worklets");
            worklets
        }
        Err(err) => {
            warn!(%err, "sample worklets unavailable; dashboard will render empty");
            Vec::new()
        }
    });

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("worklet dataset is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

pub fn parse_worklets(raw: &str) -> Result<Vec<Worklet>, DatasetError> {
    Ok(serde_json::from_str(raw)?)
}

/// Borrow the embedded sample collection (parsed on first access).
pub fn sample_worklets() -> &'static [Worklet] {
    SAMPLE_WORKLETS.as_slice()
}
