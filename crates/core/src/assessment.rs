use serde::Serialize;

use crate::classification::{Classification, Recommendation};
use crate::stat::StatMap;

/// Final output of one assessment run. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assessment {
    classification: Classification,
    stats: StatMap,
    report: String,
}

impl Assessment {
    pub fn new(classification: Classification, stats: StatMap, report: String) -> Self {
        Self { classification, stats, report }
    }

    pub fn classification(&self) -> &Classification {
        &self.classification
    }

    pub fn stats(&self) -> &StatMap {
        &self.stats
    }

    /// Human-readable report.
    pub fn report(&self) -> &str {
        &self.report
    }

    pub fn recommendation(&self) -> Recommendation {
        self.classification.rarity.recommendation()
    }
}
