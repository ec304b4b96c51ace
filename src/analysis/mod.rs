//! Derived products of a validated dataset.
//!
//! ```text
//!   AbundanceDataset ──► thresholds ──► classify ──► grouping (dates, species)
//!          │
//!          ├──────────► presence (0/1 vectors, shared patterns)
//!          │
//!          └──────────► maxima (per-date winners)
//! ```

pub mod grouping;
pub mod maxima;
pub mod presence;
pub mod thresholds;

use serde::Serialize;

use crate::data::model::AbundanceDataset;

use grouping::{group_by_pattern, shared_groups, PatternGroup};
use maxima::{daily_maxima, DailyMax};
use presence::PresenceReport;
use thresholds::{classify_matrix, compute_thresholds, species_pattern, Level, Threshold};

/// Everything computed from one dataset. Built once, read-only afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// One per species, in header order.
    pub thresholds: Vec<Threshold>,
    /// Rows = dates, columns = species.
    pub levels: Vec<Vec<Level>>,
    /// Dates whose L/M/H pattern across all species is shared with another date.
    pub shared_date_patterns: Vec<PatternGroup<String, Vec<Level>>>,
    /// Species whose L/M/H pattern across all dates is shared with another species.
    pub shared_species_patterns: Vec<PatternGroup<String, Vec<Level>>>,
    pub presence: PresenceReport,
    pub maxima: Vec<DailyMax>,
}

impl AnalysisReport {
    pub fn build(dataset: &AbundanceDataset) -> Self {
        let thresholds = compute_thresholds(dataset);
        let levels = classify_matrix(dataset, &thresholds);

        let shared_date_patterns = shared_groups(group_by_pattern(
            dataset.dates().map(str::to_string),
            levels.iter().cloned(),
        ));
        let shared_species_patterns = shared_groups(group_by_pattern(
            dataset.species.iter().cloned(),
            (0..dataset.species_count()).map(|idx| species_pattern(&levels, idx)),
        ));

        AnalysisReport {
            thresholds,
            levels,
            shared_date_patterns,
            shared_species_patterns,
            presence: PresenceReport::build(dataset),
            maxima: daily_maxima(dataset),
        }
    }
}
