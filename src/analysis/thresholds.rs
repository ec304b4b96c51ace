//! Per-species L/M/H banding.
//!
//! Each species' observed range is cut into three equal-width bands. A value
//! sitting exactly on a cut falls into the lower band.

use std::fmt;

use serde::Serialize;

use crate::data::model::AbundanceDataset;

/// Low / Medium / High abundance class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Level {
    L,
    M,
    H,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::L => write!(f, "L"),
            Level::M => write!(f, "M"),
            Level::H => write!(f, "H"),
        }
    }
}

/// Band cut points for one species column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Threshold {
    pub low_cut: f64,
    pub high_cut: f64,
}

impl Threshold {
    /// Cuts at one and two thirds of the way from `min` to `max`.
    ///
    /// A constant column (`min == max`) collapses both cuts onto `min`, so
    /// every value in it classifies as [`Level::L`].
    pub fn from_range(min: f64, max: f64) -> Self {
        let span = max - min;
        Threshold {
            low_cut: min + span / 3.0,
            high_cut: min + 2.0 * span / 3.0,
        }
    }

    pub fn classify(&self, value: f64) -> Level {
        classify(value, self)
    }
}

pub fn classify(value: f64, threshold: &Threshold) -> Level {
    if value <= threshold.low_cut {
        Level::L
    } else if value <= threshold.high_cut {
        Level::M
    } else {
        Level::H
    }
}

/// One threshold per species column, from that column's min and max.
///
/// The dataset must hold at least one record; validation guarantees this.
pub fn compute_thresholds(dataset: &AbundanceDataset) -> Vec<Threshold> {
    assert!(
        !dataset.is_empty(),
        "thresholds need at least one record"
    );

    (0..dataset.species_count())
        .map(|idx| {
            let (min, max) = dataset
                .column(idx)
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                    (lo.min(v), hi.max(v))
                });
            if min == max {
                log::warn!(
                    "species '{}' has a constant abundance of {min}; every date classifies as L",
                    dataset.species[idx]
                );
            }
            let threshold = Threshold::from_range(min, max);
            log::debug!(
                "{}: min={min} max={max} cuts=({:.4}, {:.4})",
                dataset.species[idx],
                threshold.low_cut,
                threshold.high_cut
            );
            threshold
        })
        .collect()
}

/// The classified matrix, rows = dates, columns = species.
pub fn classify_matrix(dataset: &AbundanceDataset, thresholds: &[Threshold]) -> Vec<Vec<Level>> {
    dataset
        .records
        .iter()
        .map(|record| {
            record
                .values
                .iter()
                .zip(thresholds)
                .map(|(&v, t)| t.classify(v))
                .collect()
        })
        .collect()
}

/// Column `idx` of a classified matrix: one species' pattern across all dates.
pub fn species_pattern(levels: &[Vec<Level>], idx: usize) -> Vec<Level> {
    levels.iter().map(|row| row[idx]).collect()
}

/// Render a pattern as `L,M,H`.
pub fn pattern_string(pattern: &[Level]) -> String {
    pattern
        .iter()
        .map(Level::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::two_by_two;
    use crate::data::model::Record;

    #[test]
    fn ties_fall_into_lower_band() {
        let t = Threshold {
            low_cut: 2.0,
            high_cut: 4.0,
        };
        assert_eq!(t.classify(2.0), Level::L);
        assert_eq!(t.classify(2.0001), Level::M);
        assert_eq!(t.classify(4.0), Level::M);
        assert_eq!(t.classify(4.0001), Level::H);
    }

    #[test]
    fn min_is_low_and_max_is_high() {
        for (min, max) in [(0.0, 10.0), (3.0, 4.0), (0.5, 1000.0), (7.0, 7.0001)] {
            let t = Threshold::from_range(min, max);
            assert!(t.low_cut <= t.high_cut);
            assert_eq!(t.classify(min), Level::L);
            assert_eq!(t.classify(max), Level::H);
        }
    }

    #[test]
    fn constant_column_is_all_low() {
        let t = Threshold::from_range(5.0, 5.0);
        assert_eq!(t.low_cut, 5.0);
        assert_eq!(t.high_cut, 5.0);
        assert_eq!(t.classify(5.0), Level::L);
    }

    #[test]
    fn thresholds_for_scenario() {
        let thresholds = compute_thresholds(&two_by_two());
        assert!((thresholds[0].low_cut - 10.0 / 3.0).abs() < 1e-12);
        assert!((thresholds[0].high_cut - 20.0 / 3.0).abs() < 1e-12);
        assert_eq!(
            thresholds[1],
            Threshold {
                low_cut: 5.0,
                high_cut: 5.0
            }
        );
    }

    #[test]
    fn classify_matrix_for_scenario() {
        let ds = two_by_two();
        let levels = classify_matrix(&ds, &compute_thresholds(&ds));
        assert_eq!(levels, vec![vec![Level::L, Level::L], vec![Level::H, Level::L]]);
        assert_eq!(species_pattern(&levels, 0), vec![Level::L, Level::H]);
        assert_eq!(pattern_string(&levels[1]), "H,L");
    }

    #[test]
    fn middle_band() {
        let mut ds = two_by_two();
        ds.records.push(Record {
            date: "01/03/2020".into(),
            values: vec![5.0, 5.0],
        });
        let levels = classify_matrix(&ds, &compute_thresholds(&ds));
        assert_eq!(levels[2][0], Level::M);
    }

    #[test]
    #[should_panic]
    fn empty_dataset_is_a_precondition_violation() {
        let mut ds = two_by_two();
        ds.records.clear();
        compute_thresholds(&ds);
    }
}
