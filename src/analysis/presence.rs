//! Presence/absence encoding.

use serde::Serialize;

use crate::data::model::AbundanceDataset;

use super::grouping::{group_by_pattern, shared_groups};

/// 1 when the species was observed (abundance > 0), else 0.
pub fn presence(value: f64) -> u8 {
    u8::from(value > 0.0)
}

/// One 0/1 flag per species.
pub fn encode(values: &[f64]) -> Vec<u8> {
    values.iter().map(|&v| presence(v)).collect()
}

/// A presence pattern seen on more than one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicatePresence {
    pub pattern: Vec<u8>,
    pub dates: Vec<String>,
    pub count: usize,
}

/// Presence vectors for every date plus the patterns shared between dates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PresenceReport {
    /// One vector per date, in file order.
    pub vectors: Vec<Vec<u8>>,
    pub duplicates: Vec<DuplicatePresence>,
}

impl PresenceReport {
    pub fn build(dataset: &AbundanceDataset) -> Self {
        let vectors: Vec<Vec<u8>> = dataset.records.iter().map(|r| encode(&r.values)).collect();

        let duplicates = shared_groups(group_by_pattern(
            dataset.dates().map(str::to_string),
            vectors.iter().cloned(),
        ))
        .into_iter()
        .map(|group| DuplicatePresence {
            count: group.members.len(),
            pattern: group.pattern,
            dates: group.members,
        })
        .collect();

        PresenceReport {
            vectors,
            duplicates,
        }
    }
}

/// Render a presence vector as `1,0,1`.
pub fn pattern_string(pattern: &[u8]) -> String {
    pattern
        .iter()
        .map(u8::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::two_by_two;
    use crate::data::model::Record;

    #[test]
    fn encodes_strictly_positive() {
        assert_eq!(presence(0.0), 0);
        assert_eq!(presence(0.0001), 1);
        assert_eq!(encode(&[0.0, 5.0, 12.5]), vec![0, 1, 1]);
    }

    #[test]
    fn scenario_has_no_duplicates() {
        let report = PresenceReport::build(&two_by_two());
        assert_eq!(report.vectors, vec![vec![0, 1], vec![1, 1]]);
        assert!(report.duplicates.is_empty());
    }

    #[test]
    fn duplicates_keep_encounter_order() {
        let mut ds = two_by_two();
        ds.records.push(Record {
            date: "01/03/2020".into(),
            values: vec![0.0, 2.0],
        });
        ds.records.push(Record {
            date: "01/04/2020".into(),
            values: vec![3.0, 0.0],
        });
        ds.records.push(Record {
            date: "01/05/2020".into(),
            values: vec![0.0, 9.0],
        });

        let report = PresenceReport::build(&ds);
        assert_eq!(
            report.duplicates,
            vec![DuplicatePresence {
                pattern: vec![0, 1],
                dates: vec!["01/01/2020".into(), "01/03/2020".into(), "01/05/2020".into()],
                count: 3,
            }]
        );
        assert_eq!(pattern_string(&report.duplicates[0].pattern), "0,1");
    }
}
