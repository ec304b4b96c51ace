use serde::Serialize;

use crate::data::model::{AbundanceDataset, Record};

/// The most abundant species on one date. Ties are all listed, in header order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyMax {
    pub date: String,
    pub value: f64,
    pub species: Vec<String>,
}

impl DailyMax {
    pub fn for_record(record: &Record, species: &[String]) -> Self {
        let value = record
            .values
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        let species = record
            .values
            .iter()
            .zip(species)
            .filter(|&(&v, _)| v == value)
            .map(|(_, name)| name.clone())
            .collect();

        DailyMax {
            date: record.date.clone(),
            value,
            species,
        }
    }
}

pub fn daily_maxima(dataset: &AbundanceDataset) -> Vec<DailyMax> {
    dataset
        .records
        .iter()
        .map(|r| DailyMax::for_record(r, &dataset.species))
        .collect()
}
