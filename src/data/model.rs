// ---------------------------------------------------------------------------
// RawRow – one unvalidated CSV line
// ---------------------------------------------------------------------------

/// A CSV row as read from disk, before any validation.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    /// 1-based line number in the source file.
    pub line: u64,
    pub cells: Vec<String>,
}

impl RawRow {
    pub fn new(line: u64, cells: Vec<&str>) -> Self {
        RawRow {
            line,
            cells: cells.into_iter().map(str::to_string).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Record – one dated observation
// ---------------------------------------------------------------------------

/// One observation: a `MM/DD/YYYY` date and one abundance per species.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub date: String,
    /// Aligned positionally with [`AbundanceDataset::species`].
    pub values: Vec<f64>,
}

// ---------------------------------------------------------------------------
// AbundanceDataset – the validated input
// ---------------------------------------------------------------------------

/// The validated dataset. Every record carries exactly `species.len()` values
/// and there is at least one record.
#[derive(Debug, Clone, PartialEq)]
pub struct AbundanceDataset {
    /// The header's first cell (the date column label), echoed in
    /// `PresentAbsent.txt`.
    pub date_label: String,
    /// Species names in header order.
    pub species: Vec<String>,
    /// Records in file order.
    pub records: Vec<Record>,
}

impl AbundanceDataset {
    /// Number of species (matrix columns).
    pub fn species_count(&self) -> usize {
        self.species.len()
    }

    /// Number of dates (matrix rows).
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Dates in file order.
    pub fn dates(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.date.as_str())
    }

    /// All values of one species column, in date order.
    pub fn column(&self, species_idx: usize) -> impl Iterator<Item = f64> + '_ {
        self.records.iter().map(move |r| r.values[species_idx])
    }

    /// Smallest and largest value over the whole matrix.
    pub fn value_range(&self) -> (f64, f64) {
        self.records
            .iter()
            .flat_map(|r| r.values.iter().copied())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            })
    }

    /// The header row as it appears in the input.
    pub fn header_cells(&self) -> Vec<&str> {
        std::iter::once(self.date_label.as_str())
            .chain(self.species.iter().map(String::as_str))
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Two species, two dates: `01/01/2020,0,5` and `01/02/2020,10,5`.
    pub(crate) fn two_by_two() -> AbundanceDataset {
        AbundanceDataset {
            date_label: "Date".into(),
            species: vec!["A".into(), "B".into()],
            records: vec![
                Record {
                    date: "01/01/2020".into(),
                    values: vec![0.0, 5.0],
                },
                Record {
                    date: "01/02/2020".into(),
                    values: vec![10.0, 5.0],
                },
            ],
        }
    }

    #[test]
    fn column_walks_dates_in_order() {
        let ds = two_by_two();
        assert_eq!(ds.column(0).collect::<Vec<_>>(), vec![0.0, 10.0]);
        assert_eq!(ds.column(1).collect::<Vec<_>>(), vec![5.0, 5.0]);
    }

    #[test]
    fn value_range_spans_whole_matrix() {
        assert_eq!(two_by_two().value_range(), (0.0, 10.0));
    }

    #[test]
    fn header_cells_echo_label_and_species() {
        assert_eq!(two_by_two().header_cells(), vec!["Date", "A", "B"]);
    }
}
