use std::io;
use std::path::Path;

use anyhow::{Context, Result};

use super::model::{AbundanceDataset, RawRow};
use super::validate::validate;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Read and validate a species-abundance CSV.
///
/// Layout: header row `<date label>,<species_1>,...,<species_N>`, then one
/// `MM/DD/YYYY,<value_1>,...,<value_N>` row per observation. The whole file
/// is read and validated before the dataset is returned.
pub fn load_file(path: &Path) -> Result<AbundanceDataset> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let rows = read_rows(file).with_context(|| format!("reading {}", path.display()))?;
    let dataset = validate(&rows)?;

    log::info!(
        "loaded {} species x {} dates from {}",
        dataset.species_count(),
        dataset.len(),
        path.display()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV reader
// ---------------------------------------------------------------------------

/// Read every non-blank line as a row of trimmed cells.
///
/// A line holding only whitespace counts as blank. Rows may have differing
/// widths; the validator reports that, not the reader.
pub fn read_rows<R: io::Read>(source: R) -> Result<Vec<RawRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        let line = record
            .position()
            .map(|p| p.line())
            .unwrap_or(row_no as u64 + 1);

        rows.push(RawRow::new(line, record.iter().collect()));
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::error::ValidationError;

    #[test]
    fn read_rows_trims_and_keeps_line_numbers() {
        let rows = read_rows("Date, A ,B\n\n01/01/2020,1, 2\n".as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].cells, vec!["Date", "A", "B"]);
        assert_eq!(rows[1].line, 3);
        assert_eq!(rows[1].cells, vec!["01/01/2020", "1", "2"]);
    }

    #[test]
    fn whitespace_only_line_is_blank() {
        let input = "Date,A\n01/01/2020,1\n   \n\t\n01/02/2020,2\n";
        let rows = read_rows(input.as_bytes()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2].line, 5);
        assert_eq!(rows[2].cells, vec!["01/02/2020", "2"]);

        let ds = validate(&rows).unwrap();
        assert_eq!(ds.dates().collect::<Vec<_>>(), vec!["01/01/2020", "01/02/2020"]);
    }

    #[test]
    fn read_rows_allows_ragged_rows() {
        let rows = read_rows("Date,A,B\n01/01/2020,1\n".as_bytes()).unwrap();
        assert_eq!(rows[1].cells.len(), 2);
    }

    #[test]
    fn load_file_validates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.csv");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "Date,A,B").unwrap();
        writeln!(f, "01/01/2020,0,5").unwrap();
        writeln!(f, "13/02/2020,10,5").unwrap();
        drop(f);

        let err = load_file(&path).unwrap_err();
        let validation = err.downcast_ref::<ValidationError>().unwrap();
        assert_eq!(
            validation,
            &ValidationError::InvalidDate {
                line: 3,
                date: "13/02/2020".into(),
                component: crate::error::DateComponent::Month,
            }
        );
    }

    #[test]
    fn load_file_missing_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_file(&dir.path().join("nope.csv")).is_err());
    }
}
