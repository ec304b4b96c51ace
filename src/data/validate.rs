//! Validation gate between raw CSV rows and the [`AbundanceDataset`].
//!
//! Every row is checked before anything downstream runs; the first failure
//! is returned and nothing else is produced.

use crate::error::{DateComponent, ValidationError};

use super::model::{AbundanceDataset, RawRow, Record};

/// Validate the header plus all data rows and build the dataset.
///
/// `rows[0]` is the header. Its first cell labels the date column and the
/// remaining cells name the species.
pub fn validate(rows: &[RawRow]) -> Result<AbundanceDataset, ValidationError> {
    let (header, data) = rows
        .split_first()
        .ok_or_else(|| ValidationError::InvalidHeader("the file is empty".into()))?;

    let species = validate_header(header)?;
    if data.is_empty() {
        return Err(ValidationError::NoRecords);
    }

    let mut records = Vec::with_capacity(data.len());
    for row in data {
        let (date, cells) = row
            .cells
            .split_first()
            .ok_or(ValidationError::ColumnCount {
                line: row.line,
                expected: species.len(),
                actual: 0,
            })?;

        validate_date(date).map_err(|component| ValidationError::InvalidDate {
            line: row.line,
            date: date.clone(),
            component,
        })?;
        let values = validate_values(row.line, cells, &species)?;

        records.push(Record {
            date: date.clone(),
            values,
        });
    }

    log::debug!(
        "validated {} species across {} dates",
        species.len(),
        records.len()
    );

    Ok(AbundanceDataset {
        date_label: header.cells[0].clone(),
        species,
        records,
    })
}

fn validate_header(header: &RawRow) -> Result<Vec<String>, ValidationError> {
    let species: Vec<String> = header.cells.iter().skip(1).cloned().collect();
    if species.is_empty() {
        return Err(ValidationError::InvalidHeader(
            "expected a date column followed by at least one species".into(),
        ));
    }
    if let Some(pos) = species.iter().position(|s| s.trim().is_empty()) {
        return Err(ValidationError::InvalidHeader(format!(
            "species name in column {} is empty",
            pos + 2
        )));
    }
    Ok(species)
}

// ---------------------------------------------------------------------------
// Dates
// ---------------------------------------------------------------------------

/// Gregorian leap-year rule.
pub fn is_leap_year(year: u32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

pub fn days_in_month(month: u32, year: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Check a `MM/DD/YYYY` date against the calendar.
///
/// On failure returns the component that is wrong.
pub fn validate_date(date: &str) -> Result<(), DateComponent> {
    let fields: Vec<&str> = date.split('/').collect();
    let [month, day, year] = fields.as_slice() else {
        return Err(DateComponent::Format);
    };

    if year.len() != 4 {
        return Err(DateComponent::Year);
    }
    let year = parse_digits(year).ok_or(DateComponent::Year)?;
    let month = parse_digits(month)
        .filter(|m| (1..=12).contains(m))
        .ok_or(DateComponent::Month)?;
    parse_digits(day)
        .filter(|&d| d >= 1 && d <= days_in_month(month, year))
        .ok_or(DateComponent::Day)?;

    Ok(())
}

/// `u32::from_str` accepts a leading `+`; dates must be plain digits.
fn parse_digits(field: &str) -> Option<u32> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

// ---------------------------------------------------------------------------
// Abundance values
// ---------------------------------------------------------------------------

/// Check the value cells of one row against the header width and parse them.
pub fn validate_values(
    line: u64,
    cells: &[String],
    species: &[String],
) -> Result<Vec<f64>, ValidationError> {
    if cells.len() != species.len() {
        return Err(ValidationError::ColumnCount {
            line,
            expected: species.len(),
            actual: cells.len(),
        });
    }

    cells
        .iter()
        .zip(species)
        .map(|(cell, name)| {
            parse_abundance(cell).ok_or_else(|| ValidationError::InvalidNumber {
                line,
                column: name.clone(),
                value: cell.clone(),
            })
        })
        .collect()
}

/// Parse one abundance cell.
///
/// Rejects anything that starts with a bare `.` (so `.5` fails even though it
/// is a valid float), negatives, and non-finite values.
pub fn parse_abundance(cell: &str) -> Option<f64> {
    if cell.starts_with('.') {
        return None;
    }
    let value: f64 = cell.parse().ok()?;
    (value.is_finite() && value >= 0.0).then_some(value)
}
