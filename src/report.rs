//! Plain-text artifacts and console report lines.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::analysis::grouping::PatternGroup;
use crate::analysis::maxima::DailyMax;
use crate::analysis::presence;
use crate::analysis::thresholds::{pattern_string, Level};
use crate::analysis::AnalysisReport;
use crate::data::model::AbundanceDataset;

pub const SPECIES_FILE: &str = "Species.txt";
pub const DATES_FILE: &str = "DatedData.txt";
pub const PRESENCE_FILE: &str = "PresentAbsent.txt";
pub const HEAT_MAP_TEXT_FILE: &str = "HeatMap.txt";
pub const SUMMARY_FILE: &str = "Summary.json";

// ---------------------------------------------------------------------------
// Artifact contents
// ---------------------------------------------------------------------------

pub fn species_lines(dataset: &AbundanceDataset) -> Vec<String> {
    dataset.species.clone()
}

pub fn date_lines(dataset: &AbundanceDataset) -> Vec<String> {
    dataset.dates().map(str::to_string).collect()
}

/// The header row echoed, then `date,<0|1>...` per date.
pub fn presence_lines(dataset: &AbundanceDataset, report: &AnalysisReport) -> Vec<String> {
    let rows = dataset
        .records
        .iter()
        .zip(&report.presence.vectors)
        .map(|(record, vector)| {
            format!("{},{}", record.date, presence::pattern_string(vector))
        });

    std::iter::once(dataset.header_cells().join(","))
        .chain(rows)
        .collect()
}

/// `date,<L|M|H>...` per date.
pub fn heat_map_lines(dataset: &AbundanceDataset, report: &AnalysisReport) -> Vec<String> {
    dataset
        .records
        .iter()
        .zip(&report.levels)
        .map(|(record, levels)| format!("{},{}", record.date, pattern_string(levels)))
        .collect()
}

// ---------------------------------------------------------------------------
// Writing
// ---------------------------------------------------------------------------

/// Write one line per entry, each newline-terminated.
pub fn write_lines(path: &Path, lines: &[String]) -> Result<()> {
    let mut contents = String::new();
    for line in lines {
        contents.push_str(line);
        contents.push('\n');
    }
    std::fs::write(path, contents).with_context(|| format!("writing {}", path.display()))?;
    log::info!("wrote {} lines to {}", lines.len(), path.display());
    Ok(())
}

/// Write the four text artifacts into `dir` and return their paths.
pub fn write_text_artifacts(
    dir: &Path,
    dataset: &AbundanceDataset,
    report: &AnalysisReport,
) -> Result<Vec<PathBuf>> {
    let artifacts = [
        (SPECIES_FILE, species_lines(dataset)),
        (DATES_FILE, date_lines(dataset)),
        (PRESENCE_FILE, presence_lines(dataset, report)),
        (HEAT_MAP_TEXT_FILE, heat_map_lines(dataset, report)),
    ];

    let mut paths = Vec::with_capacity(artifacts.len());
    for (name, lines) in &artifacts {
        let path = dir.join(name);
        write_lines(&path, lines)?;
        paths.push(path);
    }
    Ok(paths)
}

#[derive(Serialize)]
struct Summary<'a> {
    species: &'a [String],
    dates: Vec<&'a str>,
    #[serde(flatten)]
    analysis: &'a AnalysisReport,
}

pub fn write_summary_json(
    dir: &Path,
    dataset: &AbundanceDataset,
    report: &AnalysisReport,
) -> Result<PathBuf> {
    let summary = Summary {
        species: &dataset.species,
        dates: dataset.dates().collect(),
        analysis: report,
    };
    let path = dir.join(SUMMARY_FILE);
    let json = serde_json::to_string_pretty(&summary).context("serializing summary")?;
    std::fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
    log::info!("wrote {}", path.display());
    Ok(path)
}

// ---------------------------------------------------------------------------
// Console lines
// ---------------------------------------------------------------------------

pub fn summary_line(dataset: &AbundanceDataset, source: &Path) -> String {
    format!(
        "Read {} species and {} dates from {}",
        dataset.species_count(),
        dataset.len(),
        source.display()
    )
}

pub fn max_line(max: &DailyMax) -> String {
    format!(
        "{}: maximum abundance {} ({})",
        max.date,
        max.value,
        max.species.join(", ")
    )
}

pub fn presence_duplicate_lines(report: &AnalysisReport) -> Vec<String> {
    let duplicates = &report.presence.duplicates;
    if duplicates.is_empty() {
        return vec!["No presence/absence pattern is shared by more than one date.".into()];
    }
    duplicates
        .iter()
        .map(|d| {
            format!(
                "Presence pattern {} occurs {} times: {}",
                presence::pattern_string(&d.pattern),
                d.count,
                d.dates.join(", ")
            )
        })
        .collect()
}

pub fn shared_date_lines(report: &AnalysisReport) -> Vec<String> {
    shared_lines(
        &report.shared_date_patterns,
        "Dates",
        "No dates share exactly the same H/M/L values for all species.",
    )
}

pub fn shared_species_lines(report: &AnalysisReport) -> Vec<String> {
    shared_lines(
        &report.shared_species_patterns,
        "Species",
        "No species share exactly the same H/M/L values for all dates.",
    )
}

fn shared_lines(
    groups: &[PatternGroup<String, Vec<Level>>],
    noun: &str,
    none_message: &str,
) -> Vec<String> {
    if groups.is_empty() {
        return vec![none_message.to_string()];
    }
    groups
        .iter()
        .map(|g| {
            format!(
                "{noun} {} share the H/M/L pattern: {}",
                g.members.join(", "),
                pattern_string(&g.pattern)
            )
        })
        .collect()
}
