mod analysis;
mod cli;
mod color;
mod data;
mod error;
mod heatmap;
mod report;

use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use analysis::AnalysisReport;
use cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    println!(
        "This program reads and validates a species-abundance CSV, then outputs a species \
         list, dated data, presence/absence, and a heat map."
    );

    let outcome = run(&cli);
    if let Err(err) = &outcome {
        log::debug!("run failed: {err:?}");
        eprintln!("Error: {err:#}");
    }

    let message = match &outcome {
        Ok(()) => "All done! Press ENTER to finish the program.",
        Err(_) => "Press ENTER to exit.",
    };
    if !cli.no_pause {
        if let Err(err) = cli::pause(message, &mut io::stdin().lock(), &mut io::stdout()) {
            log::debug!("pause failed: {err:#}");
        }
    }

    if outcome.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Load, validate, analyse and write every artifact.
///
/// Validation covers the whole file before anything is written.
fn run(cli: &Cli) -> Result<()> {
    let input = cli::resolve_input(
        cli.input.as_deref(),
        &mut io::stdin().lock(),
        &mut io::stdout(),
    )?;
    let dataset = data::loader::load_file(&input)?;
    let analysis = AnalysisReport::build(&dataset);

    std::fs::create_dir_all(&cli.output_dir)
        .with_context(|| format!("creating {}", cli.output_dir.display()))?;

    println!("{}", report::summary_line(&dataset, &input));
    for max in &analysis.maxima {
        println!("{}", report::max_line(max));
    }
    for line in report::presence_duplicate_lines(&analysis) {
        println!("{line}");
    }

    let written = report::write_text_artifacts(&cli.output_dir, &dataset, &analysis)?;
    for line in report::heat_map_lines(&dataset, &analysis) {
        println!("{line}");
    }
    for path in &written {
        println!("Wrote {}", path.display());
    }

    if !cli.no_plot {
        let path = cli.output_dir.join(heatmap::HEAT_MAP_IMAGE_FILE);
        // The text artifacts are already on disk; a missing font should not undo the run.
        match heatmap::render_png(&dataset, &path, (cli.width, cli.height)) {
            Ok(()) => println!("Wrote {}", path.display()),
            Err(err) => {
                log::warn!("{err:#}");
                eprintln!("Warning: could not render {}: {err:#}", path.display());
            }
        }
    }

    for line in report::shared_date_lines(&analysis)
        .into_iter()
        .chain(report::shared_species_lines(&analysis))
    {
        println!("{line}");
    }

    if cli.summary_json {
        let path = report::write_summary_json(&cli.output_dir, &dataset, &analysis)?;
        println!("Wrote {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::ffi::OsString;
    use std::path::Path;

    use super::*;

    fn cli_for(input: &Path, output: &Path) -> Cli {
        let args: Vec<OsString> = vec![
            "species-heatmap".into(),
            input.into(),
            "--output-dir".into(),
            output.into(),
            "--no-plot".into(),
            "--no-pause".into(),
            "--summary-json".into(),
        ];
        Cli::try_parse_from(args).unwrap()
    }

    fn read(dir: &Path, name: &str) -> String {
        std::fs::read_to_string(dir.join(name)).unwrap()
    }

    #[test]
    fn two_species_two_dates() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("counts.csv");
        std::fs::write(&input, "Date,A,B\n01/01/2020,0,5\n01/02/2020,10,5\n").unwrap();
        let out = dir.path().join("out");

        run(&cli_for(&input, &out)).unwrap();

        assert_eq!(read(&out, report::SPECIES_FILE), "A\nB\n");
        assert_eq!(read(&out, report::DATES_FILE), "01/01/2020\n01/02/2020\n");
        assert_eq!(
            read(&out, report::PRESENCE_FILE),
            "Date,A,B\n01/01/2020,0,1\n01/02/2020,1,1\n"
        );
        assert_eq!(
            read(&out, report::HEAT_MAP_TEXT_FILE),
            "01/01/2020,L,L\n01/02/2020,H,L\n"
        );
        assert!(out.join(report::SUMMARY_FILE).is_file());
        assert!(!out.join(heatmap::HEAT_MAP_IMAGE_FILE).exists());
    }

    #[test]
    fn invalid_row_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("counts.csv");
        std::fs::write(&input, "Date,A,B\n01/01/2020,0,5\n02/29/2023,10,5\n").unwrap();
        let out = dir.path().join("out");

        let err = run(&cli_for(&input, &out)).unwrap_err();
        assert!(err.downcast_ref::<error::ValidationError>().is_some());
        assert!(!out.exists());
    }
}
