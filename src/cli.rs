//! Command-line configuration and the interactive file prompt.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;

use crate::error::InputError;

/// Parse and validate an image dimension (100-10000 pixels)
fn parse_pixels(s: &str) -> Result<u32, String> {
    let n: u32 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if !(100..=10_000).contains(&n) {
        Err("image dimensions must be between 100 and 10000 pixels".to_string())
    } else {
        Ok(n)
    }
}

/// Validate a species-abundance CSV and derive presence/absence, L/M/H heat
/// maps and shared-pattern reports.
#[derive(Parser, Debug)]
#[command(name = "species-heatmap", version)]
pub struct Cli {
    /// Species-abundance CSV (prompted for when omitted)
    pub input: Option<PathBuf>,

    /// Directory the output files are written to
    #[arg(long, env = "SG3_OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Skip rendering HeatMap.png
    #[arg(long)]
    pub no_plot: bool,

    /// Do not wait for ENTER before exiting
    #[arg(long, env = "SG3_NO_PAUSE")]
    pub no_pause: bool,

    /// Also write Summary.json with every derived report
    #[arg(long)]
    pub summary_json: bool,

    /// Heat map image width in pixels
    #[arg(long, default_value_t = 1000, value_parser = parse_pixels)]
    pub width: u32,

    /// Heat map image height in pixels
    #[arg(long, default_value_t = 800, value_parser = parse_pixels)]
    pub height: u32,

    /// Log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,
}

// ---------------------------------------------------------------------------
// Input file checks
// ---------------------------------------------------------------------------

/// The name must end in `.csv`, in any case.
pub fn check_file_name(name: &str) -> Result<PathBuf, InputError> {
    if name.to_lowercase().ends_with(".csv") {
        Ok(PathBuf::from(name))
    } else {
        Err(InputError::FileName(name.to_string()))
    }
}

pub fn check_exists(path: &Path) -> Result<(), InputError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(InputError::FileNotFound(path.to_path_buf()))
    }
}

/// Use `given` if present, otherwise ask until a usable `.csv` path is entered.
///
/// A path given on the command line is checked once; only prompted names are
/// retried.
pub fn resolve_input<R: BufRead, W: Write>(
    given: Option<&Path>,
    input: &mut R,
    output: &mut W,
) -> Result<PathBuf> {
    if let Some(path) = given {
        let name = path.to_string_lossy();
        check_file_name(&name)?;
        check_exists(path)?;
        return Ok(path.to_path_buf());
    }

    loop {
        write!(output, "Enter the name of the CSV file: ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line).context("reading file name")? == 0 {
            bail!("no input file was given");
        }

        let checked = check_file_name(line.trim()).and_then(|path| {
            check_exists(&path)?;
            Ok(path)
        });
        match checked {
            Ok(path) => return Ok(path),
            Err(err) => {
                log::debug!("rejected input file: {err}");
                writeln!(output, "Error: {err}. Please try again.")?;
            }
        }
    }
}

/// Print `message` and wait for ENTER.
pub fn pause<R: BufRead, W: Write>(message: &str, input: &mut R, output: &mut W) -> Result<()> {
    write!(output, "{message}")?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(())
}
