use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

/// Write a synthetic species-abundance CSV for trying out species-heatmap.
#[derive(Parser, Debug)]
#[command(name = "generate_sample")]
struct Args {
    /// Output file
    #[arg(default_value = "sample_counts.csv")]
    output: PathBuf,

    /// Number of sampling dates (two per month, starting January 2023)
    #[arg(long, default_value_t = 12)]
    dates: usize,

    /// PRNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// Deterministic count sampler (splitmix64 stream).
struct CountRng {
    state: u64,
}

impl CountRng {
    fn new(seed: u64) -> Self {
        CountRng { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in `[0, 1)`.
    fn uniform(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Poisson-distributed count with mean `lambda` (Knuth's product method).
    fn poisson(&mut self, lambda: f64) -> u64 {
        if lambda <= 0.0 {
            return 0;
        }
        let limit = (-lambda).exp();
        let mut count = 0;
        let mut product = self.uniform();
        while product > limit {
            count += 1;
            product *= self.uniform();
        }
        count
    }
}

/// `MM/DD/YYYY` for the `i`-th sample: the 1st and 15th of each month.
fn sample_date(i: usize) -> String {
    let month = i / 2;
    let day = if i % 2 == 0 { 1 } else { 15 };
    format!("{:02}/{day:02}/{}", month % 12 + 1, 2023 + month / 12)
}

/// Seasonal count: peaks at `peak` (fraction of a year), absent off-season.
fn seasonal_count(rng: &mut CountRng, i: usize, amplitude: f64, peak: f64) -> u64 {
    let phase = (i as f64 / 24.0 - peak) * 2.0 * std::f64::consts::PI;
    let expected = amplitude * (0.5 + 0.5 * phase.cos()) - amplitude * 0.15;
    rng.poisson(expected)
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut rng = CountRng::new(args.seed);

    // (name, amplitude, seasonal peak)
    let species = [
        ("Daphnia pulex", 120.0, 0.45),
        ("Cyclops strenuus", 80.0, 0.30),
        ("Bosmina longirostris", 200.0, 0.60),
        ("Keratella cochlearis", 50.0, 0.10),
        ("Asplanchna priodonta", 30.0, 0.75),
    ];

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;

    let mut header = vec!["Date".to_string()];
    header.extend(species.iter().map(|(name, _, _)| name.to_string()));
    // Tracks Daphnia at a different scale, so it shares its L/M/H pattern.
    header.push("Daphnia magna".to_string());
    writer.write_record(&header)?;

    for i in 0..args.dates {
        let counts: Vec<u64> = species
            .iter()
            .map(|&(_, amplitude, peak)| seasonal_count(&mut rng, i, amplitude, peak))
            .collect();

        let mut row = vec![sample_date(i)];
        row.extend(counts.iter().map(u64::to_string));
        row.push((counts[0] * 3).to_string());
        writer.write_record(&row)?;
    }
    writer.flush()?;

    println!(
        "Wrote {} dates x {} species to {}",
        args.dates,
        header.len() - 1,
        args.output.display()
    );
    Ok(())
}
