//! Graphical heat map (`HeatMap.png`).
//!
//! Rows are dates top to bottom in file order, columns are species in header
//! order. Cells are coloured by raw abundance on one scale for the whole
//! matrix, with a colorbar alongside.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use plotters::coord::Shift;
use plotters::drawing::{DrawingArea, DrawingAreaErrorKind};
use plotters::prelude::*;
use plotters::style::FontTransform;

use crate::color::{Gradient, Normalizer};
use crate::data::model::AbundanceDataset;

pub const HEAT_MAP_IMAGE_FILE: &str = "HeatMap.png";

const TITLE: &str = "Species Abundance Heat Map";
const COLORBAR_WIDTH: u32 = 130;
const COLORBAR_STEPS: usize = 100;

const FONT: &str = "sans-serif";
const TITLE_SIZE: u32 = 24;
const DESC_SIZE: u32 = 14;
const LABEL_SIZE: u32 = 13;

/// Render the heat map and save it as a PNG at `path`.
pub fn render_png(dataset: &AbundanceDataset, path: &Path, size: (u32, u32)) -> Result<()> {
    let (width, height) = size;
    let mut buffer = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, size).into_drawing_area();
        draw(&root, dataset).map_err(|e| anyhow!("drawing heat map: {e}"))?;
        root.present()
            .map_err(|e| anyhow!("finishing heat map: {e}"))?;
    }

    let image = image::RgbImage::from_raw(width, height, buffer)
        .context("heat map buffer does not match the image size")?;
    image
        .save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("writing {}", path.display()))?;

    log::info!("wrote {width}x{height} heat map to {}", path.display());
    Ok(())
}

/// Cell colours, rows = dates, columns = species.
pub fn cell_colors(dataset: &AbundanceDataset, gradient: &Gradient) -> Vec<Vec<RGBColor>> {
    let (lo, hi) = dataset.value_range();
    let norm = Normalizer::new(lo, hi);
    dataset
        .records
        .iter()
        .map(|record| {
            record
                .values
                .iter()
                .map(|&v| {
                    let (r, g, b) = gradient.at(norm.scale(v));
                    RGBColor(r, g, b)
                })
                .collect()
        })
        .collect()
}

/// Pixels reserved for a label axis holding `labels`.
fn label_area(labels: impl Iterator<Item = usize>) -> u32 {
    let longest = labels.max().unwrap_or(0) as u32;
    (longest * 8 + 16).clamp(40, 220)
}

fn draw<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    dataset: &AbundanceDataset,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;

    let (width, _) = root.dim_in_pixel();
    let (grid_area, bar_area) = root.split_horizontally(width.saturating_sub(COLORBAR_WIDTH));

    let gradient = Gradient::abundance();
    let n_species = dataset.species_count() as i32;
    let n_dates = dataset.len() as i32;
    let dates: Vec<&str> = dataset.dates().collect();

    let x_area = label_area(dataset.species.iter().map(|s| s.chars().count()));
    let y_area = label_area(dates.iter().map(|d| d.chars().count()));

    // Reversed y range puts the first date on top.
    let mut chart = ChartBuilder::on(&grid_area)
        .caption(TITLE, (FONT, TITLE_SIZE))
        .margin(10)
        .x_label_area_size(x_area)
        .y_label_area_size(y_area)
        .build_cartesian_2d(0..n_species, n_dates..0)?;

    let (plot_w, plot_h) = chart.plotting_area().dim_in_pixel();
    let x_offset = (plot_w as f64 / n_species as f64 / 2.0) as i32;
    let y_offset = (plot_h as f64 / n_dates as f64 / 2.0) as i32;

    let species_label = |x: &i32| {
        usize::try_from(*x)
            .ok()
            .and_then(|i| dataset.species.get(i))
            .cloned()
            .unwrap_or_default()
    };
    let date_label = |y: &i32| {
        usize::try_from(*y)
            .ok()
            .and_then(|i| dates.get(i))
            .map(|d| d.to_string())
            .unwrap_or_default()
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_labels(n_species as usize + 1)
        .y_labels(n_dates as usize + 1)
        .x_label_offset(x_offset)
        .y_label_offset(y_offset)
        .x_label_formatter(&species_label)
        .y_label_formatter(&date_label)
        .x_label_style((FONT, LABEL_SIZE).into_font().transform(FontTransform::Rotate90))
        .y_label_style((FONT, LABEL_SIZE))
        .draw()?;

    let colors = cell_colors(dataset, &gradient);
    chart.draw_series(colors.iter().enumerate().flat_map(|(row, cells)| {
        cells.iter().enumerate().map(move |(col, color)| {
            let (x, y) = (col as i32, row as i32);
            Rectangle::new([(x, y), (x + 1, y + 1)], color.filled())
        })
    }))?;

    draw_colorbar(&bar_area, dataset, &gradient, x_area)
}

fn draw_colorbar<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    dataset: &AbundanceDataset,
    gradient: &Gradient,
    bottom_margin: u32,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let (lo, hi) = dataset.value_range();
    let norm = Normalizer::new(lo, hi);
    let top = if hi > lo { hi } else { lo + 1.0 };

    let mut bar = ChartBuilder::on(area)
        .margin_top(44)
        .margin_bottom(bottom_margin + 10)
        .margin_left(10)
        .margin_right(10)
        .right_y_label_area_size(70)
        .build_cartesian_2d(0.0..1.0, lo..top)?;

    bar.configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .disable_x_axis()
        .y_desc("Abundance")
        .axis_desc_style((FONT, DESC_SIZE))
        .y_labels(6)
        .y_label_style((FONT, LABEL_SIZE))
        .draw()?;

    let step = (top - lo) / COLORBAR_STEPS as f64;
    bar.draw_series((0..COLORBAR_STEPS).map(|i| {
        let v0 = lo + step * i as f64;
        let v1 = v0 + step;
        let (r, g, b) = gradient.at(norm.scale((v0 + v1) / 2.0));
        Rectangle::new([(0.0, v0), (1.0, v1)], RGBColor(r, g, b).filled())
    }))?;

    Ok(())
}
