//! Plot-surface setup and shared visual style.
//!
//! Every image is written through here so that axis layout, line weight,
//! legend placement, and the series palette stay consistent across the
//! plotting routines.

use anyhow::{bail, Result};
use plotters::prelude::*;
use std::path::Path;

/// Colors assigned to line series, cycled in order.
pub const PALETTE: [RGBColor; 10] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
    RGBColor(188, 189, 34),
    RGBColor(23, 190, 207),
];

/// Color for series `index`, wrapping when a plot has more series than
/// the palette has entries.
pub fn series_color(index: usize) -> RGBColor {
    PALETTE[index % PALETTE.len()]
}

/// One line series ready to draw: a legend label plus the y values,
/// aligned index-for-index with the shared time column.
pub struct Series {
    pub label: String,
    pub values: Vec<f64>,
}

/// Only the SVG backend is compiled in; reject other extensions up front
/// rather than writing an image the extension misdescribes.
fn check_extension(path: &Path) -> Result<()> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("svg") => Ok(()),
        _ => bail!(
            "Unsupported plot format for {}: only .svg output is supported",
            path.display()
        ),
    }
}

/// Draw labeled line series against a shared time axis and write the
/// result to `path`, overwriting any existing file.
///
/// Axis ranges run from zero to the given maxima. Zero maxima (an empty
/// data file, or a filter that excluded every series) still produce a
/// valid image with empty axes and no legend.
pub fn render_lines(
    path: &Path,
    x_max: f64,
    y_max: f64,
    x_label: &str,
    y_label: &str,
    times: &[f64],
    series: &[Series],
) -> Result<()> {
    check_extension(path)?;
    let root = SVGBackend::new(path, (1200, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let x_end = if x_max > 0.0 { x_max } else { 1.0 };
    let y_end = if y_max > 0.0 { y_max } else { 1.0 };

    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0f64..x_end, 0f64..y_end)?;

    chart
        .configure_mesh()
        .x_desc(x_label)
        .y_desc(y_label)
        .draw()?;

    for (i, s) in series.iter().enumerate() {
        let color = series_color(i);
        chart
            .draw_series(LineSeries::new(
                times.iter().zip(s.values.iter()).map(|(x, y)| (*x, *y)),
                color.stroke_width(1),
            ))?
            .label(s.label.clone())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    if !series.is_empty() {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .label_font(("sans-serif", 9))
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    root.present()?;
    Ok(())
}

/// Write the palette reference image: one labeled horizontal band per
/// palette entry, in palette order.
pub fn render_palette(path: &Path) -> Result<()> {
    check_extension(path)?;
    let root = SVGBackend::new(path, (600, 400)).into_drawing_area();
    root.fill(&WHITE)?;

    let bands = root.split_evenly((PALETTE.len(), 1));
    for (i, band) in bands.iter().enumerate() {
        band.fill(&PALETTE[i])?;
        band.draw_text(
            &format!("color {}", i),
            &TextStyle::from(("sans-serif", 16)).color(&WHITE),
            (10, 10),
        )?;
    }

    root.present()?;
    Ok(())
}
