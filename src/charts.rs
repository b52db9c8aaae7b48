//! SVG chart rendering for the analysis reports.

use std::path::Path;

use plotters::prelude::*;

use crate::{
    core::{ArrangementTotals, Month, WindowOptimum},
    dataset::SkyCondition,
    prelude::*,
    quantity::WattHoursPerSquareMetre,
};

const WIDTH: u32 = 1000;
const HEIGHT: u32 = 600;

const CLOUDY_COLOR: RGBColor = RGBColor(33, 150, 243);
const CLEAR_COLOR: RGBColor = RGBColor(255, 152, 0);

fn padded_max(values: impl Iterator<Item = f64>) -> f64 {
    values.fold(0.0_f64, f64::max).max(1.0) * 1.1
}

/// Grouped bars: every arrangement's annual total, cloudy next to clear sky.
pub fn render_annual_comparison(path: &Path, totals: &[ArrangementTotals]) -> Result {
    let root = SVGBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let y_max = padded_max(totals.iter().flat_map(|row| [row.cloudy.0, row.clear.0]));
    let labels = totals.iter().map(|row| row.label.clone()).collect::<Vec<_>>();

    #[allow(clippy::cast_precision_loss)]
    let n_bars = totals.len() as f64;
    let mut chart = ChartBuilder::on(&root)
        .caption("Annual GHI output by arrangement", ("sans-serif", 22))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(90)
        .build_cartesian_2d(0f64..n_bars, 0f64..y_max)?;
    chart
        .configure_mesh()
        .x_desc("Arrangement")
        .y_desc("Total GHI (Wh/m²)")
        .x_labels(totals.len())
        .x_label_formatter(&|x| {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let index = x.floor() as usize;
            labels.get(index).cloned().unwrap_or_default()
        })
        .disable_x_mesh()
        .draw()?;

    #[allow(clippy::cast_precision_loss)]
    chart
        .draw_series(totals.iter().enumerate().map(|(index, row)| {
            let x = index as f64;
            Rectangle::new([(x + 0.15, 0.0), (x + 0.50, row.cloudy.0)], CLOUDY_COLOR.filled())
        }))?
        .label("Cloudy sky")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], CLOUDY_COLOR.filled()));
    #[allow(clippy::cast_precision_loss)]
    chart
        .draw_series(totals.iter().enumerate().map(|(index, row)| {
            let x = index as f64;
            Rectangle::new([(x + 0.50, 0.0), (x + 0.85, row.clear.0)], CLEAR_COLOR.filled())
        }))?
        .label("Clear sky")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], CLEAR_COLOR.filled()));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}

/// Grouped bars comparing the per-month GHI of two arrangements.
pub fn render_monthly_comparison(
    path: &Path,
    sky: SkyCondition,
    (label_a, series_a): (&str, &[WattHoursPerSquareMetre; 12]),
    (label_b, series_b): (&str, &[WattHoursPerSquareMetre; 12]),
) -> Result {
    let root = SVGBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let y_max =
        padded_max(series_a.iter().chain(series_b).map(|total| total.0));
    let caption = format!("Monthly GHI: {label_a} vs {label_b} ({sky} sky)");

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 22))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(90)
        .build_cartesian_2d(0f64..12f64, 0f64..y_max)?;
    chart
        .configure_mesh()
        .x_desc("Month")
        .y_desc("GHI (Wh/m²)")
        .x_labels(12)
        .x_label_formatter(&month_label)
        .disable_x_mesh()
        .draw()?;

    for (offset, series, color, label) in [
        (0.15, series_a, CLOUDY_COLOR, label_a),
        (0.50, series_b, CLEAR_COLOR, label_b),
    ] {
        #[allow(clippy::cast_precision_loss)]
        chart
            .draw_series(series.iter().enumerate().map(|(index, total)| {
                let x = index as f64 + offset;
                Rectangle::new([(x, 0.0), (x + 0.35, total.0)], color.filled())
            }))?
            .label(label)
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}

/// One line per arrangement: the tilt it applies in each calendar month.
pub fn render_tilt_strategies(
    path: &Path,
    sky: SkyCondition,
    series: &[(String, [f64; 12])],
) -> Result {
    let root = SVGBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let y_max = padded_max(series.iter().flat_map(|(_, tilts)| tilts.iter().copied()));
    let mut chart = ChartBuilder::on(&root)
        .caption(format!("Tilt angle strategies ({sky} sky)"), ("sans-serif", 22))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..11f64, 0f64..y_max)?;
    chart
        .configure_mesh()
        .x_desc("Month")
        .y_desc("Panel tilt (degrees)")
        .x_labels(12)
        .x_label_formatter(&month_label)
        .draw()?;

    for (index, (label, tilts)) in series.iter().enumerate() {
        let color = Palette99::pick(index).mix(1.0);
        #[allow(clippy::cast_precision_loss)]
        chart
            .draw_series(LineSeries::new(
                tilts.iter().enumerate().map(|(month, tilt)| (month as f64, *tilt)),
                color.stroke_width(2),
            ))?
            .label(label)
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
            });
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}

/// Running sum of the month-by-month GHI advantage of one arrangement over
/// another.
pub fn render_cumulative_gain(
    path: &Path,
    sky: SkyCondition,
    base_label: &str,
    optimized_label: &str,
    monthly_gain: &[f64; 12],
) -> Result {
    let root = SVGBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let cumulative: Vec<f64> = monthly_gain
        .iter()
        .scan(0.0, |running, gain| {
            *running += gain;
            Some(*running)
        })
        .collect();
    let y_min = cumulative.iter().copied().fold(0.0_f64, f64::min) * 1.1 - 1.0;
    let y_max = padded_max(cumulative.iter().copied());

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Cumulative GHI gain: {optimized_label} over {base_label} ({sky} sky)"),
            ("sans-serif", 22),
        )
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(90)
        .build_cartesian_2d(0f64..11f64, y_min..y_max)?;
    chart
        .configure_mesh()
        .x_desc("Month")
        .y_desc("Cumulative gain (Wh/m²)")
        .x_labels(12)
        .x_label_formatter(&month_label)
        .draw()?;

    // Zero reference line.
    chart.draw_series(LineSeries::new([(0.0, 0.0), (11.0, 0.0)], BLACK.mix(0.4)))?;
    #[allow(clippy::cast_precision_loss)]
    chart.draw_series(LineSeries::new(
        cumulative.iter().enumerate().map(|(month, gain)| (month as f64, *gain)),
        CLOUDY_COLOR.stroke_width(2),
    ))?;
    #[allow(clippy::cast_precision_loss)]
    chart.draw_series(
        cumulative
            .iter()
            .enumerate()
            .map(|(month, gain)| Circle::new((month as f64, *gain), 3, CLOUDY_COLOR.filled())),
    )?;

    root.present()?;
    Ok(())
}

/// Optimal tilt per rolling window, in start-month order.
pub fn render_window_tilts(
    path: &Path,
    sky: SkyCondition,
    windows: &[WindowOptimum],
) -> Result {
    let root = SVGBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let labels = windows.iter().map(|window| window.label.clone()).collect::<Vec<_>>();
    let y_max =
        padded_max(windows.iter().map(|window| f64::from(window.optimum.tilt_degrees)));

    #[allow(clippy::cast_precision_loss)]
    let n_windows = (windows.len().max(2) - 1) as f64;
    let mut chart = ChartBuilder::on(&root)
        .caption(format!("Sliding window optimal tilt ({sky} sky)"), ("sans-serif", 22))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..n_windows, 0f64..y_max)?;
    chart
        .configure_mesh()
        .x_desc("Window")
        .y_desc("Optimal tilt (degrees)")
        .x_labels(windows.len())
        .x_label_formatter(&move |x| {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let index = x.round() as usize;
            labels.get(index).cloned().unwrap_or_default()
        })
        .draw()?;

    #[allow(clippy::cast_precision_loss)]
    chart.draw_series(LineSeries::new(
        windows
            .iter()
            .enumerate()
            .map(|(index, window)| (index as f64, f64::from(window.optimum.tilt_degrees))),
        CLOUDY_COLOR.stroke_width(2),
    ))?;
    #[allow(clippy::cast_precision_loss)]
    chart.draw_series(windows.iter().enumerate().map(|(index, window)| {
        Circle::new(
            (index as f64, f64::from(window.optimum.tilt_degrees)),
            3,
            CLOUDY_COLOR.filled(),
        )
    }))?;

    root.present()?;
    Ok(())
}

fn month_label(x: &f64) -> String {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let index = x.round() as usize;
    Month::ALL.get(index).map(|month| month.short_name().to_owned()).unwrap_or_default()
}
