//! Static Chart Renderer
//! Draws the cost charts to PNG files with plotters, for the headless report.
//!
//! Charts:
//! 1. Wildfire Deaths per Year (scatter)
//! 2. California Fires per Year (horizontal bars)
//! 3. Acres Burned per Year (box and whisker)

use crate::stats::BoxStats;
use plotters::prelude::*;
use std::collections::BTreeMap;
use std::error::Error;
use std::ops::Range;
use std::path::Path;
use thiserror::Error;

// Colors
const FIRE: RGBColor = RGBColor(231, 76, 60);
const DEATH: RGBColor = RGBColor(52, 152, 219);
const ACRES: RGBColor = RGBColor(46, 204, 113);
const LIGHT_ACRES: RGBColor = RGBColor(198, 224, 180);

const CAPTION_FONT: (&str, u32) = ("sans-serif", 24);

#[derive(Error, Debug)]
#[error("Failed to draw {chart}: {message}")]
pub struct RenderError {
    pub chart: &'static str,
    pub message: String,
}

type DrawResult = Result<(), Box<dyn Error>>;

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    pub fn render_deaths_per_year(
        path: &Path,
        deaths: &[(i32, u64)],
        size: (u32, u32),
    ) -> Result<(), RenderError> {
        Self::draw_deaths_per_year(path, deaths, size).map_err(|e| RenderError {
            chart: "deaths per year",
            message: e.to_string(),
        })
    }

    pub fn render_fires_per_year(
        path: &Path,
        counts: &[(i32, usize)],
        size: (u32, u32),
    ) -> Result<(), RenderError> {
        Self::draw_fires_per_year(path, counts, size).map_err(|e| RenderError {
            chart: "fires per year",
            message: e.to_string(),
        })
    }

    pub fn render_acres_box_plot(
        path: &Path,
        boxes: &BTreeMap<i32, BoxStats>,
        size: (u32, u32),
    ) -> Result<(), RenderError> {
        Self::draw_acres_box_plot(path, boxes, size).map_err(|e| RenderError {
            chart: "acres burned per year",
            message: e.to_string(),
        })
    }

    fn draw_deaths_per_year(path: &Path, deaths: &[(i32, u64)], size: (u32, u32)) -> DrawResult {
        let root = BitMapBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE)?;

        let y_max = deaths.iter().map(|&(_, d)| d).max().unwrap_or(0) as f64;
        let mut chart = ChartBuilder::on(&root)
            .caption("Wildfire Deaths per Year", CAPTION_FONT)
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(
                Self::year_axis(deaths.iter().map(|&(y, _)| y)),
                0f64..Self::value_ceiling(y_max),
            )?;

        chart
            .configure_mesh()
            .x_desc("Year")
            .y_desc("Deaths")
            .x_label_formatter(&|x| format!("{:.0}", x))
            .draw()?;

        chart.draw_series(
            deaths
                .iter()
                .map(|&(year, d)| Circle::new((year as f64, d as f64), 5, DEATH.filled())),
        )?;

        root.present()?;
        Ok(())
    }

    fn draw_fires_per_year(path: &Path, counts: &[(i32, usize)], size: (u32, u32)) -> DrawResult {
        let root = BitMapBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE)?;

        let x_max = counts.iter().map(|&(_, c)| c).max().unwrap_or(0) as f64;
        let mut chart = ChartBuilder::on(&root)
            .caption("California Fires per Year", CAPTION_FONT)
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(
                0f64..Self::value_ceiling(x_max),
                Self::year_axis(counts.iter().map(|&(y, _)| y)),
            )?;

        chart
            .configure_mesh()
            .disable_y_mesh()
            .x_desc("Fires")
            .y_label_formatter(&|y| format!("{:.0}", y))
            .draw()?;

        chart.draw_series(counts.iter().map(|&(year, count)| {
            let y = year as f64;
            Rectangle::new([(0.0, y - 0.35), (count as f64, y + 0.35)], FIRE.filled())
        }))?;

        root.present()?;
        Ok(())
    }

    fn draw_acres_box_plot(
        path: &Path,
        boxes: &BTreeMap<i32, BoxStats>,
        size: (u32, u32),
    ) -> DrawResult {
        let root = BitMapBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE)?;

        let y_max = boxes
            .values()
            .flat_map(|b| b.outliers.iter().copied().chain(std::iter::once(b.whisker_high)))
            .fold(0.0, f64::max);
        let mut chart = ChartBuilder::on(&root)
            .caption("Acres Burned per Year", CAPTION_FONT)
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(80)
            .build_cartesian_2d(
                Self::year_axis(boxes.keys().copied()),
                0f64..Self::value_ceiling(y_max),
            )?;

        chart
            .configure_mesh()
            .x_desc("Year")
            .y_desc("Acres Burned")
            .x_label_formatter(&|x| format!("{:.0}", x))
            .draw()?;

        let half = 0.25;
        for (&year, stats) in boxes {
            let x = year as f64;
            chart.draw_series(std::iter::once(Rectangle::new(
                [(x - half, stats.q1), (x + half, stats.q3)],
                LIGHT_ACRES.filled(),
            )))?;
            chart.draw_series(std::iter::once(Rectangle::new(
                [(x - half, stats.q1), (x + half, stats.q3)],
                ACRES.stroke_width(2),
            )))?;

            let segments = [
                [(x - half, stats.median), (x + half, stats.median)],
                [(x, stats.q3), (x, stats.whisker_high)],
                [(x, stats.q1), (x, stats.whisker_low)],
                [(x - half / 2.0, stats.whisker_high), (x + half / 2.0, stats.whisker_high)],
                [(x - half / 2.0, stats.whisker_low), (x + half / 2.0, stats.whisker_low)],
            ];
            chart.draw_series(
                segments
                    .iter()
                    .map(|seg| PathElement::new(seg.to_vec(), BLACK.stroke_width(1))),
            )?;

            chart.draw_series(
                stats
                    .outliers
                    .iter()
                    .map(|&v| Circle::new((x, v), 3, ACRES.stroke_width(1))),
            )?;
        }

        root.present()?;
        Ok(())
    }

    /// Year axis padded by one on each side.
    fn year_axis(years: impl Iterator<Item = i32>) -> Range<f64> {
        let (lo, hi) = years.fold((i32::MAX, i32::MIN), |(lo, hi), y| (lo.min(y), hi.max(y)));
        if lo > hi {
            return 0.0..1.0;
        }
        (lo as f64 - 1.0)..(hi as f64 + 1.0)
    }

    /// Upper bound with headroom, never zero.
    fn value_ceiling(max: f64) -> f64 {
        (max * 1.1).max(1.0)
    }
}
