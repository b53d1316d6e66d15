//! Report Generator Module
//! Headless export of the cost charts (PNG) and summary numbers (JSON).

use crate::charts::{FireCostData, HumanCostData, RenderError, StaticChartRenderer};
use crate::data::IncidentTable;
use crate::stats::{DescriptiveStats, SummaryTotals};
use rayon::prelude::*;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const SUMMARY_FILE: &str = "summary.json";
pub const DEATHS_CHART_FILE: &str = "deaths_per_year.png";
pub const FIRES_CHART_FILE: &str = "fires_per_year.png";
pub const ACRES_CHART_FILE: &str = "acres_burned_per_year.png";

/// Pixel size of every exported chart.
pub const CHART_SIZE: (u32, u32) = (1200, 500);

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write summary: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Contents of `summary.json`.
#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    pub rows: usize,
    pub columns: usize,
    pub totals: SummaryTotals,
    pub deaths_per_year: Vec<(i32, u64)>,
    pub incidents_per_year: Vec<(i32, usize)>,
    pub acres_burned_sum_per_year: Vec<(i32, f64)>,
    pub acres_burned_stats: DescriptiveStats,
    pub top_counties: Vec<(String, usize)>,
}

impl ReportSummary {
    pub fn from_table(table: &IncidentTable) -> Self {
        let (rows, columns) = table.shape();
        let human = HumanCostData::from_table(table);
        let fire = FireCostData::from_table(table);
        Self {
            rows,
            columns,
            totals: human.totals,
            deaths_per_year: human.deaths_per_year,
            incidents_per_year: fire.incidents_per_year,
            acres_burned_sum_per_year: fire.acres_sum_per_year,
            acres_burned_stats: fire.acres_overall,
            top_counties: fire.top_counties,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum ChartKind {
    DeathsPerYear,
    FiresPerYear,
    AcresBurnedPerYear,
}

impl ChartKind {
    const ALL: [ChartKind; 3] = [
        ChartKind::DeathsPerYear,
        ChartKind::FiresPerYear,
        ChartKind::AcresBurnedPerYear,
    ];

    fn file_name(self) -> &'static str {
        match self {
            ChartKind::DeathsPerYear => DEATHS_CHART_FILE,
            ChartKind::FiresPerYear => FIRES_CHART_FILE,
            ChartKind::AcresBurnedPerYear => ACRES_CHART_FILE,
        }
    }
}

pub struct ReportGenerator;

impl ReportGenerator {
    /// Write all charts and the summary into `out_dir`, returning the written paths.
    pub fn generate(table: &IncidentTable, out_dir: &Path) -> Result<Vec<PathBuf>, ReportError> {
        fs::create_dir_all(out_dir).map_err(|source| ReportError::Io {
            path: out_dir.to_path_buf(),
            source,
        })?;

        let human = HumanCostData::from_table(table);
        let fire = FireCostData::from_table(table);

        // Charts are independent files, render them side by side
        let mut written: Vec<PathBuf> = ChartKind::ALL
            .par_iter()
            .map(|&kind| {
                let path = out_dir.join(kind.file_name());
                let rendered = match kind {
                    ChartKind::DeathsPerYear => StaticChartRenderer::render_deaths_per_year(
                        &path,
                        &human.deaths_per_year,
                        CHART_SIZE,
                    ),
                    ChartKind::FiresPerYear => StaticChartRenderer::render_fires_per_year(
                        &path,
                        &fire.incidents_per_year,
                        CHART_SIZE,
                    ),
                    ChartKind::AcresBurnedPerYear => StaticChartRenderer::render_acres_box_plot(
                        &path,
                        &fire.acres_boxes,
                        CHART_SIZE,
                    ),
                };
                rendered.map(|()| path)
            })
            .collect::<Result<_, RenderError>>()?;

        written.push(Self::write_summary(table, out_dir)?);
        log::info!("Report written to {}", out_dir.display());
        Ok(written)
    }

    /// Write only `summary.json`.
    pub fn write_summary(table: &IncidentTable, out_dir: &Path) -> Result<PathBuf, ReportError> {
        let path = out_dir.join(SUMMARY_FILE);
        let file = File::create(&path).map_err(|source| ReportError::Io {
            path: path.clone(),
            source,
        })?;
        Self::write_json(BufWriter::new(file), &path, &ReportSummary::from_table(table))?;
        log::debug!("Wrote {}", path.display());
        Ok(path)
    }

    /// Serialize `summary` and flush, so a late write failure is not lost on drop.
    fn write_json<W: Write>(
        mut writer: W,
        path: &Path,
        summary: &ReportSummary,
    ) -> Result<(), ReportError> {
        serde_json::to_writer_pretty(&mut writer, summary)?;
        writer.flush().map_err(|source| ReportError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
