//! Chart Plotter Module
//! Interactive dashboard charts using egui_plot.

use crate::data::IncidentTable;
use crate::stats::{
    Aggregator, BoxStats, DescriptiveStats, OverviewRow, StatsCalculator, SummaryTotals,
    DEFAULT_TOP_COUNTIES,
};
use egui::Color32;
use egui_plot::{Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Legend, Plot, PlotPoints, Points};
use std::collections::BTreeMap;

pub const FIRE_COLOR: Color32 = Color32::from_rgb(231, 76, 60); // Red
pub const MAJOR_FIRE_COLOR: Color32 = Color32::from_rgb(243, 156, 18); // Orange
pub const DEATH_COLOR: Color32 = Color32::from_rgb(52, 152, 219); // Blue
pub const ACRES_COLOR: Color32 = Color32::from_rgb(46, 204, 113); // Green

/// Everything the "Costs of Fire" page shows, derived from one table.
#[derive(Debug, Clone, Default)]
pub struct FireCostData {
    pub incidents_per_year: Vec<(i32, usize)>,
    pub acres_boxes: BTreeMap<i32, BoxStats>,
    pub acres_overall: DescriptiveStats,
    pub acres_sum_per_year: Vec<(i32, f64)>,
    pub top_counties: Vec<(String, usize)>,
}

impl FireCostData {
    pub fn from_table(table: &IncidentTable) -> Self {
        let acres = Aggregator::acres_burned_per_year(table);
        let all_acres: Vec<f64> = acres.values().flatten().copied().collect();
        Self {
            incidents_per_year: Aggregator::incidents_per_year(table),
            acres_boxes: StatsCalculator::box_stats_by_key(&acres),
            acres_overall: StatsCalculator::compute_descriptive_stats(&all_acres),
            acres_sum_per_year: Aggregator::acres_burned_sum_per_year(table),
            top_counties: Aggregator::top_counties(table, DEFAULT_TOP_COUNTIES),
        }
    }
}

/// One told fatality, owned so it can outlive the table borrow.
#[derive(Debug, Clone, PartialEq)]
pub struct NarrativeLine {
    pub incident_name: String,
    pub year: Option<i32>,
    pub fatalities: u32,
}

impl NarrativeLine {
    /// Sentence for the human cost page, singular for exactly one death.
    pub fn sentence(&self) -> String {
        let year = self
            .year
            .map(|y| y.to_string())
            .unwrap_or_else(|| "an unknown year".to_string());
        if self.fatalities == 1 {
            format!(
                "During the {} of {}, 1 person lost their life.",
                self.incident_name, year
            )
        } else {
            format!(
                "During the {} of {}, {} people lost their lives.",
                self.incident_name, year, self.fatalities
            )
        }
    }
}

/// Everything the "Human Cost" page shows.
#[derive(Debug, Clone, Default)]
pub struct HumanCostData {
    pub narratives: Vec<NarrativeLine>,
    pub totals: SummaryTotals,
    pub deaths_per_year: Vec<(i32, u64)>,
}

impl HumanCostData {
    pub fn from_table(table: &IncidentTable) -> Self {
        let narratives = Aggregator::fatality_narratives(table)
            .iter()
            .map(|n| NarrativeLine {
                incident_name: n.incident_name.to_string(),
                year: n.year,
                fatalities: n.fatalities,
            })
            .collect();

        Self {
            narratives,
            totals: Aggregator::summary_totals(table),
            deaths_per_year: Aggregator::deaths_per_year(table),
        }
    }
}

/// Draws dashboard charts.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Incident locations as points on lon/lat axes.
    pub fn draw_incident_map(ui: &mut egui::Ui, rows: &[OverviewRow], height: f32) {
        let (major, other): (Vec<&OverviewRow>, Vec<&OverviewRow>) = rows
            .iter()
            .filter(|r| r.lat.is_some() && r.lon.is_some())
            .partition(|r| r.major_incident == Some(true));

        fn to_points(rows: &[&OverviewRow]) -> PlotPoints {
            rows.iter()
                .filter_map(|r| Some([r.lon?, r.lat?]))
                .collect()
        }

        Plot::new("incident_map")
            .height(height)
            .data_aspect(1.0)
            .x_axis_label("Longitude")
            .y_axis_label("Latitude")
            .legend(Legend::default())
            // Keep the whole state in frame even for a single county
            .include_x(-124.5)
            .include_x(-114.0)
            .include_y(32.5)
            .include_y(42.0)
            .show(ui, |plot_ui| {
                plot_ui.points(
                    Points::new(to_points(&other))
                        .radius(2.5)
                        .color(FIRE_COLOR.gamma_multiply(0.8))
                        .name("Incident"),
                );
                plot_ui.points(
                    Points::new(to_points(&major))
                        .radius(3.5)
                        .color(MAJOR_FIRE_COLOR)
                        .name("Major incident"),
                );
            });
    }

    /// Scatter of deaths per year.
    pub fn draw_deaths_per_year(ui: &mut egui::Ui, deaths: &[(i32, u64)], height: f32) {
        let points: PlotPoints = deaths
            .iter()
            .map(|&(year, sum)| [year as f64, sum as f64])
            .collect();

        Plot::new("deaths_per_year")
            .height(height)
            .x_axis_label("Year")
            .y_axis_label("Deaths")
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                plot_ui.points(
                    Points::new(points)
                        .radius(5.0)
                        .color(DEATH_COLOR)
                        .name("Wildfire Deaths per Year"),
                );
            });
    }

    /// Horizontal bars of incident counts per year.
    pub fn draw_fires_per_year(ui: &mut egui::Ui, counts: &[(i32, usize)], height: f32) {
        let bars: Vec<Bar> = counts
            .iter()
            .map(|&(year, count)| {
                Bar::new(year as f64, count as f64)
                    .width(0.7)
                    .name(year.to_string())
            })
            .collect();

        Plot::new("fires_per_year")
            .height(height)
            .x_axis_label("Fires")
            .y_axis_label("Year")
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(
                    BarChart::new(bars)
                        .horizontal()
                        .color(FIRE_COLOR)
                        .name("California Fires per Year"),
                );
            });
    }

    /// Box and whisker plot of acres burned, one box per year.
    pub fn draw_acres_box_plot(ui: &mut egui::Ui, boxes: &BTreeMap<i32, BoxStats>, height: f32) {
        Plot::new("acres_burned_per_year")
            .height(height)
            .x_axis_label("Year")
            .y_axis_label("Acres Burned")
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                let elems: Vec<BoxElem> = boxes
                    .iter()
                    .map(|(&year, stats)| {
                        BoxElem::new(
                            year as f64,
                            BoxSpread::new(
                                stats.whisker_low,
                                stats.q1,
                                stats.median,
                                stats.q3,
                                stats.whisker_high,
                            ),
                        )
                        .name(year.to_string())
                        .box_width(0.5)
                        .fill(ACRES_COLOR.gamma_multiply(0.3))
                        .stroke(egui::Stroke::new(1.5, ACRES_COLOR))
                    })
                    .collect();
                plot_ui.box_plot(BoxPlot::new(elems).name("Acres Burned per Year"));

                let outliers: PlotPoints = boxes
                    .iter()
                    .flat_map(|(&year, stats)| {
                        stats.outliers.iter().map(move |&v| [year as f64, v])
                    })
                    .collect();
                plot_ui.points(
                    Points::new(outliers)
                        .radius(2.5)
                        .color(ACRES_COLOR.gamma_multiply(0.7))
                        .name("Outliers"),
                );
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Cleaner, Incident};

    fn table() -> IncidentTable {
        let base = Incident {
            lat: Some(38.0),
            lon: Some(-121.0),
            county: "Butte".to_string(),
            ..Default::default()
        };
        Cleaner::clean_records(vec![
            Incident {
                name: "Camp Fire".to_string(),
                archive_year: Some(2018),
                fatalities: Some(85),
                acres_burned: Some(153336.0),
                ..base.clone()
            },
            Incident {
                name: "Wall Fire".to_string(),
                archive_year: Some(2017),
                fatalities: Some(1),
                acres_burned: Some(6033.0),
                ..base
            },
        ])
    }

    #[test]
    fn test_narrative_sentences() {
        let data = HumanCostData::from_table(&table());
        let sentences: Vec<String> = data.narratives.iter().map(|n| n.sentence()).collect();
        assert_eq!(
            sentences,
            vec![
                "During the Camp Fire of 2018, 85 people lost their lives.",
                "During the Wall Fire of 2017, 1 person lost their life.",
            ]
        );
        assert_eq!(data.totals.total_fatalities, 86);
        assert_eq!(data.deaths_per_year, vec![(2017, 1), (2018, 85)]);
    }

    #[test]
    fn test_fire_cost_data() {
        let data = FireCostData::from_table(&table());
        assert_eq!(data.incidents_per_year, vec![(2017, 1), (2018, 1)]);
        assert_eq!(data.acres_boxes[&2018].median, 153336.0);
        assert_eq!(data.acres_overall.count, 2);
        assert_eq!(data.acres_overall.max, 153336.0);
        assert_eq!(data.top_counties, vec![("Butte".to_string(), 2)]);
    }
}
