//! Page View Widget
//! Central panel: renders the selected dashboard page from precomputed data.

use crate::charts::{ChartPlotter, FireCostData, HumanCostData};
use crate::stats::OverviewRow;
use egui::{Color32, RichText, ScrollArea};
use std::cmp::Ordering;

const CHART_HEIGHT: f32 = 300.0;
const MAP_HEIGHT: f32 = 420.0;
const SECTION_SPACING: f32 = 15.0;

/// Columns of the overview table, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Year,
    County,
    Name,
    MajorIncident,
    AcresBurned,
    Location,
}

impl SortColumn {
    pub const ALL: [SortColumn; 6] = [
        SortColumn::Year,
        SortColumn::County,
        SortColumn::Name,
        SortColumn::MajorIncident,
        SortColumn::AcresBurned,
        SortColumn::Location,
    ];

    pub fn header(self) -> &'static str {
        match self {
            SortColumn::Year => "Year",
            SortColumn::County => "County",
            SortColumn::Name => "Name of Fire",
            SortColumn::MajorIncident => "Major Incident",
            SortColumn::AcresBurned => "Acres Burned",
            SortColumn::Location => "Location of Fire",
        }
    }
}

/// Stable sort of overview rows; missing values sort first.
pub fn sort_rows(rows: &mut [OverviewRow], column: SortColumn, ascending: bool) {
    rows.sort_by(|a, b| {
        let ord = match column {
            SortColumn::Year => a.year.cmp(&b.year),
            SortColumn::County => a.county.cmp(&b.county),
            SortColumn::Name => a.name.cmp(&b.name),
            SortColumn::MajorIncident => a.major_incident.cmp(&b.major_incident),
            SortColumn::AcresBurned => a
                .acres_burned
                .partial_cmp(&b.acres_burned)
                .unwrap_or(Ordering::Equal),
            SortColumn::Location => a.location.cmp(&b.location),
        };
        if ascending {
            ord
        } else {
            ord.reverse()
        }
    });
}

/// Data for the overview page, with the table's sort state.
#[derive(Debug, Clone, Default)]
pub struct OverviewData {
    pub rows: Vec<OverviewRow>,
    pub sort: Option<(SortColumn, bool)>,
}

impl OverviewData {
    pub fn new(rows: Vec<OverviewRow>) -> Self {
        Self { rows, sort: None }
    }

    /// Clicking a header sorts ascending, clicking it again flips direction.
    pub fn toggle_sort(&mut self, column: SortColumn) {
        let ascending = match self.sort {
            Some((current, ascending)) if current == column => !ascending,
            _ => true,
        };
        self.sort = Some((column, ascending));
        sort_rows(&mut self.rows, column, ascending);
    }
}

/// Intro page facts.
#[derive(Debug, Clone, Default)]
pub struct HomeData {
    pub rows: usize,
    pub columns: usize,
}

/// Credit line on the intro page.
pub const AUTHOR_CREDIT: &str = "created by: Nicholas Ettore";

/// Period wording for the human cost captions, e.g. "between 2013 & 2020".
pub fn period_caption(year_low: i32, year_high: i32) -> String {
    match year_low.cmp(&year_high) {
        Ordering::Equal => format!("in {}", year_low),
        Ordering::Less => format!("between {} & {}", year_low, year_high),
        Ordering::Greater => format!("between {} & {} (empty range)", year_low, year_high),
    }
}

pub struct PageView;

impl PageView {
    pub fn show_home(ui: &mut egui::Ui, home: &HomeData) {
        ui.add_space(SECTION_SPACING);
        ui.label(
            RichText::new(format!(
                "Welcome to a data analysis based on the Kaggle dataset \
                 \"California WildFires (2013-2020)\". After cleaning the set of invalid \
                 location data, there are {} entries across {} columns. Please click the \
                 buttons on the left side of the screen to view visuals and text analysis \
                 put together to best represent the dataset.",
                home.rows, home.columns
            ))
            .size(18.0),
        );
        ui.add_space(SECTION_SPACING);
        ui.label("Data collected from https://www.fire.ca.gov/incidents/ by Kaggle user ARES");
        ui.add_space(SECTION_SPACING);
        ui.label(RichText::new(AUTHOR_CREDIT).italics());
    }

    pub fn show_overview(ui: &mut egui::Ui, overview: &mut OverviewData) {
        ui.label("Overview Map with sortable table. Both filterable by Year and County.");
        ui.add_space(8.0);

        if overview.rows.is_empty() {
            ui.label(RichText::new("No incidents match the selected filters").size(16.0));
        }

        ChartPlotter::draw_incident_map(ui, &overview.rows, MAP_HEIGHT);
        ui.add_space(SECTION_SPACING);

        let mut clicked = None;
        ScrollArea::both()
            .id_salt("overview_table")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                egui::Grid::new("overview_grid")
                    .striped(true)
                    .min_col_width(60.0)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        for column in SortColumn::ALL {
                            let arrow = match overview.sort {
                                Some((c, true)) if c == column => " ⬆",
                                Some((c, false)) if c == column => " ⬇",
                                _ => "",
                            };
                            let header = RichText::new(format!("{}{}", column.header(), arrow))
                                .strong()
                                .size(12.0);
                            if ui.button(header).clicked() {
                                clicked = Some(column);
                            }
                        }
                        ui.end_row();

                        for row in &overview.rows {
                            ui.label(row.year.map(|y| y.to_string()).unwrap_or_default());
                            ui.label(&row.county);
                            ui.label(&row.name);
                            ui.label(match row.major_incident {
                                Some(true) => "Yes",
                                Some(false) => "No",
                                None => "",
                            });
                            ui.label(
                                row.acres_burned
                                    .map(|a| format!("{:.0}", a))
                                    .unwrap_or_default(),
                            );
                            ui.label(&row.location);
                            ui.end_row();
                        }
                    });
            });

        if let Some(column) = clicked {
            overview.toggle_sort(column);
        }
    }

    pub fn show_fire_cost(ui: &mut egui::Ui, fire: &FireCostData) {
        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("The general cost of fires to the State of California");
                ui.add_space(SECTION_SPACING);

                ui.label(RichText::new("California Fires per Year").size(14.0).strong());
                ChartPlotter::draw_fires_per_year(ui, &fire.incidents_per_year, CHART_HEIGHT);
                ui.add_space(SECTION_SPACING);

                ui.label(RichText::new("Acres Burned per Year").size(14.0).strong());
                ChartPlotter::draw_acres_box_plot(ui, &fire.acres_boxes, CHART_HEIGHT);
                ui.add_space(SECTION_SPACING);

                ui.columns(2, |cols| {
                    cols[0].label(RichText::new("Acres Burned").size(16.0).strong());
                    let overall = &fire.acres_overall;
                    if overall.count > 0 {
                        cols[0].label(format!(
                            "{} fires with recorded acreage: median {:.0} acres, mean {:.0} acres, largest {:.0} acres.",
                            overall.count, overall.median, overall.mean, overall.max
                        ));
                    }
                    Self::pairs_grid(
                        &mut cols[0],
                        "acres_sum_grid",
                        ("Year", "Acres Burned"),
                        fire.acres_sum_per_year
                            .iter()
                            .map(|(y, a)| (y.to_string(), format!("{:.0}", a))),
                    );

                    cols[1].label(RichText::new("Counties Affected").size(16.0).strong());
                    Self::pairs_grid(
                        &mut cols[1],
                        "top_counties_grid",
                        ("County", "Fires"),
                        fire.top_counties
                            .iter()
                            .map(|(c, n)| (c.clone(), n.to_string())),
                    );
                });
            });
    }

    pub fn show_human_cost(ui: &mut egui::Ui, human: &HumanCostData, years: (i32, i32)) {
        let period = period_caption(years.0, years.1);
        ui.heading("The human cost of the California wildfires");
        ui.add_space(SECTION_SPACING);

        ui.columns(2, |cols| {
            ScrollArea::vertical()
                .id_salt("narratives")
                .auto_shrink([false, false])
                .show(&mut cols[0], |ui| {
                    if human.narratives.is_empty() {
                        ui.label("No recorded fatalities for the selected filters.");
                    }
                    for line in &human.narratives {
                        ui.label(line.sentence());
                    }
                });

            let ui = &mut cols[1];
            Self::big_number(
                ui,
                human.totals.total_injuries,
                &format!("Injured in wildfires {}", period),
            );
            Self::big_number(
                ui,
                human.totals.total_fatalities,
                &format!("Killed in wildfires {}", period),
            );
            Self::big_number(
                ui,
                human.totals.total_personnel_involved,
                "Firefighters needed to fight wildfires",
            );
            ui.add_space(SECTION_SPACING);
            ui.label(RichText::new("Wildfire Deaths per Year").size(14.0).strong());
            ChartPlotter::draw_deaths_per_year(ui, &human.deaths_per_year, CHART_HEIGHT);
        });
    }

    fn big_number(ui: &mut egui::Ui, value: u64, caption: &str) {
        ui.label(
            RichText::new(value.to_string())
                .size(28.0)
                .strong()
                .color(Color32::from_rgb(231, 76, 60)),
        );
        ui.label(caption);
        ui.add_space(8.0);
    }

    fn pairs_grid(
        ui: &mut egui::Ui,
        id: &str,
        headers: (&str, &str),
        pairs: impl Iterator<Item = (String, String)>,
    ) {
        egui::Grid::new(id).striped(true).show(ui, |ui| {
            ui.label(RichText::new(headers.0).strong());
            ui.label(RichText::new(headers.1).strong());
            ui.end_row();
            for (key, value) in pairs {
                ui.label(key);
                ui.label(value);
                ui.end_row();
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, year: i32, acres: Option<f64>) -> OverviewRow {
        OverviewRow {
            year: Some(year),
            county: "Kern".to_string(),
            name: name.to_string(),
            major_incident: None,
            acres_burned: acres,
            location: String::new(),
            lat: None,
            lon: None,
        }
    }

    #[test]
    fn test_period_caption_follows_year_filter() {
        assert_eq!(period_caption(2013, 2020), "between 2013 & 2020");
        assert_eq!(period_caption(2016, 2018), "between 2016 & 2018");
        assert_eq!(period_caption(2017, 2017), "in 2017");
        assert!(period_caption(2019, 2015).ends_with("(empty range)"));
    }

    #[test]
    fn test_author_credit_text() {
        assert_eq!(AUTHOR_CREDIT, "created by: Nicholas Ettore");
    }

    #[test]
    fn test_sort_rows_by_acres() {
        let mut rows = vec![
            row("a", 2015, Some(50.0)),
            row("b", 2014, None),
            row("c", 2013, Some(10.0)),
        ];
        sort_rows(&mut rows, SortColumn::AcresBurned, true);
        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_toggle_sort_flips_direction() {
        let mut data = OverviewData::new(vec![
            row("a", 2015, None),
            row("b", 2013, None),
            row("c", 2014, None),
        ]);
        data.toggle_sort(SortColumn::Year);
        assert_eq!(data.rows[0].name, "b");
        data.toggle_sort(SortColumn::Year);
        assert_eq!(data.sort, Some((SortColumn::Year, false)));
        assert_eq!(data.rows[0].name, "a");
        data.toggle_sort(SortColumn::Name);
        assert_eq!(data.sort, Some((SortColumn::Name, true)));
        assert_eq!(data.rows[0].name, "a");
    }
}
