//! Wildfire Dashboard Main Application
//! Main window with control panel and page view.

use crate::charts::{FireCostData, HumanCostData};
use crate::data::{load_incidents, IncidentTable};
use crate::gui::control_panel::FilterSettings;
use crate::gui::page_view::{HomeData, OverviewData};
use crate::gui::{ControlPanel, ControlPanelAction, Page, PageView};
use crate::stats::Aggregator;
use egui::SidePanel;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};
use std::thread;

/// CSV loading result from background thread
enum LoadResult {
    Complete { path: PathBuf, table: IncidentTable },
    Error(String),
}

/// Page data derived from the table for one filter selection.
struct FilteredView {
    filters: FilterSettings,
    overview: OverviewData,
    fire: FireCostData,
    human: HumanCostData,
}

/// Apply the sidebar filters to the canonical table.
pub fn filtered_table(table: &IncidentTable, filters: &FilterSettings) -> IncidentTable {
    let by_year = Aggregator::filter_by_year_range(table, filters.year_low, filters.year_high);
    Aggregator::filter_by_county(&by_year, &filters.county_filter())
}

/// Main application window.
pub struct WildfireApp {
    table: IncidentTable,
    home: HomeData,
    control_panel: ControlPanel,
    view: Option<FilteredView>,

    // Async CSV loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
}

impl WildfireApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, table: IncidentTable, csv_path: PathBuf) -> Self {
        let mut app = Self {
            table: IncidentTable::empty(),
            home: HomeData::default(),
            control_panel: ControlPanel::new(),
            view: None,
            load_rx: None,
            is_loading: false,
        };
        app.set_table(table, csv_path);
        app
    }

    fn set_table(&mut self, table: IncidentTable, csv_path: PathBuf) {
        let (rows, columns) = table.shape();
        self.home = HomeData { rows, columns };
        self.control_panel
            .update_options(Aggregator::year_bounds(&table), Aggregator::counties(&table));
        self.control_panel.csv_path = Some(csv_path);
        self.control_panel
            .set_status(&format!("Loaded {} incidents", rows));
        self.table = table;
        self.view = None;
    }

    /// Handle CSV file selection, loading and cleaning in the background
    fn handle_browse_csv(&mut self) {
        if self.is_loading {
            return;
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            self.control_panel.set_status("Loading CSV file...");
            self.is_loading = true;

            let (tx, rx) = channel();
            self.load_rx = Some(rx);

            thread::spawn(move || {
                let result = match load_incidents(&path) {
                    Ok(table) => LoadResult::Complete { path, table },
                    Err(e) => LoadResult::Error(e.to_string()),
                };
                let _ = tx.send(result);
            });
        }
    }

    /// Check for CSV loading results
    fn check_load_results(&mut self) {
        let Some(rx) = self.load_rx.take() else {
            return;
        };

        match rx.try_recv() {
            Ok(LoadResult::Complete { path, table }) => {
                log::info!("Reloaded {} incidents from {}", table.len(), path.display());
                self.set_table(table, path);
                self.is_loading = false;
            }
            Ok(LoadResult::Error(error)) => {
                log::warn!("CSV reload failed: {}", error);
                self.control_panel.set_status(&format!("Error: {}", error));
                self.is_loading = false;
            }
            Err(std::sync::mpsc::TryRecvError::Empty) => {
                self.load_rx = Some(rx);
            }
            Err(std::sync::mpsc::TryRecvError::Disconnected) => {
                self.control_panel
                    .set_status("Error: loader stopped unexpectedly");
                self.is_loading = false;
            }
        }
    }

    /// Recompute page data when the filters changed.
    fn refresh_view(&mut self) {
        let filters = &self.control_panel.filters;
        if self.view.as_ref().is_some_and(|v| &v.filters == filters) {
            return;
        }

        let filtered = filtered_table(&self.table, filters);
        log::debug!(
            "Filters {:?} matched {} of {} incidents",
            filters,
            filtered.len(),
            self.table.len()
        );

        self.view = Some(FilteredView {
            filters: filters.clone(),
            overview: OverviewData::new(Aggregator::overview_rows(&filtered)),
            fire: FireCostData::from_table(&filtered),
            human: HumanCostData::from_table(&filtered),
        });
    }
}

impl eframe::App for WildfireApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_results();
        if self.is_loading {
            ctx.request_repaint();
        }

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(280.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    if self.control_panel.show(ui) == ControlPanelAction::BrowseCsv {
                        self.handle_browse_csv();
                    }
                });
            });

        self.refresh_view();

        // Central panel - selected page
        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(view) = self.view.as_mut() else {
                return;
            };
            match self.control_panel.page {
                Page::Home => PageView::show_home(ui, &self.home),
                Page::OverviewMap => PageView::show_overview(ui, &mut view.overview),
                Page::CostsOfFire => PageView::show_fire_cost(ui, &view.fire),
                Page::HumanCost => PageView::show_human_cost(
                    ui,
                    &view.human,
                    (view.filters.year_low, view.filters.year_high),
                ),
            }
        });
    }
}
