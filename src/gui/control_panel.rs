//! Control Panel Widget
//! Left side panel: page navigation, year range and county filters.

use crate::stats::CountyFilter;
use egui::{Color32, ComboBox, RichText};
use std::path::PathBuf;

/// Dashboard pages, in sidebar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Home,
    OverviewMap,
    CostsOfFire,
    HumanCost,
}

impl Page {
    pub const ALL: [Page; 4] = [
        Page::Home,
        Page::OverviewMap,
        Page::CostsOfFire,
        Page::HumanCost,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Page::Home => "Home Page",
            Page::OverviewMap => "Overview Map",
            Page::CostsOfFire => "The Costs of Fire",
            Page::HumanCost => "The Human Cost",
        }
    }
}

/// Filter selection from the sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterSettings {
    pub year_low: i32,
    pub year_high: i32,
    pub all_counties: bool,
    pub county: String,
}

impl FilterSettings {
    pub fn county_filter(&self) -> CountyFilter {
        if self.all_counties || self.county.is_empty() {
            CountyFilter::All
        } else {
            CountyFilter::County(self.county.clone())
        }
    }
}

/// Left side control panel.
pub struct ControlPanel {
    pub page: Page,
    pub filters: FilterSettings,
    pub csv_path: Option<PathBuf>,
    pub year_bounds: (i32, i32),
    pub counties: Vec<String>,
    pub status: String,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            page: Page::default(),
            filters: FilterSettings {
                all_counties: true,
                ..Default::default()
            },
            csv_path: None,
            year_bounds: (0, 0),
            counties: Vec::new(),
            status: "Ready".to_string(),
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the filter controls for a freshly loaded table.
    pub fn update_options(&mut self, year_bounds: Option<(i32, i32)>, counties: Vec<String>) {
        let (lo, hi) = year_bounds.unwrap_or((0, 0));
        self.year_bounds = (lo, hi);
        self.filters.year_low = lo;
        self.filters.year_high = hi;
        self.filters.all_counties = true;
        self.filters.county = counties.first().cloned().unwrap_or_default();
        self.counties = counties;
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🔥 Fire Incidents in California")
                    .size(18.0)
                    .color(Color32::from_rgb(231, 76, 60)),
            );
        });
        ui.add_space(10.0);
        ui.separator();

        // ===== Table of Contents =====
        ui.label(RichText::new("Table of Contents").size(14.0).strong());
        ui.add_space(5.0);
        for page in Page::ALL {
            ui.radio_value(&mut self.page, page, page.title());
        }

        ui.add_space(10.0);
        ui.separator();

        // ===== Filters =====
        ui.label(RichText::new("⚙️ Filters").size(14.0).strong());
        ui.add_space(5.0);

        let (lo, hi) = self.year_bounds;
        ui.label("Please select range of years");
        ui.add(egui::Slider::new(&mut self.filters.year_low, lo..=hi).text("from"));
        ui.add(egui::Slider::new(&mut self.filters.year_high, lo..=hi).text("to"));
        if self.filters.year_low > self.filters.year_high {
            ui.label(
                RichText::new("Start year is after end year")
                    .size(11.0)
                    .color(Color32::from_rgb(220, 53, 69)),
            );
        }

        ui.add_space(8.0);
        ui.checkbox(
            &mut self.filters.all_counties,
            "Check to view all California counties",
        );
        ui.add_enabled_ui(!self.filters.all_counties, |ui| {
            ComboBox::from_id_salt("county_select")
                .width(200.0)
                .selected_text(&self.filters.county)
                .show_ui(ui, |ui| {
                    for county in &self.counties {
                        ui.selectable_value(&mut self.filters.county, county.clone(), county);
                    }
                });
        });

        ui.add_space(10.0);
        ui.separator();

        // ===== Data Source =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);
        ui.horizontal(|ui| {
            let path_text = self
                .csv_path
                .as_ref()
                .and_then(|p| p.file_name())
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| "No file loaded".to_string());
            ui.label(RichText::new(path_text).size(12.0));

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("📂 Browse").clicked() {
                    action = ControlPanelAction::BrowseCsv;
                }
            });
        });

        ui.add_space(5.0);
        let status_color = if self.status.starts_with("Error") {
            Color32::from_rgb(220, 53, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseCsv,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_county_filter_from_settings() {
        let mut settings = FilterSettings {
            all_counties: true,
            county: "Kern".to_string(),
            ..Default::default()
        };
        assert_eq!(settings.county_filter(), CountyFilter::All);
        settings.all_counties = false;
        assert_eq!(
            settings.county_filter(),
            CountyFilter::County("Kern".to_string())
        );
    }

    #[test]
    fn test_update_options_resets_filters() {
        let mut panel = ControlPanel::new();
        panel.filters.all_counties = false;
        panel.update_options(
            Some((2013, 2019)),
            vec!["Alameda".to_string(), "Butte".to_string()],
        );
        assert_eq!(panel.filters.year_low, 2013);
        assert_eq!(panel.filters.year_high, 2019);
        assert!(panel.filters.all_counties);
        assert_eq!(panel.filters.county, "Alameda");
    }
}
