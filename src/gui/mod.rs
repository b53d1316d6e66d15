//! GUI module - User interface components

mod app;
mod control_panel;
mod page_view;

pub use app::{filtered_table, WildfireApp};
pub use control_panel::{ControlPanel, ControlPanelAction, FilterSettings, Page};
pub use page_view::{sort_rows, OverviewData, PageView, SortColumn};
