//! Charts module - Chart data and rendering

mod plotter;
mod renderer;

pub use plotter::{ChartPlotter, FireCostData, HumanCostData, NarrativeLine};
pub use renderer::{RenderError, StaticChartRenderer};
