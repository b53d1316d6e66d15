//! Wildfire Dashboard - California Wildfire Incidents Explorer
//!
//! Loads the California wildfire incident CSV, cleans out-of-state and
//! duplicate rows, and serves filtered aggregates to an interactive dashboard
//! or a static report.

pub mod charts;
pub mod data;
pub mod gui;
pub mod report;
pub mod stats;
