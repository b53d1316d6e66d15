//! Data module - CSV loading, incident records, and cleaning

mod cleaner;
mod incident;
mod loader;

pub use cleaner::{
    is_excluded_county, is_out_of_state, is_tram_fire_record, location_mentions_nevada,
    within_california_bounds, CleanError, Cleaner, LATITUDE_RANGE, MAX_LONGITUDE,
    OUT_OF_STATE_COUNTIES, REQUIRED_COLUMNS, TRAM_FIRE_URL,
};
pub use incident::{columns, Incident, IncidentTable, INCIDENT_FIELD_COUNT};
pub use loader::{DataLoader, LoaderError};

use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataError {
    #[error(transparent)]
    Load(#[from] LoaderError),
    #[error(transparent)]
    Clean(#[from] CleanError),
}

/// Read and clean the incident CSV in one step.
pub fn load_incidents(path: &Path) -> Result<IncidentTable, DataError> {
    let raw = DataLoader::load_csv(path)?;
    Ok(Cleaner::clean(&raw)?)
}
