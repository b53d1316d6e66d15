//! Data Cleaner Module
//! Turns the raw incident DataFrame into the canonical table: coordinate
//! normalization, California bounding box, out-of-state exclusions, and
//! exact-duplicate removal.

use crate::data::incident::{columns, Incident, IncidentTable};
use polars::prelude::*;
use std::collections::HashSet;
use std::ops::RangeInclusive;
use thiserror::Error;

/// Latitude band approximating California.
pub const LATITUDE_RANGE: RangeInclusive<f64> = 30.0..=44.0;
/// Eastern edge of the California box.
pub const MAX_LONGITUDE: f64 = -115.0;

/// Counties values that are not California at all.
pub const OUT_OF_STATE_COUNTIES: [&str; 3] = ["Nevada", "State of Oregon", "Mexico"];
/// Location text containing this marker lies across the state line.
pub const OUT_OF_STATE_LOCATION_MARKER: &str = "Nevada";
/// The 2013 Tram Fire record is listed under a California county but is not one.
pub const TRAM_FIRE_URL: &str = "/incidents/2013/8/6/tram-fire/";

/// Columns read from the raw table, after coordinate renaming.
pub const REQUIRED_COLUMNS: [&str; 12] = [
    columns::LAT,
    columns::LON,
    columns::COUNTIES,
    columns::CANONICAL_URL,
    columns::LOCATION,
    columns::ARCHIVE_YEAR,
    columns::NAME,
    columns::MAJOR_INCIDENT,
    columns::ACRES_BURNED,
    columns::FATALITIES,
    columns::INJURIES,
    columns::PERSONNEL_INVOLVED,
];

#[derive(Error, Debug)]
pub enum CleanError {
    #[error("Input is missing required column '{0}'")]
    MissingColumn(String),
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Inside the California bounding box. Rows without coordinates are outside.
pub fn within_california_bounds(incident: &Incident) -> bool {
    match (incident.lat, incident.lon) {
        (Some(lat), Some(lon)) => LATITUDE_RANGE.contains(&lat) && lon <= MAX_LONGITUDE,
        _ => false,
    }
}

pub fn is_excluded_county(county: &str) -> bool {
    OUT_OF_STATE_COUNTIES.contains(&county)
}

pub fn location_mentions_nevada(location: &str) -> bool {
    location.contains(OUT_OF_STATE_LOCATION_MARKER)
}

pub fn is_tram_fire_record(canonical_url: &str) -> bool {
    canonical_url == TRAM_FIRE_URL
}

/// Any of the out-of-state rules.
pub fn is_out_of_state(incident: &Incident) -> bool {
    is_excluded_county(&incident.county)
        || location_mentions_nevada(&incident.location)
        || is_tram_fire_record(&incident.canonical_url)
}

/// Builds the canonical incident table.
pub struct Cleaner;

impl Cleaner {
    /// Clean a raw incident DataFrame.
    ///
    /// Fails with [`CleanError::MissingColumn`] before touching any row when an
    /// expected column is absent. An empty frame yields an empty table.
    pub fn clean(raw: &DataFrame) -> Result<IncidentTable, CleanError> {
        let mut df = raw.clone();
        Self::normalize_coordinate_columns(&mut df)?;
        Self::require_columns(&df)?;

        // Identity is the whole source row, including columns never read into an Incident
        let unique = df.unique_stable(None, UniqueKeepStrategy::First, None)?;
        log::debug!(
            "Duplicate removal dropped {} rows",
            df.height() - unique.height()
        );

        let incidents = Self::extract_incidents(&unique)?;
        let kept = Self::apply_row_rules(incidents);
        log::info!("Cleaned table: {} of {} rows kept", kept.len(), df.height());
        Ok(IncidentTable::from_rows(kept))
    }

    /// Apply the row rules to already-typed incidents. Records carry no columns
    /// beyond their fields, so duplicates are compared on every field.
    pub fn clean_records(incidents: Vec<Incident>) -> IncidentTable {
        let total = incidents.len();
        let in_state = Self::apply_row_rules(incidents);

        let before = in_state.len();
        let unique = Self::drop_duplicates(in_state);
        log::debug!("Duplicate removal dropped {} rows", before - unique.len());

        log::info!("Cleaned table: {} of {} rows kept", unique.len(), total);
        IncidentTable::from_rows(unique)
    }

    /// Bounding box and out-of-state exclusions, in order.
    fn apply_row_rules(incidents: Vec<Incident>) -> Vec<Incident> {
        let total = incidents.len();

        let in_bounds: Vec<Incident> = incidents
            .into_iter()
            .filter(within_california_bounds)
            .collect();
        log::debug!(
            "Bounding box removed {} of {} rows",
            total - in_bounds.len(),
            total
        );

        let before = in_bounds.len();
        let in_state: Vec<Incident> = in_bounds
            .into_iter()
            .filter(|incident| !is_out_of_state(incident))
            .collect();
        log::debug!("Out-of-state rules removed {} rows", before - in_state.len());
        in_state
    }

    /// Rename `Latitude`/`Longitude` to `lat`/`lon` where the canonical name is not
    /// already present.
    fn normalize_coordinate_columns(df: &mut DataFrame) -> Result<(), CleanError> {
        for (raw, canonical) in [
            (columns::LATITUDE, columns::LAT),
            (columns::LONGITUDE, columns::LON),
        ] {
            if df.get_column_index(canonical).is_none() && df.get_column_index(raw).is_some() {
                df.rename(raw, canonical.into())?;
            }
        }
        Ok(())
    }

    fn require_columns(df: &DataFrame) -> Result<(), CleanError> {
        match REQUIRED_COLUMNS
            .iter()
            .find(|name| df.get_column_index(name).is_none())
        {
            Some(missing) => Err(CleanError::MissingColumn(missing.to_string())),
            None => Ok(()),
        }
    }

    /// Keep the first of each group of identical rows, in order.
    fn drop_duplicates(incidents: Vec<Incident>) -> Vec<Incident> {
        let mut seen = HashSet::new();
        incidents
            .into_iter()
            .filter(|incident| seen.insert(incident.row_key()))
            .collect()
    }

    fn extract_incidents(df: &DataFrame) -> Result<Vec<Incident>, CleanError> {
        let names = text_column(df, columns::NAME)?;
        let urls = text_column(df, columns::CANONICAL_URL)?;
        let years = int_column(df, columns::ARCHIVE_YEAR)?;
        let lats = float_column(df, columns::LAT)?;
        let lons = float_column(df, columns::LON)?;
        let locations = text_column(df, columns::LOCATION)?;
        let counties = text_column(df, columns::COUNTIES)?;
        let acres = float_column(df, columns::ACRES_BURNED)?;
        let major = bool_column(df, columns::MAJOR_INCIDENT)?;
        let fatalities = int_column(df, columns::FATALITIES)?;
        let injuries = int_column(df, columns::INJURIES)?;
        let personnel = int_column(df, columns::PERSONNEL_INVOLVED)?;

        let incidents = (0..df.height())
            .map(|i| Incident {
                name: names[i].clone(),
                canonical_url: urls[i].clone(),
                archive_year: years[i].and_then(|v| i32::try_from(v).ok()),
                lat: lats[i],
                lon: lons[i],
                location: locations[i].clone(),
                county: counties[i].clone(),
                acres_burned: acres[i],
                major_incident: major[i],
                fatalities: count_value(fatalities[i]),
                injuries: count_value(injuries[i]),
                personnel_involved: count_value(personnel[i]),
            })
            .collect();

        Ok(incidents)
    }
}

impl IncidentTable {
    /// Run the row rules again over this table. Rows are already distinct as
    /// source rows, even where they agree on every typed field.
    pub fn reclean(&self) -> IncidentTable {
        IncidentTable::from_rows(Cleaner::apply_row_rules(self.rows().to_vec()))
    }
}

fn count_value(value: Option<i64>) -> Option<u32> {
    value.and_then(|v| u32::try_from(v).ok())
}

fn text_column(df: &DataFrame, name: &str) -> Result<Vec<String>, CleanError> {
    let column = df.column(name)?.cast(&DataType::String)?;
    let ca = column.str()?;
    Ok(ca
        .into_iter()
        .map(|v| v.map(|s| s.to_string()).unwrap_or_default())
        .collect())
}

fn float_column(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>, CleanError> {
    let column = df.column(name)?.cast(&DataType::Float64)?;
    let ca = column.f64()?;
    Ok(ca.into_iter().map(|v| v.filter(|x| !x.is_nan())).collect())
}

fn int_column(df: &DataFrame, name: &str) -> Result<Vec<Option<i64>>, CleanError> {
    let column = df.column(name)?.cast(&DataType::Int64)?;
    let ca = column.i64()?;
    Ok(ca.into_iter().collect())
}

/// Accepts native booleans as well as "True"/"False" text.
fn bool_column(df: &DataFrame, name: &str) -> Result<Vec<Option<bool>>, CleanError> {
    let column = df.column(name)?.cast(&DataType::String)?;
    let ca = column.str()?;
    Ok(ca
        .into_iter()
        .map(|v| {
            v.and_then(|s| match s.trim() {
                t if t.eq_ignore_ascii_case("true") => Some(true),
                t if t.eq_ignore_ascii_case("false") => Some(false),
                _ => None,
            })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_frame() -> DataFrame {
        polars::df!(
            "Latitude" => [33.9, 33.9, 34.2, 50.0, 39.5, 38.0, 34.0],
            "Longitude" => [-117.4, -117.4, -118.1, -120.0, -119.8, -120.0, -116.9],
            "Counties" => ["Riverside", "Riverside", "Los Angeles", "Kern", "Nevada", "Alpine", "Riverside"],
            "CanonicalUrl" => [
                "/incidents/2017/1/a/",
                "/incidents/2017/1/a/",
                "/incidents/2018/1/b/",
                "/incidents/2018/1/c/",
                "/incidents/2016/1/d/",
                "/incidents/2015/1/e/",
                TRAM_FIRE_URL,
            ],
            "Location" => [
                "Highway 74",
                "Highway 74",
                "Angeles NF",
                "Far north",
                "Reno",
                "East of Markleeville, Nevada",
                "Tram road",
            ],
            "ArchiveYear" => [2017i64, 2017, 2018, 2018, 2016, 2015, 2013],
            "Name" => ["Alpha Fire", "Alpha Fire", "Bravo Fire", "Charlie Fire", "Delta Fire", "Echo Fire", "Tram Fire"],
            "MajorIncident" => [true, true, false, false, false, true, false],
            "AcresBurned" => [100.0, 100.0, 20.0, 5.0, 1.0, 7.0, 3.0],
            "Fatalities" => [Some(2i64), Some(2), None, None, None, None, Some(1)],
            "Injuries" => [Some(1i64), Some(1), Some(3), None, None, None, None],
            "PersonnelInvolved" => [Some(40i64), Some(40), Some(10), None, None, None, None]
        )
        .unwrap()
    }

    #[test]
    fn test_clean_applies_every_rule() {
        let table = Cleaner::clean(&raw_frame()).unwrap();
        let names: Vec<&str> = table.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha Fire", "Bravo Fire"]);

        let alpha = &table.rows()[0];
        assert_eq!(alpha.lat, Some(33.9));
        assert_eq!(alpha.lon, Some(-117.4));
        assert_eq!(alpha.archive_year, Some(2017));
        assert_eq!(alpha.major_incident, Some(true));
        assert_eq!(alpha.fatalities, Some(2));
        assert_eq!(table.rows()[1].fatalities, None);
    }

    #[test]
    fn test_clean_is_idempotent() {
        let once = Cleaner::clean(&raw_frame()).unwrap();
        assert_eq!(once.reclean(), once);
    }

    #[test]
    fn test_clean_keeps_rows_differing_in_unread_columns() {
        let mut df = raw_frame().head(Some(2));
        let ids = Series::new("UniqueId".into(), &["u1", "u2"]);
        df.with_column(ids).unwrap();

        let table = Cleaner::clean(&df).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.reclean(), table);

        let same = df.drop("UniqueId").unwrap();
        assert_eq!(Cleaner::clean(&same).unwrap().len(), 1);
    }

    #[test]
    fn test_clean_accepts_canonical_coordinate_names() {
        let mut df = raw_frame();
        df.rename("Latitude", "lat".into()).unwrap();
        df.rename("Longitude", "lon".into()).unwrap();
        let renamed = Cleaner::clean(&df).unwrap();
        assert_eq!(renamed, Cleaner::clean(&raw_frame()).unwrap());
    }

    #[test]
    fn test_clean_missing_column_fails() {
        let df = raw_frame().drop("Counties").unwrap();
        match Cleaner::clean(&df) {
            Err(CleanError::MissingColumn(name)) => assert_eq!(name, "Counties"),
            other => panic!("expected missing column, got {:?}", other),
        }
    }

    #[test]
    fn test_clean_empty_frame() {
        let df = raw_frame().head(Some(0));
        let table = Cleaner::clean(&df).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_clean_text_major_incident() {
        let mut df = raw_frame();
        let text = Series::new(
            "MajorIncident".into(),
            &["True", "True", "False", "False", "False", "True", "False"],
        );
        df.replace("MajorIncident", text).unwrap();
        let table = Cleaner::clean(&df).unwrap();
        assert_eq!(table.rows()[0].major_incident, Some(true));
        assert_eq!(table.rows()[1].major_incident, Some(false));
    }

    #[test]
    fn test_bounding_box_predicate() {
        let mut incident = Incident {
            lat: Some(50.0),
            lon: Some(-120.0),
            ..Default::default()
        };
        assert!(!within_california_bounds(&incident));
        incident.lat = Some(44.0);
        assert!(within_california_bounds(&incident));
        incident.lon = Some(-114.9);
        assert!(!within_california_bounds(&incident));
        incident.lon = None;
        assert!(!within_california_bounds(&incident));
    }

    #[test]
    fn test_out_of_state_predicates() {
        assert!(is_excluded_county("State of Oregon"));
        assert!(!is_excluded_county("Nevada County"));
        assert!(location_mentions_nevada("5 miles east of Topaz, Nevada"));
        assert!(is_tram_fire_record("/incidents/2013/8/6/tram-fire/"));
        assert!(!is_tram_fire_record("/incidents/2013/8/6/tram-fire"));
    }
}
