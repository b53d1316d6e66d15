//! Incident Records
//! Typed view of one wildfire incident row and the immutable canonical table.

/// Column names as written by the incident CSV.
pub mod columns {
    pub const LATITUDE: &str = "Latitude";
    pub const LONGITUDE: &str = "Longitude";
    pub const LAT: &str = "lat";
    pub const LON: &str = "lon";
    pub const COUNTIES: &str = "Counties";
    pub const CANONICAL_URL: &str = "CanonicalUrl";
    pub const LOCATION: &str = "Location";
    pub const ARCHIVE_YEAR: &str = "ArchiveYear";
    pub const NAME: &str = "Name";
    pub const MAJOR_INCIDENT: &str = "MajorIncident";
    pub const ACRES_BURNED: &str = "AcresBurned";
    pub const FATALITIES: &str = "Fatalities";
    pub const INJURIES: &str = "Injuries";
    pub const PERSONNEL_INVOLVED: &str = "PersonnelInvolved";
}

/// Number of fields carried by an [`Incident`].
pub const INCIDENT_FIELD_COUNT: usize = 12;

/// One wildfire incident.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Incident {
    pub name: String,
    pub canonical_url: String,
    pub archive_year: Option<i32>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub location: String,
    pub county: String,
    pub acres_burned: Option<f64>,
    pub major_incident: Option<bool>,
    pub fatalities: Option<u32>,
    pub injuries: Option<u32>,
    pub personnel_involved: Option<u32>,
}

/// Hashable identity of a whole row, used for exact-duplicate removal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct RowKey {
    name: String,
    canonical_url: String,
    archive_year: Option<i32>,
    lat: Option<u64>,
    lon: Option<u64>,
    location: String,
    county: String,
    acres_burned: Option<u64>,
    major_incident: Option<bool>,
    fatalities: Option<u32>,
    injuries: Option<u32>,
    personnel_involved: Option<u32>,
}

fn float_bits(value: Option<f64>) -> Option<u64> {
    // -0.0 and 0.0 compare equal, so they must hash equal too
    value.map(|v| if v == 0.0 { 0.0f64.to_bits() } else { v.to_bits() })
}

impl Incident {
    pub(crate) fn row_key(&self) -> RowKey {
        RowKey {
            name: self.name.clone(),
            canonical_url: self.canonical_url.clone(),
            archive_year: self.archive_year,
            lat: float_bits(self.lat),
            lon: float_bits(self.lon),
            location: self.location.clone(),
            county: self.county.clone(),
            acres_burned: float_bits(self.acres_burned),
            major_incident: self.major_incident,
            fatalities: self.fatalities,
            injuries: self.injuries,
            personnel_involved: self.personnel_involved,
        }
    }
}

/// Immutable set of incidents. Every query returns a new table.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IncidentTable {
    rows: Vec<Incident>,
}

impl IncidentTable {
    pub(crate) fn from_rows(rows: Vec<Incident>) -> Self {
        Self { rows }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[Incident] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Incident> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// (rows, columns), as reported on the intro page.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), INCIDENT_FIELD_COUNT)
    }

    /// Build a new table from the rows that satisfy `keep`.
    pub fn retain_where<F>(&self, keep: F) -> Self
    where
        F: Fn(&Incident) -> bool,
    {
        Self::from_rows(self.rows.iter().filter(|row| keep(row)).cloned().collect())
    }
}

impl<'a> IntoIterator for &'a IncidentTable {
    type Item = &'a Incident;
    type IntoIter = std::slice::Iter<'a, Incident>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_key_treats_signed_zero_as_equal() {
        let a = Incident {
            acres_burned: Some(0.0),
            ..Default::default()
        };
        let b = Incident {
            acres_burned: Some(-0.0),
            ..Default::default()
        };
        assert_eq!(a, b);
        assert_eq!(a.row_key(), b.row_key());
    }

    #[test]
    fn test_retain_where_leaves_source_untouched() {
        let table = IncidentTable::from_rows(vec![
            Incident {
                county: "Riverside".to_string(),
                ..Default::default()
            },
            Incident {
                county: "Kern".to_string(),
                ..Default::default()
            },
        ]);
        let kern = table.retain_where(|row| row.county == "Kern");
        assert_eq!(kern.len(), 1);
        assert_eq!(table.len(), 2);
        assert_eq!(table.shape(), (2, INCIDENT_FIELD_COUNT));
    }
}
