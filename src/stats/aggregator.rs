//! Incident Aggregator Module
//! Filtered views and summary aggregates over the canonical incident table.
//! Every function is a pure query; the input table is never modified.

use crate::data::{Incident, IncidentTable};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Number of counties in the default ranking.
pub const DEFAULT_TOP_COUNTIES: usize = 7;

/// Sentinel meaning "every county".
pub const ALL_COUNTIES: &str = "ALL";

/// County selection from the dashboard controls.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CountyFilter {
    #[default]
    All,
    County(String),
}

impl FromStr for CountyFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ALL_COUNTIES {
            Ok(CountyFilter::All)
        } else {
            Ok(CountyFilter::County(s.to_string()))
        }
    }
}

impl fmt::Display for CountyFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountyFilter::All => f.write_str(ALL_COUNTIES),
            CountyFilter::County(name) => f.write_str(name),
        }
    }
}

/// One fatal incident, as told on the human cost page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FatalityNarrative<'a> {
    pub incident_name: &'a str,
    pub year: Option<i32>,
    pub fatalities: u32,
}

/// Restartable view over the fatal incidents of a table.
///
/// Rows with no deaths are skipped and repeated `(name, year, fatalities)`
/// tuples are told once, in first-seen order.
#[derive(Debug, Clone, Copy)]
pub struct FatalityNarratives<'a> {
    table: &'a IncidentTable,
}

impl<'a> FatalityNarratives<'a> {
    pub fn iter(&self) -> impl Iterator<Item = FatalityNarrative<'a>> + 'a {
        let mut seen = HashSet::new();
        self.table
            .iter()
            .filter_map(|incident| match incident.fatalities {
                Some(fatalities) if fatalities > 0 => Some(FatalityNarrative {
                    incident_name: incident.name.as_str(),
                    year: incident.archive_year,
                    fatalities,
                }),
                _ => None,
            })
            .filter(move |narrative| seen.insert(*narrative))
    }

    pub fn total_fatalities(&self) -> u64 {
        self.iter().map(|n| u64::from(n.fatalities)).sum()
    }
}

/// The three "big numbers".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SummaryTotals {
    pub total_injuries: u64,
    pub total_fatalities: u64,
    pub total_personnel_involved: u64,
}

/// Projection of an incident for the overview map and table.
#[derive(Debug, Clone, PartialEq)]
pub struct OverviewRow {
    pub year: Option<i32>,
    pub county: String,
    pub name: String,
    pub major_incident: Option<bool>,
    pub acres_burned: Option<f64>,
    pub location: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

impl From<&Incident> for OverviewRow {
    fn from(incident: &Incident) -> Self {
        Self {
            year: incident.archive_year,
            county: incident.county.clone(),
            name: incident.name.clone(),
            major_incident: incident.major_incident,
            acres_burned: incident.acres_burned,
            location: incident.location.clone(),
            lat: incident.lat,
            lon: incident.lon,
        }
    }
}

/// Query functions over the canonical table.
pub struct Aggregator;

impl Aggregator {
    /// Rows with archive year in `[year_low, year_high]`. An inverted range is empty.
    pub fn filter_by_year_range(
        table: &IncidentTable,
        year_low: i32,
        year_high: i32,
    ) -> IncidentTable {
        if year_low > year_high {
            return IncidentTable::empty();
        }
        table.retain_where(|incident| {
            incident
                .archive_year
                .is_some_and(|year| (year_low..=year_high).contains(&year))
        })
    }

    pub fn filter_by_county(table: &IncidentTable, county: &CountyFilter) -> IncidentTable {
        match county {
            CountyFilter::All => table.clone(),
            CountyFilter::County(name) => table.retain_where(|incident| &incident.county == name),
        }
    }

    pub fn fatality_narratives(table: &IncidentTable) -> FatalityNarratives<'_> {
        FatalityNarratives { table }
    }

    pub fn summary_totals(table: &IncidentTable) -> SummaryTotals {
        let sum = |field: fn(&Incident) -> Option<u32>| -> u64 {
            table.iter().filter_map(field).map(u64::from).sum()
        };

        SummaryTotals {
            total_injuries: sum(|i| i.injuries),
            total_fatalities: Self::fatality_narratives(table).total_fatalities(),
            total_personnel_involved: sum(|i| i.personnel_involved),
        }
    }

    /// Fatality sum per year, ascending. Years without recorded deaths sum to 0.
    pub fn deaths_per_year(table: &IncidentTable) -> Vec<(i32, u64)> {
        let mut sums: BTreeMap<i32, u64> = BTreeMap::new();
        for incident in table {
            if let Some(year) = incident.archive_year {
                *sums.entry(year).or_default() += u64::from(incident.fatalities.unwrap_or(0));
            }
        }
        sums.into_iter().collect()
    }

    pub fn incidents_per_year(table: &IncidentTable) -> Vec<(i32, usize)> {
        let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
        for year in table.iter().filter_map(|i| i.archive_year) {
            *counts.entry(year).or_default() += 1;
        }
        counts.into_iter().collect()
    }

    /// Acres burned values grouped by year; rows without acreage are left out.
    pub fn acres_burned_per_year(table: &IncidentTable) -> BTreeMap<i32, Vec<f64>> {
        let mut groups: BTreeMap<i32, Vec<f64>> = BTreeMap::new();
        for incident in table {
            if let (Some(year), Some(acres)) = (incident.archive_year, incident.acres_burned) {
                groups.entry(year).or_default().push(acres);
            }
        }
        groups
    }

    pub fn acres_burned_sum_per_year(table: &IncidentTable) -> Vec<(i32, f64)> {
        let mut sums: BTreeMap<i32, f64> = BTreeMap::new();
        for incident in table {
            if let Some(year) = incident.archive_year {
                *sums.entry(year).or_default() += incident.acres_burned.unwrap_or(0.0);
            }
        }
        sums.into_iter().collect()
    }

    /// Counties by incident count, highest first. Ties keep first-encounter order.
    pub fn top_counties(table: &IncidentTable, n: usize) -> Vec<(String, usize)> {
        let mut order: Vec<&str> = Vec::new();
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for incident in table {
            let county = incident.county.as_str();
            let count = counts.entry(county).or_insert_with(|| {
                order.push(county);
                0
            });
            *count += 1;
        }

        let mut ranked: Vec<(String, usize)> = order
            .into_iter()
            .map(|county| (county.to_string(), counts[county]))
            .collect();
        // sort_by is stable
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);
        ranked
    }

    /// Smallest and largest archive year, for the year range controls.
    pub fn year_bounds(table: &IncidentTable) -> Option<(i32, i32)> {
        let mut years = table.iter().filter_map(|i| i.archive_year);
        let first = years.next()?;
        Some(years.fold((first, first), |(lo, hi), y| (lo.min(y), hi.max(y))))
    }

    /// Distinct counties, sorted.
    pub fn counties(table: &IncidentTable) -> Vec<String> {
        table
            .iter()
            .map(|i| i.county.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    pub fn overview_rows(table: &IncidentTable) -> Vec<OverviewRow> {
        table.iter().map(OverviewRow::from).collect()
    }
}
