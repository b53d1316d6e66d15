use std::io::Write;
use wildfire_dashboard::data::{
    load_incidents, within_california_bounds, DataError, CleanError, OUT_OF_STATE_COUNTIES,
};
use wildfire_dashboard::report::{
    ReportGenerator, ACRES_CHART_FILE, DEATHS_CHART_FILE, FIRES_CHART_FILE, SUMMARY_FILE,
};
use wildfire_dashboard::stats::{Aggregator, CountyFilter, DEFAULT_TOP_COUNTIES};

const HEADER: &str = "AcresBurned,ArchiveYear,CanonicalUrl,Counties,Fatalities,Injuries,Latitude,Location,Longitude,MajorIncident,Name,PersonnelInvolved,Status";

const ROWS: [&str; 8] = [
    "257314,2013,/incidents/2013/8/17/rim-fire/,Tuolumne,,10,37.857,Rim Fire,-120.086,True,Rim Fire,,Finalized",
    "257314,2013,/incidents/2013/8/17/rim-fire/,Tuolumne,,10,37.857,Rim Fire,-120.086,True,Rim Fire,,Finalized",
    "30274,2013,/incidents/2013/5/30/powerhouse-fire/,Los Angeles,,,34.585595,\"Lake Hughes, Angeles NF\",-118.423176,False,Powerhouse Fire,2100,Finalized",
    "27531,2013,/incidents/2013/7/15/mountain-fire/,Riverside,1,2,33.7095,Highway 243,-116.72885,True,Mountain Fire,3500,Finalized",
    "1200,2013,/incidents/2013/8/6/tram-fire/,Riverside,,,34.0,Tram road,-116.9,False,Tram Fire,,Finalized",
    "500,2016,/incidents/2016/7/1/washoe-fire/,Nevada,,,39.4,\"Carson, Nevada\",-119.8,False,Washoe Fire,,Finalized",
    "12,2018,/incidents/2018/1/1/bad-coords/,Kern,,,0,Unknown,0,False,Bad Coords Fire,,Finalized",
    "153336,2018,/incidents/2018/11/8/camp-fire/,Butte,85,12,39.81945,Pentz Road,-121.43787,True,Camp Fire,5596,Finalized",
];

fn write_csv(rows: &[&str]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "{}", HEADER).unwrap();
    for row in rows {
        writeln!(file, "{}", row).unwrap();
    }
    file.flush().unwrap();
    file
}

#[test]
fn test_load_and_clean_csv() {
    let file = write_csv(&ROWS);
    let table = load_incidents(file.path()).unwrap();

    let names: Vec<&str> = table.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Rim Fire", "Powerhouse Fire", "Mountain Fire", "Camp Fire"]
    );
    assert!(table.iter().all(within_california_bounds));
    assert!(table
        .iter()
        .all(|i| !OUT_OF_STATE_COUNTIES.contains(&i.county.as_str())));
    assert_eq!(table.rows()[1].location, "Lake Hughes, Angeles NF");
    assert_eq!(table.rows()[0].major_incident, Some(true));
    assert_eq!(table.reclean(), table);
}

#[test]
fn test_aggregates_from_csv() {
    let file = write_csv(&ROWS);
    let table = load_incidents(file.path()).unwrap();

    let totals = Aggregator::summary_totals(&table);
    assert_eq!(totals.total_fatalities, 86);
    assert_eq!(totals.total_injuries, 24);
    assert_eq!(totals.total_personnel_involved, 2100 + 3500 + 5596);

    assert_eq!(
        Aggregator::incidents_per_year(&table),
        vec![(2013, 3), (2018, 1)]
    );
    assert_eq!(
        Aggregator::deaths_per_year(&table),
        vec![(2013, 1), (2018, 85)]
    );
    assert_eq!(
        Aggregator::top_counties(&table, DEFAULT_TOP_COUNTIES)[0],
        ("Tuolumne".to_string(), 1)
    );

    let riverside = Aggregator::filter_by_county(&table, &CountyFilter::County("Riverside".into()));
    assert_eq!(riverside.len(), 1);
    assert!(Aggregator::filter_by_year_range(&table, 2018, 2013).is_empty());
}

#[test]
fn test_missing_column_aborts() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "Latitude,Longitude,Name").unwrap();
    writeln!(file, "34.1,-117.2,Valley Fire").unwrap();
    file.flush().unwrap();

    match load_incidents(file.path()) {
        Err(DataError::Clean(CleanError::MissingColumn(_))) => {}
        other => panic!("expected missing column error, got {:?}", other.map(|t| t.len())),
    }
}

#[test]
fn test_summary_written_for_csv() {
    let file = write_csv(&ROWS);
    let table = load_incidents(file.path()).unwrap();
    let dir = tempfile::tempdir().unwrap();

    let path = ReportGenerator::write_summary(&table, dir.path()).unwrap();
    assert_eq!(path, dir.path().join(SUMMARY_FILE));
    let text = std::fs::read_to_string(path).unwrap();
    assert!(text.contains("\"total_fatalities\": 86"));
}

#[test]
fn test_rows_differing_only_in_unread_column_are_kept() {
    let file = write_csv(&[
        "4000,2017,/incidents/2017/6/1/ridge-fire/,Kern,,,35.3,Ridge Road,-118.6,False,Ridge Fire,,Finalized",
        "4000,2017,/incidents/2017/6/1/ridge-fire/,Kern,,,35.3,Ridge Road,-118.6,False,Ridge Fire,,Active",
    ]);
    let table = load_incidents(file.path()).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(Aggregator::incidents_per_year(&table), vec![(2017, 2)]);
}

#[test]
fn test_report_writes_every_file() {
    let file = write_csv(&ROWS);
    let table = load_incidents(file.path()).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("report");

    let written = ReportGenerator::generate(&table, &out).unwrap();
    assert_eq!(written.len(), 4);
    for name in [DEATHS_CHART_FILE, FIRES_CHART_FILE, ACRES_CHART_FILE, SUMMARY_FILE] {
        let path = out.join(name);
        assert!(written.contains(&path), "{} not returned", name);
        assert!(std::fs::metadata(&path).unwrap().len() > 0, "{} is empty", name);
    }
}
