//! Integration tests for geolookup over the bundled reference data

use std::path::PathBuf;
use std::process::Command;
use std::sync::Arc;
use std::thread;

use geolookup::{
    Attribute, DirectorySource, DurationUnit, GeoLookup, GeoType, LookupError, NearbyAirport,
    ReferenceStore, TripDuration,
};
use rstest::{fixture, rstest};

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

#[fixture]
fn geo() -> GeoLookup {
    let store = ReferenceStore::new(DirectorySource::new(data_dir()));
    GeoLookup::from_store(&store).expect("bundled data should load")
}

#[rstest]
fn test_reference_lookups(geo: GeoLookup) {
    assert_eq!(geo.city("CDG").unwrap(), "PAR");
    assert_eq!(geo.country("CDG").unwrap(), "FR");
    assert_eq!(geo.continent("LHR").unwrap(), "EU");
    assert_eq!(geo.iata_zone("NRT").unwrap(), "33");
    assert_eq!(geo.currency("LON").unwrap(), "GBP");
    assert_eq!(geo.time_zone("FRA").unwrap(), "Europe/Berlin");
    assert_eq!(geo.airline_country("BA").unwrap(), "GB");
    assert_eq!(geo.airline_name("LH").unwrap(), "Lufthansa");
}

#[rstest]
fn test_airport_row_wins_over_city_row(geo: GeoLookup) {
    assert_eq!(geo.cities("EWR").unwrap(), vec!["NYC", "EWR"]);
    assert_eq!(geo.city("EWR").unwrap(), "NYC");
    assert_eq!(geo.distance_between("PAR", "NCE").unwrap(), 686);
}

#[rstest]
fn test_merged_airline_names(geo: GeoLookup) {
    // First name listed is kept
    assert_eq!(geo.airline_name("AF").unwrap(), "Air France");
    assert_eq!(geo.airline_name("DL").unwrap(), "Delta Air Lines");
    assert_eq!(
        geo.airline_country("DL"),
        Err(LookupError::missing("DL", Attribute::AirlineCountry))
    );
    assert_eq!(
        geo.airline_name("XQ"),
        Err(LookupError::missing("XQ", Attribute::AirlineName))
    );
}

#[rstest]
fn test_country_attribute_gaps(geo: GeoLookup) {
    assert_eq!(
        geo.currency("AQ"),
        Err(LookupError::missing("AQ", Attribute::Currency))
    );
    assert_eq!(
        geo.continent("XX"),
        Err(LookupError::UnknownCountry("XX".to_string()))
    );
}

#[rstest]
fn test_nearby_airports(geo: GeoLookup) {
    assert_eq!(geo.nearby_airports("CDG", 50.0).unwrap(), vec!["LBG", "ORY"]);
    assert_eq!(
        geo.nearby_airports_with_details("JFK", 50.0).unwrap(),
        vec![
            NearbyAirport {
                code: "LGA".to_string(),
                distance_km: 17
            },
            NearbyAirport {
                code: "EWR".to_string(),
                distance_km: 33
            },
        ]
    );
    assert_eq!(
        geo.nearby_airports("NYC", 20.0).unwrap(),
        vec!["LGA", "EWR"]
    );
}

#[rstest]
#[case(&["CDG", "NCE", "MRS"], GeoType::Domestic)]
#[case(&["LHR", "CDG", "FRA"], GeoType::Continental)]
#[case(&["JFK", "LHR", "NRT"], GeoType::InterContinental)]
fn test_geo_type(geo: GeoLookup, #[case] locations: &[&str], #[case] expected: GeoType) {
    assert_eq!(geo.geo_type(locations).unwrap(), expected);
}

#[rstest]
fn test_time_conversions(geo: GeoLookup) {
    assert_eq!(
        geo.local_to_gmt("20160606_1627", "CDG", None).unwrap(),
        "20160606_1427"
    );
    assert_eq!(
        geo.gmt_to_local("20160606_1427", "NRT", None).unwrap(),
        "20160606_2327"
    );
    assert_eq!(
        geo.offset_for_local_date("20160715_1200", "NCE", None).unwrap(),
        120
    );
    assert_eq!(
        geo.offset_for_local_date("20161215_1200", "NYC", None).unwrap(),
        -300
    );
}

#[rstest]
fn test_trip_duration(geo: GeoLookup) {
    let duration = geo
        .trip_duration(
            "20160606_1627",
            "CDG",
            "20160606_1757",
            "JFK",
            None,
            None,
        )
        .unwrap();
    assert_eq!(duration, TripDuration::Hours(7.5));

    let reversed = geo.trip_duration(
        "20160606_1757",
        "JFK",
        "20160606_1627",
        "CDG",
        Some(DurationUnit::Minutes),
        None,
    );
    assert_eq!(reversed, Err(LookupError::NegativeDuration { minutes: -450 }));
}

#[test]
fn test_store_loads_once_across_threads() {
    let store = Arc::new(ReferenceStore::new(DirectorySource::new(data_dir())));
    assert!(!store.is_loaded());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let store = Arc::clone(&store);
            thread::spawn(move || store.get().unwrap())
        })
        .collect();
    let loaded: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert!(store.is_loaded());
    assert!(loaded.iter().all(|data| Arc::ptr_eq(data, &loaded[0])));
}

#[test]
fn test_missing_data_directory_fails_to_load() {
    let store = ReferenceStore::new(DirectorySource::new("/nonexistent/geolookup/data"));
    assert!(GeoLookup::from_store(&store).is_err());
    assert!(!store.is_loaded());
}

fn cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_geolookup"))
        .arg("--data-dir")
        .arg(data_dir())
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .expect("Failed to execute command")
}

#[rstest]
#[case(&["city", "cdg"], "PAR")]
#[case(&["distance", "PAR", "NCE"], "686")]
#[case(&["nearby", "CDG", "--radius", "50"], "LBG ORY")]
#[case(&["geo-type", "CDG", "JFK"], "INTER_CONTINENTAL")]
#[case(&["trip", "20160606_1627", "CDG", "20160606_1757", "JFK", "--unit", "minutes"], "450 minutes")]
fn test_cli_queries(#[case] args: &[&str], #[case] expected: &str) {
    let output = cli(args);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), expected);
}

#[test]
fn test_cli_reports_unknown_code() {
    let output = cli(&["city", "XXX"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown location"), "stderr: {stderr}");
}
