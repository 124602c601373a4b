use chargeval_core::ValidationOptions;
use chargeval_views::{ViewError, build_dir};
use std::fs;
use tempfile::TempDir;

const STATION_HEADER: &str =
    "id,name,city,country_code,state_province,latitude,longitude,ports,power_kw,power_class,is_fast_dc";

fn write_stations(dir: &TempDir, rows: &[&str]) {
    let mut content = String::from(STATION_HEADER);
    content.push('\n');
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }
    fs::write(dir.path().join("charging_stations.csv"), content).unwrap();
}

#[test]
fn builds_views_from_valid_dataset() {
    let data = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_stations(
        &data,
        &[
            "1,Alpha,Berlin,DE,BE,52.5,13.4,2,150,hpc,true",
            "2,Beta,Austin,US,TX,30.2,-97.7,4,60,fast,true",
            "3,Gamma,Denver,US,CO,39.7,-104.9,2,30,slow,false",
        ],
    );

    let (report, written) =
        build_dir(data.path(), out.path(), &ValidationOptions::new()).unwrap();
    assert!(report.passed());
    assert_eq!(written.len(), 3);

    let country = fs::read_to_string(out.path().join("country_summary.csv")).unwrap();
    assert_eq!(country, "country_code,stations,max_power_kw\nDE,1,150\nUS,2,60\n");

    let world = fs::read_to_string(out.path().join("world_summary.csv")).unwrap();
    assert!(world.starts_with("total_count,total_countries,max_power_kw"));
    assert!(world.contains("\n3,2,150,"));
}

#[test]
fn invalid_precursor_writes_nothing() {
    let data = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    // Latitude 95 is an error-severity range violation.
    write_stations(&data, &["1,Alpha,Berlin,DE,BE,95,13.4,2,150,hpc,true"]);

    let err = build_dir(data.path(), out.path(), &ValidationOptions::new()).unwrap_err();
    assert!(matches!(err, ViewError::PrecursorInvalid { errors: 1 }));

    let leftovers: Vec<_> = fs::read_dir(out.path()).unwrap().collect();
    assert!(leftovers.is_empty(), "no output files expected");
}

#[test]
fn strict_warnings_write_nothing() {
    let data = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_stations(
        &data,
        &[
            "1,Alpha,Berlin,DE,BE,52.5,13.4,2,150,hpc,true",
            "2,Beta,Austin,US,TX,30.2,-97.7,4,60,fast,true",
        ],
    );
    // US never appears in the summary, a warning-only report.
    fs::write(
        data.path().join("country_summary.csv"),
        "country_code,count,max_power_kw\nDE,1,150\n",
    )
    .unwrap();

    let options = ValidationOptions::new().with_strict(true);
    let err = build_dir(data.path(), out.path(), &options).unwrap_err();
    assert!(matches!(err, ViewError::StrictWarnings { warnings: 1 }));
    assert!(fs::read_dir(out.path()).unwrap().next().is_none());

    // The same dataset builds fine without strict mode.
    build_dir(data.path(), out.path(), &ValidationOptions::new()).unwrap();
    assert!(out.path().join("country_summary.csv").exists());
}

#[test]
fn rebuild_is_total_overwrite() {
    let data = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_stations(&data, &["1,Alpha,Berlin,DE,BE,52.5,13.4,2,150,hpc,true"]);
    build_dir(data.path(), out.path(), &ValidationOptions::new()).unwrap();

    // Shrink the dataset and rebuild; the views must reflect only the
    // current input.
    write_stations(&data, &["9,Omega,Oslo,NO,03,59.9,10.7,1,22,slow,false"]);
    build_dir(data.path(), out.path(), &ValidationOptions::new()).unwrap();

    let country = fs::read_to_string(out.path().join("country_summary.csv")).unwrap();
    assert_eq!(country, "country_code,stations,max_power_kw\nNO,1,22\n");
}
