use census_scatter::ChartError;
use census_scatter::storage::{DataSource, load_csv, load_csv_reader};
use census_scatter::CsvFile;
use std::fs;
use tempfile::tempdir;

const HEADER: &str = "abbr,poverty,age,income,healthcare,obesity,smokes";

#[test]
fn loads_the_bundled_sample() {
    let rows = load_csv("assets/data/sample.csv").unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].abbreviation, "AL");
    assert_eq!(rows[1].abbreviation, "AK");
    assert_eq!(rows[1].income, 71000.0);
    assert_eq!(rows[1].smokes, 18.4);
}

#[test]
fn csv_file_source_reads_from_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data.csv");
    fs::write(
        &path,
        format!("{HEADER}\n AL , 18.1, 38.1, 43000, 11.1, 32.4, 21.1\n"),
    )
    .unwrap();
    let rows = CsvFile(path).load().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].abbreviation, "AL");
    assert_eq!(rows[0].healthcare, 11.1);
}

#[test]
fn column_order_does_not_matter() {
    let csv = "smokes,abbr,age,poverty,obesity,healthcare,income,state\n\
               18.4,AK,33.1,12.8,28.4,14.6,71000,Alaska\n";
    let rows = load_csv_reader(csv.as_bytes()).unwrap();
    assert_eq!(rows[0].abbreviation, "AK");
    assert_eq!(rows[0].poverty, 12.8);
    assert_eq!(rows[0].smokes, 18.4);
}

#[test]
fn missing_column_is_rejected() {
    let csv = "abbr,poverty,age,income,healthcare,obesity\nAL,18.1,38.1,43000,11.1,32.4\n";
    let err = load_csv_reader(csv.as_bytes()).unwrap_err();
    assert!(matches!(err, ChartError::DataLoad(_)), "{err}");
}

#[test]
fn non_numeric_value_names_the_row() {
    let csv = format!(
        "{HEADER}\nAL,18.1,38.1,43000,11.1,32.4,21.1\nAK,n/a,33.1,71000,14.6,28.4,18.4\n"
    );
    match load_csv_reader(csv.as_bytes()) {
        Err(ChartError::DataLoad(msg)) => assert!(msg.contains("row 2"), "{msg}"),
        other => panic!("expected a load error, got {other:?}"),
    }
}

#[test]
fn negative_value_is_rejected() {
    let csv = format!("{HEADER}\nAL,18.1,38.1,-43000,11.1,32.4,21.1\n");
    match load_csv_reader(csv.as_bytes()) {
        Err(ChartError::DataLoad(msg)) => {
            assert!(msg.contains("AL"), "{msg}");
            assert!(msg.contains("income"), "{msg}");
        }
        other => panic!("expected a load error, got {other:?}"),
    }
}

#[test]
fn header_only_file_loads_empty() {
    let rows = load_csv_reader(format!("{HEADER}\n").as_bytes()).unwrap();
    assert!(rows.is_empty());
}
