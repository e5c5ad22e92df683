//! CSV files loaded end to end.

use std::io::Write;

use chrono::TimeDelta;
use tempfile::NamedTempFile;

use tabprof_ingest::{CsvOptions, IngestError, read_csv_table};
use tabprof_model::{Column, SemanticType};

fn create_temp_csv(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{content}").unwrap();
    file
}

#[test]
fn reads_typed_columns() {
    let file = create_temp_csv(
        "site,injuries,rate,active\nA,0,0.5,true\nB,2,,false\nA,1,1.5,true\n",
    );
    let table = read_csv_table(file.path(), &CsvOptions::default()).unwrap();
    assert_eq!(table.shape(), (3, 4));
    let dtypes: Vec<SemanticType> = table.columns().iter().map(Column::dtype).collect();
    let expected = [
        SemanticType::Object,
        SemanticType::Integer,
        SemanticType::Float,
        SemanticType::Boolean,
    ];
    assert_eq!(dtypes, expected);
    assert_eq!(table.column("rate").unwrap().null_count(), 1);
}

#[test]
fn datetime_index_becomes_timestamp_labels() {
    let file = create_temp_csv(
        "when,site\n2020-01-01 00:00:00,A\n2020-01-01 01:00:00,B\n2020-01-01 04:00:00,A\n",
    );
    let options = CsvOptions::default().with_index_column("when");
    let table = read_csv_table(file.path(), &options).unwrap();
    assert_eq!(table.width(), 1);
    let stamps = table.labels().as_timestamps().unwrap();
    assert_eq!(stamps[2] - stamps[1], TimeDelta::hours(3));
}

#[test]
fn missing_index_column_is_reported() {
    let file = create_temp_csv("a,b\n1,2\n");
    let options = CsvOptions::default().with_index_column("when");
    let err = read_csv_table(file.path(), &options).unwrap_err();
    assert!(matches!(err, IngestError::ColumnNotFound { .. }));
}

#[test]
fn empty_file_is_rejected() {
    let file = create_temp_csv("");
    let err = read_csv_table(file.path(), &CsvOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        IngestError::EmptyCsv { .. } | IngestError::CsvParse { .. }
    ));
}
