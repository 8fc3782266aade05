use std::fs;

use unitnorm_ingest::{IngestError, read_label_table, write_label_table};

#[test]
fn reads_index_header_labels_and_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("CN_quarterly.csv");
    fs::write(
        &path,
        "\u{feff}date,\"GDP, SA, LCU\",\"CPI, % YoY\"\n2024-03-31,100.5,2.1\n2024-06-30,,2.3\n",
    )
    .unwrap();

    let table = read_label_table(&path).expect("read table");
    assert_eq!(table.index_header, "date");
    assert_eq!(table.labels, vec!["GDP, SA, LCU", "CPI, % YoY"]);
    assert_eq!(table.row_count(), 2);
    assert_eq!(
        table.rows[1].iter().collect::<Vec<_>>(),
        vec!["2024-06-30", "", "2.3"]
    );
}

#[test]
fn rewrites_only_the_header() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("raw.csv");
    fs::write(
        &input,
        ",\"GDP, SA, LCU\",GDP USD\n2023-12-31,1.50,0.200\n2024-03-31,1.6e3,\n",
    )
    .unwrap();

    let mut table = read_label_table(&input).unwrap();
    table
        .replace_labels(vec!["GDP, LCU, SA".to_string(), "GDP USD".to_string()])
        .unwrap();
    let output = dir.path().join("clean/nested/out.csv");
    write_label_table(&table, &output).expect("write table");

    let written = fs::read_to_string(&output).unwrap();
    insta::assert_snapshot!(written, @r#"
    ,"GDP, LCU, SA",GDP USD
    2023-12-31,1.50,0.200
    2024-03-31,1.6e3,
    "#);
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_label_table(&dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, IngestError::Io { .. }));
}

#[test]
fn empty_file_has_no_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.csv");
    fs::write(&path, "").unwrap();
    let err = read_label_table(&path).unwrap_err();
    assert!(matches!(err, IngestError::MissingHeader { .. }));
}
