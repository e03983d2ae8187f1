use std::fs;

use tastelog_core::csvio::{coerce_numeric, read_rows, write_rows, Cell, CsvError};

#[test]
fn read_rows_parses_comma_delimited_text() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plain.csv");
    fs::write(&path, "name,score\nKimchi House,4.6\n").unwrap();

    let rows = read_rows(&path).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0], vec![Cell::text("name"), Cell::text("score")]);
    assert_eq!(
        rows[1],
        vec![Cell::text("Kimchi House"), Cell::text("4.6")]
    );
}

#[test]
fn read_rows_strips_leading_byte_order_marker() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bom.csv");
    fs::write(&path, b"\xef\xbb\xbfa,b\n").unwrap();

    let rows = read_rows(&path).unwrap();
    assert_eq!(rows[0][0], Cell::text("a"));
}

#[test]
fn read_rows_allows_uneven_row_lengths() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("uneven.csv");
    fs::write(&path, "a,b,c\nd\n").unwrap();

    let rows = read_rows(&path).unwrap();
    assert_eq!(rows[0].len(), 3);
    assert_eq!(rows[1].len(), 1);
}

#[test]
fn read_rows_reports_missing_file_as_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_rows(dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, CsvError::Io(_)));
}

#[test]
fn read_rows_reports_invalid_utf8_as_decode_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("latin1.csv");
    fs::write(&path, b"caf\xe9\n").unwrap();

    let err = read_rows(&path).unwrap_err();
    assert!(matches!(err, CsvError::Decode(_)));
}

#[test]
fn write_rows_emits_byte_order_marker_and_overwrites() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");

    write_rows(&path, &[vec![Cell::text("old")]]).unwrap();
    write_rows(&path, &[vec![Cell::text("a"), Cell::Number(1000.0)]]).unwrap();

    let bytes = fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"\xef\xbb\xbf"));

    let text = String::from_utf8(bytes).unwrap();
    assert!(!text.contains("old"));
    assert!(text.contains("a,1000"));
}

#[test]
fn write_rows_quotes_cells_containing_the_delimiter() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("quoted.csv");

    write_rows(&path, &[vec![Cell::text("a,b"), Cell::text("c")]]).unwrap();

    let rows = read_rows(&path).unwrap();
    assert_eq!(rows[0], vec![Cell::text("a,b"), Cell::text("c")]);
}

#[test]
fn coerce_numeric_converts_duplicate_cells_independently() {
    let mut rows = vec![vec![
        Cell::text("1,000"),
        Cell::text("abc"),
        Cell::text("1,000"),
    ]];

    coerce_numeric(&mut rows);

    assert_eq!(rows[0][0], Cell::Number(1000.0));
    assert_eq!(rows[0][1], Cell::text("abc"));
    assert_eq!(rows[0][2], Cell::Number(1000.0));
}

#[test]
fn coerce_numeric_handles_plain_and_grouped_decimals() {
    let mut rows = vec![vec![
        Cell::text("4.6"),
        Cell::text("-12,345.67"),
        Cell::text("1,2,3"),
        Cell::text(""),
    ]];

    coerce_numeric(&mut rows);

    assert_eq!(rows[0][0], Cell::Number(4.6));
    assert_eq!(rows[0][1], Cell::Number(-12345.67));
    assert_eq!(rows[0][2], Cell::text("1,2,3"));
    assert_eq!(rows[0][3], Cell::text(""));
}

#[test]
fn coerce_numeric_is_idempotent() {
    let mut rows = vec![vec![Cell::text("2.5"), Cell::text("menu")]];

    coerce_numeric(&mut rows);
    coerce_numeric(&mut rows);

    assert_eq!(rows[0][0], Cell::Number(2.5));
    assert_eq!(rows[0][1], Cell::text("menu"));
}
