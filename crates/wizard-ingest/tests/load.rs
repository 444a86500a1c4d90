use std::io::Write;

use tempfile::{NamedTempFile, TempDir};
use wizard_ingest::{IngestError, load_bytes, load_file};

fn csv_file(content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[tokio::test]
async fn loads_csv_from_disk() {
    let file = csv_file("NAME,SURNAME,AGE\nJohn,Doe,30\nJane,Smith,28\n");
    let parsed = load_file(file.path(), 10_000).await.unwrap();

    assert_eq!(parsed.rows.len(), 3);
    assert_eq!(parsed.rows[2], vec!["Jane", "Smith", "28"]);
    assert!(parsed.file_name.ends_with(".csv"));
}

#[tokio::test]
async fn truncates_to_row_limit() {
    let mut content = String::from("N\n");
    for i in 0..50 {
        content.push_str(&format!("{i}\n"));
    }
    let file = csv_file(&content);
    let parsed = load_file(file.path(), 10).await.unwrap();
    assert_eq!(parsed.rows.len(), 10);
    assert_eq!(parsed.rows[9], vec!["8"]);
}

#[tokio::test]
async fn missing_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let err = load_file(&dir.path().join("absent.csv"), 10)
        .await
        .unwrap_err();
    assert!(matches!(err, IngestError::FileNotFound { .. }));
}

#[tokio::test]
async fn unsupported_extension_is_reported() {
    let mut file = tempfile::Builder::new()
        .suffix(".txt")
        .tempfile()
        .unwrap();
    file.write_all(b"a,b\n").unwrap();
    let err = load_file(file.path(), 10).await.unwrap_err();
    assert_eq!(err.to_string(), "Unsupported file format: txt");
}

#[test]
fn load_bytes_dispatches_by_extension() {
    let parsed = load_bytes(b"A;B\n1;2\n", "data.CSV", 100).unwrap();
    assert_eq!(parsed.rows[0], vec!["A;B"]);
}
