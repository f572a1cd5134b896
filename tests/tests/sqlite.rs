use crumb::{driver::Driver, sqlite::Sqlite};

#[test]
fn parses_in_memory_url() {
    let driver = Sqlite::new("sqlite::memory:").unwrap();
    assert_eq!(driver.url(), "sqlite::memory:");
}

#[test]
fn parses_file_url() {
    let driver = Sqlite::new("sqlite:/tmp/crumb-test.db").unwrap();
    assert_eq!(driver.url(), "sqlite:/tmp/crumb-test.db");
}

#[test]
fn rejects_other_schemes() {
    let err = Sqlite::new("postgresql://localhost/crumb").unwrap_err();
    assert!(err.is_connectivity());
}
