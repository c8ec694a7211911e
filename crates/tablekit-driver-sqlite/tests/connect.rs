use tablekit_core::{Dialect, Driver};
use tablekit_driver_sqlite::Sqlite;

#[test]
fn parse_memory_url() {
    let driver = Sqlite::new("sqlite::memory:").unwrap();

    assert!(matches!(driver, Sqlite::InMemory));
    assert_eq!(driver.url(), "sqlite::memory:");
    assert_eq!(driver.dialect(), Dialect::Sqlite);
}

#[test]
fn parse_file_url() {
    let driver = Sqlite::new("sqlite:/tmp/people.db").unwrap();

    match &driver {
        Sqlite::File(path) => assert_eq!(path.to_str(), Some("/tmp/people.db")),
        Sqlite::InMemory => panic!("expected a file driver"),
    }
    assert_eq!(driver.url(), "sqlite:/tmp/people.db");
}

#[test]
fn reject_other_scheme() {
    let err = Sqlite::new("postgres://localhost/db").unwrap_err();
    assert!(err.is_connection());

    let err = Sqlite::new("not a url").unwrap_err();
    assert!(err.is_connection());
}

#[test]
fn connect_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.db");

    let connection = Sqlite::open(&path).connect().unwrap();
    connection.close().unwrap();

    assert!(path.exists());
}

#[test]
fn connect_to_inaccessible_location() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("data.db");

    let err = Sqlite::open(&path).connect().unwrap_err();

    assert!(err.is_connection());
}
