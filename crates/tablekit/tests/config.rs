use pretty_assertions::assert_eq;
use tablekit::{
    record, Dialect, Driver, FieldType, Query, Schema, TableStorage, TypeRegistry,
};
use tablekit_driver_sqlite::Sqlite;

fn schema() -> Schema {
    Schema::from_json(
        r#"{
            "table_name": "books",
            "fields": { "isbn": "TEXT", "title": "TEXT", "published": "DATE" },
            "primary_key": ["isbn"],
            "unique_keys": [["title", "published"]]
        }"#,
    )
    .unwrap()
}

#[test]
fn ddl_from_json_schema() {
    let storage = TableStorage::builder(schema())
        .url("sqlite::memory:")
        .build()
        .unwrap();

    assert_eq!(
        storage.ddl().unwrap(),
        "CREATE TABLE books (\n\
         isbn TEXT,\n\
         title TEXT,\n\
         published DATE,\n\
         PRIMARY KEY (isbn),\n\
         UNIQUE (title, published)\n\
         );"
    );
    assert_eq!(storage.driver().dialect(), Dialect::Sqlite);
}

#[test]
fn explicit_driver() {
    let mut storage = TableStorage::builder(schema())
        .driver(Sqlite::in_memory())
        .build()
        .unwrap();

    assert_eq!(storage.driver().url(), "sqlite::memory:");

    let rows = storage
        .with_session(|storage| {
            storage.create_table(false)?;
            storage.insert(&record! { "isbn" => "978-0", "title" => "Rust", "published" => "2018-08-01" })?;
            storage.query(&Query::new().filter("isbn", "978-0"))
        })
        .unwrap();

    assert_eq!(rows.len(), 1);
}

#[test]
fn missing_location() {
    let err = TableStorage::builder(schema()).build().unwrap_err();
    assert!(err.is_connection());
}

#[test]
fn unsupported_scheme() {
    let err = TableStorage::builder(schema())
        .url("oracle://localhost/books")
        .build()
        .unwrap_err();

    assert!(err.is_connection());
    assert!(err.to_string().contains("oracle"), "{err}");
}

#[derive(Debug)]
struct NoDates;

impl Driver for NoDates {
    fn url(&self) -> std::borrow::Cow<'_, str> {
        "sqlite::memory:".into()
    }

    fn dialect(&self) -> Dialect {
        Dialect::Sqlite
    }

    fn type_registry(&self) -> TypeRegistry {
        TypeRegistry::empty(Dialect::Sqlite)
            .register(FieldType::Integer, "INTEGER")
            .register(FieldType::Text, "TEXT")
    }

    fn connect(&self) -> tablekit::Result<Box<dyn tablekit_core::Connection>> {
        Sqlite::in_memory().connect()
    }
}

#[test]
fn registry_is_verified_at_build() {
    let err = TableStorage::builder(schema())
        .driver(NoDates)
        .build()
        .unwrap_err();

    assert!(err.is_unsupported_type());
    assert!(err.to_string().contains("published"), "{err}");
}

#[test]
fn log_path_receives_events() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("storage.log");

    let mut storage = TableStorage::builder(schema())
        .url("sqlite::memory:")
        .log_path(&log_path)
        .build()
        .unwrap();

    storage
        .with_session(|storage| {
            storage.create_table(false)?;
            storage.insert(&record! { "isbn" => "1", "title" => "a" })?;
            storage.drop_table(false)
        })
        .unwrap();

    let log = std::fs::read_to_string(&log_path).unwrap();

    assert!(log.contains("created table"), "{log}");
    assert!(log.contains("INSERT INTO books"), "{log}");
    assert!(log.contains("dropped table"), "{log}");
    assert!(log.contains("closed"), "{log}");
}

#[test]
fn log_path_unwritable() {
    let dir = tempfile::tempdir().unwrap();

    let err = TableStorage::builder(schema())
        .url("sqlite::memory:")
        .log_path(dir.path().join("missing").join("storage.log"))
        .build()
        .unwrap_err();

    assert!(err.is_connection());
}
