use chrono::NaiveDate;
use tablekit_core::{
    driver::operation::{QuerySql, Transaction},
    stmt::Value,
    Connection, Driver, FieldType,
};
use tablekit_driver_sqlite::Sqlite;

fn connect() -> Box<dyn Connection> {
    let mut connection = Sqlite::in_memory().connect().unwrap();

    connection
        .exec(
            QuerySql::execute(
                "CREATE TABLE t (id INTEGER, name TEXT, score REAL, photo BLOB, born DATE, PRIMARY KEY (id));",
                vec![],
            )
            .into(),
        )
        .unwrap();

    connection
}

fn select_all(connection: &mut Box<dyn Connection>) -> Vec<Vec<Value>> {
    connection
        .exec(
            QuerySql::query(
                "SELECT id, name, score, photo, born FROM t ORDER BY id;",
                vec![],
                vec![
                    FieldType::Integer,
                    FieldType::Text,
                    FieldType::Real,
                    FieldType::Blob,
                    FieldType::Date,
                ],
            )
            .into(),
        )
        .unwrap()
        .rows
        .into_values()
        .unwrap()
}

#[test]
fn insert_and_read_back_every_type() {
    let mut connection = connect();
    let born = NaiveDate::from_ymd_opt(1990, 7, 14).unwrap();

    let response = connection
        .exec(
            QuerySql::insert(
                "INSERT INTO t (id, name, score, photo, born) VALUES (?1, ?2, ?3, ?4, ?5);",
                vec![
                    Value::from(7),
                    Value::from("Ann"),
                    Value::from(1.5),
                    Value::from(vec![1u8, 2, 3]),
                    Value::from(born),
                ],
            )
            .into(),
        )
        .unwrap();

    assert!(response.rows.is_count());
    assert!(!response.rows.is_values());
    assert_eq!(response.rows.into_count().unwrap(), 1);
    assert_eq!(response.last_insert_id, Some(7));

    assert_eq!(
        select_all(&mut connection),
        [vec![
            Value::from(7),
            Value::from("Ann"),
            Value::from(1.5),
            Value::from(vec![1u8, 2, 3]),
            Value::from(born),
        ]]
    );
}

#[test]
fn nulls_read_back_as_null() {
    let mut connection = connect();

    connection
        .exec(QuerySql::insert("INSERT INTO t (id) VALUES (?1);", vec![Value::from(1)]).into())
        .unwrap();

    assert_eq!(
        select_all(&mut connection),
        [vec![
            Value::from(1),
            Value::Null,
            Value::Null,
            Value::Null,
            Value::Null,
        ]]
    );
}

#[test]
fn engine_failures_are_reported() {
    let mut connection = connect();

    connection
        .exec(QuerySql::insert("INSERT INTO t (id) VALUES (?1);", vec![Value::from(1)]).into())
        .unwrap();

    let err = connection
        .exec(QuerySql::insert("INSERT INTO t (id) VALUES (?1);", vec![Value::from(1)]).into())
        .unwrap_err();

    assert!(err.is_storage_engine());
    assert!(err.to_string().contains("UNIQUE"), "{err}");
}

#[test]
fn rollback_discards_changes() {
    let mut connection = connect();

    connection.exec(Transaction::Start.into()).unwrap();
    connection
        .exec(QuerySql::insert("INSERT INTO t (id) VALUES (?1);", vec![Value::from(1)]).into())
        .unwrap();
    connection.exec(Transaction::Rollback.into()).unwrap();

    assert!(select_all(&mut connection).is_empty());

    connection.exec(Transaction::Start.into()).unwrap();
    connection
        .exec(QuerySql::insert("INSERT INTO t (id) VALUES (?1);", vec![Value::from(2)]).into())
        .unwrap();
    connection.exec(Transaction::Commit.into()).unwrap();

    assert_eq!(select_all(&mut connection).len(), 1);
}

#[test]
fn table_exists() {
    let mut connection = connect();

    assert!(connection.table_exists("t").unwrap());
    assert!(!connection.table_exists("missing").unwrap());
}

#[test]
fn table_exists_ignores_case() {
    let mut connection = connect();

    connection
        .exec(QuerySql::execute("CREATE TABLE people (id INTEGER);", vec![]).into())
        .unwrap();

    assert!(connection.table_exists("people").unwrap());
    assert!(connection.table_exists("People").unwrap());
    assert!(connection.table_exists("T").unwrap());
    assert!(!connection.table_exists("peoples").unwrap());
}

#[test]
fn query_responds_with_rows() {
    let mut connection = connect();

    let rows = connection
        .exec(QuerySql::query("SELECT id FROM t;", vec![], vec![FieldType::Integer]).into())
        .unwrap()
        .rows;

    assert!(rows.is_values());
    assert!(rows.is_empty());
    assert!(rows.into_count().is_err());
}
