use pretty_assertions::assert_eq;
use tablekit::{record, FieldType, Query, Schema, TableStorage};

fn people() -> Schema {
    Schema::builder("people")
        .field("id", FieldType::Integer)
        .field("name", FieldType::Text)
        .field("age", FieldType::Integer)
        .primary_key(["id"])
        .build()
        .unwrap()
}

fn storage() -> TableStorage {
    TableStorage::builder(people())
        .url("sqlite::memory:")
        .build()
        .unwrap()
}

#[test]
fn create_insert_query() {
    let mut storage = storage();

    let rows = storage
        .with_session(|storage| {
            storage.create_table(false)?;
            storage.insert(&record! { "id" => 1, "name" => "John", "age" => 20 })?;
            storage.query(&Query::new())
        })
        .unwrap();

    assert_eq!(rows, [record! { "id" => 1, "name" => "John", "age" => 20 }]);
}

#[test]
fn drop_missing_table() {
    let mut storage = storage();
    let mut session = storage.session().unwrap();

    let err = session.drop_table(false).unwrap_err();
    assert!(err.is_table_not_found());
    assert_eq!(err.to_string(), "table `people` does not exist");

    session.drop_table(true).unwrap();
}

#[test]
fn create_existing_table() {
    let mut storage = storage();
    let mut session = storage.session().unwrap();

    session.create_table(false).unwrap();

    let err = session.create_table(false).unwrap_err();
    assert!(err.is_table_exists());

    session.create_table(true).unwrap();
    session.drop_table(false).unwrap();
    session.create_table(false).unwrap();
}

#[test]
fn unknown_field_leaves_table_unchanged() {
    let mut storage = storage();
    let mut session = storage.session().unwrap();

    session.create_table(false).unwrap();
    session.insert(&record! { "id" => 2, "name" => "Jane" }).unwrap();

    let err = session
        .insert(&record! { "id" => 1, "unknown_field" => "x" })
        .unwrap_err();
    assert!(err.is_unknown_field());

    assert_eq!(session.count().unwrap(), 1);
    assert_eq!(
        session.query(&Query::new()).unwrap(),
        [record! { "id" => 2, "name" => "Jane", "age" => tablekit::Value::Null }]
    );
}

#[test]
fn query_dump_with_limit() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");

    let mut storage = storage();
    let mut session = storage.session().unwrap();
    session.create_table(false).unwrap();

    for id in 1..=5 {
        session
            .insert(&record! { "id" => id, "name" => format!("user{id}"), "age" => 20 + id })
            .unwrap();
    }

    let written = session.query_dump(&Query::new().limit(2), &path).unwrap();
    assert_eq!(written, 2);

    let csv = std::fs::read_to_string(&path).unwrap();
    assert_eq!(csv, "id,name,age\n1,user1,21\n2,user2,22\n");
    assert_eq!(csv.lines().count(), 3);
}

#[test]
fn query_dump_to_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("out.csv");

    let mut storage = storage();
    let mut session = storage.session().unwrap();
    session.create_table(false).unwrap();
    session.insert(&record! { "id" => 1, "name" => "John" }).unwrap();

    let err = session.query_dump(&Query::new(), &path).unwrap_err();
    assert!(err.is_export(), "{err}");

    assert!(!path.exists());
    assert!(!dir.path().join("missing").join("out.csv.tmp").exists());
}

#[test]
fn query_dump_over_a_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");
    std::fs::create_dir(&path).unwrap();

    let mut storage = storage();
    let mut session = storage.session().unwrap();
    session.create_table(false).unwrap();
    session.insert(&record! { "id" => 1, "name" => "John" }).unwrap();

    let err = session.query_dump(&Query::new(), &path).unwrap_err();
    assert!(err.is_export(), "{err}");

    assert!(path.is_dir());
    assert!(!dir.path().join("out.csv.tmp").exists());
}

#[test]
fn table_names_ignore_case() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite:{}", dir.path().join("people.db").display());

    let mut lower = TableStorage::builder(people()).url(&url).build().unwrap();
    lower.with_session(|storage| storage.create_table(false)).unwrap();

    let schema = Schema::builder("People")
        .field("id", FieldType::Integer)
        .field("name", FieldType::Text)
        .field("age", FieldType::Integer)
        .primary_key(["id"])
        .build()
        .unwrap();

    let mut upper = TableStorage::builder(schema).url(&url).build().unwrap();
    let mut session = upper.session().unwrap();

    session.create_table(true).unwrap();
    assert!(session.create_table(false).unwrap_err().is_table_exists());

    session.drop_table(false).unwrap();
    session.drop_table(true).unwrap();
}
