use tablekit::{record, FieldType, Query, Record, Schema, TableStorage};

fn open_storage() -> TableStorage {
    let schema = Schema::builder("items")
        .field("id", FieldType::Integer)
        .field("label", FieldType::Text)
        .field("price", FieldType::Real)
        .primary_key(["id"])
        .unique(["label"])
        .build()
        .unwrap();

    let mut storage = TableStorage::builder(schema)
        .url("sqlite::memory:")
        .build()
        .unwrap();

    storage.open().unwrap();
    storage.create_table(false).unwrap();
    storage
}

fn items(n: i64) -> Vec<Record> {
    (1..=n)
        .map(|id| record! { "id" => id, "label" => format!("item {id}"), "price" => 1.5 })
        .collect()
}

#[test]
fn inserts_every_record() {
    let mut storage = open_storage();

    assert_eq!(storage.insert_many(&items(10)).unwrap(), 10);
    assert_eq!(storage.count().unwrap(), 10);
}

#[test]
fn empty_batch() {
    let mut storage = open_storage();

    assert_eq!(storage.insert_many(&[]).unwrap(), 0);
    assert_eq!(storage.count().unwrap(), 0);
}

#[test]
fn invalid_record_rejects_the_whole_batch() {
    let mut storage = open_storage();

    let mut records = items(10);
    records[3].set("price", "cheap");

    let err = storage.insert_many(&records).unwrap_err();

    assert!(err.is_type_mismatch());
    assert_eq!(err.record_index(), Some(3));
    assert_eq!(storage.count().unwrap(), 0);
}

#[test]
fn unknown_field_in_last_record() {
    let mut storage = open_storage();

    let mut records = items(4);
    records[3].set("colour", "red");

    let err = storage.insert_many(&records).unwrap_err();

    assert!(err.is_unknown_field());
    assert_eq!(err.record_index(), Some(3));
    assert_eq!(storage.count().unwrap(), 0);
}

#[test]
fn engine_failure_rolls_back() {
    let mut storage = open_storage();

    let mut records = items(5);
    records[4].set("label", "item 1");

    let err = storage.insert_many(&records).unwrap_err();

    assert!(err.is_storage_engine());
    assert_eq!(err.record_index(), None);
    assert_eq!(storage.count().unwrap(), 0);

    // the connection is usable again afterwards
    assert_eq!(storage.insert_many(&items(2)).unwrap(), 2);
    assert_eq!(storage.query(&Query::new()).unwrap().len(), 2);
}
