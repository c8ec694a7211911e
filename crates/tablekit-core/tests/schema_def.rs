use tablekit_core::{schema::SchemaDef, FieldType, Schema};

#[test]
fn from_json_keeps_field_order() {
    let schema = Schema::from_json(
        r#"{
            "table_name": "users",
            "fields": { "id": "INTEGER", "name": "text", "score": "Real", "born": "DATE" },
            "primary_key": ["id"],
            "unique_keys": [["name"]]
        }"#,
    )
    .unwrap();

    assert_eq!(schema.column_names(), ["id", "name", "score", "born"]);
    assert_eq!(schema.field_type("score"), Some(FieldType::Real));
    assert_eq!(schema.field_type("born"), Some(FieldType::Date));
    assert!(schema.is_unique_group(&["name"]));
}

#[test]
fn from_json_default_primary_key() {
    let schema = Schema::from_json(
        r#"{ "table_name": "notes", "fields": { "_id": "INTEGER", "body": "TEXT" } }"#,
    )
    .unwrap();

    assert_eq!(schema.primary_key(), ["_id".to_string()]);
}

#[test]
fn from_json_unknown_type() {
    let err = Schema::from_json(
        r#"{ "table_name": "notes", "fields": { "_id": "INTEGER", "body": "VARCHAR" } }"#,
    )
    .unwrap_err();

    assert!(err.to_string().contains("VARCHAR"));
}

#[test]
fn from_json_validates() {
    let err = Schema::from_json(
        r#"{ "table_name": "notes", "fields": { "body": "TEXT" }, "primary_key": ["id"] }"#,
    )
    .unwrap_err();

    assert!(err.is_schema());
}

#[test]
fn def_round_trip() {
    let schema = Schema::builder("users")
        .field("id", FieldType::Integer)
        .field("avatar", FieldType::Blob)
        .primary_key(["id"])
        .build()
        .unwrap();

    let def = SchemaDef::from(&schema);
    assert_eq!(Schema::from_def(def).unwrap(), schema);
}
