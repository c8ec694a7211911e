use pretty_assertions::assert_eq;
use tablekit_core::{stmt::Value, FieldType, Schema};
use tablekit_sql::{Serializer, Statement};

fn users() -> Schema {
    Schema::builder("users")
        .field("_id", FieldType::Integer)
        .build()
        .unwrap()
}

#[test]
fn drop_table() {
    let mut params: Vec<Value> = vec![];
    let sql = Serializer::sqlite().serialize(&Statement::drop_table(&users()), &mut params);

    assert_eq!(sql, "DROP TABLE users;");
    assert!(params.is_empty());
}

#[test]
fn drop_table_if_exists() {
    for serializer in [
        Serializer::sqlite(),
        Serializer::postgresql(),
        Serializer::mysql(),
    ] {
        let mut params: Vec<Value> = vec![];
        let sql = serializer.serialize(&Statement::drop_table_if_exists(&users()), &mut params);
        assert_eq!(sql, "DROP TABLE IF EXISTS users;");
    }
}

#[test]
fn delete_all() {
    let mut params: Vec<Value> = vec![];
    let sql = Serializer::sqlite().serialize(&Statement::delete_all(&users()), &mut params);
    assert_eq!(sql, "DELETE FROM users;");
}
