use tablekit_core::{driver::operation::Transaction, Dialect};
use tablekit_sql::Serializer;

#[test]
fn transaction_control() {
    let sqlite = Serializer::sqlite();
    assert_eq!(sqlite.serialize_transaction(&Transaction::Start), "BEGIN");
    assert_eq!(sqlite.serialize_transaction(&Transaction::Commit), "COMMIT");
    assert_eq!(sqlite.serialize_transaction(&Transaction::Rollback), "ROLLBACK");

    let postgresql = Serializer::postgresql();
    assert_eq!(postgresql.serialize_transaction(&Transaction::Start), "BEGIN");

    let mysql = Serializer::mysql();
    assert_eq!(
        mysql.serialize_transaction(&Transaction::Start),
        "START TRANSACTION"
    );
    assert_eq!(mysql.serialize_transaction(&Transaction::Rollback), "ROLLBACK");
}

#[test]
fn serializer_for_dialect() {
    for dialect in [Dialect::Sqlite, Dialect::Postgresql, Dialect::Mysql] {
        assert_eq!(Serializer::for_dialect(dialect).dialect(), dialect);
    }
}
