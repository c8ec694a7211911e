use super::{Comma, Delimited, Flavor, Formatter, Ident, Params, ToSql};

use crate::stmt::{self, Direction};

/// Largest row count MySQL accepts in a `LIMIT` clause.
const MYSQL_MAX_LIMIT: u64 = u64::MAX;

/// SQLite and PostgreSQL read `LIMIT` and `OFFSET` as signed 64-bit integers.
const SIGNED_MAX_ROWS: u64 = i64::MAX as u64;

impl ToSql for &stmt::Statement {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self {
            stmt::Statement::CreateTable(stmt) => stmt.to_sql(f),
            stmt::Statement::DropTable(stmt) => stmt.to_sql(f),
            stmt::Statement::Delete(stmt) => stmt.to_sql(f),
            stmt::Statement::Insert(stmt) => stmt.to_sql(f),
            stmt::Statement::Select(stmt) => stmt.to_sql(f),
        }
    }
}

/// One clause inside the parentheses of `CREATE TABLE`.
enum TableClause<'a> {
    Column(&'a stmt::ColumnDef),
    PrimaryKey(&'a [String]),
    Unique(&'a [String]),
}

impl ToSql for TableClause<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self {
            TableClause::Column(column) => {
                fmt!(f, Ident(&column.name) " " column.ty.as_str())
            }
            TableClause::PrimaryKey(columns) => {
                fmt!(f, "PRIMARY KEY (" Comma(columns.iter().map(Ident)) ")")
            }
            TableClause::Unique(columns) => {
                fmt!(f, "UNIQUE (" Comma(columns.iter().map(Ident)) ")")
            }
        }
    }
}

impl ToSql for &stmt::CreateTable {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let primary_key =
            (!self.primary_key.is_empty()).then(|| TableClause::PrimaryKey(&self.primary_key));

        let clauses = self
            .columns
            .iter()
            .map(TableClause::Column)
            .chain(primary_key)
            .chain(self.unique_keys.iter().map(|unique| TableClause::Unique(unique)));

        fmt!(f, "CREATE TABLE " Ident(&self.name) " (\n" Delimited(clauses, ",\n") "\n)");

        if f.serializer.is_mysql() {
            fmt!(f, " ENGINE=InnoDB");
        }
    }
}

impl ToSql for &stmt::DropTable {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let if_exists = if self.if_exists { "IF EXISTS " } else { "" };

        fmt!(f, "DROP TABLE " if_exists Ident(&self.name));
    }
}

impl ToSql for &stmt::Delete {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, "DELETE FROM " Ident(&self.table));
    }
}

impl ToSql for &stmt::Insert {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, "INSERT INTO " Ident(&self.table));

        if self.columns.is_empty() {
            match f.serializer.flavor {
                Flavor::Mysql => fmt!(f, " () VALUES ()"),
                Flavor::Postgresql | Flavor::Sqlite => fmt!(f, " DEFAULT VALUES"),
            }
            return;
        }

        let columns = Comma(self.columns.iter().map(Ident));
        let values = Comma(&self.values);

        fmt!(f, " (" columns ") VALUES (" values ")");
    }
}

impl ToSql for &stmt::Select {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let returning = &self.returning;

        fmt!(f, "SELECT " returning "\nFROM " Ident(&self.table));

        if !self.filter.is_empty() {
            fmt!(f, "\nWHERE " Delimited(&self.filter, " AND "));
        }

        if !self.order_by.is_empty() {
            fmt!(f, "\nORDER BY " Comma(&self.order_by));
        }

        let flavor = f.serializer.flavor;
        let bound = |rows: u64| match flavor {
            Flavor::Mysql => rows,
            Flavor::Postgresql | Flavor::Sqlite => rows.min(SIGNED_MAX_ROWS),
        };

        match (self.limit.map(bound), self.offset.map(bound)) {
            (Some(limit), offset) => {
                fmt!(f, "\nLIMIT " limit offset.map(Offset));
            }
            (None, Some(offset)) => {
                match flavor {
                    Flavor::Sqlite => fmt!(f, "\nLIMIT -1"),
                    Flavor::Mysql => fmt!(f, "\nLIMIT " MYSQL_MAX_LIMIT),
                    Flavor::Postgresql => {}
                }
                fmt!(f, Offset(offset));
            }
            (None, None) => {}
        }
    }
}

struct Offset(u64);

impl ToSql for Offset {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, "\nOFFSET " self.0);
    }
}

impl ToSql for &stmt::Returning {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self {
            stmt::Returning::Columns(columns) => fmt!(f, Comma(columns.iter().map(Ident))),
            stmt::Returning::Count => fmt!(f, "COUNT(*)"),
        }
    }
}

impl ToSql for &stmt::Condition {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        if self.value.is_null() {
            fmt!(f, Ident(&self.column) " IS NULL");
        } else {
            let value = &self.value;
            fmt!(f, Ident(&self.column) " = " value);
        }
    }
}

impl ToSql for &stmt::OrderBy {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let direction = match self.direction {
            Direction::Asc => " ASC",
            Direction::Desc => " DESC",
        };

        fmt!(f, Ident(&self.field) direction);
    }
}
