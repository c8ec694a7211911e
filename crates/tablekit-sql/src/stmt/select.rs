use super::{known_field, typed_value, Condition, OrderBy, Query, Statement};

use tablekit_core::{schema::Schema, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    pub table: String,

    /// What each returned row holds
    pub returning: Returning,

    /// AND-combined equality constraints
    pub filter: Vec<Condition>,

    pub order_by: Vec<OrderBy>,

    pub limit: Option<u64>,

    pub offset: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Returning {
    /// The listed columns
    Columns(Vec<String>),

    /// A single row holding the number of matching rows
    Count,
}

impl Statement {
    /// Selects every column of the rows matching `query`, in schema
    /// declaration order.
    ///
    /// Fails with an unknown field error if the filter or ordering name a
    /// field the schema does not declare, or with a type mismatch if a filter
    /// value cannot be compared with its field.
    pub fn select(schema: &Schema, query: &Query) -> Result<Self> {
        let mut filter = Vec::with_capacity(query.filter.len());

        for (name, value) in query.filter.iter() {
            filter.push(Condition {
                column: name.to_string(),
                value: typed_value(schema, name, value.clone())?,
            });
        }

        for order_by in &query.order_by {
            known_field(schema, &order_by.field)?;
        }

        Ok(Select {
            table: schema.table_name().to_string(),
            returning: Returning::Columns(
                schema.column_names().into_iter().map(String::from).collect(),
            ),
            filter,
            order_by: query.order_by.clone(),
            limit: query.limit,
            offset: query.offset,
        }
        .into())
    }

    /// Counts every row of the table.
    pub fn count(schema: &Schema) -> Self {
        Select {
            table: schema.table_name().to_string(),
            returning: Returning::Count,
            filter: vec![],
            order_by: vec![],
            limit: None,
            offset: None,
        }
        .into()
    }
}

impl From<Select> for Statement {
    fn from(value: Select) -> Self {
        Self::Select(value)
    }
}
