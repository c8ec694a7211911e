use super::{Formatter, Params, ToSql};

use tablekit_core::stmt::Value;

/// Values are never inlined; each one becomes a bound parameter.
impl ToSql for &Value {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let placeholder = f.params.push(self);
        placeholder.to_sql(f);
    }
}
