use super::{Formatter, Params, ToSql};

/// A table or column name. Names are checked to be plain identifiers when the
/// schema is built, so they are written unquoted.
pub(super) struct Ident<S>(pub(super) S);

impl<S: AsRef<str>> ToSql for Ident<S> {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        f.dst.push_str(self.0.as_ref());
    }
}
