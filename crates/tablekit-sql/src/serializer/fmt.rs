use super::{Formatter, Params};

macro_rules! fmt {
    ($f:expr, $( $fragments:expr )*) => {{
        $(
            $fragments.to_sql($f);
        )*
    }};
}

pub(super) trait ToSql {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>);
}

impl ToSql for &str {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        f.dst.push_str(self);
    }
}

impl ToSql for u64 {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        use std::fmt::Write;

        write!(f.dst, "{self}").unwrap();
    }
}

impl<S: ToSql> ToSql for Option<S> {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        if let Some(fragment) = self {
            fragment.to_sql(f);
        }
    }
}
