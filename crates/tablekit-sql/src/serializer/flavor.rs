use super::Serializer;

use tablekit_core::driver::Dialect;

#[derive(Debug, Clone, Copy)]
pub(super) enum Flavor {
    Postgresql,
    Sqlite,
    Mysql,
}

impl Serializer {
    pub fn sqlite() -> Serializer {
        Serializer {
            flavor: Flavor::Sqlite,
        }
    }

    pub fn postgresql() -> Serializer {
        Serializer {
            flavor: Flavor::Postgresql,
        }
    }

    pub fn mysql() -> Serializer {
        Serializer {
            flavor: Flavor::Mysql,
        }
    }

    pub fn for_dialect(dialect: Dialect) -> Serializer {
        match dialect {
            Dialect::Sqlite => Serializer::sqlite(),
            Dialect::Postgresql => Serializer::postgresql(),
            Dialect::Mysql => Serializer::mysql(),
        }
    }
}
