use tablekit_core::{
    driver::{Connection, Dialect, Driver},
    Error, Result, TypeRegistry,
};

use std::borrow::Cow;
use url::Url;

/// A storage engine chosen by the scheme of its URL.
#[derive(Debug)]
pub struct Connect {
    driver: Box<dyn Driver>,
}

impl Connect {
    pub fn new(url: &str) -> Result<Self> {
        let parsed = Url::parse(url).map_err(|err| {
            Error::connection_failed(format!("invalid connection URL `{url}`"), err)
        })?;

        let driver = match parsed.scheme() {
            "sqlite" => connect_sqlite(url)?,
            scheme => {
                return Err(Error::connection(format!(
                    "unsupported database; scheme={scheme}; url={url}"
                )))
            }
        };

        Ok(Self { driver })
    }
}

impl Driver for Connect {
    fn url(&self) -> Cow<'_, str> {
        self.driver.url()
    }

    fn dialect(&self) -> Dialect {
        self.driver.dialect()
    }

    fn type_registry(&self) -> TypeRegistry {
        self.driver.type_registry()
    }

    fn connect(&self) -> Result<Box<dyn Connection>> {
        self.driver.connect()
    }
}

#[cfg(feature = "sqlite")]
fn connect_sqlite(url: &str) -> Result<Box<dyn Driver>> {
    Ok(Box::new(tablekit_driver_sqlite::Sqlite::new(url)?))
}

#[cfg(not(feature = "sqlite"))]
fn connect_sqlite(_url: &str) -> Result<Box<dyn Driver>> {
    Err(Error::connection("`sqlite` feature not enabled"))
}
