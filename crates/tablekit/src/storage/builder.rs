use super::{State, TableStorage};
use crate::{diagnostics, Connect};

use tablekit_core::{Driver, Error, Result, Schema};
use tablekit_sql::Serializer;

use std::path::PathBuf;

/// Configures a [`TableStorage`].
///
/// The storage location is given either as a URL (`sqlite:path/to/file.db`,
/// `sqlite::memory:`) or as a driver. A driver takes precedence over a URL.
#[derive(Debug)]
pub struct Builder {
    schema: Schema,
    url: Option<String>,
    driver: Option<Box<dyn Driver>>,
    log_path: Option<PathBuf>,
}

impl Builder {
    pub(super) fn new(schema: Schema) -> Builder {
        Builder {
            schema,
            url: None,
            driver: None,
            log_path: None,
        }
    }

    /// Sets the storage location as a URL.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Sets the storage engine directly.
    pub fn driver(mut self, driver: impl Driver) -> Self {
        self.driver = Some(Box::new(driver));
        self
    }

    /// Writes the storage's events to the file at `path` rather than to the
    /// global subscriber. The file is appended to.
    pub fn log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_path = Some(path.into());
        self
    }

    /// Builds the storage, without connecting it.
    ///
    /// Fails with an unsupported type error if the engine has no column type
    /// for one of the schema's fields, and with a connection error if the URL
    /// is invalid or the log file cannot be opened.
    pub fn build(self) -> Result<TableStorage> {
        let driver = match (self.driver, self.url) {
            (Some(driver), _) => driver,
            (None, Some(url)) => Box::new(Connect::new(&url)?),
            (None, None) => {
                return Err(Error::connection(
                    "no storage location configured; set a URL or a driver",
                ))
            }
        };

        let registry = driver.type_registry();
        registry.verify(&self.schema)?;

        let dispatch = self
            .log_path
            .as_deref()
            .map(diagnostics::file_dispatch)
            .transpose()?;

        Ok(TableStorage {
            schema: self.schema,
            serializer: Serializer::for_dialect(driver.dialect()),
            driver,
            registry,
            state: State::Idle,
            dispatch,
        })
    }
}
