use tablekit_core::{Error, Result};

use std::{fs::OpenOptions, path::Path, sync::Mutex};
use tracing::{level_filters::LevelFilter, Dispatch};
use tracing_subscriber::EnvFilter;

/// Builds a dispatcher writing plain-text events to the file at `path`,
/// appending to what is already there.
///
/// Events at `DEBUG` and above are kept unless `RUST_LOG` says otherwise.
pub(crate) fn file_dispatch(path: &Path) -> Result<Dispatch> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|err| {
            Error::connection_failed(format!("failed to open log file `{}`", path.display()), err)
        })?;

    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::DEBUG.into())
        .from_env_lossy();

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .finish();

    Ok(Dispatch::new(subscriber))
}

/// Runs `f` with `dispatch` as the default dispatcher, if there is one.
pub(crate) fn in_scope<T>(dispatch: Option<&Dispatch>, f: impl FnOnce() -> T) -> T {
    match dispatch {
        Some(dispatch) => tracing::dispatcher::with_default(dispatch, f),
        None => f(),
    }
}
