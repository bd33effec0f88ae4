use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing::Level;

use crate::errors::{Result, StickiesError};

/// Sends `tracing` events to `path`. The terminal belongs to the UI, so
/// without a path no subscriber is installed at all.
pub fn init(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| StickiesError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    let installed = tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .with_max_level(Level::DEBUG)
        .try_init();
    if installed.is_err() {
        tracing::warn!("a tracing subscriber is already installed");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_path_is_a_no_op() {
        init(None).unwrap();
    }

    #[test]
    fn unwritable_path_reports_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("x.log");
        let err = init(Some(path.as_path())).unwrap_err();
        assert_eq!(err.code(), "STK-3002");
    }
}
