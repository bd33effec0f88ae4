//! Error types shared by the store and the controllers.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StickiesError>;

#[derive(Debug, Error)]
pub enum StickiesError {
    #[error("[STK-2101] serialization failure in {context}: {source}")]
    Serialization {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("[STK-2102] SQL failure in {context}: {source}")]
    Sql {
        context: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    #[error("[STK-3002] IO failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StickiesError {
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Serialization { .. } => "STK-2101",
            Self::Sql { .. } => "STK-2102",
            Self::Io { .. } => "STK-3002",
        }
    }

    pub(crate) fn sql(context: &'static str) -> impl FnOnce(rusqlite::Error) -> Self {
        move |source| Self::Sql { context, source }
    }

    pub(crate) fn serialization(context: &'static str) -> impl FnOnce(serde_json::Error) -> Self {
        move |source| Self::Serialization { context, source }
    }
}
