//! CSV input and output.
//!
//! A data directory holds `messages.csv`, `products.csv` and
//! `recommendations_history.csv`. Columns are matched by header name;
//! extra columns are ignored.

use std::path::{Path, PathBuf};

use pw_protocol::{BatchRecord, Message, Product, RecommendationRow};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors reading or writing CSV files.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{}: bad record: {source}", path.display())]
    Record {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("cannot flush {}: {source}", path.display())]
    Flush {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience alias for data results.
pub type DataResult<T> = Result<T, DataError>;

/// Well-known files under a data directory.
#[derive(Debug, Clone)]
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn messages_path(&self) -> PathBuf {
        self.root.join("messages.csv")
    }

    pub fn products_path(&self) -> PathBuf {
        self.root.join("products.csv")
    }

    pub fn history_path(&self) -> PathBuf {
        self.root.join("recommendations_history.csv")
    }

    pub fn messages(&self) -> DataResult<Vec<Message>> {
        read_records(&self.messages_path())
    }

    /// Catalog in file order.
    pub fn products(&self) -> DataResult<Vec<Product>> {
        read_records(&self.products_path())
    }

    /// Historical recommendations, the analyzer's baseline.
    pub fn history(&self) -> DataResult<Vec<RecommendationRow>> {
        read_records(&self.history_path())
    }
}

/// Deserialize every row of a headed CSV file.
pub fn read_records<T: DeserializeOwned>(path: &Path) -> DataResult<Vec<T>> {
    let mut reader = csv::Reader::from_path(path).map_err(|source| DataError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let records = reader
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(|source| DataError::Record {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::debug!(path = %path.display(), rows = records.len(), "csv loaded");
    Ok(records)
}

/// Recommendation rows from any recommendations file.
pub fn read_recommendations(path: &Path) -> DataResult<Vec<RecommendationRow>> {
    read_records(path)
}

/// Write rows with a header line, overwriting `path`.
pub fn write_records<T: Serialize>(path: &Path, rows: &[T]) -> DataResult<()> {
    let write_err = |source| DataError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::Writer::from_path(path).map_err(write_err)?;
    for row in rows {
        writer.serialize(row).map_err(write_err)?;
    }
    writer.flush().map_err(|source| DataError::Flush {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path.display(), rows = rows.len(), "csv written");
    Ok(())
}

/// Write batch output. Empty recommendation slots become empty cells.
pub fn write_batch(path: &Path, records: &[BatchRecord]) -> DataResult<()> {
    write_records(path, records)
}
