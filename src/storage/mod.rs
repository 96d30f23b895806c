//! In-memory row storage.
//!
//! The storage model is deliberately small: a [`Table`] is an
//! identity-keyed association from [`RowId`] to [`Row`] with bulk
//! `get`/`put`/`remove`, and [`InMemoryStorage`] is the registry that
//! creates one per table in the catalog. Any implementation honoring the
//! [`Table`] contract may back the engine.

use async_trait::async_trait;

mod memory;
mod row;

pub use self::memory::{InMemoryStorage, InMemoryTable};
pub use self::row::{Row, RowId, Tuple, TupleEntry};

/// The error type of storage operations. Always fatal to the running query.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("{0} not found: {1}")]
    NotFound(&'static str, String),
    #[error("duplicated {0}: {1}")]
    Duplicated(&'static str, String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// A table of rows, keyed by identity.
///
/// Operations may suspend; they are the only suspension points of the
/// engine. Reads materialise a snapshot before yielding, writes apply
/// atomically per call.
#[async_trait]
pub trait Table: Send + Sync {
    /// Returns the rows with the given ids, silently skipping absent ones.
    /// An empty `ids` returns a snapshot of all rows. Order is unspecified.
    async fn get(&self, ids: &[RowId]) -> StorageResult<Vec<Row>>;

    /// Upserts each row by its identity, overwriting existing rows.
    /// Atomic per call.
    async fn put(&self, rows: Vec<Row>) -> StorageResult<()>;

    /// Removes the listed ids, skipping absent ones. An empty `ids`, or a
    /// list as long as the current row count, clears the table.
    async fn remove(&self, ids: &[RowId]) -> StorageResult<()>;

    /// The number of rows currently stored.
    async fn row_count(&self) -> StorageResult<usize>;
}
