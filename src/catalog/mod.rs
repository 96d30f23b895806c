use std::sync::Arc;

pub use self::column::{ColumnCatalog, ColumnDesc};
pub use self::root::RootCatalog;
pub use self::table::{Reference, TableCatalog};

mod column;
mod root;
mod table;

pub type TableId = u32;
pub type ColumnId = u32;

pub type RootCatalogRef = Arc<RootCatalog>;
pub type TableCatalogRef = Arc<TableCatalog>;

/// The error type of catalog operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("{0} not found: {1}")]
    NotFound(&'static str, String),
    #[error("duplicated {0}: {1}")]
    Duplicated(&'static str, String),
}
