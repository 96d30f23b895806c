use serde::{Deserialize, Serialize};

mod blob;
mod timestamp;
mod value;

pub use self::blob::{Blob, ParseBlobError};
pub use self::timestamp::{ParseTimestampError, Timestamp};
pub use self::value::{DataValue, F64};

/// The kind of a scalar value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataTypeKind {
    Bool,
    Int,
    Double,
    String,
    Timestamp,
    Blob,
}

impl DataTypeKind {
    /// Whether values of this kind can be summed and averaged.
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Int | Self::Double)
    }
}

/// Data type with nullable.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DataType {
    pub kind: DataTypeKind,
    pub nullable: bool,
}

impl std::fmt::Debug for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.kind)?;
        if self.nullable {
            write!(f, " (null)")?;
        }
        Ok(())
    }
}

impl DataType {
    pub const fn new(kind: DataTypeKind, nullable: bool) -> DataType {
        DataType { kind, nullable }
    }

    pub const fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub const fn kind(&self) -> DataTypeKind {
        self.kind
    }
}

/// The extension methods for [`DataTypeKind`].
pub trait DataTypeExt {
    fn nullable(self) -> DataType;
    fn not_null(self) -> DataType;
}

impl DataTypeExt for DataTypeKind {
    fn nullable(self) -> DataType {
        DataType::new(self, true)
    }

    fn not_null(self) -> DataType {
        DataType::new(self, false)
    }
}
