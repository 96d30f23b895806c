use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Binary large object.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Serialize, Deserialize)]
pub struct Blob(Vec<u8>);

impl Blob {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<&[u8]> for Blob {
    fn from(bytes: &[u8]) -> Self {
        Blob(bytes.into())
    }
}

impl From<Vec<u8>> for Blob {
    fn from(vec: Vec<u8>) -> Self {
        Blob(vec)
    }
}

/// An error which can be returned when parsing a blob.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("parse blob error")]
pub enum ParseBlobError {
    Int(#[from] std::num::ParseIntError),
    Length,
}

impl FromStr for Blob {
    type Err = ParseBlobError;

    /// Parses a `\x`-prefixed hex string, or takes the raw bytes otherwise.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(mut s) = s.strip_prefix("\\x") {
            let mut v = Vec::with_capacity(s.len() / 2);
            while !s.is_empty() {
                if s.len() < 2 {
                    return Err(ParseBlobError::Length);
                }
                v.push(u8::from_str_radix(&s[..2], 16)?);
                s = &s[2..];
            }
            Ok(Blob(v))
        } else {
            Ok(Blob(s.as_bytes().into()))
        }
    }
}

impl fmt::Debug for Blob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

impl fmt::Display for Blob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "\\x{byte:02x}")?;
        }
        Ok(())
    }
}
