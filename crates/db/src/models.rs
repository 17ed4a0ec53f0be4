//! Positional value model for query results.
//!
//! These are *wire* values — they carry no domain meaning. Typed decoding
//! (e.g. "first column is a device id") happens in the `commands` crate.

/// One cell of a result row.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// 64-bit signed integer column.
    Long(i64),
    /// Text column.
    Text(String),
    /// SQL NULL, or a column type this layer does not decode.
    Null,
}

impl Value {
    /// The cell as an `i64`, if it is one.
    pub fn as_long(&self) -> Option<i64> {
        match self {
            Self::Long(v) => Some(*v),
            _ => None,
        }
    }

    /// The cell as text, if it is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Long(v) => write!(f, "{v}"),
            Self::Text(s) => write!(f, "{s}"),
            Self::Null => write!(f, "NULL"),
        }
    }
}

/// One result row: cells in column order.
///
/// A query result is `Vec<Row>`, ordered as the store returned it.
/// An empty result is a valid outcome, not an error.
pub type Row = Vec<Value>;
