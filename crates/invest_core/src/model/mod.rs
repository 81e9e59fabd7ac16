//! Domain records for assets, their categories, and their indicators.
//!
//! # Responsibility
//! - Define the records returned to callers and the payloads accepted for
//!   inserts and partial updates.
//! - Name the updatable columns of each record kind.
//!
//! # Invariants
//! - Every record is identified by a store-assigned `RecordId`.
//! - `category_id`/`asset_id` are loose references that may dangle.
//! - Patch fields set to `None` are never written.

pub mod asset;
pub mod category;
pub mod indicator;

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Store-assigned identifier shared by all record kinds.
pub type RecordId = i64;

/// Column value used in inserts, updates, and equality filters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(i64),
    Real(f64),
    Text(String),
}

impl Display for FieldValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Real(value) => write!(f, "{value}"),
            Self::Text(value) => write!(f, "{value:?}"),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Named, non-id column of a record kind.
pub trait Column: Copy + Eq + std::fmt::Debug + 'static {
    /// Every column in storage order.
    const ALL: &'static [Self];

    /// SQL column name.
    fn name(self) -> &'static str;

    /// Whether the column stores text (and so accepts substring filters).
    fn is_text(self) -> bool;
}

/// Appends `(column, value)` to `fields` when the patch provided a value.
pub(crate) fn push_provided<C, V>(fields: &mut Vec<(C, FieldValue)>, column: C, value: Option<V>)
where
    V: Into<FieldValue>,
{
    if let Some(value) = value {
        fields.push((column, value.into()));
    }
}
