//! Indicator record model.
//!
//! # Invariants
//! - `asset_id` is stored verbatim; the asset may not exist.
//! - A provided `value` of `0.0` is a real update, like any other value.

use super::{push_provided, Column, FieldValue, RecordId};
use serde::{Deserialize, Serialize};

/// Numeric metric attached to an asset, e.g. `P/E = 15.2`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Indicator {
    pub id: RecordId,
    pub name: String,
    pub value: f64,
    pub asset_id: RecordId,
}

/// Insert payload for an indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewIndicator {
    pub name: String,
    pub value: f64,
    pub asset_id: RecordId,
}

impl NewIndicator {
    pub fn new(name: impl Into<String>, value: f64, asset_id: RecordId) -> Self {
        Self {
            name: name.into(),
            value,
            asset_id,
        }
    }

    pub(crate) fn fields(&self) -> Vec<(IndicatorColumn, FieldValue)> {
        vec![
            (IndicatorColumn::Name, self.name.as_str().into()),
            (IndicatorColumn::Value, self.value.into()),
            (IndicatorColumn::AssetId, self.asset_id.into()),
        ]
    }
}

/// Partial update for an indicator. `None` fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorPatch {
    pub name: Option<String>,
    pub value: Option<f64>,
    pub asset_id: Option<RecordId>,
}

impl IndicatorPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.value.is_none() && self.asset_id.is_none()
    }

    pub(crate) fn fields(&self) -> Vec<(IndicatorColumn, FieldValue)> {
        let mut fields = Vec::new();
        push_provided(&mut fields, IndicatorColumn::Name, self.name.as_deref());
        push_provided(&mut fields, IndicatorColumn::Value, self.value);
        push_provided(&mut fields, IndicatorColumn::AssetId, self.asset_id);
        fields
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorColumn {
    Name,
    Value,
    AssetId,
}

impl Column for IndicatorColumn {
    const ALL: &'static [Self] = &[Self::Name, Self::Value, Self::AssetId];

    fn name(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Value => "value",
            Self::AssetId => "asset_id",
        }
    }

    fn is_text(self) -> bool {
        matches!(self, Self::Name)
    }
}
