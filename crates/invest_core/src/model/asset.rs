//! Asset record model.
//!
//! # Invariants
//! - `kind` is free text ("stock", "bond", ...) and serializes as `type`.
//! - `category_id` is stored verbatim; the category may not exist.

use super::{push_provided, Column, FieldValue, RecordId};
use serde::{Deserialize, Serialize};

/// A tracked asset, e.g. a listed company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub id: RecordId,
    pub name: String,
    /// Serialized as `type` to match external schema naming.
    #[serde(rename = "type")]
    pub kind: String,
    pub category_id: RecordId,
}

/// Insert payload for an asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAsset {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub category_id: RecordId,
}

impl NewAsset {
    pub fn new(name: impl Into<String>, kind: impl Into<String>, category_id: RecordId) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            category_id,
        }
    }

    pub(crate) fn fields(&self) -> Vec<(AssetColumn, FieldValue)> {
        vec![
            (AssetColumn::Name, self.name.as_str().into()),
            (AssetColumn::Kind, self.kind.as_str().into()),
            (AssetColumn::CategoryId, self.category_id.into()),
        ]
    }
}

/// Partial update for an asset. `None` fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetPatch {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub category_id: Option<RecordId>,
}

impl AssetPatch {
    pub fn is_empty(&self) -> bool {
        self.fields().is_empty()
    }

    pub(crate) fn fields(&self) -> Vec<(AssetColumn, FieldValue)> {
        let mut fields = Vec::new();
        push_provided(&mut fields, AssetColumn::Name, self.name.as_deref());
        push_provided(&mut fields, AssetColumn::Kind, self.kind.as_deref());
        push_provided(&mut fields, AssetColumn::CategoryId, self.category_id);
        fields
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetColumn {
    Name,
    Kind,
    CategoryId,
}

impl Column for AssetColumn {
    const ALL: &'static [Self] = &[Self::Name, Self::Kind, Self::CategoryId];

    fn name(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Kind => "type",
            Self::CategoryId => "category_id",
        }
    }

    fn is_text(self) -> bool {
        matches!(self, Self::Name | Self::Kind)
    }
}

#[cfg(test)]
mod tests {
    use super::{AssetColumn, AssetPatch};
    use crate::model::FieldValue;

    #[test]
    fn patch_keeps_provided_empty_and_zero_values() {
        let patch = AssetPatch {
            name: Some(String::new()),
            kind: None,
            category_id: Some(0),
        };
        assert_eq!(
            patch.fields(),
            vec![
                (AssetColumn::Name, FieldValue::Text(String::new())),
                (AssetColumn::CategoryId, FieldValue::Integer(0)),
            ]
        );
        assert!(AssetPatch::default().is_empty());
    }
}
