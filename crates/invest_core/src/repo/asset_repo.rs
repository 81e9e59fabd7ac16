//! Storage mapping for `assets`.

use super::crud::{Entity, SqliteRepository};
use crate::model::asset::{Asset, AssetColumn, AssetPatch, NewAsset};
use crate::model::{FieldValue, RecordId};
use rusqlite::Row;

pub type SqliteAssetRepository<'pool> = SqliteRepository<'pool, Asset>;

impl Entity for Asset {
    type Column = AssetColumn;
    type New = NewAsset;
    type Patch = AssetPatch;

    const TABLE: &'static str = "assets";
    const LABEL: &'static str = "asset";

    fn id(&self) -> RecordId {
        self.id
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            kind: row.get("type")?,
            category_id: row.get("category_id")?,
        })
    }

    fn insert_fields(new: &NewAsset) -> Vec<(AssetColumn, FieldValue)> {
        new.fields()
    }

    fn patch_fields(patch: &AssetPatch) -> Vec<(AssetColumn, FieldValue)> {
        patch.fields()
    }
}
