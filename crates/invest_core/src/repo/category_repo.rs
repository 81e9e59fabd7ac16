//! Storage mapping for `categories`.

use super::crud::{Entity, SqliteRepository};
use crate::model::category::{Category, CategoryColumn, CategoryPatch, NewCategory};
use crate::model::{FieldValue, RecordId};
use rusqlite::Row;

pub type SqliteCategoryRepository<'pool> = SqliteRepository<'pool, Category>;

impl Entity for Category {
    type Column = CategoryColumn;
    type New = NewCategory;
    type Patch = CategoryPatch;

    const TABLE: &'static str = "categories";
    const LABEL: &'static str = "category";

    fn id(&self) -> RecordId {
        self.id
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            description: row.get("description")?,
        })
    }

    fn insert_fields(new: &NewCategory) -> Vec<(CategoryColumn, FieldValue)> {
        new.fields()
    }

    fn patch_fields(patch: &CategoryPatch) -> Vec<(CategoryColumn, FieldValue)> {
        patch.fields()
    }
}
