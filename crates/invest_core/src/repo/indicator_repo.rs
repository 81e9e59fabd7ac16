//! Storage mapping for `indicators`, plus the value-range query only
//! indicators support.

use super::crud::{Entity, RepoResult, Repository, SqliteRepository};
use crate::model::indicator::{Indicator, IndicatorColumn, IndicatorPatch, NewIndicator};
use crate::model::{FieldValue, RecordId};
use rusqlite::types::Value;
use rusqlite::Row;

pub type SqliteIndicatorRepository<'pool> = SqliteRepository<'pool, Indicator>;

/// Indicator repository: the generic contract plus numeric range filtering.
pub trait IndicatorRepository: Repository<Indicator> {
    /// Rows with `min <= value <= max`; empty when `min > max`.
    fn list_by_value_range(&self, min: f64, max: f64) -> RepoResult<Vec<Indicator>>;
}

impl Entity for Indicator {
    type Column = IndicatorColumn;
    type New = NewIndicator;
    type Patch = IndicatorPatch;

    const TABLE: &'static str = "indicators";
    const LABEL: &'static str = "indicator";

    fn id(&self) -> RecordId {
        self.id
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            value: row.get("value")?,
            asset_id: row.get("asset_id")?,
        })
    }

    fn insert_fields(new: &NewIndicator) -> Vec<(IndicatorColumn, FieldValue)> {
        new.fields()
    }

    fn patch_fields(patch: &IndicatorPatch) -> Vec<(IndicatorColumn, FieldValue)> {
        patch.fields()
    }
}

impl IndicatorRepository for SqliteRepository<'_, Indicator> {
    fn list_by_value_range(&self, min: f64, max: f64) -> RepoResult<Vec<Indicator>> {
        self.query_where(
            "filter_range",
            Some("value BETWEEN ?1 AND ?2"),
            &[Value::Real(min), Value::Real(max)],
        )
    }
}
