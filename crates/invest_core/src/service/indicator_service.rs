//! Indicator-specific service queries.

use super::crud_service::CrudService;
use crate::model::indicator::{Indicator, IndicatorColumn};
use crate::model::RecordId;
use crate::repo::crud::Repository;
use crate::repo::indicator_repo::{IndicatorRepository, SqliteIndicatorRepository};

pub type IndicatorService<'pool> = CrudService<Indicator, SqliteIndicatorRepository<'pool>>;

impl<R: Repository<Indicator>> CrudService<Indicator, R> {
    /// Indicators attached to `asset_id`, whether or not the asset exists.
    pub fn list_by_asset(&self, asset_id: RecordId) -> Vec<Indicator> {
        self.list_by_equality(IndicatorColumn::AssetId, asset_id)
    }

    /// Indicators whose name contains `needle` (case-sensitive).
    pub fn search_by_name(&self, needle: &str) -> Vec<Indicator> {
        self.list_by_substring(IndicatorColumn::Name, needle)
    }
}

impl<R: IndicatorRepository> CrudService<Indicator, R> {
    /// Indicators with `min <= value <= max`; empty when `min > max`.
    pub fn list_by_value_range(&self, min: f64, max: f64) -> Vec<Indicator> {
        let result = self.repository().list_by_value_range(min, max);
        self.records("filter_range", result, format_args!("min={min} max={max}"))
    }
}
