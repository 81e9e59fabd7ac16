//! Asset-specific service queries.

use super::crud_service::CrudService;
use crate::model::asset::{Asset, AssetColumn};
use crate::model::RecordId;
use crate::repo::asset_repo::SqliteAssetRepository;
use crate::repo::crud::Repository;

pub type AssetService<'pool> = CrudService<Asset, SqliteAssetRepository<'pool>>;

impl<R: Repository<Asset>> CrudService<Asset, R> {
    /// Assets referencing `category_id`, whether or not the category exists.
    pub fn list_by_category(&self, category_id: RecordId) -> Vec<Asset> {
        self.list_by_equality(AssetColumn::CategoryId, category_id)
    }

    /// Assets whose type equals `kind` exactly.
    pub fn list_by_type(&self, kind: &str) -> Vec<Asset> {
        self.list_by_equality(AssetColumn::Kind, kind)
    }

    /// Assets whose name contains `needle` (case-sensitive).
    pub fn search_by_name(&self, needle: &str) -> Vec<Asset> {
        self.list_by_substring(AssetColumn::Name, needle)
    }
}
