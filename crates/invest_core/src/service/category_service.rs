//! Category-specific service queries.

use super::crud_service::CrudService;
use crate::model::category::{Category, CategoryColumn};
use crate::repo::category_repo::SqliteCategoryRepository;
use crate::repo::crud::Repository;

pub type CategoryService<'pool> = CrudService<Category, SqliteCategoryRepository<'pool>>;

impl<R: Repository<Category>> CrudService<Category, R> {
    /// Categories named exactly `name`.
    pub fn find_by_name(&self, name: &str) -> Vec<Category> {
        self.list_by_equality(CategoryColumn::Name, name)
    }

    /// Categories whose name contains `needle` (case-sensitive).
    pub fn search_by_name(&self, needle: &str) -> Vec<Category> {
        self.list_by_substring(CategoryColumn::Name, needle)
    }
}
