//! Core domain logic for the Invest+ asset tracker.
//! This crate is the single source of truth for record storage and the
//! failure-isolation contract transport layers rely on.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{Config, ConfigError};
pub use db::{ConnectionPool, DbError, DbLocation, PooledConnection};
pub use logging::{default_log_level, init_logging, logging_status, EventLog, LogSink};
pub use model::asset::{Asset, AssetColumn, AssetPatch, NewAsset};
pub use model::category::{Category, CategoryColumn, CategoryPatch, NewCategory};
pub use model::indicator::{Indicator, IndicatorColumn, IndicatorPatch, NewIndicator};
pub use model::{Column, FieldValue, RecordId};
pub use repo::asset_repo::SqliteAssetRepository;
pub use repo::category_repo::SqliteCategoryRepository;
pub use repo::crud::{Entity, RepoError, RepoResult, Repository, SqliteRepository, UpdateOutcome};
pub use repo::indicator_repo::{IndicatorRepository, SqliteIndicatorRepository};
pub use service::asset_service::AssetService;
pub use service::category_service::CategoryService;
pub use service::crud_service::{CrudService, Lookup};
pub use service::decision_service::{
    build_decision_board, load_decision_board, AssetRow, ChartBar, DecisionBoard, DecisionFilter,
    IndicatorChart, IndicatorRow,
};
pub use service::indicator_service::IndicatorService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
