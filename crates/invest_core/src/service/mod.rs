//! Core use-case services (the controller layer).
//!
//! # Responsibility
//! - Map repository results into records for transport callers.
//! - Absorb storage failures so callers only ever see data or no data.
//! - Shape the decision board read model from the three record lists.

pub mod asset_service;
pub mod category_service;
pub mod crud_service;
pub mod decision_service;
pub mod indicator_service;
