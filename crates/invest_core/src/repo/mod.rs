//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the single-table CRUD contract every record kind shares.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository APIs return typed errors; deciding how to degrade them is
//!   the service layer's job.
//! - A missing row is `Ok(None)` / `UpdateOutcome::NotFound` / zero deleted
//!   rows, never an error.

pub mod asset_repo;
pub mod category_repo;
pub mod crud;
pub mod indicator_repo;
