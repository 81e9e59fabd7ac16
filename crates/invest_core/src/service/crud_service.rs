//! Generic record service (the controller layer).
//!
//! # Responsibility
//! - Provide stable CRUD entry points for transport callers.
//! - Isolate callers from storage failures: every error is logged here and
//!   degraded to an empty list, `None`, or a no-op.
//!
//! # Invariants
//! - No `RepoError` crosses this boundary except through `lookup`, which
//!   reports it as an explicit `Lookup::StoreError` value.
//! - No state is kept between calls.

use crate::logging::EventLog;
use crate::model::{Column, FieldValue, RecordId};
use crate::repo::crud::{Entity, RepoError, RepoResult, Repository, UpdateOutcome};
use std::marker::PhantomData;

/// Distinguishable outcome of a single-record lookup.
#[derive(Debug)]
pub enum Lookup<E> {
    Found(E),
    NotFound,
    StoreError(RepoError),
}

impl<E> Lookup<E> {
    /// Collapses the outcome to `Option`, treating store errors as not found.
    pub fn into_option(self) -> Option<E> {
        match self {
            Self::Found(record) => Some(record),
            Self::NotFound | Self::StoreError(_) => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

/// Use-case service wrapper over one record kind's repository.
pub struct CrudService<E: Entity, R: Repository<E>> {
    repo: R,
    log: EventLog,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity, R: Repository<E>> CrudService<E, R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R, log: &EventLog) -> Self {
        Self {
            repo,
            log: log.child("service").child(E::TABLE),
            _entity: PhantomData,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Lists every record in store order; empty on failure.
    pub fn list(&self) -> Vec<E> {
        self.records("list", self.repo.list_all(), format_args!(""))
    }

    /// Gets one record; `None` when missing or when the store fails.
    pub fn get(&self, id: RecordId) -> Option<E> {
        self.lookup(id).into_option()
    }

    /// Gets one record, keeping "missing" and "store failed" apart.
    pub fn lookup(&self, id: RecordId) -> Lookup<E> {
        match self.repo.get_by_id(id) {
            Ok(Some(record)) => Lookup::Found(record),
            Ok(None) => Lookup::NotFound,
            Err(err) => {
                self.log.failed("get", &err, format_args!("id={id}"));
                Lookup::StoreError(err)
            }
        }
    }

    /// Inserts a record. Failures are logged and otherwise silent.
    pub fn create(&self, new: &E::New) {
        match self.repo.insert(new) {
            Ok(id) => self
                .log
                .ok("create", format_args!("{}_id={id}", E::LABEL)),
            Err(err) => self.log.failed("create", &err, format_args!("payload={new:?}")),
        }
    }

    /// Applies a partial update. A patch with no fields is a logged no-op.
    pub fn update(&self, id: RecordId, patch: &E::Patch) {
        match self.repo.update(id, patch) {
            Ok(UpdateOutcome::Updated) => self.log.ok("update", format_args!("id={id}")),
            Ok(UpdateOutcome::NotFound) => self
                .log
                .skipped("update", format_args!("id={id} reason=not_found")),
            Ok(UpdateOutcome::NoFields) => self
                .log
                .skipped("update", format_args!("id={id} reason=no_fields")),
            Err(err) => self.log.failed("update", &err, format_args!("id={id}")),
        }
    }

    /// Deletes a record. Deleting a missing id is not an error.
    pub fn delete(&self, id: RecordId) {
        match self.repo.delete(id) {
            Ok(rows) => self.log.ok("delete", format_args!("id={id} rows={rows}")),
            Err(err) => self.log.failed("delete", &err, format_args!("id={id}")),
        }
    }

    /// Exact-match filter on any column; empty on failure.
    pub fn list_by_equality(&self, column: E::Column, value: impl Into<FieldValue>) -> Vec<E> {
        let value = value.into();
        let result = self.repo.list_by_equality(column, &value);
        self.records(
            "filter_eq",
            result,
            format_args!("column={} value={value}", column.name()),
        )
    }

    /// Case-sensitive substring filter on a text column; empty on failure.
    pub fn list_by_substring(&self, column: E::Column, needle: &str) -> Vec<E> {
        let result = self.repo.list_by_substring(column, needle);
        self.records(
            "filter_substring",
            result,
            format_args!("column={} needle={needle:?}", column.name()),
        )
    }

    pub(crate) fn records(
        &self,
        event: &str,
        result: RepoResult<Vec<E>>,
        detail: std::fmt::Arguments<'_>,
    ) -> Vec<E> {
        result.unwrap_or_else(|err| {
            self.log.failed(event, &err, detail);
            Vec::new()
        })
    }
}
