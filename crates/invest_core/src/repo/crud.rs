//! Generic single-table CRUD repository.
//!
//! # Responsibility
//! - Describe a record kind once (`Entity`) and derive every SQL statement
//!   from that description.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Rows are mapped by column name, never by position.
//! - Only provided patch fields appear in an `UPDATE .. SET` clause; a patch
//!   with no fields sends no statement at all.
//! - Writes run inside a transaction on a pooled connection; dropping the
//!   transaction on any error path rolls it back.
//! - Reads carry no ORDER BY; callers must not rely on row order.

use crate::db::{ConnectionPool, DbError};
use crate::logging::EventLog;
use crate::model::{Column, FieldValue, RecordId};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, Row, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::marker::PhantomData;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for record persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    MissingRequiredTable(&'static str),
    UnsupportedFilter {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::UnsupportedFilter { table, column } => write!(
                f,
                "substring filter is not supported on non-text column `{table}.{column}`"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::MissingRequiredTable(_) | Self::UnsupportedFilter { .. } => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Result of a partial update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The row exists and the provided fields were written.
    Updated,
    /// No row has the requested id; nothing was written.
    NotFound,
    /// The patch provided no fields; no statement was sent.
    NoFields,
}

/// Storage description of one record kind.
pub trait Entity: Sized {
    type Column: Column;
    type New: Debug;
    type Patch: Debug;

    /// Table holding this record kind.
    const TABLE: &'static str;
    /// Human-readable singular name, e.g. `asset`.
    const LABEL: &'static str;

    fn id(&self) -> RecordId;
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;
    fn insert_fields(new: &Self::New) -> Vec<(Self::Column, FieldValue)>;
    fn patch_fields(patch: &Self::Patch) -> Vec<(Self::Column, FieldValue)>;
}

/// Repository interface shared by every record kind.
pub trait Repository<E: Entity> {
    fn list_all(&self) -> RepoResult<Vec<E>>;
    fn get_by_id(&self, id: RecordId) -> RepoResult<Option<E>>;
    fn insert(&self, new: &E::New) -> RepoResult<RecordId>;
    fn update(&self, id: RecordId, patch: &E::Patch) -> RepoResult<UpdateOutcome>;
    /// Returns the number of deleted rows; zero for a missing id.
    fn delete(&self, id: RecordId) -> RepoResult<usize>;
    fn list_by_equality(&self, column: E::Column, value: &FieldValue) -> RepoResult<Vec<E>>;
    /// Case-sensitive contiguous substring match on a text column.
    fn list_by_substring(&self, column: E::Column, needle: &str) -> RepoResult<Vec<E>>;
}

/// SQLite-backed repository for any `Entity`.
pub struct SqliteRepository<'pool, E: Entity> {
    pool: &'pool ConnectionPool,
    log: EventLog,
    select_sql: String,
    _entity: PhantomData<fn() -> E>,
}

impl<'pool, E: Entity> SqliteRepository<'pool, E> {
    /// Constructs a repository over a migrated pool.
    ///
    /// # Errors
    /// - Returns `MissingRequiredTable` when the entity table is absent.
    /// - Returns `Db` when no connection can be acquired.
    pub fn try_new(pool: &'pool ConnectionPool, log: &EventLog) -> RepoResult<Self> {
        let conn = pool.acquire()?;
        if !table_exists(&conn, E::TABLE)? {
            return Err(RepoError::MissingRequiredTable(E::TABLE));
        }

        let columns = E::Column::ALL
            .iter()
            .map(|column| column.name())
            .collect::<Vec<_>>();
        Ok(Self {
            pool,
            log: log.child("repo").child(E::TABLE),
            select_sql: format!("SELECT id, {} FROM {}", columns.join(", "), E::TABLE),
            _entity: PhantomData,
        })
    }

    pub(crate) fn query_where(
        &self,
        event: &str,
        clause: Option<&str>,
        values: &[Value],
    ) -> RepoResult<Vec<E>> {
        let sql = match clause {
            Some(clause) => format!("{} WHERE {clause};", self.select_sql),
            None => format!("{};", self.select_sql),
        };

        let conn = self.pool.acquire()?;
        let mut stmt = conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(values.iter()))?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(E::from_row(row)?);
        }

        self.log.ok(event, format_args!("rows={}", records.len()));
        Ok(records)
    }

    fn execute_in_tx(&self, sql: &str, values: &[Value]) -> RepoResult<(usize, RecordId)> {
        let conn = self.pool.acquire()?;
        let tx = Transaction::new_unchecked(&conn, TransactionBehavior::Immediate)?;
        let changed = tx.execute(sql, params_from_iter(values.iter()))?;
        let rowid = tx.last_insert_rowid();
        tx.commit()?;
        Ok((changed, rowid))
    }
}

impl<E: Entity> Repository<E> for SqliteRepository<'_, E> {
    fn list_all(&self) -> RepoResult<Vec<E>> {
        self.query_where("list", None, &[])
    }

    fn get_by_id(&self, id: RecordId) -> RepoResult<Option<E>> {
        let found = self
            .query_where("get", Some("id = ?1"), &[Value::Integer(id)])?
            .into_iter()
            .next();
        if found.is_none() {
            self.log.skipped("get", format_args!("id={id} reason=not_found"));
        }
        Ok(found)
    }

    fn insert(&self, new: &E::New) -> RepoResult<RecordId> {
        let fields = E::insert_fields(new);
        let columns = fields
            .iter()
            .map(|(column, _)| column.name())
            .collect::<Vec<_>>();
        let placeholders = (1..=fields.len())
            .map(|index| format!("?{index}"))
            .collect::<Vec<_>>();
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({});",
            E::TABLE,
            columns.join(", "),
            placeholders.join(", ")
        );
        let values = fields
            .into_iter()
            .map(|(_, value)| to_sql_value(value))
            .collect::<Vec<_>>();

        let (_, id) = self.execute_in_tx(&sql, &values)?;
        self.log.ok("insert", format_args!("id={id}"));
        Ok(id)
    }

    fn update(&self, id: RecordId, patch: &E::Patch) -> RepoResult<UpdateOutcome> {
        let fields = E::patch_fields(patch);
        if fields.is_empty() {
            self.log
                .skipped("update", format_args!("id={id} reason=no_fields"));
            return Ok(UpdateOutcome::NoFields);
        }

        let assignments = fields
            .iter()
            .enumerate()
            .map(|(index, (column, _))| format!("{} = ?{}", column.name(), index + 1))
            .collect::<Vec<_>>();
        let sql = format!(
            "UPDATE {} SET {} WHERE id = ?{};",
            E::TABLE,
            assignments.join(", "),
            fields.len() + 1
        );
        let columns = fields
            .iter()
            .map(|(column, _)| column.name())
            .collect::<Vec<_>>()
            .join(",");
        let mut values = fields
            .into_iter()
            .map(|(_, value)| to_sql_value(value))
            .collect::<Vec<_>>();
        values.push(Value::Integer(id));

        let (changed, _) = self.execute_in_tx(&sql, &values)?;
        if changed == 0 {
            self.log
                .skipped("update", format_args!("id={id} reason=not_found"));
            return Ok(UpdateOutcome::NotFound);
        }

        self.log
            .ok("update", format_args!("id={id} columns={columns}"));
        Ok(UpdateOutcome::Updated)
    }

    fn delete(&self, id: RecordId) -> RepoResult<usize> {
        let sql = format!("DELETE FROM {} WHERE id = ?1;", E::TABLE);
        let (changed, _) = self.execute_in_tx(&sql, &[Value::Integer(id)])?;
        self.log
            .ok("delete", format_args!("id={id} rows={changed}"));
        Ok(changed)
    }

    fn list_by_equality(&self, column: E::Column, value: &FieldValue) -> RepoResult<Vec<E>> {
        let clause = format!("{} = ?1", column.name());
        self.query_where("filter_eq", Some(&clause), &[to_sql_value(value.clone())])
    }

    fn list_by_substring(&self, column: E::Column, needle: &str) -> RepoResult<Vec<E>> {
        if !column.is_text() {
            return Err(RepoError::UnsupportedFilter {
                table: E::TABLE,
                column: column.name(),
            });
        }

        // `LIKE` folds ASCII case in SQLite; `instr` compares bytes exactly.
        let clause = format!("instr({}, ?1) > 0", column.name());
        self.query_where(
            "filter_substring",
            Some(&clause),
            &[Value::Text(needle.to_string())],
        )
    }
}

pub(crate) fn to_sql_value(value: FieldValue) -> Value {
    match value {
        FieldValue::Integer(value) => Value::Integer(value),
        FieldValue::Real(value) => Value::Real(value),
        FieldValue::Text(value) => Value::Text(value),
    }
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
