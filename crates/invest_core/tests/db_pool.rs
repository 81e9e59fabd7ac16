use invest_core::db::migrations::latest_version;
use invest_core::db::{open_db, open_db_in_memory, DbError};
use invest_core::{ConnectionPool, DbLocation};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "assets");
    assert_table_exists(&conn, "categories");
    assert_table_exists(&conn, "indicators");
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("invest.db");

    let conn_first = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_first), latest_version());
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    assert_table_exists(&conn_second, "assets");
}

#[test]
fn opening_pool_on_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = ConnectionPool::open(DbLocation::File(path), 2).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn opening_pool_in_missing_directory_fails_loudly() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("nested").join("invest.db");

    let err = ConnectionPool::open(DbLocation::File(path), 1).unwrap_err();
    assert!(matches!(err, DbError::Sqlite(_)));
}

#[test]
fn pooled_connections_return_to_the_pool_on_drop() {
    let dir = tempfile::tempdir().unwrap();
    let pool = ConnectionPool::open(DbLocation::File(dir.path().join("pool.db")), 1).unwrap();
    assert_eq!(pool.idle_count(), 1);

    {
        let first = pool.acquire().unwrap();
        assert_eq!(pool.idle_count(), 0);
        let second = pool.acquire().unwrap();
        assert_table_exists(&first, "assets");
        assert_table_exists(&second, "indicators");
    }

    // One connection parks again; the extra one above `max_idle` is closed.
    assert_eq!(pool.idle_count(), 1);
}

#[test]
fn pooled_connection_is_returned_after_a_failed_statement() {
    let pool = ConnectionPool::open_in_memory().unwrap();

    let result = {
        let conn = pool.acquire().unwrap();
        conn.execute_batch("SELECT * FROM no_such_table;")
    };

    assert!(result.is_err());
    assert_eq!(pool.idle_count(), 1);
}

#[test]
fn in_memory_pool_keeps_data_between_operations() {
    let pool = ConnectionPool::open_in_memory().unwrap();
    assert_eq!(pool.location(), &DbLocation::Memory);

    {
        let conn = pool.acquire().unwrap();
        conn.execute(
            "INSERT INTO categories (name, description) VALUES ('Tech', NULL);",
            [],
        )
        .unwrap();
    }

    let conn = pool.acquire().unwrap();
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM categories;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn separate_in_memory_pools_are_isolated() {
    let first = ConnectionPool::open_in_memory().unwrap();
    let second = ConnectionPool::open_in_memory().unwrap();

    first
        .acquire()
        .unwrap()
        .execute("INSERT INTO categories (name) VALUES ('Tech');", [])
        .unwrap();

    let count: i64 = second
        .acquire()
        .unwrap()
        .query_row("SELECT COUNT(*) FROM categories;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 0);
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
