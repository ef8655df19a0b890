use rusqlite::Connection;
use studynote_core::db::migrations::{latest_version, KV_TABLE};
use studynote_core::db::{open_db, open_db_in_memory, DbError};
use studynote_core::{KeyValueRepository, RepoError, SqliteKeyValueRepository};

#[test]
fn open_db_in_memory_creates_kv_table() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, KV_TABLE);
}

#[test]
fn reopening_file_database_keeps_schema_and_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("studynote.sqlite3");

    let mut repo = SqliteKeyValueRepository::try_new(open_db(&path).unwrap()).unwrap();
    repo.put("notes", "[]").unwrap();
    drop(repo);

    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn), latest_version());
    let repo = SqliteKeyValueRepository::try_new(conn).unwrap();
    assert_eq!(repo.get("notes").unwrap().as_deref(), Some("[]"));
}

#[test]
fn newer_schema_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match &err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(*db_version, 999);
            assert_eq!(*latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
    let message = err.to_string();
    assert!(message.contains("key-value schema v999"), "{message}");
    assert!(message.contains(&format!("up to v{}", latest_version())), "{message}");
}

#[test]
fn sqlite_failures_name_the_notes_database() {
    let dir = tempfile::tempdir().unwrap();
    let err = open_db(dir.path().join("missing").join("notes.sqlite3")).unwrap_err();

    assert!(matches!(err, DbError::Sqlite(_)));
    assert!(err.to_string().starts_with("notes database error: "));
}

#[test]
fn repository_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();
    let err = SqliteKeyValueRepository::try_new(conn)
        .err()
        .expect("bare connection must be rejected");
    assert!(matches!(err, RepoError::MissingRequiredTable("kv_entries")));
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
