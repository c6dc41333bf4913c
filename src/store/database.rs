//! SQLite-backed digest store.

use std::path::{Path, PathBuf};

use rusqlite::{Connection, Row, ToSql};
use thiserror::Error;

use super::record::{FileRecord, MismatchRecord};

/// Both tables: five TEXT columns, no keys, no constraints.
const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS file_hashes (
        file_path TEXT,
        image_1_md5 TEXT, image_1_sha1 TEXT,
        image_2_md5 TEXT, image_2_sha1 TEXT);

    CREATE TABLE IF NOT EXISTS mismatched_hashes (
        file_path TEXT,
        image_1_md5 TEXT, image_1_sha1 TEXT,
        image_2_md5 TEXT, image_2_sha1 TEXT);
";

const INSERT_FILE_HASH: &str = "INSERT INTO file_hashes (
        file_path, image_1_md5, image_1_sha1,
        image_2_md5, image_2_sha1) VALUES (?1, ?2, ?3, ?4, ?5)";

// `IS NOT` rather than `!=` so a NULL digest compares like a value:
// NULL vs NULL is equal, NULL vs text is unequal.
const EXTRACT_MISMATCHES: &str = "INSERT INTO mismatched_hashes (
        file_path, image_1_md5, image_1_sha1,
        image_2_md5, image_2_sha1)
    SELECT file_path, image_1_md5, image_1_sha1, image_2_md5, image_2_sha1
    FROM file_hashes
    WHERE image_1_md5 IS NOT image_2_md5
       OR image_1_sha1 IS NOT image_2_sha1
    ORDER BY rowid";

/// Errors raised by the digest store. None of these are recovered locally.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The database file could not be opened or created.
    #[error("Failed to open hash store at {path}: {source}")]
    Open {
        /// Store location
        path: PathBuf,
        /// Underlying SQLite error
        #[source]
        source: rusqlite::Error,
    },

    /// A statement against an open store failed.
    #[error("Hash store {operation} failed: {source}")]
    Query {
        /// What was being attempted
        operation: &'static str,
        /// Underlying SQLite error
        #[source]
        source: rusqlite::Error,
    },
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

fn query_err(operation: &'static str) -> impl FnOnce(rusqlite::Error) -> StoreError {
    move |source| StoreError::Query { operation, source }
}

/// Handle to the `file_hashes` / `mismatched_hashes` store.
///
/// The connection stays open for the lifetime of the handle and is closed
/// when it is dropped.
pub struct HashStore {
    conn: Connection,
    path: Option<PathBuf>,
}

impl HashStore {
    /// Open or create the store at `path` and ensure both tables exist.
    ///
    /// Existing tables and their rows are left untouched. The parent
    /// directory is not created.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Open`] if the file cannot be opened or is not a
    /// usable SQLite database.
    pub fn open(path: &Path) -> StoreResult<Self> {
        let open_err = |source| StoreError::Open {
            path: path.to_path_buf(),
            source,
        };
        let conn = Connection::open(path).map_err(open_err)?;
        conn.execute_batch(SCHEMA).map_err(open_err)?;
        log::debug!("Opened hash store at {}", path.display());

        Ok(Self {
            conn,
            path: Some(path.to_path_buf()),
        })
    }

    /// Create a throwaway store in memory.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if SQLite cannot allocate the database.
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory().map_err(|source| StoreError::Open {
            path: PathBuf::from(":memory:"),
            source,
        })?;
        conn.execute_batch(SCHEMA)
            .map_err(query_err("schema creation"))?;
        Ok(Self { conn, path: None })
    }

    /// Location of the store on disk, if it is file-backed.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Append one row to `file_hashes`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Query`] if the insert fails.
    pub fn insert_record(&self, record: &FileRecord) -> StoreResult<()> {
        self.conn
            .execute(INSERT_FILE_HASH, record_params(record))
            .map_err(query_err("insert"))?;
        Ok(())
    }

    /// Append rows to `file_hashes` in a single transaction.
    ///
    /// Either every row is committed or none is.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Query`] if any insert or the commit fails.
    pub fn insert_records(&mut self, records: &[FileRecord]) -> StoreResult<usize> {
        let tx = self
            .conn
            .transaction()
            .map_err(query_err("begin transaction"))?;
        {
            let mut stmt = tx
                .prepare_cached(INSERT_FILE_HASH)
                .map_err(query_err("prepare insert"))?;
            for record in records {
                stmt.execute(record_params(record))
                    .map_err(query_err("insert"))?;
            }
        }
        tx.commit().map_err(query_err("commit"))?;
        log::debug!("Inserted {} rows into file_hashes", records.len());
        Ok(records.len())
    }

    /// Copy every `file_hashes` row whose digest pairs differ into
    /// `mismatched_hashes`, unchanged.
    ///
    /// Rows already in `mismatched_hashes` are kept, so running this twice
    /// over the same data appends the mismatches twice. See
    /// [`clear_mismatches`](Self::clear_mismatches).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Query`] if the copy or commit fails.
    pub fn extract_mismatches(&mut self) -> StoreResult<usize> {
        let tx = self
            .conn
            .transaction()
            .map_err(query_err("begin transaction"))?;
        let copied = tx
            .execute(EXTRACT_MISMATCHES, [])
            .map_err(query_err("mismatch extraction"))?;
        tx.commit().map_err(query_err("commit"))?;
        log::debug!("Copied {} rows into mismatched_hashes", copied);
        Ok(copied)
    }

    /// Delete every row from `mismatched_hashes`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Query`] if the delete fails.
    pub fn clear_mismatches(&self) -> StoreResult<usize> {
        let removed = self
            .conn
            .execute("DELETE FROM mismatched_hashes", [])
            .map_err(query_err("clear mismatches"))?;
        log::debug!("Removed {} rows from mismatched_hashes", removed);
        Ok(removed)
    }

    /// All `file_hashes` rows in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Query`] if the read fails.
    pub fn file_records(&self) -> StoreResult<Vec<FileRecord>> {
        self.read_table("file_hashes")
    }

    /// All `mismatched_hashes` rows in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Query`] if the read fails.
    pub fn mismatch_records(&self) -> StoreResult<Vec<MismatchRecord>> {
        self.read_table("mismatched_hashes")
    }

    fn read_table(&self, table: &'static str) -> StoreResult<Vec<FileRecord>> {
        let sql = format!(
            "SELECT file_path, image_1_md5, image_1_sha1, image_2_md5, image_2_sha1 \
             FROM {table} ORDER BY rowid"
        );
        let mut stmt = self.conn.prepare(&sql).map_err(query_err("read"))?;
        let rows = stmt
            .query_map([], row_to_record)
            .map_err(query_err("read"))?;
        rows.collect::<Result<Vec<_>, _>>()
            .map_err(query_err("read"))
    }
}

fn record_params(record: &FileRecord) -> [&dyn ToSql; 5] {
    [
        &record.file_path,
        &record.image_1_md5,
        &record.image_1_sha1,
        &record.image_2_md5,
        &record.image_2_sha1,
    ]
}

fn row_to_record(row: &Row<'_>) -> rusqlite::Result<FileRecord> {
    Ok(FileRecord {
        file_path: row.get(0)?,
        image_1_md5: row.get(1)?,
        image_1_sha1: row.get(2)?,
        image_2_md5: row.get(3)?,
        image_2_sha1: row.get(4)?,
    })
}
