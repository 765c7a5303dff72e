use rusqlite::{params, Connection, OptionalExtension};

use crate::error::TasklistError;
use crate::persist::BlobStore;

/// Blob store backed by the `blobs` table.
pub struct SqliteBlobStore {
    conn: Connection,
}

impl SqliteBlobStore {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Take the database write lock before anything is read, so a whole
    /// load-modify-save cycle runs as one transaction. The lock is released
    /// by [`BlobStore::flush`]; dropping the store without flushing rolls
    /// the transaction back.
    pub fn locked(conn: Connection) -> Result<Self, TasklistError> {
        conn.execute_batch("BEGIN IMMEDIATE")?;
        Ok(Self { conn })
    }
}

impl BlobStore for SqliteBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>, TasklistError> {
        let value = self
            .conn
            .query_row("SELECT value FROM blobs WHERE key = ?1", params![key], |row| row.get(0))
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), TasklistError> {
        self.conn.execute(
            "INSERT INTO blobs (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = datetime('now')",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), TasklistError> {
        self.conn.execute("DELETE FROM blobs WHERE key = ?1", params![key])?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), TasklistError> {
        if !self.conn.is_autocommit() {
            self.conn.execute_batch("COMMIT")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{connection, migrations};
    use tempfile::TempDir;

    fn store() -> SqliteBlobStore {
        let conn = Connection::open_in_memory().unwrap();
        migrations::run_migrations(&conn).unwrap();
        SqliteBlobStore::new(conn)
    }

    #[test]
    fn test_set_get_overwrite_remove() {
        let mut s = store();
        assert_eq!(s.get("tasks").unwrap(), None);
        s.set("tasks", "[]").unwrap();
        s.set("tasks", "[1]").unwrap();
        assert_eq!(s.get("tasks").unwrap().as_deref(), Some("[1]"));
        s.remove("tasks").unwrap();
        assert_eq!(s.get("tasks").unwrap(), None);
    }

    #[test]
    fn test_missing_table_is_an_error() {
        let s = SqliteBlobStore::new(Connection::open_in_memory().unwrap());
        assert!(s.get("tasks").is_err());
    }

    #[test]
    fn test_locked_store_commits_on_flush() {
        let dir = TempDir::new().unwrap();
        connection::init_db(dir.path()).unwrap();
        let mut s = SqliteBlobStore::locked(connection::open_db(dir.path()).unwrap()).unwrap();
        s.set("tasks", "[1]").unwrap();

        let other = SqliteBlobStore::new(connection::open_db(dir.path()).unwrap());
        assert_eq!(other.get("tasks").unwrap(), None);

        s.flush().unwrap();
        assert_eq!(other.get("tasks").unwrap().as_deref(), Some("[1]"));
        // Later writes on the same store run in autocommit mode.
        s.set("tasks", "[2]").unwrap();
        s.flush().unwrap();
        assert_eq!(other.get("tasks").unwrap().as_deref(), Some("[2]"));
    }

    #[test]
    fn test_locked_store_rolls_back_when_dropped() {
        let dir = TempDir::new().unwrap();
        connection::init_db(dir.path()).unwrap();
        let mut s = SqliteBlobStore::locked(connection::open_db(dir.path()).unwrap()).unwrap();
        s.set("tasks", "[1]").unwrap();
        drop(s);

        let other = SqliteBlobStore::new(connection::open_db(dir.path()).unwrap());
        assert_eq!(other.get("tasks").unwrap(), None);
    }

    #[test]
    fn test_second_writer_waits_for_lock() {
        let dir = TempDir::new().unwrap();
        connection::init_db(dir.path()).unwrap();
        let first = SqliteBlobStore::locked(connection::open_db(dir.path()).unwrap()).unwrap();

        let conn = connection::open_db(dir.path()).unwrap();
        conn.busy_timeout(std::time::Duration::from_millis(50)).unwrap();
        assert!(SqliteBlobStore::locked(conn).is_err());
        drop(first);

        let conn = connection::open_db(dir.path()).unwrap();
        assert!(SqliteBlobStore::locked(conn).is_ok());
    }
}
