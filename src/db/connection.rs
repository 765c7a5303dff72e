use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::Connection;

use crate::error::TasklistError;

use super::migrations;

/// Directory holding the database and config of a project.
pub const DATA_DIR: &str = ".tasklist";

/// Find the project root by walking up from `start` (or the current directory)
/// until a directory containing `.tasklist/` is found.
pub fn find_project_root(start: Option<&Path>) -> Result<PathBuf, TasklistError> {
    find_project_root_from(&env::current_dir()?, start)
}

/// Like [`find_project_root`], resolving a relative `start` against `cwd` so
/// the walk can climb above it.
pub fn find_project_root_from(cwd: &Path, start: Option<&Path>) -> Result<PathBuf, TasklistError> {
    let mut dir = match start {
        Some(p) => cwd.join(p),
        None => cwd.to_path_buf(),
    };
    loop {
        if dir.join(DATA_DIR).is_dir() {
            return Ok(dir);
        }
        if !dir.pop() {
            return Err(TasklistError::not_initialized());
        }
    }
}

/// Get the path to the tasklist database under a project root.
pub fn db_path(root: &Path) -> PathBuf {
    root.join(DATA_DIR).join("tasklist.db")
}

/// Get the config file path under a project root.
pub fn config_path(root: &Path) -> PathBuf {
    root.join(DATA_DIR).join("config.json")
}

/// Open a connection to the database. Returns error if not initialized.
pub fn open_db(root: &Path) -> Result<Connection, TasklistError> {
    let path = db_path(root);
    if !path.exists() {
        return Err(TasklistError::not_initialized());
    }
    let conn = Connection::open(&path)?;
    configure_connection(&conn)?;
    Ok(conn)
}

/// Initialize the database: create directories, database, and run migrations.
pub fn init_db(root: &Path) -> Result<PathBuf, TasklistError> {
    let path = db_path(root);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let conn = Connection::open(&path)?;
    configure_connection(&conn)?;
    migrations::run_migrations(&conn)?;
    Ok(path)
}

fn configure_connection(conn: &Connection) -> Result<(), TasklistError> {
    conn.execute_batch(
        "PRAGMA busy_timeout=5000;
         PRAGMA journal_mode=WAL;",
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_find_project_root_walks_up() {
        let dir = TempDir::new().unwrap();
        init_db(dir.path()).unwrap();
        let nested = dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        let root = find_project_root(Some(nested.as_path())).unwrap();
        assert_eq!(root, dir.path());
    }

    #[test]
    fn test_relative_start_climbs_above_cwd() {
        let dir = TempDir::new().unwrap();
        init_db(dir.path()).unwrap();
        let cwd = dir.path().join("x");
        fs::create_dir_all(cwd.join("sub").join("y")).unwrap();

        let root = find_project_root_from(&cwd, Some(Path::new("sub/y"))).unwrap();
        assert_eq!(root, dir.path());
        let root = find_project_root_from(&cwd, None).unwrap();
        assert_eq!(root, dir.path());
    }

    #[test]
    fn test_absolute_start_ignores_cwd() {
        let project = TempDir::new().unwrap();
        init_db(project.path()).unwrap();
        let elsewhere = TempDir::new().unwrap();
        let root = find_project_root_from(elsewhere.path(), Some(project.path())).unwrap();
        assert_eq!(root, project.path());
    }

    #[test]
    fn test_open_uninitialized() {
        let dir = TempDir::new().unwrap();
        let err = open_db(dir.path()).unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::NotInitialized);
    }
}
