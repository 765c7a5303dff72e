pub mod commands;
pub mod init;
pub mod task;
pub mod list;
pub mod stats;

pub use commands::*;

use std::path::Path;

use crate::app::TaskList;
use crate::config::Config;
use crate::db::{connection, SqliteBlobStore};
use crate::error::TasklistError;
use crate::output;

/// Open the task list of the project containing `dir` (or the current directory).
///
/// The database write lock is held from here until the list's first save, so
/// concurrent invocations apply their changes one after another.
pub fn open_list(dir: Option<&Path>) -> Result<TaskList<SqliteBlobStore>, TasklistError> {
    let root = connection::find_project_root(dir)?;
    let conn = connection::open_db(&root)?;
    let config = Config::load(&root);
    Ok(TaskList::open(SqliteBlobStore::locked(conn)?, config))
}

/// Map a handler result to an exit code, printing the error if any.
pub fn finish(result: Result<i32, TasklistError>, json_output: bool) -> i32 {
    match result {
        Ok(code) => code,
        Err(e) => {
            if json_output {
                output::json::print(&output::json::error(&e));
            } else {
                eprintln!("Error: {}", e.message);
            }
            1
        }
    }
}
